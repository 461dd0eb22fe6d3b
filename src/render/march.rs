use crate::field::FieldSource;
use crate::math::Ray;
use crate::render::settings::RenderTuning;

/// Result of the coarse march: where the loop stopped, the field value
/// there, and the bracketing sample just before the crossing. The step
/// count feeds the iteration-cost debug view.
#[derive(Clone, Copy, Debug)]
pub struct MarchOutcome {
    pub t: f32,
    pub d_inside: f32,
    pub d_outside: f32,
    pub last_step: f32,
    pub steps: u32,
}

/// Bounded-step sphere trace. Not exact sphere tracing: the field is a
/// heuristic step oracle, so every advance takes `max(F, min_step)` and
/// the loop runs until the field goes negative, the ray exceeds
/// `max_distance`, or the budget runs out.
pub fn coarse_march(field: &impl FieldSource, ray: Ray, tuning: &RenderTuning) -> MarchOutcome {
    let mut t = 0.0f32;
    let mut d = tuning.hit_epsilon;
    let mut d_outside = tuning.hit_epsilon;
    let mut last_step = tuning.min_step;
    let mut steps = 0u32;

    while steps < tuning.march_max_steps {
        steps += 1;
        d = field.sample(ray.at(t));
        // A NaN sample falls through here as well; classification
        // rejects it afterwards.
        if !(d >= 0.0) {
            break;
        }
        if t > tuning.max_distance {
            break;
        }
        d_outside = d;
        last_step = d.max(tuning.min_step);
        t += last_step;
    }

    MarchOutcome {
        t,
        d_inside: d,
        d_outside,
        last_step,
        steps,
    }
}

/// Miss policy: the march found a surface only if it exited with a
/// finite field value within one grid texel of zero.
pub fn crossed_surface(outcome: &MarchOutcome, tolerance: f32) -> bool {
    outcome.d_inside.is_finite() && outcome.d_inside.abs() <= tolerance
}

#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub position: crate::math::Vec3,
    pub converged: bool,
    pub steps: u32,
}

/// Two-stage convergence onto the zero level set: linear interpolation
/// between the bracketing samples, then fixed-point relaxation
/// `pos += dir * F(pos)`. Relaxation relies on the field's near-unit
/// gradient around the iso-surface; if the budget runs out the
/// best-effort position is still returned, flagged unconverged.
pub fn refine(
    field: &impl FieldSource,
    ray: Ray,
    outcome: &MarchOutcome,
    tuning: &RenderTuning,
) -> Hit {
    let mut t = outcome.t;
    let denom = outcome.d_outside - outcome.d_inside;
    if denom.abs() > f32::EPSILON {
        t += outcome.last_step * outcome.d_inside / denom;
    }

    let mut pos = ray.at(t);
    let mut converged = false;
    let mut steps = 0u32;
    while steps < tuning.refine_max_steps {
        steps += 1;
        let d = field.sample(pos);
        if d.abs() < tuning.hit_epsilon {
            converged = true;
            break;
        }
        pos = pos + (ray.direction * d);
    }

    Hit {
        position: pos,
        converged,
        steps,
    }
}
