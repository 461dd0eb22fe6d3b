use crate::config::{vec3_from, RenderFrameConfig};
use crate::math::{rotate, Quat, Ray, Vec3};

/// Camera pose for one frame: a position and a unit quaternion. Rays
/// are generated in camera space (+z forward, +x right, +y up) and
/// rotated into the world.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Clone, Copy, Debug)]
pub enum Projection {
    Perspective,
    /// Parallel rays along the camera forward axis; the image plane
    /// spans `half_height` world units above and below center.
    Orthographic { half_height: f32 },
}

impl View {
    pub fn from_frame(frame: &RenderFrameConfig) -> Self {
        Self {
            position: vec3_from(frame.camera_position),
            rotation: Quat::new(
                frame.camera_rotation[0],
                frame.camera_rotation[1],
                frame.camera_rotation[2],
                frame.camera_rotation[3],
            )
            .normalize(),
        }
    }

    /// Ray through the center of pixel `(x, y)`.
    pub fn primary_ray(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        projection: Projection,
    ) -> Ray {
        let aspect = width as f32 / height as f32;
        let u = ((x as f32 + 0.5) / width as f32) * 2.0 - 1.0;
        let v = 1.0 - ((y as f32 + 0.5) / height as f32) * 2.0;

        match projection {
            Projection::Perspective => {
                let local = Vec3::new(u * aspect, v, 1.0).normalize();
                Ray {
                    origin: self.position,
                    direction: rotate(self.rotation, local),
                }
            }
            Projection::Orthographic { half_height } => {
                let offset = Vec3::new(u * aspect * half_height, v * half_height, 0.0);
                Ray {
                    origin: self.position + rotate(self.rotation, offset),
                    direction: rotate(self.rotation, Vec3::new(0.0, 0.0, 1.0)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_view() -> View {
        View {
            position: Vec3::splat(0.0),
            rotation: Quat::IDENTITY,
        }
    }

    #[test]
    fn center_pixel_looks_forward() {
        let view = identity_view();
        let ray = view.primary_ray(32, 32, 64, 64, Projection::Perspective);
        assert!((ray.direction - Vec3::new(0.0, 0.0, 1.0)).length() < 0.05);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pixel_above_center_points_up() {
        let view = identity_view();
        let ray = view.primary_ray(32, 8, 64, 64, Projection::Perspective);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let view = identity_view();
        let proj = Projection::Orthographic { half_height: 4.0 };
        let a = view.primary_ray(0, 0, 64, 64, proj);
        let b = view.primary_ray(63, 63, 64, 64, proj);
        assert!((a.direction - b.direction).length() < 1e-6);
        assert!((a.origin - b.origin).length() > 1.0);
    }
}
