pub mod march;
pub mod pipeline;
pub mod settings;
pub mod shade;
pub mod texture;
pub mod tonemap;
pub mod validation;
pub mod view;

pub use pipeline::{render_frame, shade_pixel, PixelSample, RenderInputs};
pub use settings::{DebugView, RenderSettings, RenderTuning};
pub use view::{Projection, View};
