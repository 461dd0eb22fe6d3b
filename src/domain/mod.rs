pub mod light;
pub mod material;
pub mod presets;
pub mod scene;

pub use light::{Light, LightKind};
pub use material::Material;
pub use scene::Scene;
