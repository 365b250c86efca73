mod map;
mod projector;
mod settings;
pub mod svg;

pub use map::MapRenderer;
pub use projector::SphereProjector;
pub use settings::{Color, RenderSettings};
