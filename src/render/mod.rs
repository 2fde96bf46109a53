mod animation;
mod layer;
mod paint;
mod store;

pub use self::animation::ScaleAnimations;
pub use self::layer::EffectsLayer;
pub use self::paint::{cursor_shape, spotlight_mesh, Layers};
pub use self::store::EguiThemeStore;
