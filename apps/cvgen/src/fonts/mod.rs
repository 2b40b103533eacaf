pub mod face;
pub mod resolver;

pub use face::LoadedFont;
pub use resolver::{resolve, FontSpec};
