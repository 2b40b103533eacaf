pub mod column;
pub mod manifest;

pub use column::ColumnBlock;
pub use manifest::LayoutManifest;
