pub mod drawing;
pub mod geometry;
pub mod library;
pub mod rotation;
pub mod text;

pub use drawing::*;
pub use geometry::*;
pub use library::*;
pub use rotation::*;
pub use text::*;
