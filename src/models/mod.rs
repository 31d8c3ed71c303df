pub mod common;
pub mod image;
pub mod text;

pub use self::common::*;
pub use self::image::*;
pub use self::text::*;
