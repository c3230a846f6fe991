//! Resource description types shared by the compiler and backends.

mod buffer;
mod common;
mod image;

pub use buffer::{BufferInfo, BufferUsage};
pub use common::{Extent3d, Format};
pub use image::{ImageFlags, ImageInfo, ImageType, ImageUsage};
