//! Drawing output and font-backed text measurement

mod primitives;
#[cfg(feature = "cosmic")]
mod text;

pub use primitives::*;
#[cfg(feature = "cosmic")]
pub use text::*;
