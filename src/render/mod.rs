//! Export rendering for tint.
//!
//! Flattens the colour layer under the line art and turns the result into
//! PNG bytes, files, or printable pages. Nothing here mutates a canvas.

mod composite;
mod png;
mod print;

pub use composite::composite;
pub use png::{encode_png, write_png};
pub use print::{layout_page, PageSize, PngPage, PrintSurface, SystemViewer};
