//! quietdoc - frameless document viewer window
//!
//! The crate provides the interaction layer of a window without OS
//! decorations: border hit testing, move/resize sessions, cursor feedback,
//! reduced-chrome mode and forwarding of pointer events from nested content
//! regions. `window::WinitWindowImpl` runs it on a winit event loop.

pub mod utils;
pub mod window;

pub use utils::error::{QuietDocError, Result};
