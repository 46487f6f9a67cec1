pub mod logging;
pub use logging::*;

mod rect;
pub use rect::*;
