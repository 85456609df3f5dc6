mod dims;
mod ffi;
mod view;

pub use dims::*;
pub use ffi::*;
pub use view::*;
