pub mod libs;

pub use crate::libs::error::{Result, TadError};
pub use crate::libs::io::*;
