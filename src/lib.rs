pub mod error;
pub mod math;
pub mod operations;
pub mod plan;

pub use error::{Result, WallPanelError};
