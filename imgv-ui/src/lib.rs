mod app;
mod error;

pub use app::run;
pub use error::{Error, Result};
