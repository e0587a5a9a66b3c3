mod config;
mod errors;

pub use config::*;
pub use errors::*;
