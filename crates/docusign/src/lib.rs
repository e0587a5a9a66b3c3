mod client;
mod config;
mod errors;
mod models;

pub use client::*;
pub use config::*;
pub use errors::*;
pub use models::*;
