pub mod router;
pub mod session;

mod views;

pub use router::router;
