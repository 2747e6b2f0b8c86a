pub mod errors;
pub mod models;
pub mod repo;
pub mod stats;

pub use errors::*;
pub use models::*;
pub use repo::*;
pub use stats::*;
