//! Gateway wire types.

pub mod response;

pub use response::{ApiResponse, error_codes};
