//! Helpers shared by the server and load generator binaries.

pub mod types;
pub mod utils;
pub mod admin_http;
