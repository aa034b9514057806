pub mod constants;
pub mod middleware;
pub mod services;
pub mod types;

pub use types::{ApiResponse, ErrorCode, EsData};
