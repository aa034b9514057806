pub mod headers;
pub mod timing;

pub use headers::default_headers;
pub use timing::TimingMiddleware;
