pub mod convert;

pub use convert::{ConvertService, convert_routes};
