//! CLI command implementations

mod config_gen;
mod convert;

pub use config_gen::config_generate;
pub use convert::convert_sql;
