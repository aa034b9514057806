pub mod ip;
pub mod time_format;

pub use ip::{extract_client_ip, remote_ip};
pub use time_format::{now_formatted, unix_to_time};
