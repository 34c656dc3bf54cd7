pub mod oracle_config;
pub mod randomness_request;

pub use oracle_config::*;
pub use randomness_request::*;
