mod config;
mod mutex;
mod once;
mod snowflake;
mod status;

pub use config::*;
pub(crate) use mutex::*;
pub use once::*;
pub use snowflake::*;
pub use status::*;
