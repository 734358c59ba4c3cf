mod layout;
#[cfg(feature = "serde")]
mod serde;
mod snowflake;

pub use snowflake::*;
