//! Coordination-free, time-ordered 64-bit Snowflake IDs.
//!
//! Each ID packs the milliseconds since a fixed epoch, a 10-bit node ID and a
//! 12-bit per-millisecond sequence:
//!
//! ```text
//! | reserved (1) | timestamp (41) | node ID (10) | sequence (12) |
//! ```
//!
//! Construct one [`SnowflakeGenerator`] per process and share it:
//!
//! ```
//! use snowmint::{GeneratorConfig, SnowflakeGenerator};
//! use std::{sync::Arc, thread};
//!
//! let generator = Arc::new(SnowflakeGenerator::new(
//!     GeneratorConfig::default().with_node_id(3),
//! )?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let generator = Arc::clone(&generator);
//!         thread::spawn(move || generator.next_id())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     let id = handle.join().unwrap()?;
//!     assert_eq!(id.node_id(), 3);
//! }
//! # Ok::<(), snowmint::Error>(())
//! ```
//!
//! Without an explicit node ID the generator derives one from the host's
//! private IPv4 address ([`PrivateIpv4Resolver`]). Other strategies plug in
//! through [`NodeResolver`].
//!
//! ## Features
//!
//! - `network` (default): interface enumeration for [`PrivateIpv4Resolver`]
//! - `tracing` (default): `tracing` spans and events
//! - `serde`: (de)serialization for [`SnowflakeId`], [`NodeId`] and
//!   [`GeneratorConfig`]
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning)
//! - `cache-padded`: pad the generator state to a cache line

mod error;
mod generator;
mod id;
mod node;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::node::*;
pub use crate::time::*;
