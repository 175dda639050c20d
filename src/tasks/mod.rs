//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweep: removes expired cache entries once per TTL period

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
