//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a client.
//!
//! # Tasks
//! - Expiration sweep: Removes expired entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
