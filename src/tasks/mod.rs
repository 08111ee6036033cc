//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Summary sweep: drops expired summaries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
