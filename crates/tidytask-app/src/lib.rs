//! Application layer for tidytask.
//!
//! This crate provides the mutation service and persistence contract
//! shared by every front end: all task/category edits, share imports and
//! settings changes go through [`UserService`], which persists through a
//! [`UserStore`].

/// The mutation service.
pub mod service;
/// Completion statistics.
pub mod stats;
/// Persistence contract.
pub mod store;

pub use service::{NewTask, ServiceError, TaskUpdate, UserService};
pub use stats::TaskStats;
pub use store::UserStore;
