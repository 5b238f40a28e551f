//! pokereports-dashboard library root.
//!
//! The page controller and its collaborators live here so that the
//! `pokereports` binary and the integration tests drive the same code.

pub mod categories;
pub mod config;
pub mod controller;
pub mod handoff;
pub mod input;
pub mod notify;
pub mod render;
pub mod state;

pub use crate::controller::{ControllerError, PageController, PendingDelete};
