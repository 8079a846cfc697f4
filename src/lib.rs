//! FOIA Desk
//!
//! A command-line tracker for public-records requests: submission through
//! assignment, fulfillment or denial, appeal, and closure, with deadline
//! tracking backed by SQLite.

pub mod cli;
pub mod core;
pub mod entities;
