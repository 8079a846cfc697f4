//! Core module - fundamental types and utilities

pub mod config;
pub mod error;
pub mod identity;
pub mod letter;
pub mod lifecycle;
pub mod reporting;
pub mod store;

pub use config::Config;
pub use error::{DeskError, Result};
pub use identity::{IdParseError, RecordId, RecordPrefix};
pub use letter::{LetterError, LetterGenerator, LetterKind};
pub use lifecycle::LifecycleEngine;
pub use reporting::{AgencyStats, OverdueRequest, RequestDetails, StatusBreakdown};
pub use store::{RequestFilter, Store};
