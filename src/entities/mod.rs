//! Entity type definitions
//!
//! One request plus its dependent records:
//!
//! - [`Request`] - the public-records request and its deadline
//! - [`FulfillmentPackage`] - documents released in response (at most one)
//! - [`Denial`] - a denial decision with cited exemptions
//! - [`Appeal`] - appeals against a denial, decided once each
//! - [`Note`] - append-only internal case notes

pub mod appeal;
pub mod denial;
pub mod fulfillment;
pub mod note;
pub mod request;

pub use appeal::{Appeal, AppealStatus};
pub use denial::Denial;
pub use fulfillment::{FulfillmentInput, FulfillmentPackage};
pub use note::Note;
pub use request::{Request, RequestIntake, RequestStatus};
