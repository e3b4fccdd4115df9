//! API request data models.
//!
//! These models define the public API contract. The response side of the
//! contract is [`crate::screening::ScreeningOutcome`], shared with the
//! screening client since endpoints relay it verbatim.

pub mod analyze;
