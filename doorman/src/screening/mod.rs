//! Compliance screening against the remote vision/language provider.
//!
//! This module is organized into:
//!
//! - **[`prompts`]**: the fixed policy statements sent as system messages
//! - **[`messages`]**: normalization of caller payloads into the provider's
//!   chat-message wire format
//! - **[`client`]**: the single-shot provider call and its result envelope

pub mod client;
pub mod messages;
pub mod prompts;

pub use client::{ScreeningClient, ScreeningOutcome};
