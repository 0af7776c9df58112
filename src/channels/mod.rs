// src/channels/mod.rs

//! Channel reference validation and line eligibility.
//!
//! - [`analyzer`] decides which `@name` tokens are usable, by counting how
//!   often each one appears on the opposite side (odd means paired).
//! - [`resolver`] turns those verdicts into the set of manifest lines that
//!   are allowed to run.
//!
//! Tokens are only checked here; no channel object is ever created for them.

pub mod analyzer;
pub mod resolver;

pub use analyzer::{analyze_channels, channel_name, ChannelRefs, ValidChannels};
pub use resolver::{resolve_eligible, EligibleLines};
