//! # adst-core
//!
//! Calendar conversion and rule-driven automatic Daylight Saving Time for
//! real-time clocks.
//!
//! A clock keeps a 32-bit counter of elapsed seconds since 1970-01-01 in local
//! standard time. This crate turns that counter into calendar fields and back,
//! computes weekdays, and decides from a pair of recurring rules ("second Sunday
//! in March at 02:00") whether the DST offset applies right now.
//!
//! ## Quick start
//!
//! ```rust
//! use adst_core::{break_time, get_dst_offset, preset};
//!
//! let us = preset("us").unwrap();
//!
//! // 2026-07-04T12:00:00 standard time
//! let summer = break_time(1_783_166_400);
//! assert_eq!(get_dst_offset(&summer, &us), 1);
//!
//! // 2026-01-15T12:00:00 standard time
//! let winter = break_time(1_768_478_400);
//! assert_eq!(get_dst_offset(&winter, &us), 0);
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — elapsed seconds ↔ calendar fields, weekday, leap years
//! - [`rule`] — recurring DST rules and their packed 9-byte layout
//! - [`dst`] — rule resolution, offset evaluation, DST modes, per-year cache
//! - [`presets`] — built-in rule sets for common regions
//! - [`error`] — Error types

pub mod calendar;
pub mod dst;
pub mod error;
pub mod presets;
pub mod rule;

pub use calendar::{break_time, dotw, make_time, CalendarRecord};
pub use dst::{
    dst_init, get_dst_offset, local_time, resolve_rule, DstCache, DstMode, DstTransitions,
};
pub use error::{AdstError, Result};
pub use presets::{preset, DstPreset, PRESETS};
pub use rule::{DstRule, DstRules};
