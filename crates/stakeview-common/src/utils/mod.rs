//! Utility functions and helpers

mod time;

pub use time::{current_timestamp, format_date, format_remaining, format_timestamp};
