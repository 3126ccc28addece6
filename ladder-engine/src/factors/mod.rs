//! Per-criterion scoring factors, one pure function per file.
//!
//! Each factor maps raw counters to a 0–100 score under the current tier's
//! thresholds. The weighted combination lives in [`crate::formula`].

pub mod accuracy;
pub mod consistency;
pub mod inactivity;
pub mod time;
pub mod volume;
