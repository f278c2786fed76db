//! Core type aliases used throughout the crate.

/// Unique identifier for a store item (its catalog name).
pub type ItemId = String;

/// A player's running currency balance.
///
/// Signed: a string of wrong answers can drive it below zero.
pub type Capital = i64;

/// A clock reading in seconds, supplied by the host.
///
/// Only differences between readings of the same question are ever used, so
/// any monotone reference point works.
pub type Timestamp = f64;
