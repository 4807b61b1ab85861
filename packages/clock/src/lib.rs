//! A mockable clock for the swarmdb packages.
//!
//! Peer expiry depends on wall-clock time, which makes it untestable
//! against the system clock. This crate routes every timestamp through the
//! [`clock::Time`] trait so that production code reads the system time
//! ([`clock::Working`]) while tests read a settable fixed time
//! ([`clock::Stopped`]).
//!
//! Timestamps are `DurationSinceUnixEpoch` values, a `std::time::Duration`
//! since the Unix Epoch. They are independent of the system time zone; see
//! the [Unix time Wikipedia entry](https://en.wikipedia.org/wiki/Unix_time).

pub mod clock;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
