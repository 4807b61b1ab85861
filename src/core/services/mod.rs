//! Tracker database domain services.
//!
//! Services format the data inside the database to make it easier to
//! consume by other parts, typically the administrative delivery layer.
//! They decouple the internal data structures from the way the data is
//! delivered, and they are the only consumers of the read-traversal
//! capability besides the whitelist:
//!
//! - [Torrent services](crate::core::services::torrent): info about one
//!   swarm, including its peer list, and bulk listings.
//! - [Statistics services](crate::core::services::statistics): aggregate
//!   metrics about the whole database.
pub mod statistics;
pub mod torrent;
