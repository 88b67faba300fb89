//! charger-watch: EV charger status client and change monitor
//!
//! A library for talking to a remote EV-charging status API and for
//! watching a set of chargers, reporting status transitions as they
//! are observed.

pub mod api;
pub mod config;
pub mod http;
pub mod monitor;
pub mod time;
