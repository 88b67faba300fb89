//! Client layer for the remote charging API.
//!
//! This module provides:
//! - Wire types ([`ChargerId`], [`StatusRecord`], [`StatusUpdate`],
//!   [`ControlAction`], [`ControlRequest`], [`ControlOutcome`])
//! - The error taxonomy ([`ApiError`])
//! - The client trait ([`StatusClient`])
//! - The production REST implementation ([`RestClient`])

mod client;
mod error;
mod rest;
mod types;


pub use client::StatusClient;
pub use error::ApiError;
pub use rest::{API_KEY_HEADER, RestClient};
pub use types::{
    ChargerId, ControlAction, ControlOutcome, ControlRequest, StatusRecord, StatusUpdate,
};
