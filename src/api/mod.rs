//! Ticket service API client and types.
//!
//! This module provides the interface for communicating with the remote
//! ticket service REST API.

mod client;
pub mod error;
pub mod types;

pub use client::TicketClient;
pub use error::ApiError;
