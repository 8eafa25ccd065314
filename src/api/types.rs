//! Ticket service request and response types.
//!
//! These types model the JSON bodies exchanged with the ticket service
//! under `/api/tickets` and `/api/users`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticket.
///
/// Returned by `GET /api/tickets`, `GET /api/tickets/{id}` and
/// `POST /api/tickets`. Identifiers are always server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// The server-assigned ticket id.
    pub id: u64,
    /// The ticket description.
    pub description: String,
    /// Whether the ticket is completed.
    #[serde(default)]
    pub completed: bool,
    /// The assigned user's id, if any.
    #[serde(default)]
    pub assignee_id: Option<u64>,
}

impl Ticket {
    /// Human-readable status label.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Incomplete"
        }
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.id, self.description)
    }
}

/// An assignable user.
///
/// Returned by `GET /api/users`. Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user id.
    pub id: u64,
    /// The user's display name.
    pub name: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Request body for `POST /api/tickets`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTicket {
    /// The description of the ticket to create.
    pub description: String,
}

impl NewTicket {
    /// Create a new ticket request body.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}
