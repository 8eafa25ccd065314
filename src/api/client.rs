//! Ticket service API client.
//!
//! This module provides the HTTP client for the ticket service REST API.
//! Every operation issues exactly one request; there is no retry, caching,
//! or client-imposed timeout. Requests run to completion or transport
//! failure.

use reqwest::{header, Client, Method, Response, StatusCode};
use tracing::{debug, instrument};

use super::error::{ApiError, Result};
use super::types::{NewTicket, Ticket, User};

/// The ticket service API client.
///
/// Provides async methods for listing, creating, and mutating tickets and
/// for listing assignable users. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct TicketClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the ticket service.
    base_url: String,
}

impl TicketClient {
    /// Create a new client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build().map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all tickets.
    ///
    /// Calls `GET /api/tickets`.
    #[instrument(skip(self))]
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let url = format!("{}/api/tickets", self.base_url);
        let tickets: Vec<Ticket> = self.get(&url).await?;
        debug!("Fetched {} tickets", tickets.len());
        Ok(tickets)
    }

    /// Fetch all users.
    ///
    /// Calls `GET /api/users`.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/api/users", self.base_url);
        let users: Vec<User> = self.get(&url).await?;
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Fetch a single ticket by id.
    ///
    /// Calls `GET /api/tickets/{id}`.
    #[instrument(skip(self))]
    pub async fn get_ticket(&self, id: u64) -> Result<Ticket> {
        let url = self.ticket_url(id);
        self.get(&url).await.map_err(|e| {
            if matches!(e, ApiError::NotFound(_)) {
                ApiError::NotFound(format!("Ticket {} not found", id))
            } else {
                e
            }
        })
    }

    /// Create a new ticket with the given description.
    ///
    /// Calls `POST /api/tickets`. The server assigns the id and returns the
    /// full ticket record.
    #[instrument(skip(self), fields(description = %description))]
    pub async fn create_ticket(&self, description: &str) -> Result<Ticket> {
        let url = format!("{}/api/tickets", self.base_url);
        let body = NewTicket::new(description);

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let ticket: Ticket = self.handle_response(response).await?;
        debug!(ticket_id = ticket.id, "Created ticket");
        Ok(ticket)
    }

    /// Change a ticket's completion state.
    ///
    /// The wire protocol is asymmetric by design and must be preserved:
    /// `PUT /api/tickets/{id}/complete` marks complete,
    /// `DELETE /api/tickets/{id}/complete` marks incomplete.
    #[instrument(skip(self))]
    pub async fn set_completed(&self, id: u64, completed: bool) -> Result<()> {
        let url = format!("{}/complete", self.ticket_url(id));
        let method = if completed {
            Method::PUT
        } else {
            Method::DELETE
        };
        self.send_empty(method, &url).await
    }

    /// Assign a ticket to a user.
    ///
    /// Calls `PUT /api/tickets/{id}/assign/{userId}`.
    #[instrument(skip(self))]
    pub async fn assign(&self, id: u64, user_id: u64) -> Result<()> {
        let url = format!("{}/assign/{}", self.ticket_url(id), user_id);
        self.send_empty(Method::PUT, &url).await
    }

    /// Remove a ticket's assignee.
    ///
    /// Calls `PUT /api/tickets/{id}/unassign`.
    #[instrument(skip(self))]
    pub async fn unassign(&self, id: u64) -> Result<()> {
        let url = format!("{}/unassign", self.ticket_url(id));
        self.send_empty(Method::PUT, &url).await
    }

    /// Build the URL for a single ticket resource.
    fn ticket_url(&self, id: u64) -> String {
        format!("{}/api/tickets/{}", self.base_url, id)
    }

    /// Perform a GET request and decode the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Send a bodyless request where only the status matters.
    async fn send_empty(&self, method: Method, url: &str) -> Result<()> {
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            Err(error_from_response(status, &url, &body))
        }
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            Err(error_from_response(status, &url, &body))
        }
    }
}

/// Classify a transport failure: connection refusals get their own variant
/// so the UI can suggest checking that the service is running.
fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_connect() {
        ApiError::ConnectionFailed(error.to_string())
    } else {
        ApiError::Network(error)
    }
}

/// Create an appropriate error from an HTTP error response.
///
/// The service reports errors as `{"message": "..."}`; fall back to the
/// request URL when no message is present.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
    let context = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| url.to_string());

    ApiError::from_status(status, &context)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_removes_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:3333/"),
            "http://localhost:3333"
        );
    }

    #[test]
    fn test_normalize_base_url_handles_multiple_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:3333///"),
            "http://localhost:3333"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_path() {
        assert_eq!(
            normalize_base_url("http://tickets.internal/v1/"),
            "http://tickets.internal/v1"
        );
    }

    #[test]
    fn test_ticket_url() {
        let client = TicketClient::new("http://localhost:3333/").unwrap();
        assert_eq!(client.ticket_url(7), "http://localhost:3333/api/tickets/7");
    }

    #[test]
    fn test_error_from_response_uses_message_field() {
        let err = error_from_response(
            StatusCode::NOT_FOUND,
            "http://localhost:3333/api/tickets/9",
            r#"{"message": "Cannot find ticket ID 9"}"#,
        );
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Cannot find ticket ID 9"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_response_falls_back_to_url() {
        let err = error_from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "http://localhost:3333/api/tickets",
            "not json",
        );
        match err {
            ApiError::ServerError(msg) => {
                assert!(msg.contains("http://localhost:3333/api/tickets"))
            }
            _ => panic!("Expected ServerError"),
        }
    }

    #[test]
    fn test_base_url_accessor() {
        let client = TicketClient::new("http://localhost:3333").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3333");
    }
}
