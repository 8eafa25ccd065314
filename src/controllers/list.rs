//! Ticket list controller.
//!
//! Owns the ticket and user collections, the client-side status filter,
//! and the state around the combined initial fetch and ticket creation.

use tracing::{debug, warn};

use crate::api::types::{Ticket, User};

/// Client-side status filter for the ticket list.
///
/// Derived view state only; never persisted and never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Show all tickets.
    #[default]
    All,
    /// Show only completed tickets.
    Completed,
    /// Show only incomplete tickets.
    Incomplete,
}

impl StatusFilter {
    /// Whether a ticket matches this filter.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => ticket.completed,
            StatusFilter::Incomplete => !ticket.completed,
        }
    }

    /// The next filter in cycling order: All -> Incomplete -> Completed.
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Incomplete,
            StatusFilter::Incomplete => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Incomplete => "Incomplete",
        }
    }
}

/// The ticket list controller.
///
/// Loading and adding have independent error slots so that a failed add
/// never discards the loaded collections.
#[derive(Debug, Default)]
pub struct ListController {
    /// The ticket collection, in server order plus local appends.
    tickets: Vec<Ticket>,
    /// The user collection, fetched together with the tickets.
    users: Vec<User>,
    /// Whether the initial fetch is in flight.
    loading: bool,
    /// Error from the initial fetch, if any.
    error: Option<String>,
    /// Whether a create request is in flight.
    adding: bool,
    /// Error from the last create request, if any.
    add_error: Option<String>,
    /// The active status filter.
    filter: StatusFilter,
    /// Request generation for the fetch; stale responses are discarded.
    generation: u64,
}

impl ListController {
    /// Create a new, empty list controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a combined tickets+users fetch.
    ///
    /// Clears the prior fetch error and returns the generation token the
    /// matching [`finish_load`](Self::finish_load) call must present.
    pub fn begin_load(&mut self) -> u64 {
        self.loading = true;
        self.error = None;
        self.generation += 1;
        self.generation
    }

    /// Apply the result of a combined fetch.
    ///
    /// Both collections come from a single logical operation: either both
    /// requests succeeded or the whole operation failed with no partial
    /// data. Results from a superseded fetch are discarded.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<(Vec<Ticket>, Vec<User>), String>,
    ) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding stale fetch result");
            return;
        }

        self.loading = false;
        match result {
            Ok((tickets, users)) => {
                debug!(tickets = tickets.len(), users = users.len(), "Fetch complete");
                self.tickets = tickets;
                self.users = users;
            }
            Err(message) => {
                warn!(error = %message, "Fetch failed");
                self.error = Some(message);
            }
        }
    }

    /// Start a create request for the given description.
    ///
    /// Empty or whitespace-only descriptions are rejected before any state
    /// change and no request is issued. Returns the trimmed description to
    /// send, or `None` when the input was rejected or a create is already
    /// pending.
    pub fn begin_add(&mut self, description: &str) -> Option<String> {
        let trimmed = description.trim();
        if trimmed.is_empty() || self.adding {
            return None;
        }

        self.adding = true;
        self.add_error = None;
        Some(trimmed.to_string())
    }

    /// Apply the result of a create request.
    ///
    /// On success the server-returned ticket is appended at the end of the
    /// collection; on failure the collection is left unchanged.
    pub fn finish_add(&mut self, result: Result<Ticket, String>) {
        self.adding = false;
        match result {
            Ok(ticket) => {
                debug!(ticket_id = ticket.id, "Ticket created");
                self.tickets.push(ticket);
            }
            Err(message) => {
                warn!(error = %message, "Create failed");
                self.add_error = Some(message);
            }
        }
    }

    /// Set the status filter.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Cycle to the next status filter.
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    /// The active status filter.
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// The tickets matching the active filter, in original relative order.
    ///
    /// A view over the collection; filtering never mutates it.
    pub fn filtered(&self) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    /// Resolve an assignee id to a display name.
    ///
    /// `None` renders as "Unassigned"; an id with no matching user renders
    /// as "Unknown User" rather than failing.
    pub fn assignee_name(&self, assignee_id: Option<u64>) -> &str {
        match assignee_id {
            None => "Unassigned",
            Some(id) => self
                .users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.name.as_str())
                .unwrap_or("Unknown User"),
        }
    }

    /// The full ticket collection.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// The user collection.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Whether the initial fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The fetch error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a create request is in flight.
    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// The create error, if any.
    pub fn add_error(&self) -> Option<&str> {
        self.add_error.as_deref()
    }
}
