//! Ticket detail controller.
//!
//! Owns the single ticket shown on the detail screen and the state around
//! loading it and mutating its completion and assignment.

use tracing::{debug, warn};

use crate::api::types::Ticket;

/// What the caller should do after an action result has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing further to do.
    Done,
    /// The local copy may have diverged from the server; reload the ticket.
    Resync,
}

/// The ticket detail controller.
///
/// Load and action state are independent: an action failure surfaces an
/// error next to the ticket without discarding it, while a load failure
/// replaces the content.
#[derive(Debug, Default)]
pub struct DetailController {
    /// The id of the ticket being viewed, once a load has started.
    ticket_id: Option<u64>,
    /// The loaded ticket.
    ticket: Option<Ticket>,
    /// Whether a load is in flight.
    loading: bool,
    /// Error from the load, if any.
    error: Option<String>,
    /// Whether a mutation request is in flight.
    action_loading: bool,
    /// Error from the last mutation, if any.
    action_error: Option<String>,
    /// The assignee selection shown in the picker, seeded from the ticket.
    selected_assignee: Option<u64>,
    /// Request generation for loads; stale responses are discarded.
    generation: u64,
}

impl DetailController {
    /// Create a new, empty detail controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading the ticket with the given id.
    ///
    /// Safe to call again with a new id; each attempt clears both the load
    /// error and any lingering action error. Returns the generation token
    /// the matching [`finish_load`](Self::finish_load) call must present.
    pub fn begin_load(&mut self, id: u64) -> u64 {
        self.ticket_id = Some(id);
        self.loading = true;
        self.error = None;
        self.action_error = None;
        self.generation += 1;
        self.generation
    }

    /// Apply the result of a load.
    ///
    /// Results from a superseded load are discarded. On success the
    /// assignee selection is re-seeded from the fetched ticket, which also
    /// discards any optimistic selection a failed assignment left behind.
    pub fn finish_load(&mut self, generation: u64, result: Result<Ticket, String>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding stale load result");
            return;
        }

        self.loading = false;
        match result {
            Ok(ticket) => {
                debug!(ticket_id = ticket.id, "Ticket loaded");
                self.selected_assignee = ticket.assignee_id;
                self.ticket = Some(ticket);
            }
            Err(message) => {
                warn!(error = %message, "Ticket load failed");
                self.error = Some(message);
            }
        }
    }

    /// Start a completion-state change.
    ///
    /// No-op when no ticket is loaded or another action is pending.
    /// Returns the ticket id to issue the request against.
    pub fn begin_set_completion(&mut self) -> Option<u64> {
        let ticket = self.ticket.as_ref()?;
        if self.action_loading {
            return None;
        }

        self.action_loading = true;
        self.action_error = None;
        Some(ticket.id)
    }

    /// Apply the result of a completion-state change.
    ///
    /// On success the local `completed` field is updated optimistically to
    /// the requested value, without a refetch. On failure the prior value
    /// is kept, an action error is recorded, and a resync is requested.
    pub fn finish_set_completion(
        &mut self,
        completed: bool,
        result: Result<(), String>,
    ) -> ActionOutcome {
        self.action_loading = false;
        match result {
            Ok(()) => {
                if let Some(ticket) = self.ticket.as_mut() {
                    ticket.completed = completed;
                }
                ActionOutcome::Done
            }
            Err(message) => {
                warn!(error = %message, "Completion change failed");
                self.action_error = Some(message);
                ActionOutcome::Resync
            }
        }
    }

    /// Start an assignee change.
    ///
    /// `assignee` of `None` means unassign. No-op when no ticket is loaded
    /// or another action is pending. The picker selection is updated
    /// immediately; a failed request resyncs it from the server. Returns
    /// the ticket id to issue the request against.
    pub fn begin_set_assignee(&mut self, assignee: Option<u64>) -> Option<u64> {
        let ticket = self.ticket.as_ref()?;
        if self.action_loading {
            return None;
        }

        self.action_loading = true;
        self.action_error = None;
        self.selected_assignee = assignee;
        Some(ticket.id)
    }

    /// Apply the result of an assignee change.
    ///
    /// On success the local `assignee_id` is updated optimistically. On
    /// failure an action error is recorded and a resync is requested so the
    /// optimistic selection is replaced by the server's value.
    pub fn finish_set_assignee(
        &mut self,
        assignee: Option<u64>,
        result: Result<(), String>,
    ) -> ActionOutcome {
        self.action_loading = false;
        match result {
            Ok(()) => {
                if let Some(ticket) = self.ticket.as_mut() {
                    ticket.assignee_id = assignee;
                }
                ActionOutcome::Done
            }
            Err(message) => {
                warn!(error = %message, "Assignee change failed");
                self.action_error = Some(message);
                ActionOutcome::Resync
            }
        }
    }

    /// Clear all state when leaving the detail screen.
    pub fn clear(&mut self) {
        self.ticket_id = None;
        self.ticket = None;
        self.loading = false;
        self.error = None;
        self.action_loading = false;
        self.action_error = None;
        self.selected_assignee = None;
    }

    /// The id of the ticket being viewed.
    pub fn ticket_id(&self) -> Option<u64> {
        self.ticket_id
    }

    /// The loaded ticket.
    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_ref()
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The load error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a mutation request is in flight.
    pub fn is_action_loading(&self) -> bool {
        self.action_loading
    }

    /// The action error, if any.
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// The current assignee selection.
    pub fn selected_assignee(&self) -> Option<u64> {
        self.selected_assignee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: u64, completed: bool, assignee_id: Option<u64>) -> Ticket {
        Ticket {
            id,
            description: "Test ticket".to_string(),
            completed,
            assignee_id,
        }
    }

    fn loaded_controller(completed: bool, assignee_id: Option<u64>) -> DetailController {
        let mut detail = DetailController::new();
        let generation = detail.begin_load(5);
        detail.finish_load(generation, Ok(ticket(5, completed, assignee_id)));
        detail
    }

    #[test]
    fn test_begin_load_sets_loading_and_clears_errors() {
        let mut detail = DetailController::new();
        let generation = detail.begin_load(5);
        detail.finish_load(generation, Err("boom".to_string()));
        assert_eq!(detail.error(), Some("boom"));

        detail.begin_load(6);
        assert!(detail.is_loading());
        assert!(detail.error().is_none());
        assert_eq!(detail.ticket_id(), Some(6));
    }

    #[test]
    fn test_load_success_seeds_assignee_selection() {
        let detail = loaded_controller(false, Some(3));
        assert_eq!(detail.ticket().unwrap().id, 5);
        assert_eq!(detail.selected_assignee(), Some(3));
        assert!(!detail.is_loading());
    }

    #[test]
    fn test_load_success_unassigned_selection_empty() {
        let detail = loaded_controller(false, None);
        assert_eq!(detail.selected_assignee(), None);
    }

    #[test]
    fn test_load_failure_leaves_ticket_absent() {
        let mut detail = DetailController::new();
        let generation = detail.begin_load(5);
        detail.finish_load(generation, Err("Ticket 5 not found".to_string()));

        assert!(detail.ticket().is_none());
        assert_eq!(detail.error(), Some("Ticket 5 not found"));
    }

    #[test]
    fn test_stale_load_result_discarded() {
        let mut detail = DetailController::new();
        let stale = detail.begin_load(5);
        let fresh = detail.begin_load(6);

        detail.finish_load(fresh, Ok(ticket(6, false, None)));
        detail.finish_load(stale, Ok(ticket(5, true, Some(1))));

        assert_eq!(detail.ticket().unwrap().id, 6);
        assert!(!detail.ticket().unwrap().completed);
    }

    #[test]
    fn test_set_completion_noop_without_ticket() {
        let mut detail = DetailController::new();
        assert_eq!(detail.begin_set_completion(), None);
        assert!(!detail.is_action_loading());
    }

    #[test]
    fn test_set_completion_refused_while_action_pending() {
        let mut detail = loaded_controller(false, None);
        assert_eq!(detail.begin_set_completion(), Some(5));
        assert_eq!(detail.begin_set_completion(), None);
        assert_eq!(detail.begin_set_assignee(Some(1)), None);
    }

    #[test]
    fn test_completion_toggle_round_trip() {
        let mut detail = loaded_controller(false, None);

        detail.begin_set_completion();
        let outcome = detail.finish_set_completion(true, Ok(()));
        assert_eq!(outcome, ActionOutcome::Done);
        assert!(detail.ticket().unwrap().completed);

        detail.begin_set_completion();
        let outcome = detail.finish_set_completion(false, Ok(()));
        assert_eq!(outcome, ActionOutcome::Done);
        assert!(!detail.ticket().unwrap().completed);
    }

    #[test]
    fn test_completion_failure_keeps_prior_value() {
        let mut detail = loaded_controller(false, None);

        detail.begin_set_completion();
        let outcome = detail.finish_set_completion(true, Err("Server error".to_string()));

        assert_eq!(outcome, ActionOutcome::Resync);
        assert!(!detail.ticket().unwrap().completed);
        assert_eq!(detail.action_error(), Some("Server error"));
        assert!(!detail.is_action_loading());
    }

    #[test]
    fn test_assign_success_updates_assignee() {
        let mut detail = loaded_controller(false, None);

        detail.begin_set_assignee(Some(2));
        let outcome = detail.finish_set_assignee(Some(2), Ok(()));

        assert_eq!(outcome, ActionOutcome::Done);
        assert_eq!(detail.ticket().unwrap().assignee_id, Some(2));
        assert_eq!(detail.selected_assignee(), Some(2));
    }

    #[test]
    fn test_unassign_success_clears_assignee() {
        let mut detail = loaded_controller(false, Some(2));

        detail.begin_set_assignee(None);
        let outcome = detail.finish_set_assignee(None, Ok(()));

        assert_eq!(outcome, ActionOutcome::Done);
        assert_eq!(detail.ticket().unwrap().assignee_id, None);
    }

    #[test]
    fn test_assign_failure_requests_resync() {
        let mut detail = loaded_controller(false, Some(1));

        detail.begin_set_assignee(Some(2));
        let outcome = detail.finish_set_assignee(Some(2), Err("Failed to assign".to_string()));

        assert_eq!(outcome, ActionOutcome::Resync);
        assert_eq!(detail.action_error(), Some("Failed to assign"));
        // The optimistic selection stays until the resync load overwrites it.
        assert_eq!(detail.selected_assignee(), Some(2));
        assert_eq!(detail.ticket().unwrap().assignee_id, Some(1));
    }

    #[test]
    fn test_resync_load_discards_optimistic_selection() {
        let mut detail = loaded_controller(false, Some(1));

        detail.begin_set_assignee(Some(2));
        detail.finish_set_assignee(Some(2), Err("Failed to assign".to_string()));

        // The resync fetch returns the server's record.
        let generation = detail.begin_load(5);
        detail.finish_load(generation, Ok(ticket(5, false, Some(1))));

        assert_eq!(detail.selected_assignee(), Some(1));
        assert_eq!(detail.ticket().unwrap().assignee_id, Some(1));
        // Resync attempts clear the stale action error.
        assert!(detail.action_error().is_none());
    }

    #[test]
    fn test_action_error_cleared_on_next_action() {
        let mut detail = loaded_controller(false, None);

        detail.begin_set_completion();
        detail.finish_set_completion(true, Err("boom".to_string()));
        assert!(detail.action_error().is_some());

        detail.begin_set_completion();
        assert!(detail.action_error().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut detail = loaded_controller(true, Some(1));
        detail.clear();

        assert!(detail.ticket().is_none());
        assert!(detail.ticket_id().is_none());
        assert!(!detail.is_loading());
        assert!(detail.error().is_none());
        assert!(detail.selected_assignee().is_none());
    }
}
