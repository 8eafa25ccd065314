//! Async task management for non-blocking API operations.
//!
//! The main loop never awaits a request inline. Controllers emit a
//! [`Command`] naming the operation to perform; the [`TaskSpawner`] runs it
//! on a background tokio task and delivers the result back through an
//! unbounded channel as an [`ApiMessage`]. The main loop drains the channel
//! each frame and applies messages to the controllers.
//!
//! Every API error is normalized to a human-readable message string at this
//! boundary, so controllers deal with a single error representation.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::types::{Ticket, User};
use crate::api::TicketClient;

/// An operation a controller has requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the ticket and user collections together.
    FetchAll { generation: u64 },
    /// Create a ticket with the given description.
    CreateTicket { description: String },
    /// Fetch a single ticket.
    LoadTicket { id: u64, generation: u64 },
    /// Change a ticket's completion state.
    SetCompletion { id: u64, completed: bool },
    /// Change a ticket's assignee (`None` unassigns).
    ChangeAssignee { id: u64, assignee: Option<u64> },
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Combined tickets+users fetch result.
    DataFetched {
        generation: u64,
        result: Result<(Vec<Ticket>, Vec<User>), String>,
    },

    /// Ticket creation result.
    TicketCreated { result: Result<Ticket, String> },

    /// Single ticket fetch result.
    TicketLoaded {
        generation: u64,
        result: Result<Ticket, String>,
    },

    /// Completion change result, carrying the requested value.
    CompletionChanged {
        completed: bool,
        result: Result<(), String>,
    },

    /// Assignee change result, carrying the requested assignee.
    AssigneeChanged {
        assignee: Option<u64>,
        result: Result<(), String>,
    },
}

/// Spawns background tasks for async operations.
///
/// Holds the channel sender; each spawn method clones the client and sends
/// its result through the channel when the request settles.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Run a command on a background task.
    pub fn run(&self, client: &TicketClient, command: Command) {
        debug!(?command, "Dispatching command");
        match command {
            Command::FetchAll { generation } => self.spawn_fetch_all(client, generation),
            Command::CreateTicket { description } => {
                self.spawn_create_ticket(client, description)
            }
            Command::LoadTicket { id, generation } => {
                self.spawn_load_ticket(client, id, generation)
            }
            Command::SetCompletion { id, completed } => {
                self.spawn_set_completion(client, id, completed)
            }
            Command::ChangeAssignee { id, assignee } => {
                self.spawn_change_assignee(client, id, assignee)
            }
        }
    }

    /// Spawn the combined tickets+users fetch.
    ///
    /// Both requests run concurrently; if either fails the whole operation
    /// fails and no partial data is delivered.
    fn spawn_fetch_all(&self, client: &TicketClient, generation: u64) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(client.list_tickets(), client.list_users())
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::DataFetched { generation, result });
        });
    }

    /// Spawn a ticket creation request.
    fn spawn_create_ticket(&self, client: &TicketClient, description: String) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .create_ticket(&description)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::TicketCreated { result });
        });
    }

    /// Spawn a single ticket fetch.
    fn spawn_load_ticket(&self, client: &TicketClient, id: u64, generation: u64) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client.get_ticket(id).await.map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::TicketLoaded { generation, result });
        });
    }

    /// Spawn a completion change request.
    fn spawn_set_completion(&self, client: &TicketClient, id: u64, completed: bool) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = client
                .set_completed(id, completed)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::CompletionChanged { completed, result });
        });
    }

    /// Spawn an assignee change request.
    fn spawn_change_assignee(&self, client: &TicketClient, id: u64, assignee: Option<u64>) {
        let tx = self.tx.clone();
        let client = client.clone();
        tokio::spawn(async move {
            let result = match assignee {
                Some(user_id) => client.assign(id, user_id).await,
                None => client.unassign(id).await,
            }
            .map_err(|e| e.to_string());
            let _ = tx.send(ApiMessage::AssigneeChanged { assignee, result });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner used to run commands.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}
