//! Client-side state controllers.
//!
//! Controllers own one slice of client state each and define the state
//! transitions around the remote operations that mutate it. They perform
//! no I/O themselves: `begin_*` methods record that an operation started
//! (loading flags, cleared errors, request generation) and `finish_*`
//! methods apply the operation's result. The task layer issues the actual
//! HTTP requests in between.

mod detail;
mod list;

pub use detail::{ActionOutcome, DetailController};
pub use list::{ListController, StatusFilter};
