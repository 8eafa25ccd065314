//! Event handling for the application.
//!
//! This module handles keyboard input and terminal events.

mod handler;

pub use handler::EventHandler;

/// An application-level event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(crossterm::event::KeyEvent),
    /// The terminal was resized to (width, height).
    Resize(u16, u16),
    /// Periodic tick when no terminal event occurred.
    Tick,
}
