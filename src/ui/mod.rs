//! User interface components and views.
//!
//! This module contains all TUI rendering logic: one view per screen and
//! the reusable components they share. Views are pure functions of
//! controller state; they hold no state of their own.

mod components;
pub mod views;

pub use components::{PickerAction, TextInput, UserPicker};
