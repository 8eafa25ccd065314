//! Reusable UI components.

mod input;
mod user_picker;

pub use input::TextInput;
pub use user_picker::{PickerAction, UserPicker};
