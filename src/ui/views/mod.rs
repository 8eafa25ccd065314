//! Application views (screens).

pub mod detail;
pub mod help;
pub mod list;
