//! User picker component for ticket assignment.
//!
//! Displays the known users in a popup and lets the user pick a new
//! assignee, or "Unassigned" to clear the assignment.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::types::User;

/// Action resulting from user picker input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Assign the ticket to the user with this id.
    Select(u64),
    /// Clear the assignment.
    Unassign,
    /// Cancel the picker.
    Cancel,
}

/// Assignee picker popup.
///
/// Keyboard navigation over "Unassigned" plus the user collection, with
/// incremental name filtering.
#[derive(Debug, Default)]
pub struct UserPicker {
    /// Users available for assignment.
    users: Vec<User>,
    /// Currently selected index (0 = Unassigned, 1+ = filtered users).
    selected: usize,
    /// Whether the picker is visible.
    visible: bool,
    /// Current assignee name, for display.
    current_assignee: String,
    /// Incremental name filter.
    search_query: String,
    /// Indices into `users` matching the filter.
    filtered_indices: Vec<usize>,
}

impl UserPicker {
    /// Create a new, hidden picker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the picker is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the picker with the given users.
    pub fn show(&mut self, users: Vec<User>, current_assignee: &str) {
        self.current_assignee = current_assignee.to_string();
        self.users = users;
        self.selected = 0;
        self.search_query.clear();
        self.update_filtered_indices();
        self.visible = true;
    }

    /// Hide the picker.
    pub fn hide(&mut self) {
        self.visible = false;
        self.search_query.clear();
    }

    /// Get the number of available users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Update filtered indices from the search query.
    fn update_filtered_indices(&mut self) {
        if self.search_query.is_empty() {
            self.filtered_indices = (0..self.users.len()).collect();
        } else {
            let query_lower = self.search_query.to_lowercase();
            self.filtered_indices = self
                .users
                .iter()
                .enumerate()
                .filter(|(_, u)| u.name.to_lowercase().contains(&query_lower))
                .map(|(i, _)| i)
                .collect();
        }
        // Reset selection when the filter changes
        self.selected = 0;
    }

    /// Total selectable items: "Unassigned" plus the filtered users.
    fn selectable_count(&self) -> usize {
        1 + self.filtered_indices.len()
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent view.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<PickerAction> {
        if !self.visible {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                if self.selected < self.selectable_count().saturating_sub(1) {
                    self.selected += 1;
                }
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.hide();
                if self.selected == 0 {
                    Some(PickerAction::Unassign)
                } else {
                    let filtered_idx = self.selected - 1;
                    self.filtered_indices
                        .get(filtered_idx)
                        .and_then(|&user_idx| self.users.get(user_idx))
                        .map(|user| PickerAction::Select(user.id))
                }
            }
            (KeyCode::Esc, KeyModifiers::NONE) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.hide();
                Some(PickerAction::Cancel)
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                if !self.search_query.is_empty() {
                    self.search_query.pop();
                    self.update_filtered_indices();
                }
                None
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT)
                if c.is_alphabetic() || c.is_whitespace() =>
            {
                self.search_query.push(c);
                self.update_filtered_indices();
                None
            }
            _ => None,
        }
    }

    /// Render the picker.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog_width = 44.min(area.width.saturating_sub(4));
        let dialog_height = 16.min(area.height.saturating_sub(4));
        let dialog_area = centered_rect(dialog_width, dialog_height, area);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Change Assignee ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Current assignee
                Constraint::Length(2), // Search bar
                Constraint::Min(3),    // Users list
                Constraint::Length(2), // Help text
            ])
            .split(inner);

        let current_line = Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.current_assignee.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(current_line), chunks[0]);

        let (search_text, search_style) = if self.search_query.is_empty() {
            (
                "Type to filter...".to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (self.search_query.clone(), Style::default().fg(Color::White))
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(search_text, search_style))),
            chunks[1],
        );

        if self.user_count() == 0 {
            let empty_text = Paragraph::new("No users found")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty_text, chunks[2]);
        } else {
            let mut items: Vec<ListItem> = Vec::with_capacity(1 + self.filtered_indices.len());
            items.push(ListItem::new("  Unassigned").style(Style::default().fg(Color::DarkGray)));

            for &idx in &self.filtered_indices {
                if let Some(user) = self.users.get(idx) {
                    items.push(ListItem::new(format!("  {}", user.name)));
                }
            }

            let list = List::new(items)
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            let mut state = ListState::default();
            state.select(Some(self.selected));

            frame.render_stateful_widget(list, chunks[2], &mut state);
        }

        let help_text = Line::from(vec![
            Span::styled("j/k", Style::default().fg(Color::Yellow)),
            Span::raw(": navigate  "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(": select  "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(": cancel"),
        ]);
        frame.render_widget(
            Paragraph::new(help_text).alignment(Alignment::Center),
            chunks[3],
        );
    }
}

/// Create a centered rectangle.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
