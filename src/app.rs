//! Main application state and event routing.
//!
//! [`App`] owns the controllers and the UI components and turns terminal
//! events into [`Command`]s. It performs no I/O itself: every API call is
//! requested by returning a command from [`App::update`] or
//! [`App::apply_message`], and results come back as [`ApiMessage`]s. That
//! keeps the whole state machine testable without a runtime.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::controllers::{ActionOutcome, DetailController, ListController, StatusFilter};
use crate::events::Event;
use crate::tasks::{ApiMessage, Command};
use crate::ui::views;
use crate::ui::{PickerAction, TextInput, UserPicker};

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Ticket list with the new-ticket input.
    #[default]
    List,
    /// Single ticket detail.
    Detail,
    /// Key binding reference.
    Help,
}

/// Top-level application state.
pub struct App {
    route: Route,
    should_quit: bool,
    list: ListController,
    detail: DetailController,
    input: TextInput,
    input_active: bool,
    picker: UserPicker,
    /// Selection index into the filtered ticket list.
    selected: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application in its initial state.
    pub fn new() -> Self {
        let mut input = TextInput::new();
        input.set_placeholder("What needs to be done?");

        Self {
            route: Route::List,
            should_quit: false,
            list: ListController::new(),
            detail: DetailController::new(),
            input,
            input_active: false,
            picker: UserPicker::new(),
            selected: 0,
        }
    }

    /// Check whether the main loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Start the initial data load and return the command to run.
    pub fn begin_initial_load(&mut self) -> Command {
        let generation = self.list.begin_load();
        Command::FetchAll { generation }
    }

    /// Handle a terminal event, optionally producing a command to run.
    pub fn update(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(..) | Event::Tick => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        // Some platforms report key release events too
        if key.kind == KeyEventKind::Release {
            return None;
        }

        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.route {
            Route::List => self.handle_list_key(key),
            Route::Detail => self.handle_detail_key(key),
            Route::Help => self.handle_help_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.input_active {
            return self.handle_input_key(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.route = Route::Help;
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let count = self.list.filtered().len();
                if count > 0 && self.selected < count - 1 {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Enter => self.open_selected_ticket(),
            KeyCode::Char('r') => {
                let generation = self.list.begin_load();
                Some(Command::FetchAll { generation })
            }
            KeyCode::Char('f') => {
                self.list.cycle_filter();
                self.selected = 0;
                None
            }
            KeyCode::Char('1') => {
                self.list.set_filter(StatusFilter::All);
                self.selected = 0;
                None
            }
            KeyCode::Char('2') => {
                self.list.set_filter(StatusFilter::Incomplete);
                self.selected = 0;
                None
            }
            KeyCode::Char('3') => {
                self.list.set_filter(StatusFilter::Completed);
                self.selected = 0;
                None
            }
            KeyCode::Char('n') | KeyCode::Char('i') => {
                self.input_active = true;
                None
            }
            _ => None,
        }
    }

    /// Handle input while the new-ticket field is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => {
                self.input_active = false;
                None
            }
            KeyCode::Enter => {
                let description = self.list.begin_add(self.input.value())?;
                Some(Command::CreateTicket { description })
            }
            _ => {
                self.input.handle_input(key);
                None
            }
        }
    }

    fn open_selected_ticket(&mut self) -> Option<Command> {
        let id = self.list.filtered().get(self.selected).map(|t| t.id)?;
        let generation = self.detail.begin_load(id);
        self.route = Route::Detail;
        Some(Command::LoadTicket { id, generation })
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.picker.is_visible() {
            return match self.picker.handle_input(key) {
                Some(PickerAction::Select(user_id)) => {
                    let id = self.detail.begin_set_assignee(Some(user_id))?;
                    Some(Command::ChangeAssignee {
                        id,
                        assignee: Some(user_id),
                    })
                }
                Some(PickerAction::Unassign) => {
                    let id = self.detail.begin_set_assignee(None)?;
                    Some(Command::ChangeAssignee { id, assignee: None })
                }
                Some(PickerAction::Cancel) | None => None,
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.detail.clear();
                self.route = Route::List;
                None
            }
            KeyCode::Char('?') => {
                self.route = Route::Help;
                None
            }
            KeyCode::Char('c') | KeyCode::Char(' ') => {
                let completed = self.detail.ticket()?.completed;
                let id = self.detail.begin_set_completion()?;
                Some(Command::SetCompletion {
                    id,
                    completed: !completed,
                })
            }
            KeyCode::Char('a') => {
                // While the picker is open every key routes to it, so no
                // action can start underneath it; refusing to open during an
                // in-flight action keeps it that way, and a selection made in
                // the picker is never dropped.
                if self.detail.ticket().is_some() && !self.detail.is_action_loading() {
                    let current = self
                        .list
                        .assignee_name(self.detail.selected_assignee())
                        .to_string();
                    self.picker.show(self.list.users().to_vec(), &current);
                }
                None
            }
            KeyCode::Char('r') => {
                let id = self.detail.ticket_id()?;
                let generation = self.detail.begin_load(id);
                Some(Command::LoadTicket { id, generation })
            }
            _ => None,
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.route = Route::List;
                None
            }
            _ => None,
        }
    }

    /// Apply a background task result, optionally producing a follow-up
    /// command.
    pub fn apply_message(&mut self, message: ApiMessage) -> Option<Command> {
        debug!(?message, "Applying message");
        match message {
            ApiMessage::DataFetched { generation, result } => {
                self.list.finish_load(generation, result);
                self.clamp_selection();
                None
            }
            ApiMessage::TicketCreated { result } => {
                let created = result.is_ok();
                self.list.finish_add(result);
                if created {
                    self.input.clear();
                }
                None
            }
            ApiMessage::TicketLoaded { generation, result } => {
                self.detail.finish_load(generation, result);
                None
            }
            ApiMessage::CompletionChanged { completed, result } => {
                match self.detail.finish_set_completion(completed, result) {
                    ActionOutcome::Done => None,
                    ActionOutcome::Resync => self.resync_detail(),
                }
            }
            ApiMessage::AssigneeChanged { assignee, result } => {
                match self.detail.finish_set_assignee(assignee, result) {
                    ActionOutcome::Done => None,
                    ActionOutcome::Resync => self.resync_detail(),
                }
            }
        }
    }

    /// Reload the current ticket after a failed action.
    fn resync_detail(&mut self) -> Option<Command> {
        let id = self.detail.ticket_id()?;
        let generation = self.detail.begin_load(id);
        Some(Command::LoadTicket { id, generation })
    }

    /// Keep the selection inside the filtered list after data changes.
    fn clamp_selection(&mut self) {
        let count = self.list.filtered().len();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        let header = Line::from(vec![
            Span::styled(
                " tix ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Ticket Tracker", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        match self.route {
            Route::List => {
                views::list::render(
                    frame,
                    chunks[1],
                    &self.list,
                    self.selected,
                    &self.input,
                    self.input_active,
                );
                views::list::render_status_bar(frame, chunks[2], &self.list, self.input_active);
            }
            Route::Detail => {
                views::detail::render(frame, chunks[1], &self.detail, &self.list);
                views::detail::render_status_bar(frame, chunks[2]);
                self.picker.render(frame, chunks[1]);
            }
            Route::Help => {
                views::help::render(frame, chunks[1]);
                let footer = Line::styled(
                    " Esc: back",
                    Style::default().fg(Color::DarkGray),
                );
                frame.render_widget(Paragraph::new(footer), chunks[2]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Ticket, User};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn ticket(id: u64, description: &str, completed: bool, assignee_id: Option<u64>) -> Ticket {
        Ticket {
            id,
            description: description.to_string(),
            completed,
            assignee_id,
        }
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
        }
    }

    /// App with two tickets and one user loaded.
    fn loaded_app() -> App {
        let mut app = App::new();
        let generation = app.begin_initial_load_generation();
        app.apply_message(ApiMessage::DataFetched {
            generation,
            result: Ok((
                vec![
                    ticket(1, "First", false, Some(10)),
                    ticket(2, "Second", true, None),
                ],
                vec![user(10, "Alice")],
            )),
        });
        app
    }

    impl App {
        fn begin_initial_load_generation(&mut self) -> u64 {
            match self.begin_initial_load() {
                Command::FetchAll { generation } => generation,
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }

    /// App on the detail screen with ticket 1 loaded.
    fn detail_app() -> App {
        let mut app = loaded_app();
        let command = app.update(key(KeyCode::Enter));
        let Some(Command::LoadTicket { id, generation }) = command else {
            panic!("expected LoadTicket, got {:?}", command);
        };
        app.apply_message(ApiMessage::TicketLoaded {
            generation,
            result: Ok(ticket(id, "First", false, Some(10))),
        });
        app
    }

    #[test]
    fn test_q_quits_from_list() {
        let mut app = App::new();
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits_from_anywhere() {
        let mut app = detail_app();
        app.update(ctrl('c'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_initial_load_is_fetch_all() {
        let mut app = App::new();
        let command = app.begin_initial_load();
        assert!(matches!(command, Command::FetchAll { .. }));
        assert!(app.list.is_loading());
    }

    #[test]
    fn test_navigation_clamps_to_list_bounds() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('j')));
        app.update(key(KeyCode::Char('j')));
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 1);

        app.update(key(KeyCode::Char('k')));
        app.update(key(KeyCode::Char('k')));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_enter_on_empty_list_does_nothing() {
        let mut app = App::new();
        assert!(app.update(key(KeyCode::Enter)).is_none());
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_enter_opens_detail() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('j')));
        let command = app.update(key(KeyCode::Enter));
        assert!(matches!(command, Some(Command::LoadTicket { id: 2, .. })));
        assert_eq!(app.route, Route::Detail);
        assert!(app.detail.is_loading());
    }

    #[test]
    fn test_refresh_key_refetches() {
        let mut app = loaded_app();
        let command = app.update(key(KeyCode::Char('r')));
        assert!(matches!(command, Some(Command::FetchAll { .. })));
        assert!(app.list.is_loading());
    }

    #[test]
    fn test_filter_keys() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('2')));
        assert_eq!(app.list.filter(), StatusFilter::Incomplete);
        assert_eq!(app.list.filtered().len(), 1);

        app.update(key(KeyCode::Char('f')));
        assert_eq!(app.list.filter(), StatusFilter::Completed);

        app.update(key(KeyCode::Char('1')));
        assert_eq!(app.list.filter(), StatusFilter::All);
    }

    #[test]
    fn test_filter_change_resets_selection() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 1);
        app.update(key(KeyCode::Char('f')));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_insert_mode_routes_chars_to_input() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        assert!(app.input_active);

        // 'j' is typed text now, not navigation
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.input.value(), "j");
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_submit_creates_ticket() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        for c in "  New task  ".chars() {
            app.update(key(KeyCode::Char(c)));
        }

        let command = app.update(key(KeyCode::Enter));
        assert_eq!(
            command,
            Some(Command::CreateTicket {
                description: "New task".to_string()
            })
        );
        assert!(app.list.is_adding());
    }

    #[test]
    fn test_submit_blank_description_does_nothing() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        for c in "   ".chars() {
            app.update(key(KeyCode::Char(c)));
        }
        assert!(app.update(key(KeyCode::Enter)).is_none());
        assert!(!app.list.is_adding());
    }

    #[test]
    fn test_input_clears_after_successful_create() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        for c in "New task".chars() {
            app.update(key(KeyCode::Char(c)));
        }
        app.update(key(KeyCode::Enter));

        app.apply_message(ApiMessage::TicketCreated {
            result: Ok(ticket(3, "New task", false, None)),
        });
        assert!(app.input.is_empty());
        assert_eq!(app.list.tickets().len(), 3);
    }

    #[test]
    fn test_input_kept_after_failed_create() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        for c in "New task".chars() {
            app.update(key(KeyCode::Char(c)));
        }
        app.update(key(KeyCode::Enter));

        app.apply_message(ApiMessage::TicketCreated {
            result: Err("boom".to_string()),
        });
        assert_eq!(app.input.value(), "New task");
        assert_eq!(app.list.add_error(), Some("boom"));
    }

    #[test]
    fn test_esc_leaves_insert_mode() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('n')));
        app.update(key(KeyCode::Esc));
        assert!(!app.input_active);
    }

    #[test]
    fn test_completion_toggle_command() {
        let mut app = detail_app();
        let command = app.update(key(KeyCode::Char('c')));
        assert_eq!(
            command,
            Some(Command::SetCompletion {
                id: 1,
                completed: true
            })
        );
    }

    #[test]
    fn test_second_toggle_blocked_while_pending() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('c')));
        assert!(app.update(key(KeyCode::Char(' '))).is_none());
    }

    #[test]
    fn test_successful_toggle_updates_ticket() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('c')));
        let follow_up = app.apply_message(ApiMessage::CompletionChanged {
            completed: true,
            result: Ok(()),
        });
        assert!(follow_up.is_none());
        assert!(app.detail.ticket().is_some_and(|t| t.completed));
    }

    #[test]
    fn test_failed_toggle_resyncs() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('c')));
        let follow_up = app.apply_message(ApiMessage::CompletionChanged {
            completed: true,
            result: Err("server error".to_string()),
        });
        assert!(matches!(follow_up, Some(Command::LoadTicket { id: 1, .. })));
        assert!(app.detail.is_loading());
        // The ticket keeps its prior value until the reload lands
        assert!(app.detail.ticket().is_some_and(|t| !t.completed));
    }

    #[test]
    fn test_picker_select_issues_assign_command() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('a')));
        assert!(app.picker.is_visible());

        // Navigate past "Unassigned" to Alice and select
        app.update(key(KeyCode::Down));
        let command = app.update(key(KeyCode::Enter));
        assert_eq!(
            command,
            Some(Command::ChangeAssignee {
                id: 1,
                assignee: Some(10)
            })
        );
        assert!(!app.picker.is_visible());
    }

    #[test]
    fn test_picker_unassign() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('a')));
        let command = app.update(key(KeyCode::Enter));
        assert_eq!(
            command,
            Some(Command::ChangeAssignee {
                id: 1,
                assignee: None
            })
        );
    }

    #[test]
    fn test_picker_blocked_while_action_pending() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('c')));

        app.update(key(KeyCode::Char('a')));
        assert!(!app.picker.is_visible());

        // Once the action settles the picker opens again and a selection
        // goes through.
        app.apply_message(ApiMessage::CompletionChanged {
            completed: true,
            result: Ok(()),
        });
        app.update(key(KeyCode::Char('a')));
        assert!(app.picker.is_visible());
        app.update(key(KeyCode::Down));
        let command = app.update(key(KeyCode::Enter));
        assert_eq!(
            command,
            Some(Command::ChangeAssignee {
                id: 1,
                assignee: Some(10)
            })
        );
    }

    #[test]
    fn test_picker_cancel_issues_nothing() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('a')));
        assert!(app.update(key(KeyCode::Esc)).is_none());
        assert!(!app.picker.is_visible());
        // Still on the detail screen
        assert_eq!(app.route, Route::Detail);
    }

    #[test]
    fn test_failed_assign_resyncs() {
        let mut app = detail_app();
        app.update(key(KeyCode::Char('a')));
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        let follow_up = app.apply_message(ApiMessage::AssigneeChanged {
            assignee: Some(10),
            result: Err("conflict".to_string()),
        });
        assert!(matches!(follow_up, Some(Command::LoadTicket { id: 1, .. })));
    }

    #[test]
    fn test_esc_returns_to_list_and_clears_detail() {
        let mut app = detail_app();
        app.update(key(KeyCode::Esc));
        assert_eq!(app.route, Route::List);
        assert!(app.detail.ticket().is_none());
    }

    #[test]
    fn test_help_round_trip() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('?')));
        assert_eq!(app.route, Route::Help);
        app.update(key(KeyCode::Esc));
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_stale_fetch_discarded_after_refresh() {
        let mut app = loaded_app();
        let Some(Command::FetchAll { generation: first }) = app.update(key(KeyCode::Char('r')))
        else {
            panic!("expected FetchAll");
        };
        let Some(Command::FetchAll { generation: second }) = app.update(key(KeyCode::Char('r')))
        else {
            panic!("expected FetchAll");
        };
        assert_ne!(first, second);

        // Stale response arrives after a newer request was issued
        app.apply_message(ApiMessage::DataFetched {
            generation: first,
            result: Ok((vec![ticket(99, "Stale", false, None)], vec![])),
        });
        assert!(app.list.is_loading());
        assert_eq!(app.list.tickets().len(), 2);

        app.apply_message(ApiMessage::DataFetched {
            generation: second,
            result: Ok((vec![ticket(3, "Fresh", false, None)], vec![])),
        });
        assert_eq!(app.list.tickets().len(), 1);
    }

    #[test]
    fn test_selection_clamped_when_data_shrinks() {
        let mut app = loaded_app();
        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.selected, 1);

        let generation = match app.update(key(KeyCode::Char('r'))) {
            Some(Command::FetchAll { generation }) => generation,
            other => panic!("expected FetchAll, got {:?}", other),
        };
        app.apply_message(ApiMessage::DataFetched {
            generation,
            result: Ok((vec![ticket(1, "Only", false, None)], vec![])),
        });
        assert_eq!(app.selected, 0);
    }
}
