//! Ticket list view.
//!
//! Renders the new-ticket input, the filter line, and the filtered ticket
//! collection with assignee names resolved from the user collection.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::controllers::{ListController, StatusFilter};
use crate::ui::TextInput;

/// Render the ticket list screen.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    list: &ListController,
    selected: usize,
    input: &TextInput,
    input_focused: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // New ticket input
            Constraint::Length(1), // Add error / adding indicator
            Constraint::Length(1), // Filter line
            Constraint::Min(1),    // Ticket list
        ])
        .split(area);

    input.render(frame, chunks[0], input_focused);
    render_add_status(frame, chunks[1], list);
    render_filter_line(frame, chunks[2], list.filter());
    render_tickets(frame, chunks[3], list, selected);
}

/// Render the adding indicator or the last add error.
fn render_add_status(frame: &mut Frame, area: Rect, list: &ListController) {
    let line = if list.is_adding() {
        Line::styled("Adding ticket...", Style::default().fg(Color::Gray))
    } else if let Some(error) = list.add_error() {
        Line::styled(
            format!("Error adding ticket: {}", error),
            Style::default().fg(Color::Red),
        )
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status filter selector.
fn render_filter_line(frame: &mut Frame, area: Rect, active: StatusFilter) {
    let mut spans = vec![Span::styled(
        "Filter: ",
        Style::default().fg(Color::DarkGray),
    )];

    for filter in [
        StatusFilter::All,
        StatusFilter::Incomplete,
        StatusFilter::Completed,
    ] {
        let style = if filter == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the filtered ticket collection, or the relevant placeholder.
fn render_tickets(frame: &mut Frame, area: Rect, list: &ListController, selected: usize) {
    if list.is_loading() {
        let loading = Paragraph::new("Loading tickets...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = list.error() {
        let message = Paragraph::new(vec![
            Line::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            ),
            Line::styled(
                "Press 'r' to retry",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(message, area);
        return;
    }

    let filtered = list.filtered();
    if filtered.is_empty() {
        let empty = Paragraph::new("No tickets match the current filter.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = filtered
        .iter()
        .map(|ticket| {
            let status_style = if ticket.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Yellow)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{:<4} ", ticket.id),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(ticket.description.clone()),
                Span::styled(format!(" ({})", ticket.status_label()), status_style),
                Span::styled(
                    format!("  {}", list.assignee_name(ticket.assignee_id)),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let widget = List::new(items)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected.min(filtered.len().saturating_sub(1))));

    frame.render_stateful_widget(widget, area, &mut state);
}

/// Render the list screen's status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect, list: &ListController, input_focused: bool) {
    let hint = if input_focused {
        "Enter: create ticket  Esc: cancel"
    } else {
        "j/k: move  Enter: open  n: new ticket  f: filter  r: refresh  ?: help  q: quit"
    };

    let footer = Line::from(vec![
        Span::styled(
            format!(" {} / {} tickets ", list.filtered().len(), list.tickets().len()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}
