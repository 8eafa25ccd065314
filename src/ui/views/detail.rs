//! Ticket detail view.
//!
//! Shows a single ticket's fields and the outcome of in-flight actions
//! (completion toggle, assignee change).

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::controllers::{DetailController, ListController};

/// Render the ticket detail screen.
pub fn render(frame: &mut Frame, area: Rect, detail: &DetailController, list: &ListController) {
    let block = Block::default()
        .title(" Ticket Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if detail.is_loading() {
        let loading = Paragraph::new("Loading ticket...")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if let Some(error) = detail.error() {
        let message = Paragraph::new(vec![
            Line::styled(
                format!("Error: {}", error),
                Style::default().fg(Color::Red),
            ),
            Line::styled(
                "Press 'r' to retry or Esc to go back",
                Style::default().fg(Color::DarkGray),
            ),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    let Some(ticket) = detail.ticket() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // ID
            Constraint::Length(1), // Description
            Constraint::Length(1), // Status
            Constraint::Length(1), // Assignee
            Constraint::Length(1), // blank
            Constraint::Length(1), // Action status
            Constraint::Min(0),
        ])
        .split(inner);

    let label_style = Style::default().fg(Color::DarkGray);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("ID:          ", label_style),
            Span::raw(format!("#{}", ticket.id)),
        ])),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Description: ", label_style),
            Span::styled(
                ticket.description.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])),
        chunks[1],
    );

    let status_style = if ticket.completed {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Status:      ", label_style),
            Span::styled(ticket.status_label(), status_style),
        ])),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Assignee:    ", label_style),
            Span::styled(
                list.assignee_name(ticket.assignee_id).to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ])),
        chunks[3],
    );

    let action_line = if detail.is_action_loading() {
        Line::styled("Working...", Style::default().fg(Color::Gray))
    } else if let Some(error) = detail.action_error() {
        Line::styled(
            format!("Action failed: {}", error),
            Style::default().fg(Color::Red),
        )
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(action_line), chunks[5]);
}

/// Render the detail screen's status bar.
pub fn render_status_bar(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled(
            " Detail ",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(
            "c/Space: toggle complete  a: change assignee  r: reload  Esc: back",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}
