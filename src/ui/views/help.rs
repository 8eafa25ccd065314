//! Help screen listing the key bindings.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the help screen.
pub fn render(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::default().fg(Color::Yellow);
    let heading_style = Style::default().fg(Color::Cyan);

    let bind = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), key_style),
            Span::raw(desc.to_string()),
        ])
    };

    let lines = vec![
        Line::styled("Ticket List", heading_style),
        bind("j/k, arrows", "Move selection"),
        bind("Enter", "Open selected ticket"),
        bind("n, i", "Focus the new-ticket input"),
        bind("f", "Cycle status filter"),
        bind("1/2/3", "Filter: all / incomplete / completed"),
        bind("r", "Refresh tickets and users"),
        Line::raw(""),
        Line::styled("New Ticket Input", heading_style),
        bind("Enter", "Create the ticket"),
        bind("Esc", "Leave the input"),
        Line::raw(""),
        Line::styled("Ticket Detail", heading_style),
        bind("c, Space", "Toggle completion"),
        bind("a", "Change assignee"),
        bind("r", "Reload the ticket"),
        bind("Esc, q", "Back to the list"),
        Line::raw(""),
        Line::styled("Global", heading_style),
        bind("?", "Show this help"),
        bind("q, Ctrl+C", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
