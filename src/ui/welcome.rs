use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let source = app.source();
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "JLPT QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · {} items", source.label(), source.len()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} questions", app.question_count()),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  h/l change count  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .fg(Color::Red)
            .bold();
        frame.render_widget(widget, chunks[2]);
    }
}
