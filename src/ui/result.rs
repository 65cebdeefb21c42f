use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{AnswerLog, SessionResult};

use super::{fill_gap, grade_color};

const PROMPT_PREVIEW_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], result);
    render_review(frame, chunks[2], app, result, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &SessionResult) {
    let percentage = result.percentage();
    let unanswered = result.total() - result.answered();

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", result.score, result.total(), percentage),
            Style::default().fg(grade_color(percentage)).bold(),
        )),
    ];
    if unanswered > 0 {
        content.push(Line::from(Span::styled(
            format!("{} left unanswered", unanswered),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_review(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    result: &SessionResult,
    scroll: usize,
) {
    let lines: Vec<Line> = result
        .history
        .iter()
        .enumerate()
        .flat_map(|(index, log)| review_lines(app, index, log))
        .collect();

    // Each entry takes two lines.
    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll(((scroll * 2) as u16, 0));
    frame.render_widget(widget, area);
}

fn review_lines<'a>(app: &'a App, index: usize, log: &'a AnswerLog) -> [Line<'a>; 2] {
    let (symbol, color) = if log.is_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let mut answer_spans = vec![Span::raw("      ")];
    if !log.is_correct {
        answer_spans.push(Span::styled(
            format!("{}  →  ", log.user_answer),
            Style::default().fg(Color::Red),
        ));
    }
    answer_spans.push(Span::styled(
        log.correct_answer.as_str(),
        Style::default().fg(Color::Green),
    ));

    let prompt = log.question.prompt();
    let detail = match log.question.explanation() {
        Some(explanation) => Some(explanation.to_string()),
        None => app.lookup(prompt).map(|word| match &word.part_of_speech {
            Some(pos) => format!("{} · {}", word.meaning, pos),
            None => word.meaning.clone(),
        }),
    };
    if let Some(detail) = detail {
        answer_spans.push(Span::styled(
            format!("   {}", detail),
            Style::default().fg(Color::DarkGray),
        ));
    }

    [
        Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_prompt(&fill_gap(prompt, Some(&log.correct_answer))),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(answer_spans),
    ]
}

fn truncate_prompt(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > PROMPT_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(PROMPT_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new session  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
