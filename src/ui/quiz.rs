use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{NUM_OPTIONS, QuestionKind, QuizQuestion};
use crate::session::Feedback;

const OPTION_LABELS: [char; NUM_OPTIONS] = ['A', 'B', 'C', 'D'];

/// Blank marker used by fill-in-the-particle prompts.
const GAP: &str = "（　）";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };
    let feedback = app.feedback();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(6),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_kind(frame, chunks[1], question.kind());
    render_prompt(frame, chunks[2], question, feedback.is_some());
    render_options(frame, chunks[3], question, app.selected_option(), feedback);
    if let Some(feedback) = feedback {
        render_feedback(frame, chunks[4], app, question, feedback);
    }
    render_controls(frame, chunks[5], feedback.is_some());
}

/// Replace every gap in `prompt` with a bracketed slot, showing `answer` once known.
pub fn fill_gap(prompt: &str, answer: Option<&str>) -> String {
    let slot = format!("［{}］", answer.unwrap_or("　"));
    prompt.replace(GAP, &slot)
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "score {}  ·  {}/{}",
        app.score(),
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_kind(frame: &mut Frame, area: Rect, kind: QuestionKind) {
    let hint = match kind {
        QuestionKind::Reading => "How is this read?",
        QuestionKind::Meaning => "What does this mean?",
        QuestionKind::Bank => "Choose the correct answer",
    };
    frame.render_widget(Paragraph::new(hint).fg(Color::DarkGray), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, question: &QuizQuestion, answered: bool) {
    let answer = answered.then(|| question.correct_answer());
    let widget = Paragraph::new(fill_gap(question.prompt(), answer))
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn option_style(
    index: usize,
    question: &QuizQuestion,
    selected: usize,
    feedback: Option<&Feedback>,
) -> Style {
    match feedback {
        None if index == selected => Style::default().fg(Color::Cyan).bold(),
        None => Style::default().fg(Color::Gray),
        Some(_) if index == question.correct_index() => Style::default().fg(Color::Green).bold(),
        Some(_) if index == selected => Style::default().fg(Color::Red),
        Some(_) => Style::default().fg(Color::DarkGray),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &QuizQuestion,
    selected: usize,
    feedback: Option<&Feedback>,
) {
    let options = question.options();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let style = option_style(index, question, selected, feedback);
        let marker = if index == selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    question: &QuizQuestion,
    feedback: &Feedback,
) {
    let (verdict, color) = if feedback.is_correct {
        ("Correct!", Color::Green)
    } else {
        ("Wrong", Color::Red)
    };

    let mut lines = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(vec![
            Span::styled("Answer  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                feedback.correct_answer.as_str(),
                Style::default().fg(Color::White).bold(),
            ),
        ]),
    ];

    if let Some(explanation) = question.explanation() {
        lines.push(Line::from(Span::styled(
            explanation,
            Style::default().fg(Color::Gray),
        )));
    } else if let Some(word) = app.lookup(question.prompt()) {
        lines.push(Line::from(vec![
            Span::styled("Meaning  ", Style::default().fg(Color::DarkGray)),
            Span::styled(word.meaning.as_str(), Style::default().fg(Color::Gray)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Reading  ", Style::default().fg(Color::DarkGray)),
            Span::styled(word.reading.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let text = if answered {
        "enter next  ·  s turn in  ·  q abandon"
    } else {
        "j/k navigate  ·  enter select  ·  s turn in  ·  q abandon"
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_gap() {
        assert_eq!(
            fill_gap("わたし（　）がくせいです。", Some("は")),
            "わたし［は］がくせいです。"
        );
        assert_eq!(fill_gap("わたし（　）がくせい", None), "わたし［　］がくせい");
        assert_eq!(fill_gap("先生", Some("せんせい")), "先生");
    }
}
