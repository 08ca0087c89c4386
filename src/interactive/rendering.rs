//! TUI rendering with ratatui
//!
//! Level tabs, the hidden function's plot, the attempt board and the
//! digit input.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Feedback, Level};
use crate::expr::PLOT_RANGE;
use crate::game::{MAX_ATTEMPTS, Status};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph,
        Tabs, Wrap,
    },
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Level tabs
            Constraint::Length(3), // Formula
            Constraint::Min(12),   // Plot and board
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);
    render_formula(f, app, chunks[2]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Plot
            Constraint::Percentage(40), // Board and messages
        ])
        .split(chunks[3]);

    render_plot(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[4]);
    render_status(f, app, chunks[5]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "🔢 FUNCLE - Guess the Function | {}",
        app.session.date().format("%Y-%m-%d")
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn level_tab(app: &App, level: Level) -> String {
    match app.session.state(level).status() {
        Status::Won => format!("{} ✅", level.title()),
        Status::Lost => format!("{} ❌", level.title()),
        Status::InProgress => level.title().to_string(),
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Level::ALL.iter().map(|&l| level_tab(app, l)).collect();
    let tabs = Tabs::new(titles)
        .select(app.level.index())
        .block(
            Block::default()
                .title(" Level (←/→) ")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_formula(f: &mut Frame, app: &App, area: Rect) {
    let formula = Paragraph::new(Line::from(vec![
        Span::raw("f(x) = "),
        Span::styled(
            app.display_formula.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .title(" Hidden Function ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(formula, area);
}

fn render_plot(f: &mut Frame, app: &App, area: Rect) {
    let title = match (app.show_plot, app.plot_is_fallback) {
        (false, _) => " Graph ",
        (true, true) => " Graph (approximation) | g: hide ",
        (true, false) => " Graph | g: hide ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if !app.show_plot {
        let hidden = Paragraph::new("Graph hidden. Press 'g' to show it.")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(hidden, area);
        return;
    }

    let (x_min, x_max) = (*PLOT_RANGE.start(), *PLOT_RANGE.end());
    let [y_min, y_max] = app.y_bounds;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Cyan))
        .data(&app.plot);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([x_min, x_max])
                .labels([format!("{x_min}"), "0".to_string(), format!("{x_max}")]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels([format!("{y_min:.1}"), format!("{y_max:.1}")]),
        );
    f.render_widget(chart, area);
}

fn render_side_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(MAX_ATTEMPTS as u16 + 2), // Board
            Constraint::Min(5),                          // Messages or share text
        ])
        .split(area);

    render_board(f, app, chunks[0]);
    if let Some(share) = app.share_text() {
        let paragraph = Paragraph::new(share)
            .style(Style::default().fg(Color::Green))
            .block(
                Block::default()
                    .title(" Share ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, chunks[1]);
    } else {
        render_messages(f, app, chunks[1]);
    }
}

fn feedback_style(tag: Feedback) -> Style {
    let bg = match tag {
        Feedback::Correct => Color::Green,
        Feedback::Present => Color::Yellow,
        Feedback::Absent => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let attempts = &app.session.state(app.level).attempts;

    let mut lines: Vec<Line> = attempts
        .iter()
        .enumerate()
        .map(|(i, attempt)| {
            let mut spans = vec![Span::raw(format!("{}  ", i + 1))];
            for (digit, &tag) in attempt.guess.digits().iter().zip(attempt.evaluation.tags()) {
                spans.push(Span::styled(format!(" {digit} "), feedback_style(tag)));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    for i in attempts.len()..MAX_ATTEMPTS {
        lines.push(Line::styled(
            format!("{}   ·   ·   ·   ·   · ", i + 1),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let board = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Attempts {}/{MAX_ATTEMPTS} ", attempts.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(board, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode() {
        InputMode::Finished => (
            " Level finished | 'n' next level | 'q' quit ".to_string(),
            app.countdown(),
            Color::Green,
        ),
        InputMode::Guessing => {
            let mut cells: Vec<String> = app.input_buffer.chars().map(|c| format!("[{c}]")).collect();
            cells.resize(5, "[ ]".to_string());
            (
                " Enter A B C D E (digits) | Enter to submit ".to_string(),
                cells.join(" "),
                Color::Yellow,
            )
        }
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(area);

    let countdown = Paragraph::new(app.countdown())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(countdown, chunks[0]);

    let help = Paragraph::new("q: Quit | n: Next Level | g: Graph | ←/→: Level | Enter: Submit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[1]);
}
