use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table},
    Frame,
};
use taskpad_core::Filter;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};

// --- THEME ---
pub struct Palette {
    pub bg: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub done: Color,
    pub sel: Color,
}

const DARK: Palette = Palette {
    bg: Color::Black,
    text: Color::White,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    done: Color::Green,
    sel: Color::DarkGray,
};

const LIGHT: Palette = Palette {
    bg: Color::White,
    text: Color::Black,
    muted: Color::Gray,
    accent: Color::Blue,
    done: Color::Green,
    sel: Color::Gray,
};

fn palette(dark_mode: bool) -> &'static Palette {
    if dark_mode {
        &DARK
    } else {
        &LIGHT
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = palette(app.engine.dark_mode());
    let size = f.area();

    // Paint the whole screen in the theme's colors first
    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.text)),
        size,
    );

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header with filter tabs
            Constraint::Min(1),    // Task list
            Constraint::Length(3), // Input bar
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, app, theme, main_chunks[0]);
    draw_task_table(f, app, theme, main_chunks[1]);
    draw_input(f, app, theme, main_chunks[2]);
    draw_footer(f, app, theme, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, theme: &Palette, area: Rect) {
    let current = app.engine.filter();
    let mut spans = vec![
        Span::styled(
            "TASKPAD",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];

    for (i, filter) in [Filter::All, Filter::Active, Filter::Completed]
        .iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(theme.muted)));
        }
        let style = if *filter == current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(filter.label(), style));
    }

    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.muted)),
        );
    f.render_widget(header, area);
}

fn draw_task_table(f: &mut Frame, app: &mut App, theme: &Palette, area: Rect) {
    let rows: Vec<Row> = app
        .engine
        .filtered_tasks()
        .iter()
        .map(|task| {
            let (icon, icon_style) = if task.completed {
                ("✔", Style::default().fg(theme.done))
            } else {
                ("☐", Style::default().fg(theme.text))
            };

            let text_style = if task.completed {
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD)
            };

            let created: DateTime<Local> = DateTime::from(task.created_at);

            Row::new(vec![
                Span::styled(icon, icon_style),
                Span::styled(
                    task.id.to_string()[..8].to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    created.format("%m-%d").to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(task.text.clone(), text_style),
            ])
        })
        .collect();

    let title = format!(
        " Tasks — {} active · {} done ",
        app.engine.active_count(),
        app.engine.completed_count()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(10), // Id
            Constraint::Length(6),  // Created
            Constraint::Min(10),    // Text
        ],
    )
    .header(
        Row::new(vec!["St", "ID", "Date", "Task"]).style(Style::default().fg(theme.accent)),
    )
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.muted)),
    )
    .row_highlight_style(
        Style::default()
            .bg(theme.sel)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input(f: &mut Frame, app: &App, theme: &Palette, area: Rect) {
    let (content, border_style) = match app.input_mode {
        InputMode::Adding => (
            Span::styled(app.input.clone(), Style::default().fg(theme.text)),
            Style::default().fg(theme.accent),
        ),
        InputMode::Normal => (
            Span::styled("Press a to add a task", Style::default().fg(theme.muted)),
            Style::default().fg(theme.muted),
        ),
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    f.render_widget(input, area);

    if let InputMode::Adding = app.input_mode {
        let prefix: String = app.input.chars().take(app.cursor_position).collect();
        f.set_cursor_position((area.x + 1 + prefix.width() as u16, area.y + 1));
    }
}

fn draw_footer(f: &mut Frame, app: &App, theme: &Palette, area: Rect) {
    let line = match &app.notice {
        Some(msg) => Line::from(Span::styled(
            msg.clone(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "a: Add | Space: Toggle | d: Delete | Tab/1-3: Filter | t: Theme | j/k: Move | q: Quit",
            Style::default().fg(theme.muted),
        )),
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(footer, area);
}
