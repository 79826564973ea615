use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, FORM_FIELDS, FormMode, ModalState};
use crate::ui::components::centered_rect;
use crate::view::{EMPTY_PLACEHOLDER, TableBody};

/// Record text as drawn in the terminal: control characters are replaced so
/// a field cannot smuggle escape sequences into the output.
pub fn literal(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

pub fn render_users_table(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Users")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let rows = match &app.view.body {
        TableBody::Empty => {
            let p = Paragraph::new(EMPTY_PLACEHOLDER)
                .alignment(Alignment::Center)
                .style(Style::default().fg(app.theme.muted))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        TableBody::Rows(rows) => rows,
    };

    let rows = rows.iter().enumerate().map(|(i, u)| {
        let style = if i == app.selected_row {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(literal(&u.name)),
            Cell::from(literal(&u.email)),
            Cell::from(literal(&u.phone)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(35),
        Constraint::Percentage(35),
        Constraint::Percentage(30),
    ];
    let header = Row::new(vec!["ID", "NAME", "EMAIL", "PHONE"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

/// `◀ Prev   Page X of Y   Next ▶`, with disabled controls dimmed.
pub fn render_pagination(f: &mut Frame, area: Rect, app: &AppState) {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    };
    let line = Line::from(vec![
        control("◀ Prev", app.view.prev_enabled),
        Span::raw("   "),
        Span::styled(app.view.page_label(), Style::default().fg(app.theme.text)),
        Span::raw("   "),
        control("Next ▶", app.view.next_enabled),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

pub fn render_user_modal(f: &mut Frame, area: Rect, app: &AppState, modal: &ModalState) {
    match modal {
        ModalState::UserForm { mode, fields, focus, error } => {
            let rect = centered_rect(60, 10, area);
            let title = match mode {
                FormMode::Create => "Add New User".to_string(),
                FormMode::Edit { id } => format!("Edit User #{id}"),
            };
            let mut lines: Vec<Line> = FORM_FIELDS
                .iter()
                .zip(fields.iter())
                .enumerate()
                .map(|(idx, (label, value))| {
                    let marker = if idx == *focus { "▶" } else { " " };
                    let cursor = if idx == *focus { "_" } else { "" };
                    Line::raw(format!("{marker} {label:<6} {}{cursor}", literal(value)))
                })
                .collect();
            let submit = if *focus == FORM_FIELDS.len() { "[Save]" } else { " Save " };
            lines.push(Line::raw(""));
            lines.push(Line::raw(format!("  {submit}   Esc: cancel  Tab: next field")));
            if let Some(msg) = error {
                lines.push(Line::styled(msg.clone(), Style::default().fg(app.theme.error)));
            }
            let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
        ModalState::DeleteConfirm { id, name, selected } => {
            let rect = centered_rect(50, 7, area);
            let yes = if *selected == 0 { "[Yes]" } else { " Yes " };
            let no = if *selected == 1 { "[No]" } else { " No " };
            let body = format!(
                "Delete user '{}' (id {id})?\nThis cannot be undone.\n\n  {yes}    {no}",
                literal(name)
            );
            let p = Paragraph::new(body).block(
                Block::default()
                    .title("Confirm delete")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
            f.render_widget(Clear, rect);
            f.render_widget(p, rect);
        }
    }
}
