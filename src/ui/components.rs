//! Shared UI components (status bar, keybindings pane, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::controller::NotificationKind;
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};

/// Render the bottom status bar: mode, loading indicator and the active toast.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "EDIT",
    };
    let base = Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg);
    let mut spans = vec![Span::styled(format!(" mode: {mode} "), base)];
    if app.loading {
        spans.push(Span::styled(
            " Loading… ",
            base.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        ));
    }
    if let Some(toast) = &app.toast {
        let color = match toast.notification.kind {
            NotificationKind::Success => app.theme.success,
            NotificationKind::Error => app.theme.error,
        };
        spans.push(Span::styled(
            format!(" {} ", toast.notification.message),
            base.fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

/// Render the keybindings pane from the active keymap.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title("Keybindings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let sections: [(&str, &[(&str, KeyAction)]); 2] = [
        (
            "General:",
            &[
                ("Search", KeyAction::StartSearch),
                ("Clear search", KeyAction::ClearSearch),
                ("New user", KeyAction::NewUser),
                ("Edit user", KeyAction::EditSelection),
                ("Delete user", KeyAction::DeleteSelection),
                ("Reload", KeyAction::Reload),
                ("Toggle this pane", KeyAction::ToggleKeybindsPane),
                ("Quit", KeyAction::Quit),
            ],
        ),
        (
            "Navigation:",
            &[
                ("Move up", KeyAction::MoveUp),
                ("Move down", KeyAction::MoveDown),
                ("Previous page", KeyAction::PrevPage),
                ("Next page", KeyAction::NextPage),
            ],
        ),
    ];
    let label_w = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.len()))
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = Vec::new();
    for (title, rows) in sections {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (label, action) in rows {
            lines.push(Line::from(vec![
                Span::raw(format!("  {label:>label_w$} │ ")),
                Span::styled(
                    app.keymap.keys_for(*action).join(", "),
                    Style::default().add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "In dialogs:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw("  Tab/Up/Down move, Enter confirms, Esc cancels"));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
