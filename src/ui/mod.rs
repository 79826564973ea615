pub mod components;
pub mod theme;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let body = if app.show_keybinds {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(root[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(root[1])
    };

    let search = match app.input_mode {
        InputMode::Search => format!("  Search: {}_", users::literal(&app.search_input)),
        _ if !app.active_search.is_empty() => {
            format!("  Filter: \"{}\"", users::literal(&app.active_search))
        }
        _ => String::new(),
    };
    let p = Paragraph::new(format!(
        "{}{search}  | /: search  n: new  Enter: edit  Del: delete  ←/→: page  ?: keys  q: quit",
        app.source
    ))
    .block(
        Block::default()
            .title("usrdir-manager")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    users::render_users_table(f, body[0], app);
    if app.show_keybinds {
        components::render_keybinds_panel(f, body[1], app);
    }
    users::render_pagination(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(modal) = &app.modal {
        users::render_user_modal(f, f.area(), app, modal);
    }
}
