use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::app::controller::{ActionOutcome, Controller, Intent};
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, FORM_FIELDS, FormMode, InputMode, ModalState, Screen, form_draft};
use crate::config::Cli;
use crate::model::DirectoryModel;
use crate::remote::HttpDirectoryClient;
use crate::ui::theme::Theme;

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, cli: &Cli) -> Result<()> {
    let client = HttpDirectoryClient::new(cli.api_url.clone())?;
    let state = AppState::new(cli.api_url.as_str(), Theme::load_or_init(), Keymap::load_or_init());
    let screen = Screen::new(terminal, state);
    let mut controller = Controller::new(DirectoryModel::new(cli.page_size), client, screen);

    controller.load().await;

    loop {
        let screen = controller.surface_mut();
        screen.state.tick(Instant::now());
        screen.draw()?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(intent) = handle_key(&mut controller.surface_mut().state, key) else {
            continue;
        };
        if intent == Intent::Quit {
            break;
        }
        debug!(?intent, "dispatching");
        let from_modal = matches!(
            intent,
            Intent::Create(_) | Intent::Edit { .. } | Intent::Delete { .. }
        );
        let reload = intent == Intent::Reload;
        let outcome = controller.dispatch(intent).await;
        if outcome == ActionOutcome::Applied {
            let state = &mut controller.surface_mut().state;
            // a failed submission keeps the dialog open with its input intact
            if from_modal {
                state.close_modal();
            }
            // a fresh load drops the search
            if reload {
                state.active_search.clear();
                state.search_input.clear();
                state.selected_row = 0;
            }
        }
    }

    Ok(())
}

/// Update UI state for a key press and return the directory action it
/// triggers, if any.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Intent> {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Modal => handle_modal_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Option<Intent> {
    match app.keymap.resolve(&key)? {
        KeyAction::Quit => Some(Intent::Quit),
        KeyAction::StartSearch => {
            app.search_input = app.active_search.clone();
            app.input_mode = InputMode::Search;
            None
        }
        KeyAction::ClearSearch => {
            app.search_input.clear();
            app.active_search.clear();
            app.selected_row = 0;
            Some(Intent::ClearSearch)
        }
        KeyAction::NewUser => {
            app.open_modal(ModalState::new_user());
            None
        }
        KeyAction::EditSelection => {
            let modal = app.selected().map(ModalState::edit_user)?;
            app.open_modal(modal);
            None
        }
        KeyAction::DeleteSelection => {
            let modal = app.selected().map(ModalState::delete_user)?;
            app.open_modal(modal);
            None
        }
        KeyAction::MoveUp => {
            app.selected_row = app.selected_row.saturating_sub(1);
            None
        }
        KeyAction::MoveDown => {
            if app.selected_row + 1 < app.view.rows().len() {
                app.selected_row += 1;
            }
            None
        }
        KeyAction::PrevPage => {
            app.selected_row = 0;
            Some(Intent::PrevPage)
        }
        KeyAction::NextPage => {
            app.selected_row = 0;
            Some(Intent::NextPage)
        }
        KeyAction::Reload => Some(Intent::Reload),
        KeyAction::ToggleKeybindsPane => {
            app.show_keybinds = !app.show_keybinds;
            None
        }
        KeyAction::Ignore => None,
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.active_search = app.search_input.trim().to_string();
            app.selected_row = 0;
            Some(Intent::Search(app.search_input.clone()))
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input = app.active_search.clone();
            None
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_modal_key(app: &mut AppState, key: KeyEvent) -> Option<Intent> {
    let plain_char = match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(c),
        _ => None,
    };
    match app.modal.as_mut()? {
        ModalState::UserForm { mode, fields, focus, error } => {
            let stops = FORM_FIELDS.len() + 1;
            match key.code {
                KeyCode::Esc => app.close_modal(),
                KeyCode::Tab | KeyCode::Down => *focus = (*focus + 1) % stops,
                KeyCode::BackTab | KeyCode::Up => *focus = (*focus + stops - 1) % stops,
                KeyCode::Backspace => {
                    if let Some(field) = fields.get_mut(*focus) {
                        field.pop();
                    }
                }
                KeyCode::Enter => match form_draft(fields) {
                    Ok(draft) => {
                        *error = None;
                        let intent = match *mode {
                            FormMode::Create => Intent::Create(draft),
                            FormMode::Edit { id } => Intent::Edit { id, draft },
                        };
                        if matches!(intent, Intent::Create(_)) {
                            app.selected_row = 0;
                        }
                        return Some(intent);
                    }
                    Err(missing) => {
                        *error = Some(format!("Please fill in the {missing} field"));
                        *focus = match missing {
                            "name" => 0,
                            "email" => 1,
                            _ => 2,
                        };
                    }
                },
                _ => {
                    if let (Some(c), Some(field)) = (plain_char, fields.get_mut(*focus)) {
                        field.push(c);
                    }
                }
            }
            None
        }
        ModalState::DeleteConfirm { id, selected, .. } => {
            let id = *id;
            match key.code {
                KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
                KeyCode::Left
                | KeyCode::Right
                | KeyCode::Tab
                | KeyCode::Char('h')
                | KeyCode::Char('l') => *selected = 1 - *selected,
                KeyCode::Char('y') => return Some(Intent::Delete { id }),
                KeyCode::Enter => {
                    if *selected == 0 {
                        return Some(Intent::Delete { id });
                    }
                    app.close_modal();
                }
                _ => {}
            }
            None
        }
    }
}
