//! Application state types and entry glue.
//!
//! `AppState` is everything the terminal shows besides the directory itself:
//! input mode, search buffer, selection, modal dialogs and notifications.
//! It is the [`Surface`] the controller renders into; [`Screen`] pairs it
//! with a terminal so every update is drawn immediately.
//!
pub mod controller;
pub mod keymap;
pub mod snapshot;
pub mod update;

use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::remote::UserDraft;
use crate::ui::theme::Theme;
use crate::view::{RenderedRow, RenderedView};
use controller::{Notification, Surface};
use keymap::Keymap;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// What the user form submits to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: u64 },
}

/// Labels of the form fields, in focus order.
pub const FORM_FIELDS: [&str; 3] = ["Name", "Email", "Phone"];

/// Modal dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    UserForm {
        mode: FormMode,
        fields: [String; 3],
        /// Focused field; `FORM_FIELDS.len()` is the submit button.
        focus: usize,
        error: Option<String>,
    },
    DeleteConfirm {
        id: u64,
        name: String,
        /// 0 = Yes, 1 = No
        selected: usize,
    },
}

impl ModalState {
    pub fn new_user() -> Self {
        Self::UserForm {
            mode: FormMode::Create,
            fields: Default::default(),
            focus: 0,
            error: None,
        }
    }

    pub fn edit_user(row: &RenderedRow) -> Self {
        Self::UserForm {
            mode: FormMode::Edit { id: row.id },
            fields: [row.name.clone(), row.email.clone(), row.phone.clone()],
            focus: 0,
            error: None,
        }
    }

    pub fn delete_user(row: &RenderedRow) -> Self {
        Self::DeleteConfirm {
            id: row.id,
            name: row.name.clone(),
            selected: 1,
        }
    }
}

/// A notification with its dismissal deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

pub struct AppState {
    pub source: String,
    pub view: RenderedView,
    /// Row index within the current page.
    pub selected_row: usize,
    pub input_mode: InputMode,
    pub search_input: String,
    /// Term currently applied to the directory, shown in the header.
    pub active_search: String,
    pub modal: Option<ModalState>,
    pub toast: Option<Toast>,
    pub loading: bool,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_keybinds: bool,
}

impl AppState {
    pub fn new(source: impl Into<String>, theme: Theme, keymap: Keymap) -> Self {
        Self {
            source: source.into(),
            view: RenderedView::default(),
            selected_row: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            active_search: String::new(),
            modal: None,
            toast: None,
            loading: false,
            theme,
            keymap,
            show_keybinds: false,
        }
    }

    pub fn selected(&self) -> Option<&RenderedRow> {
        self.view.rows().get(self.selected_row)
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Drop the toast once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
        }
    }
}

impl Surface for AppState {
    fn show(&mut self, view: RenderedView) {
        self.view = view;
        let rows = self.view.rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    fn notify(&mut self, notification: Notification) {
        let expires_at = Instant::now() + notification.kind.ttl();
        self.toast = Some(Toast { notification, expires_at });
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
}

/// Build the draft a form would submit, or name the first blank field.
pub fn form_draft(fields: &[String; 3]) -> Result<UserDraft, &'static str> {
    let draft = UserDraft::new(&fields[0], &fields[1], &fields[2]);
    match draft.missing_field() {
        Some(field) => Err(field),
        None => Ok(draft),
    }
}

/// An [`AppState`] bound to a terminal; every surface update is drawn at once.
pub struct Screen<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    pub state: AppState,
}

impl<'t, B: Backend> Screen<'t, B> {
    pub fn new(terminal: &'t mut Terminal<B>, state: AppState) -> Self {
        Self { terminal, state }
    }

    pub fn draw(&mut self) -> std::io::Result<()> {
        let state = &self.state;
        self.terminal.draw(|f| crate::ui::render(f, state))?;
        Ok(())
    }

    pub fn terminal(&self) -> &Terminal<B> {
        self.terminal
    }

    fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            tracing::warn!(error = %e, "redraw failed");
        }
    }
}

impl<B: Backend> Surface for Screen<'_, B> {
    fn show(&mut self, view: RenderedView) {
        self.state.show(view);
        self.redraw();
    }

    fn notify(&mut self, notification: Notification) {
        self.state.notify(notification);
        self.redraw();
    }

    fn set_loading(&mut self, loading: bool) {
        self.state.set_loading(loading);
        self.redraw();
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::User;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new("http://test/users", Theme::dark(), Keymap::default())
    }

    #[test]
    fn show_clamps_selection_to_new_rows() {
        let mut app = state();
        let users: Vec<User> = (1..=3)
            .map(|id| User { id, name: format!("u{id}"), email: "e".into(), phone: "p".into() })
            .collect();
        let refs: Vec<&User> = users.iter().collect();
        app.show(crate::view::render(&refs, 1, 1));
        app.selected_row = 2;
        app.show(crate::view::render(&refs[..1], 1, 1));
        assert_eq!(app.selected_row, 0);
        assert_eq!(app.selected().map(|r| r.id), Some(1));

        app.show(crate::view::render(&[], 1, 1));
        assert!(app.selected().is_none());
    }

    #[test]
    fn toasts_expire_after_their_ttl() {
        let mut app = state();
        app.notify(Notification::success("saved"));
        let deadline = app.toast.as_ref().unwrap().expires_at;
        app.tick(deadline - Duration::from_millis(1));
        assert!(app.toast.is_some());
        app.tick(deadline);
        assert!(app.toast.is_none());

        let before = Instant::now();
        app.notify(Notification::error("boom"));
        let t = app.toast.as_ref().unwrap();
        assert!(t.expires_at >= before + Duration::from_secs(5));
    }

    #[test]
    fn form_draft_requires_every_field() {
        let fields = ["Ann".to_string(), "  ".to_string(), "1".to_string()];
        assert_eq!(form_draft(&fields), Err("email"));
        let fields = ["Ann".to_string(), "a@x".to_string(), "1".to_string()];
        assert_eq!(form_draft(&fields).unwrap().email, "a@x");
    }
}
