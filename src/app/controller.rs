//! Interaction controller: turns user intents into remote calls, model
//! mutations and re-renders.
//!
//! Every remote path has the same shape: loading on, await the call, on error
//! notify and leave the model alone, on success mutate the model and render,
//! loading off. Errors never escape this module.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::DirectoryError;
use crate::model::{DirectoryModel, PageStep, is_seeded_id};
use crate::remote::{DirectoryApi, UserDraft};
use crate::view::{self, RenderedView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// How long the notification stays on screen.
    pub fn ttl(self) -> Duration {
        match self {
            Self::Success => Duration::from_secs(3),
            Self::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NotificationKind::Error, message: message.into() }
    }
}

/// Whatever presents the directory to the user.
pub trait Surface {
    fn show(&mut self, view: RenderedView);
    fn notify(&mut self, notification: Notification);
    fn set_loading(&mut self, loading: bool);
}

/// A user action, decoupled from how it was triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Reload,
    Search(String),
    ClearSearch,
    Create(UserDraft),
    Edit { id: u64, draft: UserDraft },
    Delete { id: u64 },
    PrevPage,
    NextPage,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Failed,
}

pub struct Controller<A, S> {
    model: DirectoryModel,
    api: A,
    surface: S,
}

impl<A: DirectoryApi, S: Surface> Controller<A, S> {
    pub fn new(model: DirectoryModel, api: A, surface: S) -> Self {
        Self { model, api, surface }
    }

    pub fn model(&self) -> &DirectoryModel {
        &self.model
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_parts(self) -> (DirectoryModel, A, S) {
        (self.model, self.api, self.surface)
    }

    pub async fn dispatch(&mut self, intent: Intent) -> ActionOutcome {
        match intent {
            Intent::Reload => self.load().await,
            Intent::Search(term) => self.search(&term),
            Intent::ClearSearch => self.clear_search(),
            Intent::Create(draft) => self.request_create(draft).await,
            Intent::Edit { id, draft } => self.request_edit(id, draft).await,
            Intent::Delete { id } => self.request_delete(id).await,
            Intent::PrevPage => self.prev_page(),
            Intent::NextPage => self.next_page(),
            Intent::Quit => ActionOutcome::Applied,
        }
    }

    /// Fetch the whole collection and replace the local directory with it.
    pub async fn load(&mut self) -> ActionOutcome {
        self.surface.set_loading(true);
        let outcome = match self.api.list().await {
            Ok(users) => {
                info!(count = users.len(), "fetched users");
                self.model.load_all(users);
                self.render();
                ActionOutcome::Applied
            }
            Err(e) => self.fail("Failed to fetch users", &DirectoryError::from(e)),
        };
        self.surface.set_loading(false);
        outcome
    }

    pub fn search(&mut self, term: &str) -> ActionOutcome {
        self.model.apply_filter(term);
        self.render();
        ActionOutcome::Applied
    }

    pub fn clear_search(&mut self) -> ActionOutcome {
        self.search("")
    }

    pub async fn request_create(&mut self, draft: UserDraft) -> ActionOutcome {
        self.surface.set_loading(true);
        let outcome = match self.api.create(&draft).await {
            Ok(created) => {
                let user = self.model.insert_new(created.into());
                info!(id = user.id, "created user");
                self.render();
                self.surface.notify(Notification::success("User created successfully!"));
                ActionOutcome::Applied
            }
            Err(e) => self.fail("Failed to create user", &DirectoryError::from(e)),
        };
        self.surface.set_loading(false);
        outcome
    }

    /// Update a record. Only seeded ids are sent to the remote collection;
    /// locally fabricated ones are unknown upstream and change locally only.
    pub async fn request_edit(&mut self, id: u64, draft: UserDraft) -> ActionOutcome {
        self.surface.set_loading(true);
        let outcome = match self.edit(id, draft).await {
            Ok(()) => {
                self.render();
                self.surface.notify(Notification::success("User updated successfully!"));
                ActionOutcome::Applied
            }
            Err(e) => self.fail("Failed to update user", &e),
        };
        self.surface.set_loading(false);
        outcome
    }

    async fn edit(&mut self, id: u64, draft: UserDraft) -> Result<(), DirectoryError> {
        if self.model.get(id).is_none() {
            return Err(DirectoryError::NotFound { id });
        }
        if is_seeded_id(id) {
            self.api.update(id, &draft).await?;
        } else {
            info!(id, "skipping remote update for locally created user");
        }
        self.model.apply_edit(id, draft)?;
        info!(id, "updated user");
        Ok(())
    }

    pub async fn request_delete(&mut self, id: u64) -> ActionOutcome {
        self.surface.set_loading(true);
        let outcome = match self.api.delete(id).await {
            Ok(()) => {
                if self.model.remove_by_id(id).is_none() {
                    warn!(id, "deleted user was not in the local directory");
                }
                self.render();
                self.surface.notify(Notification::success("User deleted successfully!"));
                ActionOutcome::Applied
            }
            Err(e) => self.fail("Failed to delete user", &DirectoryError::from(e)),
        };
        self.surface.set_loading(false);
        outcome
    }

    pub fn prev_page(&mut self) -> ActionOutcome {
        self.step(PageStep::Prev)
    }

    pub fn next_page(&mut self) -> ActionOutcome {
        self.step(PageStep::Next)
    }

    fn step(&mut self, step: PageStep) -> ActionOutcome {
        let moved = self.model.go_to_page(step);
        self.render();
        if moved { ActionOutcome::Applied } else { ActionOutcome::Failed }
    }

    fn render(&mut self) {
        let slice = self.model.current_slice();
        let view = view::render(&slice, self.model.page(), self.model.page_count());
        self.surface.show(view);
    }

    fn fail(&mut self, what: &str, err: &DirectoryError) -> ActionOutcome {
        warn!(error = %err, "{what}");
        self.surface.notify(Notification::error(format!("{what}: {err}")));
        ActionOutcome::Failed
    }
}
