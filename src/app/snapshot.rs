//! Non-interactive rendering: drive the controller once and keep the result
//! as HTML instead of drawing it.

use std::num::NonZeroUsize;

use anyhow::{Result, bail};

use crate::app::controller::{ActionOutcome, Controller, Notification, NotificationKind, Surface};
use crate::model::DirectoryModel;
use crate::remote::DirectoryApi;
use crate::view::RenderedView;

/// Surface that remembers the last view and any error messages.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub view: RenderedView,
    pub errors: Vec<String>,
}

impl Surface for Snapshot {
    fn show(&mut self, view: RenderedView) {
        self.view = view;
    }

    fn notify(&mut self, notification: Notification) {
        if notification.kind == NotificationKind::Error {
            self.errors.push(notification.message);
        }
    }

    fn set_loading(&mut self, _loading: bool) {}
}

/// Fetch the directory, apply `search`, move to `page` (stopping at the last
/// one) and return the rendered table as HTML.
pub async fn render_html<A: DirectoryApi>(
    api: A,
    page_size: NonZeroUsize,
    search: Option<&str>,
    page: NonZeroUsize,
) -> Result<String> {
    let mut controller = Controller::new(DirectoryModel::new(page_size), api, Snapshot::default());
    if controller.load().await == ActionOutcome::Failed {
        let (_, _, snapshot) = controller.into_parts();
        bail!("{}", snapshot.errors.join("; "));
    }
    if let Some(term) = search {
        controller.search(term);
    }
    for _ in 1..page.get() {
        if controller.next_page() == ActionOutcome::Failed {
            break;
        }
    }
    Ok(controller.surface().view.to_html())
}
