// Unit tests for usrdir-manager
// Controller flows against an in-memory collection and a recording surface

use std::num::NonZeroUsize;
use std::sync::Mutex;

use usrdir_manager::TransportError;
use usrdir_manager::app::controller::{
    ActionOutcome, Controller, Intent, Notification, NotificationKind, Surface,
};
use usrdir_manager::model::DirectoryModel;
use usrdir_manager::remote::{DirectoryApi, User, UserDraft};
use usrdir_manager::view::{RenderedView, TableBody};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    List,
    Create(UserDraft),
    Update(u64, UserDraft),
    Delete(u64),
}

/// Collection stand-in: serves a fixed list, records every call and fails
/// the operations it is told to.
#[derive(Default)]
struct FakeApi {
    users: Vec<User>,
    /// Id the "server" assigns to created records.
    server_id: u64,
    fail_list: Option<u16>,
    fail_create: Option<u16>,
    fail_update: Option<u16>,
    fail_delete: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    fn with_users(users: Vec<User>) -> Self {
        Self { users, server_id: 11, ..Default::default() }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn failing(status: Option<u16>) -> Result<(), TransportError> {
    match status {
        Some(code) => Err(TransportError::Status(code)),
        None => Ok(()),
    }
}

impl DirectoryApi for FakeApi {
    async fn list(&self) -> Result<Vec<User>, TransportError> {
        self.record(Call::List);
        failing(self.fail_list)?;
        Ok(self.users.clone())
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, TransportError> {
        self.record(Call::Create(draft.clone()));
        failing(self.fail_create)?;
        Ok(User {
            id: self.server_id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
        })
    }

    async fn update(&self, id: u64, draft: &UserDraft) -> Result<(), TransportError> {
        self.record(Call::Update(id, draft.clone()));
        failing(self.fail_update)
    }

    async fn delete(&self, id: u64) -> Result<(), TransportError> {
        self.record(Call::Delete(id));
        failing(self.fail_delete)
    }
}

#[derive(Default)]
struct Recorder {
    views: Vec<RenderedView>,
    notifications: Vec<Notification>,
    loading: Vec<bool>,
}

impl Recorder {
    fn last_view(&self) -> &RenderedView {
        self.views.last().expect("at least one render")
    }

    fn last_ids(&self) -> Vec<u64> {
        self.last_view().rows().iter().map(|r| r.id).collect()
    }

    fn last_notification(&self) -> &Notification {
        self.notifications.last().expect("a notification")
    }
}

impl Surface for Recorder {
    fn show(&mut self, view: RenderedView) {
        self.views.push(view);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading.push(loading);
    }
}

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: format!("555-{id:04}"),
    }
}

fn seeded(n: u64) -> Vec<User> {
    (1..=n).map(|id| user(id, &format!("User{id}"))).collect()
}

fn controller(api: FakeApi, page_size: usize) -> Controller<FakeApi, Recorder> {
    let page_size = NonZeroUsize::new(page_size).unwrap();
    Controller::new(DirectoryModel::new(page_size), api, Recorder::default())
}

async fn loaded(api: FakeApi, page_size: usize) -> Controller<FakeApi, Recorder> {
    let mut c = controller(api, page_size);
    assert_eq!(c.load().await, ActionOutcome::Applied);
    c
}

// 1) Loading
#[tokio::test]
async fn load_renders_first_page_and_toggles_loading() {
    let c = loaded(FakeApi::with_users(seeded(10)), 5).await;
    let s = c.surface();
    assert_eq!(s.last_ids(), vec![1, 2, 3, 4, 5]);
    assert_eq!(s.last_view().page_label(), "Page 1 of 2");
    assert!(!s.last_view().prev_enabled);
    assert!(s.last_view().next_enabled);
    assert_eq!(s.loading, vec![true, false]);
    assert!(s.notifications.is_empty());
}

#[tokio::test]
async fn failed_load_keeps_model_empty_and_notifies() {
    let api = FakeApi { fail_list: Some(500), ..FakeApi::with_users(seeded(3)) };
    let mut c = controller(api, 5);
    assert_eq!(c.load().await, ActionOutcome::Failed);
    assert!(c.model().all().is_empty());
    let n = c.surface().last_notification();
    assert_eq!(n.kind, NotificationKind::Error);
    assert!(n.message.starts_with("Failed to fetch users"));
    assert!(n.message.contains("HTTP error! Status: 500"));
    assert_eq!(c.surface().loading, vec![true, false]);
}

// 2) Search
#[tokio::test]
async fn search_filters_by_name_and_clear_restores_everything() {
    let api = FakeApi::with_users(vec![
        user(1, "Ann"),
        user(2, "Bob"),
        user(3, "Joanna"),
        user(4, "Carl"),
    ]);
    let mut c = loaded(api, 5).await;

    c.dispatch(Intent::Search("  ANN ".into())).await;
    assert_eq!(c.surface().last_ids(), vec![1, 3]);

    c.dispatch(Intent::Search("zzz".into())).await;
    assert_eq!(c.surface().last_view().body, TableBody::Empty);
    assert_eq!(c.surface().last_view().page_label(), "Page 1 of 1");

    c.dispatch(Intent::ClearSearch).await;
    assert_eq!(c.surface().last_ids(), vec![1, 2, 3, 4]);
    assert_eq!(c.api().calls(), vec![Call::List]);
}

// 3) Create
#[tokio::test]
async fn create_assigns_next_local_id_and_prepends() {
    let mut c = loaded(FakeApi::with_users(seeded(10)), 5).await;
    c.dispatch(Intent::NextPage).await;

    let draft = UserDraft::new("Zed", "zed@example.com", "555");
    let outcome = c.dispatch(Intent::Create(draft.clone())).await;
    assert_eq!(outcome, ActionOutcome::Applied);

    // server said 11 but the model decides
    assert_eq!(c.model().all()[0].id, 11);
    assert_eq!(c.model().page(), 1);
    assert_eq!(c.surface().last_ids(), vec![11, 1, 2, 3, 4]);
    assert_eq!(
        c.surface().last_notification(),
        &Notification::success("User created successfully!")
    );
    assert_eq!(c.api().calls(), vec![Call::List, Call::Create(draft)]);
}

#[tokio::test]
async fn created_ids_keep_growing_when_server_repeats_itself() {
    let mut c = loaded(FakeApi::with_users(seeded(10)), 5).await;
    for name in ["A", "B", "C"] {
        c.request_create(UserDraft::new(name, "x@y", "1")).await;
    }
    let ids: Vec<u64> = c.model().all().iter().take(3).map(|u| u.id).collect();
    assert_eq!(ids, vec![13, 12, 11]);
}

#[tokio::test]
async fn failed_create_leaves_directory_untouched() {
    let api = FakeApi { fail_create: Some(503), ..FakeApi::with_users(seeded(3)) };
    let mut c = loaded(api, 5).await;
    let renders = c.surface().views.len();

    let outcome = c.request_create(UserDraft::new("Zed", "z@z", "1")).await;
    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(c.model().all().len(), 3);
    assert_eq!(c.surface().views.len(), renders);
    let n = c.surface().last_notification();
    assert_eq!(n.kind, NotificationKind::Error);
    assert!(n.message.starts_with("Failed to create user"));
}

// 4) Edit
#[tokio::test]
async fn seeded_edit_calls_remote_and_local_edit_does_not() {
    let mut c = loaded(FakeApi::with_users(seeded(10)), 5).await;
    c.request_create(UserDraft::new("Local", "l@l", "1")).await;

    let draft = UserDraft::new("Renamed", "r@r", "2");
    assert_eq!(c.request_edit(5, draft.clone()).await, ActionOutcome::Applied);
    assert_eq!(c.request_edit(11, draft.clone()).await, ActionOutcome::Applied);

    let updates: Vec<Call> = c
        .api()
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::Update(..)))
        .collect();
    assert_eq!(updates, vec![Call::Update(5, draft.clone())]);

    for id in [5, 11] {
        let u = c.model().get(id).unwrap();
        assert_eq!((u.name.as_str(), u.email.as_str(), u.phone.as_str()), ("Renamed", "r@r", "2"));
    }
    assert_eq!(
        c.surface().last_notification(),
        &Notification::success("User updated successfully!")
    );
}

#[tokio::test]
async fn editing_unknown_id_fails_without_remote_call() {
    let mut c = loaded(FakeApi::with_users(seeded(3)), 5).await;
    let outcome = c.request_edit(7, UserDraft::new("X", "x@x", "1")).await;
    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(c.api().calls(), vec![Call::List]);
    assert_eq!(
        c.surface().last_notification().message,
        "Failed to update user: User 7 not found"
    );
}

#[tokio::test]
async fn failed_remote_edit_keeps_old_fields() {
    let api = FakeApi { fail_update: Some(500), ..FakeApi::with_users(seeded(3)) };
    let mut c = loaded(api, 5).await;
    let outcome = c.request_edit(2, UserDraft::new("New", "n@n", "9")).await;
    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(c.model().get(2), Some(&user(2, "User2")));
}

// 5) Delete
#[tokio::test]
async fn delete_removes_record_and_rolls_back_empty_page() {
    let mut c = loaded(FakeApi::with_users(seeded(6)), 5).await;
    c.next_page();
    assert_eq!(c.surface().last_ids(), vec![6]);

    assert_eq!(c.dispatch(Intent::Delete { id: 6 }).await, ActionOutcome::Applied);
    assert_eq!(c.model().page(), 1);
    assert_eq!(c.surface().last_ids(), vec![1, 2, 3, 4, 5]);
    assert!(!c.surface().last_view().next_enabled);
    assert_eq!(
        c.surface().last_notification(),
        &Notification::success("User deleted successfully!")
    );
}

#[tokio::test]
async fn failed_delete_keeps_record_and_reports_status() {
    let api = FakeApi { fail_delete: Some(500), ..FakeApi::with_users(seeded(3)) };
    let mut c = loaded(api, 5).await;
    let outcome = c.request_delete(2).await;
    assert_eq!(outcome, ActionOutcome::Failed);
    assert_eq!(c.model().all().len(), 3);
    assert!(c.model().get(2).is_some());
    assert_eq!(
        c.surface().last_notification().message,
        "Failed to delete user: HTTP error! Status: 500"
    );
    assert_eq!(c.api().calls(), vec![Call::List, Call::Delete(2)]);
}

// 6) Paging
#[tokio::test]
async fn paging_stops_at_both_ends() {
    let mut c = loaded(FakeApi::with_users(seeded(12)), 5).await;
    assert_eq!(c.prev_page(), ActionOutcome::Failed);
    assert_eq!(c.next_page(), ActionOutcome::Applied);
    assert_eq!(c.next_page(), ActionOutcome::Applied);
    assert_eq!(c.surface().last_ids(), vec![11, 12]);
    assert_eq!(c.next_page(), ActionOutcome::Failed);
    assert_eq!(c.model().page(), 3);
    assert_eq!(c.surface().last_view().page_label(), "Page 3 of 3");
}

#[tokio::test]
async fn search_resets_to_first_page() {
    let mut c = loaded(FakeApi::with_users(seeded(12)), 5).await;
    c.next_page();
    c.search("user1");
    assert_eq!(c.model().page(), 1);
    assert_eq!(c.surface().last_ids(), vec![1, 10, 11, 12]);
}

#[tokio::test]
async fn quit_intent_is_a_noop_for_the_directory() {
    let mut c = loaded(FakeApi::with_users(seeded(2)), 5).await;
    let renders = c.surface().views.len();
    assert_eq!(c.dispatch(Intent::Quit).await, ActionOutcome::Applied);
    assert_eq!(c.surface().views.len(), renders);
}
