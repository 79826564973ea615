//! Directory model: the local mirror of the remote collection.
//!
//! Holds every known record (`all`), the subset matching the active search
//! (`filtered`) and a 1-based page cursor into that subset. `filtered` is
//! re-derived from `all` after every change and the cursor is clamped into
//! `[1, page_count()]` after every operation.

use std::num::NonZeroUsize;

use crate::error::DirectoryError;
use crate::remote::{User, UserDraft};
use crate::search::{matches_name, normalize_term};

/// Highest id of the records the remote collection actually stores.
/// Anything above was fabricated locally and is unknown to the server.
pub const SEEDED_ID_CEILING: u64 = 10;

/// Whether the remote collection knows about `id`.
pub fn is_seeded_id(id: u64) -> bool {
    id <= SEEDED_ID_CEILING
}

/// One step of page navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageStep {
    Prev,
    Next,
}

#[derive(Clone, Debug)]
pub struct DirectoryModel {
    all: Vec<User>,
    /// Positions into `all`, in `all` order.
    filtered: Vec<usize>,
    query: String,
    page: usize,
    page_size: NonZeroUsize,
}

impl DirectoryModel {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            page: 1,
            page_size,
        }
    }

    pub fn all(&self) -> &[User] {
        &self.all
    }

    /// Records matching the active search, in directory order.
    pub fn filtered(&self) -> impl Iterator<Item = &User> + '_ {
        self.filtered.iter().map(|&i| &self.all[i])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Active (normalized) search term; empty when no filter is applied.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.all.iter().find(|u| u.id == id)
    }

    /// Replace the whole directory with freshly fetched records.
    ///
    /// Drops any active search so the new records are all visible.
    pub fn load_all(&mut self, records: Vec<User>) {
        self.all = records;
        self.query.clear();
        self.rederive();
        self.page = 1;
    }

    /// Filter by name with a case-insensitive substring match. A blank term
    /// clears the filter. Always returns to the first page.
    pub fn apply_filter(&mut self, term: &str) {
        self.query = normalize_term(term);
        self.rederive();
        self.page = 1;
    }

    /// Add a created record at the front of the directory.
    ///
    /// The id is always `max(existing ids) + 1`; whatever id the server
    /// handed out is discarded since the backing collection does not keep
    /// created records.
    pub fn insert_new(&mut self, draft: UserDraft) -> User {
        let id = self.all.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        };
        self.all.insert(0, user.clone());
        self.rederive();
        self.page = 1;
        user
    }

    /// Overwrite name, email and phone of an existing record. The page is
    /// kept unless the edit shrinks the filtered set below it.
    pub fn apply_edit(&mut self, id: u64, draft: UserDraft) -> Result<&User, DirectoryError> {
        let idx = self
            .all
            .iter()
            .position(|u| u.id == id)
            .ok_or(DirectoryError::NotFound { id })?;
        {
            let user = &mut self.all[idx];
            user.name = draft.name;
            user.email = draft.email;
            user.phone = draft.phone;
        }
        self.rederive();
        self.clamp_page();
        Ok(&self.all[idx])
    }

    /// Remove a record if present; an unknown id is a no-op. The page only
    /// ever moves backward as a result.
    pub fn remove_by_id(&mut self, id: u64) -> Option<User> {
        let idx = self.all.iter().position(|u| u.id == id)?;
        let removed = self.all.remove(idx);
        self.rederive();
        self.page = self.page.min(self.page_count());
        Some(removed)
    }

    /// Records on the current page.
    pub fn current_slice(&self) -> Vec<&User> {
        let size = self.page_size.get();
        let start = (self.page - 1) * size;
        self.filtered
            .iter()
            .skip(start)
            .take(size)
            .map(|&i| &self.all[i])
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size.get()).max(1)
    }

    /// Move one page back or forward. Returns `false` (and stays put) when the
    /// step would leave `[1, page_count()]`.
    pub fn go_to_page(&mut self, step: PageStep) -> bool {
        let target = match step {
            PageStep::Prev => self.page.checked_sub(1),
            PageStep::Next => Some(self.page + 1),
        };
        match target {
            Some(p) if (1..=self.page_count()).contains(&p) => {
                self.page = p;
                true
            }
            _ => false,
        }
    }

    fn rederive(&mut self) {
        let query = self.query.as_str();
        self.filtered = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, u)| matches_name(u, query))
            .map(|(i, _)| i)
            .collect();
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.page_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("user{id}@example.org"),
            phone: format!("555-01{id:02}"),
        }
    }

    fn model_with(page_size: usize, users: Vec<User>) -> DirectoryModel {
        let mut m = DirectoryModel::new(NonZeroUsize::new(page_size).unwrap());
        m.load_all(users);
        m
    }

    fn ids<'a>(users: impl IntoIterator<Item = &'a User>) -> Vec<u64> {
        users.into_iter().map(|u| u.id).collect()
    }

    #[test]
    fn search_keeps_matching_names_in_order() {
        let mut m = model_with(
            5,
            vec![mk_user(1, "Ann"), mk_user(2, "Bob"), mk_user(3, "Joanna"), mk_user(4, "DANIEL")],
        );
        m.apply_filter("  AN ");
        assert_eq!(m.query(), "an");
        assert_eq!(ids(m.filtered()), vec![1, 3, 4]);
        for u in m.filtered() {
            assert!(m.all().contains(u));
            assert!(u.name.to_lowercase().contains("an"));
        }

        m.apply_filter("   ");
        assert_eq!(m.filtered_len(), 4);
    }

    #[test]
    fn ann_and_bob_scenario() {
        let mut m = model_with(5, vec![mk_user(1, "Ann"), mk_user(2, "Bob")]);
        m.apply_filter("an");
        assert_eq!(ids(m.filtered()), vec![1]);
        assert_eq!(m.page(), 1);
    }

    #[test]
    fn insert_uses_max_plus_one_and_prepends() {
        let mut m = model_with(5, vec![mk_user(1, "a"), mk_user(3, "b")]);
        let created = m.insert_new(UserDraft::new("c", "c@x", "1"));
        assert_eq!(created.id, 4);
        assert_eq!(ids(m.all()), vec![4, 1, 3]);
        assert_eq!(m.page(), 1);

        let mut empty = model_with(5, vec![]);
        assert_eq!(empty.insert_new(UserDraft::new("z", "z@x", "1")).id, 1);
    }

    #[test]
    fn insert_respects_active_filter() {
        let mut m = model_with(5, vec![mk_user(1, "Ann"), mk_user(2, "Bob")]);
        m.apply_filter("bo");
        m.insert_new(UserDraft::new("Carl", "c@x", "1"));
        assert_eq!(ids(m.filtered()), vec![2]);
        m.insert_new(UserDraft::new("Bobby", "b@x", "1"));
        assert_eq!(ids(m.filtered()), vec![4, 2]);
    }

    #[test]
    fn edit_merges_fields_and_keeps_id() {
        let mut m = model_with(5, vec![mk_user(1, "Ann"), mk_user(2, "Bob")]);
        let edited = m.apply_edit(2, UserDraft::new("Robert", "r@x", "9")).unwrap();
        assert_eq!(edited.id, 2);
        assert_eq!(edited.name, "Robert");
        assert_eq!(ids(m.all()), vec![1, 2]);
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let mut m = model_with(5, vec![mk_user(1, "Ann")]);
        let err = m.apply_edit(9, UserDraft::new("x", "y", "z")).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { id: 9 }));
        assert_eq!(m.all()[0].name, "Ann");
    }

    #[test]
    fn edit_out_of_filter_clamps_page() {
        let users = (1..=6).map(|i| mk_user(i, &format!("ann{i}"))).collect();
        let mut m = model_with(5, users);
        m.apply_filter("ann");
        assert!(m.go_to_page(PageStep::Next));
        m.apply_edit(6, UserDraft::new("zed", "z@x", "1")).unwrap();
        assert_eq!(m.page_count(), 1);
        assert_eq!(m.page(), 1);
    }

    #[test]
    fn deleting_last_record_on_page_two_rolls_back() {
        let users = (1..=6).map(|i| mk_user(i, &format!("user{i}"))).collect();
        let mut m = model_with(5, users);
        assert!(m.go_to_page(PageStep::Next));
        assert_eq!(ids(m.current_slice()), vec![6]);

        assert!(m.remove_by_id(6).is_some());
        assert_eq!(m.page_count(), 1);
        assert_eq!(m.page(), 1);
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let mut m = model_with(5, vec![mk_user(1, "Ann")]);
        assert!(m.remove_by_id(77).is_none());
        assert_eq!(m.all().len(), 1);
        assert_eq!(m.filtered_len(), 1);
    }

    #[test]
    fn paging_stays_in_bounds() {
        let users = (1..=11).map(|i| mk_user(i, "x")).collect();
        let mut m = model_with(5, users);
        assert_eq!(m.page_count(), 3);
        assert!(!m.go_to_page(PageStep::Prev));
        assert!(m.go_to_page(PageStep::Next));
        assert!(m.go_to_page(PageStep::Next));
        assert!(!m.go_to_page(PageStep::Next));
        assert_eq!(m.page(), 3);
        assert_eq!(ids(m.current_slice()), vec![11]);

        let mut empty = model_with(5, vec![]);
        assert_eq!(empty.page_count(), 1);
        assert!(empty.current_slice().is_empty());
        assert!(!empty.go_to_page(PageStep::Next));
    }

    #[test]
    fn mixed_mutations_keep_cursor_and_ids_valid() {
        let users = (1..=10).map(|i| mk_user(i, &format!("name{i}"))).collect();
        let mut m = model_with(3, users);
        // small LCG so the sequence is reproducible
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            seed >> 33
        };
        for _ in 0..500 {
            match next() % 6 {
                0 => {
                    m.insert_new(UserDraft::new(&format!("new{}", next() % 7), "e", "p"));
                }
                1 => {
                    let id = next() % 25;
                    let _ = m.apply_edit(id, UserDraft::new(&format!("name{}", next() % 5), "e", "p"));
                }
                2 => {
                    m.remove_by_id(next() % 25);
                }
                3 => m.apply_filter(["", "1", "new", "NAME", "zz"][(next() % 5) as usize]),
                4 => {
                    m.go_to_page(PageStep::Next);
                }
                _ => {
                    m.go_to_page(PageStep::Prev);
                }
            }
            assert!((1..=m.page_count()).contains(&m.page()));
            let mut seen: Vec<u64> = ids(m.all());
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), m.all().len());
            let order: Vec<u64> = ids(m.filtered());
            let in_all: Vec<u64> =
                ids(m.all().iter().filter(|u| order.contains(&u.id)));
            assert_eq!(order, in_all);
        }
    }

    #[test]
    fn seeded_id_boundary() {
        assert!(is_seeded_id(1));
        assert!(is_seeded_id(10));
        assert!(!is_seeded_id(11));
    }
}
