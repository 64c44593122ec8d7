//! Optimistic list state, shared by every list-bearing view.
//!
//! Each view owns a [`ListController`] plus an [`crate::api::Api`] handle.
//! The contract, kept in one place so the ordering semantics stay uniform:
//! local state changes strictly *after* a positive envelope, never
//! speculatively, and any failure is reduced to a diagnostic log; the view
//! simply does not reflect the mutation. Overlapping operations are not
//! serialized; they apply in completion order, and per-id removal is
//! idempotent so removals for distinct ids compose in any order.

pub mod inbox;
pub mod project_tasks;
pub mod projects;

use crate::api::{ApiError, Envelope};

pub use inbox::InboxController;
pub use project_tasks::{EditKind, EditTarget, ProjectTasksController};
pub use projects::ProjectsController;

/// Load lifecycle of a list view. Mutations happen while `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready,
}

/// In-memory, optimistically patched read-through cache of one backend
/// collection. Display order is whatever the backend returned, except that
/// newly created items are prepended.
pub struct ListController<T> {
    items: Vec<T>,
    state: ListState,
    id_of: fn(&T) -> &str,
}

impl<T> ListController<T> {
    pub fn new(id_of: fn(&T) -> &str) -> Self {
        Self {
            items: Vec::new(),
            state: ListState::Loading,
            id_of,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| (self.id_of)(item) == id)
    }

    pub fn begin_load(&mut self) {
        self.state = ListState::Loading;
    }

    /// Applies a read operation's outcome: replace the whole collection on
    /// success, keep the previous one on any failure. Always ends `Ready`:
    /// a failed load is logged, not surfaced.
    pub fn finish_load(&mut self, outcome: Result<Envelope<Vec<T>>, ApiError>) {
        match outcome {
            Ok(env) => {
                if let Some(items) = env.into_data() {
                    self.items = items;
                } else {
                    log::warn!("load returned no data; keeping previous items");
                }
            }
            Err(e) => log::warn!("load failed: {}", e),
        }
        self.state = ListState::Ready;
    }

    /// Prepends the created item if the backend confirmed it. Returns
    /// whether the collection changed (callers clear their input on true).
    pub fn apply_create(&mut self, outcome: Result<Envelope<T>, ApiError>) -> bool {
        match outcome {
            Ok(env) => match env.into_data() {
                Some(item) => {
                    self.items.insert(0, item);
                    true
                }
                None => {
                    log::warn!("create not confirmed by backend");
                    false
                }
            },
            Err(e) => {
                log::warn!("create failed: {}", e);
                false
            }
        }
    }

    /// Removes `id` from the visible collection, strictly after a positive
    /// envelope. Idempotent per id: removing an id that is already gone is a
    /// no-op, which is what makes overlapping removals order-insensitive.
    pub fn apply_remove<R>(&mut self, id: &str, outcome: Result<Envelope<R>, ApiError>) -> bool {
        match outcome {
            Ok(env) if env.success => {
                self.items.retain(|item| (self.id_of)(item) != id);
                true
            }
            Ok(env) => {
                log::warn!("remove of {} not confirmed: {:?}", id, env.error);
                false
            }
            Err(e) => {
                log::warn!("remove of {} failed: {}", id, e);
                false
            }
        }
    }

    /// Field-patches every item matching `pred`. Used after a confirmed
    /// update, where several denormalized rows can share one correlating id.
    pub fn patch_where(&mut self, pred: impl Fn(&T) -> bool, mut patch: impl FnMut(&mut T)) {
        for item in self.items.iter_mut().filter(|item| pred(item)) {
            patch(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        name: String,
    }

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: format!("item {}", id),
        }
    }

    fn loaded(ids: &[&str]) -> ListController<Item> {
        let mut list = ListController::new(|i: &Item| i.id.as_str());
        list.finish_load(Ok(Envelope::ok(ids.iter().map(|id| item(id)).collect())));
        list
    }

    fn confirmed() -> Result<Envelope<Value>, ApiError> {
        Ok(Envelope::ok(json!({})))
    }

    #[test]
    fn load_replaces_collection_and_becomes_ready() {
        let mut list = loaded(&["1", "2"]);
        assert_eq!(list.state(), ListState::Ready);
        assert_eq!(list.items().len(), 2);

        list.begin_load();
        assert!(list.is_loading());
        list.finish_load(Ok(Envelope::ok(vec![item("9")])));
        assert_eq!(list.items(), &[item("9")]);
    }

    #[test]
    fn failed_load_keeps_previous_collection() {
        let mut list = loaded(&["1"]);
        list.begin_load();
        list.finish_load(Err(ApiError::Transport("boom".into())));
        assert_eq!(list.state(), ListState::Ready);
        assert_eq!(list.items(), &[item("1")]);

        list.begin_load();
        list.finish_load(Ok(Envelope::fail("backend says no")));
        assert_eq!(list.items(), &[item("1")]);
    }

    #[test]
    fn create_prepends_confirmed_item() {
        let mut list = loaded(&["1"]);
        assert!(list.apply_create(Ok(Envelope::ok(item("2")))));
        assert_eq!(list.items()[0], item("2"));
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn unconfirmed_create_changes_nothing() {
        let mut list = loaded(&["1"]);
        assert!(!list.apply_create(Ok(Envelope::fail("nope"))));
        assert!(!list.apply_create(Err(ApiError::Transport("boom".into()))));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn remove_only_after_positive_envelope() {
        let mut list = loaded(&["1", "2"]);
        assert!(!list.apply_remove("1", Ok(Envelope::<Value>::fail("nope"))));
        assert!(list.contains("1"));

        assert!(list.apply_remove("1", confirmed()));
        assert!(!list.contains("1"));
        assert!(list.contains("2"));
    }

    #[test]
    fn overlapping_removals_are_order_insensitive() {
        // Two in-flight removals for distinct ids: whichever completion
        // order, each removes only its own id.
        for flipped in [false, true] {
            let mut list = loaded(&["a", "b", "c"]);
            let (first, second) = if flipped { ("b", "a") } else { ("a", "b") };
            list.apply_remove(first, confirmed());
            list.apply_remove(second, confirmed());
            assert!(!list.contains("a"));
            assert!(!list.contains("b"));
            assert_eq!(list.items(), &[item("c")]);
        }
    }

    #[test]
    fn patch_where_touches_only_matching_items() {
        let mut list = loaded(&["1", "2", "3"]);
        list.patch_where(|i| i.id != "2", |i| i.name = "patched".to_string());
        let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["patched", "item 2", "patched"]);
    }
}
