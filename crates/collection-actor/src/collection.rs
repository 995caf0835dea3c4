//! # In-Memory Collection
//!
//! [`Collection`] is the materialized form of the persisted document: an
//! ordered sequence of entities, in insertion order, scanned linearly.
//!
//! A collection lives for exactly one operation. It is loaded from the store,
//! changed, written back (for mutations) and dropped. No state is kept
//! between requests.
//!
//! ## Invariant
//!
//! Ids are pairwise distinct at rest. [`Collection::insert`] refuses an id that
//! is already present, so a bad allocator cannot produce a document with
//! duplicate ids. Documents written by other tools may still contain
//! duplicates; [`Collection::duplicate_ids`] reports them and lookups resolve to
//! the first match.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered collection of entities, serialized as a plain sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: ActorEntity> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Position of the first entity stored under `id`.
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Appends `item` to the end of the collection.
    ///
    /// Fails with [`FrameworkError::DuplicateId`] if its id is already taken.
    pub fn insert(&mut self, item: T) -> Result<(), FrameworkError> {
        if self.contains(item.id()) {
            return Err(FrameworkError::DuplicateId(item.id().to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Puts `item` in the slot currently holding `id`, returning the old value.
    pub fn replace(&mut self, id: &T::Id, item: T) -> Option<T> {
        let index = self.position(id)?;
        Some(std::mem::replace(&mut self.items[index], item))
    }

    /// Removes the entity stored under `id`. The order of the rest is kept.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Ids that occur more than once, in order of their second occurrence.
    pub fn duplicate_ids(&self) -> Vec<T::Id> {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items
            .iter()
            .filter(|item| !seen.insert(item.id()))
            .map(|item| item.id().clone())
            .collect()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal entity shared by the framework's unit tests.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub(crate) struct Note {
        pub id: String,
        pub text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    pub(crate) struct NoteError;

    impl ActorEntity for Note {
        type Id = String;
        type Create = String;
        type Replace = String;
        type Update = String;
        type Error = NoteError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, text: String) -> Result<Self, NoteError> {
            if text.is_empty() {
                return Err(NoteError);
            }
            Ok(Self { id, text })
        }

        fn from_replace_params(id: String, text: String) -> Result<Self, NoteError> {
            Ok(Self { id, text })
        }

        fn on_update(&mut self, text: String) -> Result<(), NoteError> {
            self.text.push_str(&text);
            Ok(())
        }
    }

    pub(crate) fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn insert_rejects_taken_id() {
        let mut notes = Collection::from(vec![note("1", "a")]);
        let err = notes.insert(note("1", "b")).unwrap_err();
        assert!(matches!(err, FrameworkError::DuplicateId(id) if id == "1"));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get(&"1".to_string()).unwrap().text, "a");
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut notes = Collection::from(vec![note("1", "a"), note("2", "b"), note("3", "c")]);
        let removed = notes.remove(&"2".to_string()).unwrap();
        assert_eq!(removed.text, "b");
        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn replace_is_positional() {
        let mut notes = Collection::from(vec![note("1", "a"), note("2", "b"), note("3", "c")]);
        notes.replace(&"2".to_string(), note("2", "z")).unwrap();
        assert_eq!(notes.as_slice()[1], note("2", "z"));
        assert!(notes.replace(&"9".to_string(), note("9", "x")).is_none());
    }

    #[test]
    fn duplicates_are_reported_and_first_match_wins() {
        let notes = Collection::from(vec![note("1", "a"), note("2", "b"), note("1", "c")]);
        assert_eq!(notes.duplicate_ids(), vec!["1".to_string()]);
        assert_eq!(notes.get(&"1".to_string()).unwrap().text, "a");
    }

    #[test]
    fn serializes_as_a_plain_sequence() {
        let notes = Collection::from(vec![note("1", "a")]);
        let json = serde_json::to_string(&notes).unwrap();
        assert_eq!(json, r#"[{"id":"1","text":"a"}]"#);
        let back: Collection<Note> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, notes);
    }
}
