//! # Resource Operations
//!
//! Pure functions that compute the next collection state and the operation's
//! result from an in-memory [`Collection`]. No I/O happens here; the actor
//! wraps each mutating function in a load → compute → save cycle and the
//! client wraps the read-only ones in a plain load.
//!
//! When a function returns `Err`, the collection must be thrown away rather
//! than saved.

use crate::collection::Collection;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

fn not_found<T: ActorEntity>(id: &T::Id) -> FrameworkError {
    FrameworkError::NotFound(id.to_string())
}

/// The first entity stored under `id`.
pub fn get<T: ActorEntity>(collection: &Collection<T>, id: &T::Id) -> Result<T, FrameworkError> {
    collection.get(id).cloned().ok_or_else(|| not_found::<T>(id))
}

/// Builds a new entity under the allocated `id` and appends it.
pub fn create<T: ActorEntity>(
    collection: &mut Collection<T>,
    id: T::Id,
    params: T::Create,
) -> Result<T, FrameworkError> {
    let item = T::from_create_params(id, params).map_err(entity_error)?;
    collection.insert(item.clone())?;
    Ok(item)
}

/// Swaps the entity under `id` for one built from `params`, in place.
pub fn replace<T: ActorEntity>(
    collection: &mut Collection<T>,
    id: &T::Id,
    params: T::Replace,
) -> Result<T, FrameworkError> {
    if !collection.contains(id) {
        return Err(not_found::<T>(id));
    }
    let item = T::from_replace_params(id.clone(), params).map_err(entity_error)?;
    collection.replace(id, item.clone());
    Ok(item)
}

/// Merges `update` into the entity under `id`.
pub fn update<T: ActorEntity>(
    collection: &mut Collection<T>,
    id: &T::Id,
    update: T::Update,
) -> Result<T, FrameworkError> {
    let item = collection.get_mut(id).ok_or_else(|| not_found::<T>(id))?;
    item.on_update(update).map_err(entity_error)?;
    Ok(item.clone())
}

/// Removes the entity under `id`, returning it.
pub fn delete<T: ActorEntity>(
    collection: &mut Collection<T>,
    id: &T::Id,
) -> Result<T, FrameworkError> {
    collection.remove(id).ok_or_else(|| not_found::<T>(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::tests::{note, Note};

    fn sample() -> Collection<Note> {
        Collection::from(vec![note("1", "a"), note("2", "b"), note("3", "c")])
    }

    #[test]
    fn create_appends_under_allocated_id() {
        let mut notes = sample();
        let created = create(&mut notes, "4".to_string(), "d".to_string()).unwrap();
        assert_eq!(created, note("4", "d"));
        assert_eq!(notes.as_slice().last(), Some(&created));
        assert_eq!(notes.len(), 4);
    }

    #[test]
    fn create_surfaces_entity_rejection() {
        let mut notes = sample();
        let err = create(&mut notes, "4".to_string(), String::new()).unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));
        assert_eq!(notes, sample());
    }

    #[test]
    fn replace_keeps_position_and_path_id() {
        let mut notes = sample();
        let replaced = replace(&mut notes, &"2".to_string(), "z".to_string()).unwrap();
        assert_eq!(replaced, note("2", "z"));
        assert_eq!(notes.as_slice()[1], note("2", "z"));
    }

    #[test]
    fn update_merges_into_existing() {
        let mut notes = sample();
        let updated = update(&mut notes, &"3".to_string(), "!".to_string()).unwrap();
        assert_eq!(updated.text, "c!");
        assert_eq!(notes.get(&"3".to_string()), Some(&updated));
    }

    #[test]
    fn delete_removes_only_the_match() {
        let mut notes = sample();
        let removed = delete(&mut notes, &"1".to_string()).unwrap();
        assert_eq!(removed, note("1", "a"));
        assert_eq!(notes.into_vec(), vec![note("2", "b"), note("3", "c")]);
    }

    #[test]
    fn absent_id_is_not_found_and_changes_nothing() {
        let missing = "9".to_string();
        let mut notes = sample();

        assert!(matches!(get(&notes, &missing), Err(FrameworkError::NotFound(id)) if id == "9"));
        assert!(matches!(
            replace(&mut notes, &missing, "x".to_string()),
            Err(FrameworkError::NotFound(_))
        ));
        assert!(matches!(
            update(&mut notes, &missing, "x".to_string()),
            Err(FrameworkError::NotFound(_))
        ));
        assert!(matches!(delete(&mut notes, &missing), Err(FrameworkError::NotFound(_))));
        assert_eq!(notes, sample());
    }

    #[test]
    fn second_delete_is_not_found() {
        let mut notes = sample();
        delete(&mut notes, &"2".to_string()).unwrap();
        assert!(matches!(
            delete(&mut notes, &"2".to_string()),
            Err(FrameworkError::NotFound(_))
        ));
    }
}
