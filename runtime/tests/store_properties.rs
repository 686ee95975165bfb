//! Integration tests for store semantics
//!
//! Exercises save/delete/find against the real store, plus a property test
//! comparing the store with a plain `Vec` model.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use todo_store_core::{ItemRepository, Mutation, Revision, Snapshot, TodoItem};
use todo_store_runtime::TodoStore;
use todo_store_testing::fixtures::{id, item, items, store_with};
use todo_store_testing::mutation_test::assertions::{
    assert_descriptions, assert_relative_order_preserved, assert_unique_ids,
};
use todo_store_testing::properties::arb_mutation_script;

// ============================================================================
// find / save / delete
// ============================================================================

#[tokio::test]
async fn never_saved_item_is_not_found() {
    let store = store_with(items(&["a", "b"]));
    let stranger = item("stranger");

    assert_eq!(store.find_by_id(Some(stranger.id)).current(), None);
    assert_eq!(store.find_by_id(None).current(), None);
}

#[tokio::test]
async fn save_of_new_id_appends() {
    let store = store_with(items(&["a", "b"]));
    let c = item("c");

    store.save(c.clone()).await.unwrap();

    assert_descriptions(&store.current_items(), &["a", "b", "c"]);
    assert_eq!(store.find_by_id(Some(c.id)).current(), Some(c));
}

#[tokio::test]
async fn save_of_existing_id_replaces_in_place() {
    let seed = items(&["a", "b", "c"]);
    let store = store_with(seed.clone());
    let edited = seed[1].clone().with_description("b, edited").with_completed(true);

    store.save(edited.clone()).await.unwrap();

    let current = store.current_items();
    assert_eq!(current.len(), 3);
    assert_eq!(current[1], edited);
    assert_eq!(current[0], seed[0]);
    assert_eq!(current[2], seed[2]);
}

#[tokio::test]
async fn delete_removes_item_and_is_idempotent() {
    let seed = items(&["a", "b", "c"]);
    let store = store_with(seed.clone());

    store.delete(&seed[1].id).await.unwrap();
    let once = store.current_items();
    store.delete(&seed[1].id).await.unwrap();

    assert_eq!(&*once, &[seed[0].clone(), seed[2].clone()]);
    assert_eq!(store.current_items(), once);
    assert_eq!(store.find_by_id(Some(seed[1].id)).current(), None);
}

#[tokio::test]
async fn delete_of_missing_id_leaves_collection_unchanged() {
    let seed = items(&["a", "b"]);
    let store = store_with(seed.clone());
    let before = store.revision();

    store.delete(&id(404)).await.unwrap();

    assert_eq!(&*store.current_items(), seed.as_slice());
    // Still published, as every mutation is
    assert_eq!(store.revision(), before.next());
}

#[tokio::test]
async fn saves_keep_insertion_order() {
    let store = TodoStore::new();
    let (a, b, c) = (item("A"), item("B"), item("C"));

    store.save(a.clone()).await.unwrap();
    store.save(b.clone()).await.unwrap();
    store.save(c.clone()).await.unwrap();

    assert_eq!(&*store.current_items(), &[a, b, c]);
}

#[tokio::test]
async fn save_toggle_delete_scenario() {
    let store = TodoStore::new();
    let x = item("x");

    store.save(x.clone()).await.unwrap();
    assert_eq!(&*store.current_items(), &[x.clone()]);

    let completed = x.toggled();
    store.save(completed.clone()).await.unwrap();
    assert_eq!(&*store.current_items(), &[completed]);

    store.delete(&x.id).await.unwrap();
    assert!(store.current_items().is_empty());
    assert_eq!(store.revision(), Revision::new(3));
}

#[tokio::test]
async fn concurrent_writers_never_duplicate_ids() {
    let store = TodoStore::new();
    let x = item("x");

    let writers: Vec<_> = (0..8)
        .map(|n| {
            let store = store.clone();
            let version = x.clone().with_description(format!("x{n}"));
            tokio::spawn(async move { store.save(version).await })
        })
        .collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let current = store.current_items();
    assert_eq!(current.len(), 1);
    assert_unique_ids(&current);
    assert_eq!(store.revision(), Revision::new(8));
}

// ============================================================================
// Reference model
// ============================================================================

fn model_apply(model: &mut Vec<TodoItem>, mutation: &Mutation) {
    match mutation {
        Mutation::Save(item) => match model.iter_mut().find(|old| old.id == item.id) {
            Some(slot) => *slot = item.clone(),
            None => model.push(item.clone()),
        },
        Mutation::Delete(id) => model.retain(|old| old.id != *id),
    }
}

proptest! {
    #[test]
    fn store_matches_vec_model(script in arb_mutation_script(40)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let store = TodoStore::new();
        let mut model = Vec::new();

        runtime.block_on(async {
            for mutation in &script {
                let before = store.current_items();
                match mutation.clone() {
                    Mutation::Save(item) => store.save(item).await.unwrap(),
                    Mutation::Delete(id) => store.delete(&id).await.unwrap(),
                }
                model_apply(&mut model, mutation);

                let after = store.current_items();
                assert_unique_ids(&after);
                assert_relative_order_preserved(&before, &after);
            }
        });

        prop_assert_eq!(&*store.current_items(), model.as_slice());
        prop_assert_eq!(store.revision().value(), script.len() as u64);
    }

    #[test]
    fn seeding_equals_saving(script in arb_mutation_script(20)) {
        let saves: Vec<TodoItem> = script
            .into_iter()
            .filter_map(|mutation| match mutation {
                Mutation::Save(item) => Some(item),
                Mutation::Delete(_) => None,
            })
            .collect();

        let seeded = store_with(saves.clone());
        let folded = saves
            .iter()
            .fold(Snapshot::empty(), |snapshot, item| snapshot.apply(&Mutation::Save(item.clone())));

        prop_assert_eq!(seeded.snapshot(), folded);
    }
}
