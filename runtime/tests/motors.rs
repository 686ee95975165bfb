//! Integration tests for screen motors
//!
//! Motors run against a [`RecordingRepository`] so each test sees exactly
//! which mutations reached the repository, and in which order.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use todo_store_core::{ItemDraft, ItemError, ItemRepository, Mutation, StoreError};
use todo_store_runtime::{ItemMotor, RosterMotor, TodoStore};
use todo_store_testing::fixtures::{item, items, store_with};
use todo_store_testing::{RecordingRepository, test_clock};

// ============================================================================
// Pass-through
// ============================================================================

#[tokio::test]
async fn item_motor_save_passes_through() {
    let milk = item("Buy milk");
    let repo = RecordingRepository::with_items([milk.clone()]);
    let motor = ItemMotor::new(repo.clone(), Some(milk.id));

    motor.save(milk.toggled()).unwrap();
    motor.flush().await.unwrap();

    assert_eq!(repo.recorded(), vec![Mutation::Save(milk.toggled())]);
}

#[tokio::test]
async fn item_motor_delete_passes_through() {
    let milk = item("Buy milk");
    let repo = RecordingRepository::with_items([milk.clone()]);
    let motor = ItemMotor::new(repo.clone(), Some(milk.id));

    motor.delete(&milk).unwrap();
    motor.flush().await.unwrap();

    assert_eq!(repo.recorded(), vec![Mutation::Delete(milk.id)]);
}

#[tokio::test]
async fn roster_motor_toggle_passes_through() {
    let seed = items(&["a", "b"]);
    let repo = RecordingRepository::with_items(seed.clone());
    let motor = RosterMotor::new(repo.clone());

    motor.toggle(&seed[1]).unwrap();
    motor.flush().await.unwrap();

    assert_eq!(repo.recorded(), vec![Mutation::Save(seed[1].toggled())]);
}

#[tokio::test]
async fn motor_mutations_keep_fire_order() {
    let seed = items(&["a", "b", "c"]);
    let repo = RecordingRepository::with_items(seed.clone());
    let motor = RosterMotor::new(repo.clone());

    for item in &seed {
        motor.toggle(item).unwrap();
    }
    motor.flush().await.unwrap();

    let expected: Vec<_> = seed.iter().map(|item| Mutation::Save(item.toggled())).collect();
    assert_eq!(repo.recorded(), expected);
}

#[tokio::test]
async fn dropping_motor_cancels_queued_mutations() {
    let seed = items(&["a", "b"]);
    let repo = RecordingRepository::with_items(seed.clone());
    let motor = ItemMotor::new(repo.clone(), Some(seed[0].id));

    repo.pause();
    motor.delete(&seed[0]).unwrap();
    motor.delete(&seed[1]).unwrap();
    // Let the worker pick up the first delete and block on the gate
    tokio::task::yield_now().await;
    drop(motor);
    repo.resume();

    tokio::task::yield_now().await;
    assert!(repo.recorded().is_empty());
}

// ============================================================================
// Observed state
// ============================================================================

#[tokio::test]
async fn roster_state_follows_repository() {
    let repo = RecordingRepository::new();
    let motor = RosterMotor::new(repo.clone());
    let mut states = motor.states();
    assert!(states.current().is_empty());

    let milk = item("Buy milk");
    repo.publish(&Mutation::Save(milk.clone()));

    let state = states.changed().await.unwrap();
    assert_eq!(&*state.items, &[milk]);
}

#[tokio::test]
async fn item_state_follows_repository() {
    let milk = item("Buy milk");
    let repo = RecordingRepository::with_items([milk.clone()]);
    let motor = ItemMotor::new(repo.clone(), Some(milk.id));
    let mut states = motor.states();
    assert_eq!(states.current().item, Some(milk.clone()));
    assert!(motor.can_delete());

    repo.publish(&Mutation::Delete(milk.id));

    assert!(states.changed().await.unwrap().is_new());
}

// ============================================================================
// Submitting drafts
// ============================================================================

#[tokio::test]
async fn submit_without_item_creates_new() {
    let repo = RecordingRepository::new();
    let motor = ItemMotor::new(repo.clone(), None);

    let draft = ItemDraft::new("  Write an app  ").with_notes("   ");
    let saved = motor.submit(&draft, &test_clock()).unwrap();
    motor.flush().await.unwrap();

    assert_eq!(saved.description, "Write an app");
    assert_eq!(saved.notes, None);
    assert!(!saved.completed);
    assert_eq!(repo.recorded(), vec![Mutation::Save(saved)]);
}

#[tokio::test]
async fn submit_edit_keeps_identity() {
    let milk = item("Buy milk");
    let repo = RecordingRepository::with_items([milk.clone()]);
    let motor = ItemMotor::new(repo.clone(), Some(milk.id));

    let draft = ItemDraft::from_item(&milk).with_completed(true).with_notes("oat");
    let saved = motor.submit(&draft, &test_clock()).unwrap();

    assert_eq!(saved.id, milk.id);
    assert_eq!(saved.created_on, milk.created_on);
    assert!(saved.completed);
    assert_eq!(saved.notes.as_deref(), Some("oat"));
}

#[tokio::test]
async fn submit_rejects_blank_description() {
    let repo = RecordingRepository::new();
    let motor = ItemMotor::new(repo.clone(), None);

    let result = motor.submit(&ItemDraft::new(""), &test_clock());
    motor.flush().await.unwrap();

    assert!(matches!(result, Err(StoreError::InvalidItem(ItemError::EmptyDescription))));
    assert!(repo.recorded().is_empty());
}

// ============================================================================
// Against the real store
// ============================================================================

#[tokio::test]
async fn two_screens_share_one_store() {
    let seed = items(&["a", "b"]);
    let store = store_with(seed.clone());
    let roster = RosterMotor::new(store.clone());
    let detail = ItemMotor::new(store.clone(), Some(seed[0].id));
    let mut roster_states = roster.states();

    detail.delete(&seed[0]).unwrap();
    detail.flush().await.unwrap();

    let state = roster_states.changed().await.unwrap();
    assert_eq!(&*state.items, &[seed[1].clone()]);
    assert!(detail.states().current().is_new());
    assert_eq!(store.current_items().len(), 1);
}

#[tokio::test]
async fn motor_over_plain_store_is_usable_after_drop_of_other_motor() {
    let store = TodoStore::new();
    let first = RosterMotor::new(store.clone());
    first.save(item("a")).unwrap();
    first.flush().await.unwrap();
    drop(first);

    let second = RosterMotor::new(store.clone());
    second.save(item("b")).unwrap();
    second.flush().await.unwrap();

    assert_eq!(store.current_items().len(), 2);
}
