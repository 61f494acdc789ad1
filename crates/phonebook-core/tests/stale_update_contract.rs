//! Reconciliation Contract: Stale-Write Repair
//!
//! The client cache may reference contacts the server has since deleted.
//! A failed update against such an entry must be treated as authoritative
//! evidence of deletion: the cache self-heals by removing the entry, and
//! the failure is surfaced exactly once.

mod common;

use common::*;
use phonebook_core::Severity;

#[tokio::test]
async fn failed_update_removes_stale_entry_from_cache() {
    let (directory, mut controller, notifier) = synced_controller(true).await;

    // Server truth changes behind the controller's back.
    directory.delete("2").await.unwrap();

    controller.set_draft_name("Ada Lovelace");
    controller.set_draft_number("000");
    controller.submit().await;

    // The stale entry is gone from the mirror, by id.
    assert!(!controller.contacts().iter().any(|c| c.id == "2"));
    assert_eq!(controller.contacts().len(), 3);

    // Nothing was created server-side and the server is untouched.
    assert_eq!(directory.len().await, 3);

    let note = notifier.current().expect("failure surfaced once");
    assert_eq!(note.severity, Severity::Error);
    assert!(note.message.contains("Ada Lovelace"));
}

#[tokio::test]
async fn successful_update_replaces_entry_by_id_not_position() {
    let (directory, mut controller, notifier) = synced_controller(true).await;

    // Another client deletes an unrelated earlier entry, shifting server
    // positions. The update must still land on the entry it names.
    directory.delete("1").await.unwrap();

    controller.set_draft_name("Dan Abramov");
    controller.set_draft_number("555-0000");
    controller.submit().await;

    let dan = controller
        .contacts()
        .iter()
        .find(|c| c.id == "3")
        .expect("Dan is still cached");
    assert_eq!(dan.number, "555-0000");

    // No unrelated cached entry was clobbered.
    assert!(controller.contacts().iter().any(|c| c.id == "2"));
    assert_eq!(notifier.current().unwrap().severity, Severity::Success);
}

#[tokio::test]
async fn declined_confirmation_aborts_with_no_mutation() {
    let (directory, mut controller, notifier) = synced_controller(false).await;

    controller.set_draft_name("Ada Lovelace");
    controller.set_draft_number("000");
    controller.submit().await;

    // No network effect, no cache change, no notification.
    assert_eq!(directory.get("2").await.unwrap().number, "39-44-5323523");
    assert_eq!(controller.contacts().len(), 4);
    assert!(notifier.current().is_none());
}

#[tokio::test]
async fn stale_create_conflict_leaves_cache_unchanged() {
    let (directory, mut controller, notifier) = synced_controller(true).await;

    // Another client grabs the name after our snapshot.
    directory.create("Zed", "99").await.unwrap();

    controller.set_draft_name("Zed");
    controller.set_draft_number("11");
    controller.submit().await;

    // The conflict is surfaced, the mirror gains no phantom entry.
    assert_eq!(controller.contacts().len(), 4);
    assert_eq!(directory.len().await, 5);
    let note = notifier.current().unwrap();
    assert_eq!(note.severity, Severity::Error);
    assert!(note.message.contains("unique"));
}
