use std::sync::Arc;

use crate::modules::entities::use_cases::endpoint::EndpointError;
use crate::shared::core::query::{Filter, PageRequest, SortKey};
use crate::shell::state::AppState;
use crate::tests::fixtures::clients::ClientBuilder;
use crate::tests::fixtures::principals::{admin, resolver, user};

async fn state_with_twelve_clients() -> AppState {
    let state = AppState::in_memory_with(500, Arc::new(resolver()));
    for n in 0..12 {
        let occupation = if n % 3 == 0 { "Nurse" } else { "Pilot" };
        state
            .clients
            .update(
                Some(&admin()),
                ClientBuilder::new()
                    .last_name(format!("Client{n:02}"))
                    .occupation(occupation)
                    .build(),
            )
            .await
            .unwrap();
    }
    state
}

#[tokio::test]
async fn lists_the_first_five_of_twelve_clients() {
    let state = state_with_twelve_clients().await;
    let page = state
        .clients
        .list(Some(&admin()), PageRequest::new(0, 5), None)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, 12);
}

#[tokio::test]
async fn adjacent_pages_are_disjoint_and_concatenate_to_the_larger_page() {
    let state = state_with_twelve_clients().await;
    let admin = admin();
    let sort = SortKey::desc("last_name");

    let first = state
        .clients
        .list(Some(&admin), PageRequest::new(0, 5).sorted_by(sort.clone()), None)
        .await
        .unwrap();
    let second = state
        .clients
        .list(Some(&admin), PageRequest::new(5, 5).sorted_by(sort.clone()), None)
        .await
        .unwrap();
    let both = state
        .clients
        .list(Some(&admin), PageRequest::new(0, 10).sorted_by(sort), None)
        .await
        .unwrap();

    let concatenated: Vec<_> = first.items.iter().chain(&second.items).cloned().collect();
    assert_eq!(concatenated, both.items);
    assert!(first.items.iter().all(|c| !second.items.contains(c)));
}

#[tokio::test]
async fn the_last_page_is_short_and_past_the_end_is_empty() {
    let state = state_with_twelve_clients().await;
    let admin = admin();

    let last = state
        .clients
        .list(Some(&admin), PageRequest::new(10, 5), None)
        .await
        .unwrap();
    assert_eq!(last.items.len(), 2);

    let beyond = state
        .clients
        .list(Some(&admin), PageRequest::new(40, 5), None)
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 12);
}

#[tokio::test]
async fn count_agrees_with_the_page_total() {
    let state = state_with_twelve_clients().await;
    let admin = admin();
    let nurses = Filter::eq("occupation", "Nurse");

    let count = state.clients.count(Some(&admin), Some(&nurses)).await.unwrap();
    let page = state
        .clients
        .list(Some(&admin), PageRequest::new(0, 2), Some(&nurses))
        .await
        .unwrap();

    assert_eq!(count, 4);
    assert_eq!(page.total_count, count);
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn a_caller_without_the_role_cannot_delete_and_the_row_survives() {
    let state = state_with_twelve_clients().await;
    let target = state
        .clients
        .list(Some(&admin()), PageRequest::new(0, 1), None)
        .await
        .unwrap()
        .items
        .remove(0);
    let id = target.id.unwrap();

    let result = state.clients.delete(Some(&user()), id).await;

    assert!(matches!(result, Err(EndpointError::Unauthorized)));
    assert_eq!(state.clients.get(Some(&admin()), id).await.unwrap(), Some(target));
    assert_eq!(state.clients.count(Some(&admin()), None).await.unwrap(), 12);
}
