use std::sync::Arc;

use crate::modules::entities::use_cases::endpoint::EndpointError;
use crate::shell::state::AppState;
use crate::tests::fixtures::clients::ClientBuilder;
use crate::tests::fixtures::principals::{admin, resolver};

fn state() -> AppState {
    AppState::in_memory_with(500, Arc::new(resolver()))
}

#[tokio::test]
async fn two_workers_editing_the_same_client_produce_one_winner() {
    let state = state();
    let admin = admin();
    let created = state
        .clients
        .update(Some(&admin), ClientBuilder::new().build())
        .await
        .unwrap();
    assert_eq!(created.version, 0);

    let workers: Vec<_> = ["Winner", "Loser"]
        .into_iter()
        .map(|occupation| {
            let endpoint = state.clients.clone();
            let principal = admin.clone();
            let mut edit = created.clone();
            edit.occupation = occupation.into();
            tokio::spawn(async move { endpoint.update(Some(&principal), edit).await })
        })
        .collect();

    let mut winners = Vec::new();
    let mut conflicts = 0;
    for worker in workers {
        match worker.await.unwrap() {
            Ok(saved) => winners.push(saved),
            Err(EndpointError::EditConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, 1);
    assert_eq!(winners[0].version, 1);
    let stored = state
        .clients
        .get(Some(&admin), created.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, winners[0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_from_one_stamp_succeed_exactly_once() {
    let state = state();
    let admin = admin();
    let created = state
        .clients
        .update(Some(&admin), ClientBuilder::new().build())
        .await
        .unwrap();

    let workers: Vec<_> = (0..16)
        .map(|n| {
            let endpoint = state.clients.clone();
            let principal = admin.clone();
            let mut edit = created.clone();
            edit.occupation = format!("Worker {n}");
            tokio::spawn(async move { endpoint.update(Some(&principal), edit).await })
        })
        .collect();

    let mut successes = 0;
    for worker in workers {
        match worker.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => assert_eq!(err.code(), "EDIT_CONFLICT"),
        }
    }

    assert_eq!(successes, 1);
    let stored = state
        .clients
        .get(Some(&admin), created.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.version, successes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn workers_that_reread_after_a_conflict_all_land_their_edit() {
    let state = state();
    let admin = admin();
    let created = state
        .clients
        .update(Some(&admin), ClientBuilder::new().build())
        .await
        .unwrap();
    let id = created.id.unwrap();

    let workers: Vec<_> = (0..8)
        .map(|n| {
            let endpoint = state.clients.clone();
            let principal = admin.clone();
            tokio::spawn(async move {
                let mut conflicts = 0u64;
                loop {
                    let mut current = endpoint.get(Some(&principal), id).await.unwrap().unwrap();
                    current.occupation = format!("Worker {n}");
                    match endpoint.update(Some(&principal), current).await {
                        Ok(saved) => return (saved.version, conflicts),
                        Err(EndpointError::EditConflict { .. }) => conflicts += 1,
                        Err(other) => panic!("unexpected error {other:?}"),
                    }
                }
            })
        })
        .collect();

    let mut stamps = Vec::new();
    for worker in workers {
        let (stamp, _conflicts) = worker.await.unwrap();
        stamps.push(stamp);
    }
    stamps.sort();

    assert_eq!(stamps, (1..=8).collect::<Vec<u64>>());
    let stored = state.clients.get(Some(&admin), id).await.unwrap().unwrap();
    assert_eq!(stored.version, 8);
}
