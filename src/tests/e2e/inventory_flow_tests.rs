use crate::modules::inventory::adapters::outbound::projections_in_memory::InMemoryInventoryProjections;
use crate::modules::inventory::core::state::InventoryItem;
use crate::modules::inventory::use_cases::manage_inventory_item::commands::{
    CheckInItemsToInventory, CreateInventoryItem, DeactivateInventoryItem,
    RemoveItemsFromInventory, RenameInventoryItem,
};
use crate::modules::inventory::use_cases::view_inventory::queries_port::ReadModelFacade;
use crate::shared::core::primitives::AggregateId;
use crate::shared::infrastructure::bus::handlers::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shell::state::AppState;
use rstest::{fixture, rstest};
use std::sync::Arc;
use tokio::join;

type BeforeEachReturn = (
    Arc<InMemoryEventStore>,
    Arc<InMemoryInventoryProjections>,
    AppState,
    AggregateId,
);

#[fixture]
fn before_each() -> BeforeEachReturn {
    let store = Arc::new(InMemoryEventStore::new());
    let projections = Arc::new(InMemoryInventoryProjections::new());
    let state = AppState::wire(store.clone(), projections.clone(), 16).expect("wiring failed");
    (store, projections, state, AggregateId::new())
}

async fn create(state: &AppState, id: AggregateId, name: &str) {
    let outcome = state
        .runtime
        .send(CreateInventoryItem {
            id,
            name: name.into(),
        })
        .await
        .expect("create failed");
    assert!(outcome.is_clean());
}

#[rstest]
#[tokio::test]
async fn it_should_let_exactly_one_of_two_concurrent_renames_win(before_each: BeforeEachReturn) {
    let (store, projections, state, id) = before_each;
    create(&state, id, "widget").await;

    let mut session = state.runtime.session();
    let loaded = session.get::<InventoryItem>(id).await.unwrap();
    assert_eq!(loaded.version(), 1);
    assert_eq!(loaded.state().name, "widget");

    store.set_delay_append_ms(10);
    let rename = |name: &str| RenameInventoryItem {
        id,
        name: name.into(),
        expected_version: 1,
    };
    let (first, second) = join!(
        state.runtime.send(rename("x")),
        state.runtime.send(rename("y"))
    );

    assert!(first.is_ok() ^ second.is_ok(), "exactly one rename should win");
    let err = first.err().or(second.err()).unwrap();
    assert!(err.is_concurrency_conflict(), "unexpected error: {err:?}");
    assert_eq!(store.version(id).await.unwrap(), 2);

    let details = projections.item_details(id).await.unwrap().unwrap();
    assert_eq!(details.version, 2);
    assert!(details.name == "x" || details.name == "y");
}

#[rstest]
#[tokio::test]
async fn it_should_keep_both_read_models_in_step_with_the_stream(
    before_each: BeforeEachReturn,
) {
    let (_, projections, state, id) = before_each;
    create(&state, id, "widget").await;
    state
        .runtime
        .send(CheckInItemsToInventory {
            id,
            count: 10,
            expected_version: 1,
        })
        .await
        .unwrap();
    state
        .runtime
        .send(RemoveItemsFromInventory {
            id,
            count: 4,
            expected_version: 2,
        })
        .await
        .unwrap();
    state
        .runtime
        .send(RenameInventoryItem {
            id,
            name: "gadget".into(),
            expected_version: 3,
        })
        .await
        .unwrap();

    let list = projections.list_items().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "gadget");
    let details = projections.item_details(id).await.unwrap().unwrap();
    assert_eq!(details.current_count, 6);
    assert_eq!(details.version, 4);

    state
        .runtime
        .send(DeactivateInventoryItem {
            id,
            expected_version: 4,
        })
        .await
        .unwrap();
    assert!(projections.list_items().await.unwrap().is_empty());
    assert_eq!(projections.item_details(id).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn it_should_reject_deactivating_an_item_twice(before_each: BeforeEachReturn) {
    let (store, _, state, id) = before_each;
    create(&state, id, "widget").await;
    let deactivate = |expected_version| DeactivateInventoryItem {
        id,
        expected_version,
    };
    state.runtime.send(deactivate(1)).await.unwrap();
    let err = state.runtime.send(deactivate(2)).await.unwrap_err();

    assert!(!err.is_concurrency_conflict());
    assert!(err.to_string().contains("already deactivated"));
    assert_eq!(store.version(id).await.unwrap(), 2);
}

#[rstest]
#[tokio::test]
async fn it_should_reject_a_check_in_that_would_overflow_the_stock(
    before_each: BeforeEachReturn,
) {
    let (store, projections, state, id) = before_each;
    create(&state, id, "widget").await;
    let check_in = |count, expected_version| CheckInItemsToInventory {
        id,
        count,
        expected_version,
    };
    let outcome = state.runtime.send(check_in(i64::MAX, 1)).await.unwrap();
    assert!(outcome.is_clean());

    let err = state.runtime.send(check_in(1, 2)).await.unwrap_err();

    assert!(matches!(
        err.application_error(),
        Some(ApplicationError::Domain(_))
    ));
    assert!(err.to_string().contains("out of range"));
    assert_eq!(store.version(id).await.unwrap(), 2);
    let details = projections.item_details(id).await.unwrap().unwrap();
    assert_eq!(details.current_count, i64::MAX);
    assert_eq!(details.version, 2);
}

#[rstest]
#[tokio::test]
async fn it_should_commit_the_command_even_when_every_projection_faults() {
    let store = Arc::new(InMemoryEventStore::new());
    let mut projections = InMemoryInventoryProjections::new();
    projections.toggle_offline();
    let state = AppState::wire(store.clone(), Arc::new(projections), 16).unwrap();
    let id = AggregateId::new();

    let outcome = state
        .runtime
        .send(CreateInventoryItem {
            id,
            name: "widget".into(),
        })
        .await
        .expect("the command should still succeed");

    assert_eq!(store.version(id).await.unwrap(), 1);
    assert_eq!(outcome.faults.len(), 2);
    assert!(outcome.faults[0].handler.contains("InventoryListProjection"));
    assert!(outcome.faults[1].handler.contains("InventoryDetailProjection"));
    assert!(outcome.faults.iter().all(|f| f.version == 1));
}
