mod common;

use std::time::Duration;

use common::{init_tracing, loaded_state, loaded_state_with, sample_products, StubGateway};
use kiosk::{AppEvent, ContactsUpdate, ModalKind, OrderInfoUpdate, PaymentMethod};

fn fill_checkout(state: &kiosk::AppState) {
    state.fill_order_info(OrderInfoUpdate {
        payment: Some(PaymentMethod::Card),
        address: Some("Main St 1".to_string()),
    });
    state.fill_contacts(ContactsUpdate {
        email: Some("a@b.com".to_string()),
        phone: Some("1234567890".to_string()),
    });
}

#[tokio::test]
async fn success_clears_the_basket_and_reports_the_gateway_total() {
    init_tracing();
    let (state, gateway, log) = loaded_state().await;
    state.add_to_basket("soul-1").unwrap();
    state.add_to_basket("hook-2").unwrap();
    fill_checkout(&state);
    log.clear();

    // The emitted total must come from the receipt, not the basket.
    gateway.queue_receipt("order-42", 999);

    let outcome = state.order_products().await;
    let receipt = outcome.receipt().expect("submission should succeed");
    assert_eq!(receipt.id, "order-42");
    assert_eq!(receipt.total, 999);

    assert_eq!(state.basket_size(), 0);
    assert!(state.modal_message().is_empty());
    assert_eq!(log.tokens(), vec!["basket-changed", "order-succeeded"]);
    match &log.events()[1] {
        AppEvent::OrderSucceeded { total } => assert_eq!(*total, 999),
        other => panic!("expected OrderSucceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn the_submitted_payload_snapshots_basket_and_forms() {
    let (state, gateway, _log) = loaded_state().await;
    state.add_to_basket("soul-1").unwrap();
    state.add_to_basket("hook-2").unwrap();
    fill_checkout(&state);

    let outcome = state.order_products().await;
    assert!(outcome.is_completed());

    let submitted = gateway.submitted();
    assert_eq!(submitted.len(), 1);
    let order = &submitted[0];
    assert_eq!(order.payment, PaymentMethod::Card);
    assert_eq!(order.address, "Main St 1");
    assert_eq!(order.email, "a@b.com");
    assert_eq!(order.phone, "1234567890");
    assert_eq!(order.total, 350);
    assert_eq!(order.items, vec!["soul-1".to_string(), "hook-2".to_string()]);
}

#[tokio::test]
async fn failure_keeps_the_basket_and_captures_the_message() {
    let (state, gateway, log) = loaded_state().await;
    state.add_to_basket("soul-1").unwrap();
    fill_checkout(&state);
    log.clear();

    gateway.queue_failure(400, "items must not be empty");

    let outcome = state.order_products().await;
    assert!(!outcome.is_completed());
    assert!(outcome.receipt().is_none());

    // Best-effort contract: the failure is data, not a crash.
    assert_eq!(state.basket_size(), 1);
    assert!(state.modal_message().contains("items must not be empty"));
    assert_eq!(log.count_of("order-succeeded"), 0);
    assert_eq!(log.count_of("basket-changed"), 0);

    // A later success wipes the stale failure message.
    let outcome = state.order_products().await;
    assert!(outcome.is_completed());
    assert!(state.modal_message().is_empty());
}

#[tokio::test]
async fn an_empty_basket_still_submits_a_zero_item_order() {
    // The core does not forbid empty submission; that guard lives in the
    // order-info modal precondition only.
    let (state, gateway, _log) = loaded_state().await;
    fill_checkout(&state);

    let err = state.open_modal(ModalKind::OrderInfo, None).unwrap_err();
    assert_eq!(err.to_string(), "no products selected");

    let outcome = state.order_products().await;
    assert!(outcome.is_completed());
    let order = &gateway.submitted()[0];
    assert!(order.items.is_empty());
    assert_eq!(order.total, 0);
}

#[tokio::test]
async fn a_second_submission_while_one_is_pending_is_rejected() {
    let (state, gateway, log) =
        loaded_state_with(StubGateway::with_catalog(sample_products()).holding()).await;
    state.add_to_basket("soul-1").unwrap();
    fill_checkout(&state);
    log.clear();

    let first = tokio::spawn({
        let state = state.clone();
        async move { state.order_products().await }
    });

    // Wait for the first call to reach the (held) gateway.
    while gateway.submitted().is_empty() {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    assert!(state.submission_in_progress());

    let second = state.order_products().await;
    assert!(!second.is_completed());
    // The loser must not have touched the basket or the gateway.
    assert_eq!(state.basket_size(), 1);
    assert_eq!(gateway.submitted().len(), 1);

    gateway.release();
    let first = first.await.expect("submission task panicked");
    assert!(first.is_completed());
    assert!(!state.submission_in_progress());
    assert_eq!(state.basket_size(), 0);
    assert_eq!(log.count_of("order-succeeded"), 1);
}

#[tokio::test]
async fn the_order_snapshot_is_immune_to_later_mutations() {
    let (state, _gateway, _log) = loaded_state().await;
    state.add_to_basket("soul-1").unwrap();
    fill_checkout(&state);

    let order = state.order();
    state.add_to_basket("hook-2").unwrap();
    state.fill_contacts(ContactsUpdate {
        email: Some("other@b.com".to_string()),
        ..Default::default()
    });

    assert_eq!(order.items, vec!["soul-1".to_string()]);
    assert_eq!(order.total, 100);
    assert_eq!(order.email, "a@b.com");
}
