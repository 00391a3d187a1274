//! Checkout flows: the phone gate, manual requests, and direct payment.

mod support;

use divano_bot::catalog::CachePolicy;
use divano_bot::session::{EventKind, Reply};
use divano_core::UserId;

use support::{
    action, default_harness, event, harness, text, FakeInventory, RecordingSink, OPERATOR,
};

fn stocked() -> FakeInventory {
    FakeInventory::default()
        .in_stock("S1", 5.0, 150_000)
        .in_stock("T1", 1.0, 40_000)
}

fn share_phone(user: i64) -> divano_bot::session::InboundEvent {
    event(
        user,
        EventKind::Contact {
            phone: "+10000000000".to_string(),
        },
    )
}

#[tokio::test]
async fn checkout_without_phone_reprompts_and_sends_nothing_to_operator() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(action(1, "add_S1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "send_request")).await.unwrap();

    let replies = sink.replies_to(UserId::new(1));
    let [Reply::Menu { text, request_contact, .. }] = replies.as_slice() else {
        panic!("expected phone re-prompt, got {replies:?}");
    };
    assert!(request_contact);
    assert!(text.contains("phone"));
    assert!(sink.replies_to(OPERATOR).is_empty());

    // Cart unchanged; the user can share contact and retry.
    sink.reset();
    controller.handle(text_cart(1)).await.unwrap();
    let replies = sink.replies_to(UserId::new(1));
    assert!(matches!(replies.as_slice(), [Reply::Card { .. }]));
}

#[tokio::test]
async fn payment_is_gated_on_phone_too() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(action(1, "add_S1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "pay_inline")).await.unwrap();

    let replies = sink.replies_to(UserId::new(1));
    assert!(matches!(replies.as_slice(), [Reply::Menu { .. }]));
}

#[tokio::test]
async fn checkout_with_empty_cart_is_a_transient_alert() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(share_phone(1)).await.unwrap();
    sink.reset();

    controller.handle(action(1, "send_request")).await.unwrap();

    assert_eq!(
        sink.replies_to(UserId::new(1)),
        vec![Reply::Alert {
            text: "Cart is empty.".to_string()
        }]
    );
}

#[tokio::test]
async fn manual_request_delivers_summary_and_clears_cart() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(share_phone(1)).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    controller.handle(action(1, "add_T1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "send_request")).await.unwrap();

    // Operator got the itemized summary with the phone number.
    let operator_replies = sink.replies_to(OPERATOR);
    let [Reply::Text { text }] = operator_replies.as_slice() else {
        panic!("expected operator summary, got {operator_replies:?}");
    };
    assert!(text.contains("+10000000000"));
    assert!(text.contains("Sofa A — 1500₽ × 2 = 3000₽"));
    assert!(text.contains("Oak Table — 400₽ × 1 = 400₽"));
    assert!(text.contains("Total: 3400₽"));

    // User got a confirmation and the cart is now empty.
    let user_replies = sink.replies_to(UserId::new(1));
    assert!(matches!(user_replies.as_slice(), [Reply::Text { .. }]));

    sink.reset();
    controller.handle(text_cart(1)).await.unwrap();
    assert_eq!(
        sink.replies_to(UserId::new(1)),
        vec![Reply::Text {
            text: "Your cart is empty.".to_string()
        }]
    );
}

#[tokio::test]
async fn failed_operator_delivery_preserves_the_cart() {
    let (controller, sink) = harness(
        stocked(),
        RecordingSink::refusing(OPERATOR),
        CachePolicy::Forever,
    );

    controller.handle(share_phone(1)).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "send_request")).await.unwrap();

    // The user sees an alert; nothing reached the operator.
    let replies = sink.replies_to(UserId::new(1));
    assert!(matches!(replies.as_slice(), [Reply::Alert { .. }]));
    assert!(sink.replies_to(OPERATOR).is_empty());

    // Cart survives for a retry.
    sink.reset();
    controller.handle(text_cart(1)).await.unwrap();
    let replies = sink.replies_to(UserId::new(1));
    let [Reply::Card { text, .. }] = replies.as_slice() else {
        panic!("expected cart card, got {replies:?}");
    };
    assert!(text.contains("Sofa A"));
}

#[tokio::test]
async fn payment_flow_invoices_clears_on_success() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(share_phone(1)).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "pay_inline")).await.unwrap();

    let replies = sink.replies_to(UserId::new(1));
    let [Reply::Invoice(invoice)] = replies.as_slice() else {
        panic!("expected invoice, got {replies:?}");
    };
    assert_eq!(invoice.currency, "RUB");
    assert_eq!(invoice.prices.len(), 1);
    assert_eq!(invoice.prices[0].label, "Sofa A × 2");
    // Major-unit line total of 3000 becomes 300000 minor units.
    assert_eq!(invoice.prices[0].amount_minor, 300_000);
    let payload = invoice.payload.clone();

    // Pre-checkout is always approved, without re-validation.
    sink.reset();
    controller
        .handle(event(
            1,
            EventKind::PreCheckout {
                query_id: "q-1".to_string(),
                payload: payload.clone(),
            },
        ))
        .await
        .unwrap();
    assert_eq!(
        sink.replies_to(UserId::new(1)),
        vec![Reply::ApproveCheckout {
            query_id: "q-1".to_string()
        }]
    );

    // Success clears the cart and confirms.
    sink.reset();
    controller
        .handle(event(1, EventKind::PaymentSuccess { payload }))
        .await
        .unwrap();
    let replies = sink.replies_to(UserId::new(1));
    assert!(matches!(replies.as_slice(), [Reply::Text { .. }]));

    sink.reset();
    controller.handle(text_cart(1)).await.unwrap();
    assert_eq!(
        sink.replies_to(UserId::new(1)),
        vec![Reply::Text {
            text: "Your cart is empty.".to_string()
        }]
    );
}

#[tokio::test]
async fn payment_refused_when_every_line_stopped_resolving() {
    let (controller, sink) = default_harness(FakeInventory::default().failing("S1"));

    controller.handle(share_phone(1)).await.unwrap();
    controller.handle(action(1, "add_S1")).await.unwrap();
    sink.reset();

    controller.handle(action(1, "pay_inline")).await.unwrap();

    assert_eq!(
        sink.replies_to(UserId::new(1)),
        vec![Reply::Alert {
            text: "Your cart items are no longer available.".to_string()
        }]
    );
}

#[tokio::test]
async fn contact_share_confirms_and_unlocks_checkout() {
    let (controller, sink) = default_harness(stocked());

    controller.handle(action(1, "add_S1")).await.unwrap();
    controller.handle(share_phone(1)).await.unwrap();
    sink.reset();

    controller.handle(action(1, "send_request")).await.unwrap();

    assert_eq!(sink.replies_to(OPERATOR).len(), 1);
}

fn text_cart(user: i64) -> divano_bot::session::InboundEvent {
    text(user, "🛒 Cart")
}
