//! End-to-end flow: kernel produces a run, the transport wraps it in
//! envelopes, the bridge routes, and a renderer-side consumer narrows and
//! rebuilds the trace forest.

use serde_json::json;
use tracebridge::{
    decode_message_value, guards, Decoded, Envelope, GenToken, GenTokenExtra, GuidanceMessage,
    MessageBody, NodeAttr, Routed, TraceForest, VisBridge,
};

/// Wrap a message the way the kernel-side transport does.
fn kernel_envelope(msg: &GuidanceMessage) -> String {
    let env = Envelope::kernel(serde_json::to_value(msg).unwrap());
    serde_json::to_string(&env).unwrap()
}

/// Surface the crate's log lines (unknown tags, orphan promotions) in
/// `cargo test -- --nocapture` runs.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn full_run_reaches_the_renderer() {
    init_logging();
    let bridge = VisBridge::new();
    let mut renderer = bridge.kernelmsg().subscribe();
    let mut forest = TraceForest::new();
    let mut last_seen_id = 0;

    // The kernel emits a small run; the child trace node arrives before
    // its parent, which the forest must tolerate.
    let run = vec![
        GuidanceMessage::execution_started(),
        GuidanceMessage::trace(2, Some(1), Some(NodeAttr::text("world"))),
        GuidanceMessage::trace(1, None, Some(NodeAttr::literal("hello "))),
        GuidanceMessage::tokens(
            2,
            "world",
            vec![GenTokenExtra::new(
                GenToken::new(87, 0.62, "world").generated(),
                vec![GenToken::new(88, 0.21, "globe")],
            )],
        ),
        GuidanceMessage::metric("tokens/sec", 21.5),
        GuidanceMessage::execution_completed(Some(2)),
    ];

    for msg in &run {
        // Cooperative consumer: drain each publish before the next one
        // lands, as the live view does between paints.
        assert_eq!(bridge.route_raw(&kernel_envelope(msg)).unwrap(), Routed::Kernel);
        let payload = renderer.recv().await.expect("bridge alive");

        assert!(guards::is_guidance_message(Some(&payload)));
        match decode_message_value(&payload).unwrap() {
            Decoded::Known(received) => {
                assert!(received.message_id > last_seen_id, "ids must be monotonic");
                last_seen_id = received.message_id;
                forest.apply(&received.body);
            }
            Decoded::Unrecognized { class_name, .. } => {
                panic!("run contains only known variants, got {class_name}")
            }
        }
    }

    // The forest came out whole despite the child-before-parent arrival.
    assert_eq!(forest.roots(), &[1]);
    assert_eq!(forest.get(1).unwrap().children(), &[2]);
    assert_eq!(forest.orphan_count(), 0);
}

#[tokio::test]
async fn client_handshake_crosses_the_other_channel() {
    let bridge = VisBridge::new();
    let mut kernel_glue = bridge.clientmsg().subscribe();

    // The embedded client announces readiness through a client envelope.
    let ready = GuidanceMessage::client_ready();
    let env = Envelope::client(serde_json::to_value(&ready).unwrap());
    assert_eq!(bridge.route(env), Routed::Client);

    let payload = kernel_glue.recv().await.expect("bridge alive");
    assert!(guards::is_client_ready_message(Some(&payload)));

    // The kernel acknowledges on its own channel.
    let mut renderer = bridge.kernelmsg().subscribe();
    bridge.publish_to_client(&GuidanceMessage::client_ready_ack());
    let ack = renderer.recv().await.expect("bridge alive");
    assert!(guards::is_client_ready_ack_message(Some(&ack)));
}

#[tokio::test]
async fn unknown_content_is_skipped_not_fatal() {
    init_logging();
    let bridge = VisBridge::new();
    let mut renderer = bridge.kernelmsg().subscribe();

    // A newer kernel sends a variant this build has never heard of.
    let raw = r#"{"type": "kernelmsg", "content":
                  {"class_name": "SparklineMessage", "message_id": 41, "points": [1, 2]}}"#;
    assert_eq!(bridge.route_raw(raw).unwrap(), Routed::Kernel);

    let payload = renderer.recv().await.expect("bridge alive");
    // Family membership holds, every specific predicate falls through.
    assert!(guards::is_guidance_message(Some(&payload)));
    assert!(!guards::is_trace_message(Some(&payload)));

    match decode_message_value(&payload).unwrap() {
        Decoded::Unrecognized { class_name, message_id } => {
            assert_eq!(class_name, "SparklineMessage");
            assert_eq!(message_id, 41);
        }
        Decoded::Known(_) => panic!("tag is not a known variant"),
    }
}

#[test]
fn resize_envelopes_stay_out_of_message_traffic() {
    let bridge = VisBridge::new();

    let routed = bridge
        .route_raw(r#"{"type": "resize", "content": {"width": 980, "height": 420}}"#)
        .unwrap();
    match routed {
        Routed::Resize(content) => assert_eq!(content, json!({"width": 980, "height": 420})),
        other => panic!("expected a resize outcome, got {other:?}"),
    }
    assert!(bridge.kernelmsg().latest().is_none());
    assert!(bridge.clientmsg().latest().is_none());
}

#[test]
fn wire_round_trip_preserves_every_field() {
    let msg = GuidanceMessage::trace(
        3,
        Some(1),
        Some(NodeAttr::TextOutput {
            value: "hi".to_owned(),
            is_input: false,
            is_generated: true,
            is_force_forwarded: false,
            token_count: 1,
            prob: 0.92,
            tokens: vec![GenToken::new(5, 0.92, "hi").generated()],
        }),
    );

    let wire = tracebridge::encode_message(&msg);
    match tracebridge::decode_message(&wire).unwrap() {
        Decoded::Known(back) => {
            assert_eq!(back, msg);
            match back.body {
                MessageBody::TraceMessage { node_attr: Some(attr), .. } => {
                    assert_eq!(attr.class_name(), "TextOutput");
                }
                _ => panic!("expected TraceMessage with node_attr"),
            }
        }
        Decoded::Unrecognized { .. } => panic!("known variant"),
    }
}
