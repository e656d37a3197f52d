//! Dual-channel bridge between kernel and embedded client.
//!
//! [`VisBridge`] owns the two named publish points of the protocol:
//!
//! ```text
//! transport ──► Envelope ──► route() ──┬─► kernelmsg slot ──► renderer
//! bridge                               ├─► clientmsg slot ──► kernel glue
//!                                      └─► Routed::Resize  ──► host layout
//! ```
//!
//! The slots are independent: publishing on one never notifies the other,
//! and no ordering holds across them. Envelope content is published
//! unmodified — consumers apply the [`guards`](crate::guards) predicates
//! or [`decode_message_value`](crate::messages::decode_message_value) and
//! ignore content that matches nothing.

// Rust guideline compliant 2026-02

use anyhow::Result;
use serde_json::Value;

use crate::bus::LatestSlot;
use crate::config::BridgeConfig;
use crate::envelope::Envelope;
use crate::messages::GuidanceMessage;

/// Where [`VisBridge::route`] delivered an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    /// Content published on the `kernelmsg` slot.
    Kernel,
    /// Content published on the `clientmsg` slot.
    Client,
    /// Sizing intent, handed back to the caller — layout is host glue,
    /// not message traffic, so it is never published on either slot.
    Resize(Value),
}

/// The two latest-value channels plus envelope routing.
#[derive(Debug)]
pub struct VisBridge {
    kernelmsg: LatestSlot<Value>,
    clientmsg: LatestSlot<Value>,
    config: BridgeConfig,
}

impl VisBridge {
    /// Bridge with default configuration.
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Bridge with explicit configuration.
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            kernelmsg: LatestSlot::new(),
            clientmsg: LatestSlot::new(),
            config,
        }
    }

    /// The kernel → client channel.
    pub fn kernelmsg(&self) -> &LatestSlot<Value> {
        &self.kernelmsg
    }

    /// The client → kernel channel.
    pub fn clientmsg(&self) -> &LatestSlot<Value> {
        &self.clientmsg
    }

    /// The configuration this bridge was built with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Route one envelope: publish its content on the matching slot, or
    /// hand a sizing intent back to the caller.
    pub fn route(&self, envelope: Envelope) -> Routed {
        if self.config.log_routing {
            log::debug!("routing {} envelope", envelope.kind());
        }
        match envelope {
            Envelope::Kernelmsg { content } => {
                self.kernelmsg.publish(content);
                Routed::Kernel
            }
            Envelope::Clientmsg { content } => {
                self.clientmsg.publish(content);
                Routed::Client
            }
            Envelope::Resize { content } => Routed::Resize(content),
        }
    }

    /// Parse a raw transport payload and route it.
    ///
    /// A malformed envelope `type` propagates as a hard error; see
    /// [`Envelope::parse`].
    pub fn route_raw(&self, data: &str) -> Result<Routed> {
        Ok(self.route(Envelope::parse(data)?))
    }

    /// Publish a typed message to the embedded client.
    ///
    /// Producer-side convenience: wraps serialization and the `kernelmsg`
    /// publish.
    pub fn publish_to_client(&self, msg: &GuidanceMessage) {
        self.kernelmsg.publish(message_value(msg));
    }

    /// Publish a typed message to the kernel side.
    pub fn publish_to_kernel(&self, msg: &GuidanceMessage) {
        self.clientmsg.publish(message_value(msg));
    }
}

impl Default for VisBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn message_value(msg: &GuidanceMessage) -> Value {
    serde_json::to_value(msg).expect("message serialization cannot fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guards;
    use crate::messages::{decode_message_value, Decoded};
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::timeout;

    const TICK: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn kernel_envelope_reaches_kernel_slot_only() {
        let bridge = VisBridge::new();
        let mut kernel_sub = bridge.kernelmsg().subscribe();
        let mut client_sub = bridge.clientmsg().subscribe();

        let content = json!({"class_name": "ResetDisplayMessage", "message_id": 1});
        let routed = bridge.route(Envelope::kernel(content.clone()));
        assert_eq!(routed, Routed::Kernel);

        assert_eq!(kernel_sub.recv().await, Some(content));
        assert!(timeout(TICK, client_sub.recv()).await.is_err());
    }

    #[tokio::test]
    async fn client_envelope_reaches_client_slot_only() {
        let bridge = VisBridge::new();
        let mut kernel_sub = bridge.kernelmsg().subscribe();
        let mut client_sub = bridge.clientmsg().subscribe();

        let content = json!({"class_name": "ClientReadyMessage", "message_id": 4});
        assert_eq!(bridge.route(Envelope::client(content.clone())), Routed::Client);

        assert_eq!(client_sub.recv().await, Some(content));
        assert!(timeout(TICK, kernel_sub.recv()).await.is_err());
    }

    #[tokio::test]
    async fn resize_is_returned_not_published() {
        let bridge = VisBridge::new();
        let mut kernel_sub = bridge.kernelmsg().subscribe();
        let mut client_sub = bridge.clientmsg().subscribe();

        let sizing = json!({"width": 800, "height": 600});
        let routed = bridge.route(Envelope::resize(sizing.clone()));
        assert_eq!(routed, Routed::Resize(sizing));

        assert!(timeout(TICK, kernel_sub.recv()).await.is_err());
        assert!(timeout(TICK, client_sub.recv()).await.is_err());
    }

    #[test]
    fn route_raw_parses_and_routes() {
        let bridge = VisBridge::new();
        let routed = bridge
            .route_raw(r#"{"type": "kernelmsg", "content": {"class_name": "X", "message_id": 1}}"#)
            .unwrap();
        assert_eq!(routed, Routed::Kernel);
        assert!(bridge.kernelmsg().latest().is_some());
    }

    #[test]
    fn route_raw_rejects_unknown_envelope_type() {
        let bridge = VisBridge::new();
        assert!(bridge.route_raw(r#"{"type": "warp", "content": {}}"#).is_err());
        // Nothing was published.
        assert!(bridge.kernelmsg().latest().is_none());
        assert!(bridge.clientmsg().latest().is_none());
    }

    #[tokio::test]
    async fn typed_publish_survives_guard_and_decode() {
        let bridge = VisBridge::new();
        let mut sub = bridge.kernelmsg().subscribe();

        let msg = GuidanceMessage::metric("tokens/sec", 17.5);
        bridge.publish_to_client(&msg);

        let received = sub.recv().await.expect("value published");
        assert!(guards::is_metric_message(Some(&received)));
        assert!(guards::is_guidance_message(Some(&received)));
        assert_eq!(decode_message_value(&received).unwrap(), Decoded::Known(msg));
    }

    #[tokio::test]
    async fn late_renderer_sees_only_the_latest_state() {
        let bridge = VisBridge::new();
        bridge.publish_to_client(&GuidanceMessage::execution_started());
        bridge.publish_to_client(&GuidanceMessage::execution_completed(Some(3)));

        // A renderer attaching mid-run gets the newest message only.
        let mut sub = bridge.kernelmsg().subscribe();
        let received = sub.recv().await.expect("value published");
        assert!(guards::is_execution_completed_message(Some(&received)));
        assert!(timeout(TICK, sub.recv()).await.is_err());
    }
}
