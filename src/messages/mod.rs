//! Kernel↔client message family and its JSON codec.
//!
//! Every message on either channel is a tagged record: the `class_name`
//! field is the sole authoritative indicator of its shape, and a
//! `message_id` (monotonic per producer) rides along for gap detection and
//! deduplication on the consumer side.
//!
//! # Wire format
//!
//! ```text
//! { "class_name": "<Tag>", "message_id": <u64>, ...variant fields }
//! ```
//!
//! [`GuidanceMessage`] is the Rust shape of that wire record: the common
//! `message_id` plus a flattened [`MessageBody`], which carries the tag.
//! [`decode_message`] is deliberately open at the edges — an unknown tag
//! decodes to [`Decoded::Unrecognized`] instead of an error, so a client
//! older than its kernel degrades to log-and-ignore rather than faulting.

// Rust guideline compliant 2026-02

pub mod metric;

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{message_tag, CLASS_NAME_FIELD, MESSAGE_ID_FIELD};
use crate::tokens::GenTokenExtra;
use crate::trace::NodeAttr;

use self::metric::MetricValue;

/// Global sequence counter for outbound message ids.
///
/// Starts at 1 so id 0 never appears on the wire and can be used by
/// consumers as "nothing seen yet".
static MESSAGE_SEQ: AtomicU64 = AtomicU64::new(1);

/// A kernel↔client message: monotonic id plus tagged body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceMessage {
    /// Monotonically assigned by the producer; consumers use gaps in this
    /// sequence to detect missed publishes on the latest-value channels.
    pub message_id: u64,
    /// The tagged payload. Its `class_name` lands next to `message_id`
    /// on the wire.
    #[serde(flatten)]
    pub body: MessageBody,
}

/// The closed set of message shapes, tagged by `class_name`.
///
/// One tag maps to exactly one field set; no two variants share a tag.
/// Optional fields mean "absent/unknown", never a sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class_name")]
pub enum MessageBody {
    /// Incremental update to the trace forest.
    ///
    /// Children may arrive before, after, or interleaved with their
    /// parents — the protocol makes no ordering promise, the consumer's
    /// [`TraceForest`](crate::trace::forest::TraceForest) tolerates all
    /// three.
    TraceMessage {
        /// Identity of this trace node.
        trace_id: u64,
        /// Parent node, absent for roots.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_trace_id: Option<u64>,
        /// Visual descriptor for the node, if it renders anything.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_attr: Option<NodeAttr>,
    },

    /// Client should discard everything rendered so far.
    ResetDisplayMessage,

    /// A new execution began on the kernel side.
    ExecutionStartedMessage,

    /// The execution finished.
    ExecutionCompletedMessage {
        /// The final trace node of the run, absent if nothing was traced.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        last_trace_id: Option<u64>,
    },

    /// Batch of issued tokens for one trace node.
    TokensMessage {
        /// Trace node the batch belongs to.
        trace_id: u64,
        /// Fully reconstructed text span for the batch.
        ///
        /// Transmitted rather than derived: masked and force-forwarded
        /// tokens make the naive concatenation of token texts wrong.
        text: String,
        /// The issued tokens with their top-k alternatives.
        tokens: Vec<GenTokenExtra>,
    },

    /// Embedded client finished booting.
    ClientReadyMessage,

    /// Kernel acknowledgment of `ClientReadyMessage`.
    ClientReadyAckMessage,

    /// Client asks the kernel to (re)send renderable output.
    OutputRequestMessage,

    /// Named metric sample.
    MetricMessage {
        /// Metric name (e.g. "tokens/sec").
        name: String,
        /// One of four shapes; see [`MetricValue`].
        value: MetricValue,
        /// Which arity `value` has. Consumers branch on this flag before
        /// interpreting the value, never on the value's runtime shape.
        scalar: bool,
    },
}

impl MessageBody {
    /// The `class_name` tag this body serializes under.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::TraceMessage { .. } => message_tag::TRACE,
            Self::ResetDisplayMessage => message_tag::RESET_DISPLAY,
            Self::ExecutionStartedMessage => message_tag::EXECUTION_STARTED,
            Self::ExecutionCompletedMessage { .. } => message_tag::EXECUTION_COMPLETED,
            Self::TokensMessage { .. } => message_tag::TOKENS,
            Self::ClientReadyMessage => message_tag::CLIENT_READY,
            Self::ClientReadyAckMessage => message_tag::CLIENT_READY_ACK,
            Self::OutputRequestMessage => message_tag::OUTPUT_REQUEST,
            Self::MetricMessage { .. } => message_tag::METRIC,
        }
    }
}

impl GuidanceMessage {
    /// Wrap a body with the next monotonic message id.
    pub fn new(body: MessageBody) -> Self {
        Self {
            message_id: MESSAGE_SEQ.fetch_add(1, Ordering::Relaxed),
            body,
        }
    }

    /// Trace forest update.
    pub fn trace(trace_id: u64, parent_trace_id: Option<u64>, node_attr: Option<NodeAttr>) -> Self {
        Self::new(MessageBody::TraceMessage {
            trace_id,
            parent_trace_id,
            node_attr,
        })
    }

    /// Token batch for a trace node.
    pub fn tokens(trace_id: u64, text: impl Into<String>, tokens: Vec<GenTokenExtra>) -> Self {
        Self::new(MessageBody::TokensMessage {
            trace_id,
            text: text.into(),
            tokens,
        })
    }

    /// Metric sample. The `scalar` flag is derived from the value so the
    /// two can never disagree.
    pub fn metric(name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        let value = value.into();
        Self::new(MessageBody::MetricMessage {
            name: name.into(),
            scalar: value.is_scalar(),
            value,
        })
    }

    /// Execution started signal.
    pub fn execution_started() -> Self {
        Self::new(MessageBody::ExecutionStartedMessage)
    }

    /// Execution completed signal.
    pub fn execution_completed(last_trace_id: Option<u64>) -> Self {
        Self::new(MessageBody::ExecutionCompletedMessage { last_trace_id })
    }

    /// Reset display signal.
    pub fn reset_display() -> Self {
        Self::new(MessageBody::ResetDisplayMessage)
    }

    /// Client ready handshake.
    pub fn client_ready() -> Self {
        Self::new(MessageBody::ClientReadyMessage)
    }

    /// Client ready acknowledgment.
    pub fn client_ready_ack() -> Self {
        Self::new(MessageBody::ClientReadyAckMessage)
    }

    /// Output (re)send request.
    pub fn output_request() -> Self {
        Self::new(MessageBody::OutputRequestMessage)
    }

    /// The `class_name` tag of this message.
    pub fn class_name(&self) -> &'static str {
        self.body.class_name()
    }
}

// ─── Codec ─────────────────────────────────────────────────────────────────

/// Outcome of decoding an incoming payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The payload matched a known variant.
    Known(GuidanceMessage),
    /// Family member with a tag this build does not know.
    ///
    /// The producer is newer than this consumer; callers log and ignore.
    Unrecognized {
        /// The unknown `class_name` tag, kept for logging.
        class_name: String,
        /// The message id, so gap detection still works across unknown
        /// variants.
        message_id: u64,
    },
}

/// Encode a message to its JSON wire form.
pub fn encode_message(msg: &GuidanceMessage) -> String {
    serde_json::to_string(msg).expect("message serialization cannot fail")
}

/// Decode a JSON wire string into a message.
///
/// Unknown tags are a normal outcome ([`Decoded::Unrecognized`]), not an
/// error. A payload that is not a family member at all (missing
/// `class_name` or `message_id`), or a known tag with malformed fields,
/// is an error.
pub fn decode_message(data: &str) -> Result<Decoded> {
    let value: Value = serde_json::from_str(data).context("invalid message JSON")?;
    decode_message_value(&value)
}

/// Decode an already-parsed payload (e.g. a channel's published content).
pub fn decode_message_value(value: &Value) -> Result<Decoded> {
    let class_name = value
        .get(CLASS_NAME_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("payload has no {CLASS_NAME_FIELD} tag"))?;
    let message_id = value
        .get(MESSAGE_ID_FIELD)
        .and_then(Value::as_u64)
        .ok_or_else(|| anyhow!("payload has no {MESSAGE_ID_FIELD}"))?;

    if !message_tag::ALL.contains(&class_name) {
        log::debug!("unrecognized message tag {class_name} (message_id {message_id})");
        return Ok(Decoded::Unrecognized {
            class_name: class_name.to_owned(),
            message_id,
        });
    }

    let msg: GuidanceMessage = serde_json::from_value(value.clone())
        .with_context(|| format!("malformed {class_name} payload"))?;
    Ok(Decoded::Known(msg))
}
