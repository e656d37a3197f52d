//! Runtime discriminators over untyped payloads.
//!
//! The receiving side of either channel holds a raw `serde_json::Value`
//! until it decides what to do with it. The predicates here narrow such a
//! value by exact string comparison on its `class_name` tag — structural
//! field presence is never used to infer type.
//!
//! Every predicate treats absent input (`None`, or JSON `null`) as an
//! ordinary `false`, never a fault: callers probe optional fields freely
//! without defensive pre-checks.
//!
//! The family predicates are deliberately loose: [`is_guidance_message`]
//! checks only that `class_name` and `message_id` are present, so an
//! unknown future tag still counts as "a message" — it will then fail
//! every specific predicate, which gives callers a natural log-and-ignore
//! path for producers newer than this build.

// Rust guideline compliant 2026-02

use serde_json::Value;

use crate::constants::{message_tag, node_tag, CLASS_NAME_FIELD, MESSAGE_ID_FIELD};

/// True iff the value is present and its `class_name` equals `tag` exactly.
fn has_tag(value: Option<&Value>, tag: &str) -> bool {
    value
        .and_then(|v| v.get(CLASS_NAME_FIELD))
        .and_then(Value::as_str)
        == Some(tag)
}

// ─── Family predicates ─────────────────────────────────────────────────────

/// Member of the kernel↔client message family: both `class_name` and
/// `message_id` present. The tag itself is not validated.
pub fn is_guidance_message(value: Option<&Value>) -> bool {
    match value {
        Some(v) => {
            v.get(CLASS_NAME_FIELD).is_some_and(Value::is_string)
                && v.get(MESSAGE_ID_FIELD).is_some()
        }
        None => false,
    }
}

/// Member of the node-attribute family: `class_name` present and no
/// `message_id` (node attributes never carry one).
pub fn is_node_attr(value: Option<&Value>) -> bool {
    match value {
        Some(v) => {
            v.get(CLASS_NAME_FIELD).is_some_and(Value::is_string)
                && v.get(MESSAGE_ID_FIELD).is_none()
        }
        None => false,
    }
}

// ─── Message variants ──────────────────────────────────────────────────────

/// Trace forest update.
pub fn is_trace_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::TRACE)
}

/// Display reset signal.
pub fn is_reset_display_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::RESET_DISPLAY)
}

/// Execution started signal.
pub fn is_execution_started_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::EXECUTION_STARTED)
}

/// Execution completed signal.
pub fn is_execution_completed_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::EXECUTION_COMPLETED)
}

/// Token batch.
pub fn is_tokens_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::TOKENS)
}

/// Client ready handshake.
pub fn is_client_ready_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::CLIENT_READY)
}

/// Client ready acknowledgment.
pub fn is_client_ready_ack_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::CLIENT_READY_ACK)
}

/// Output (re)send request.
pub fn is_output_request_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::OUTPUT_REQUEST)
}

/// Metric sample.
pub fn is_metric_message(value: Option<&Value>) -> bool {
    has_tag(value, message_tag::METRIC)
}

// ─── Node-attribute variants ───────────────────────────────────────────────

/// Text span descriptor.
pub fn is_text_output(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::TEXT_OUTPUT)
}

/// Image descriptor.
pub fn is_image_output(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::IMAGE_OUTPUT)
}

/// Audio descriptor.
pub fn is_audio_output(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::AUDIO_OUTPUT)
}

/// Video descriptor.
pub fn is_video_output(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::VIDEO_OUTPUT)
}

/// Role block opener.
pub fn is_role_opener_input(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::ROLE_OPENER_INPUT)
}

/// Role block closer.
pub fn is_role_closer_input(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::ROLE_CLOSER_INPUT)
}

/// Literal caller input.
pub fn is_literal_input(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::LITERAL_INPUT)
}

/// Caller input with embedded sub-programs.
pub fn is_embedded_input(value: Option<&Value>) -> bool {
    has_tag(value, node_tag::EMBEDDED_INPUT)
}
