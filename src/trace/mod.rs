//! Trace node attributes and forest reconstruction.
//!
//! A trace node's visual descriptor travels as a [`NodeAttr`] nested inside
//! a `TraceMessage`. Node attributes are the second tagged family of the
//! protocol: same `class_name` discipline as the message family, but no
//! `message_id` — they are never published on their own.
//!
//! [`forest`] rebuilds the parent/child structure the `trace_id` /
//! `parent_trace_id` pairs imply, tolerating out-of-order arrival.

// Rust guideline compliant 2026-02

pub mod forest;

use serde::{Deserialize, Serialize};

use crate::constants::node_tag;
use crate::tokens::GenToken;

/// Visual descriptor of a trace node, tagged by `class_name`.
///
/// Output variants describe what the kernel produced; input variants
/// describe what the caller supplied. Media payloads are base64 strings —
/// the client decodes them, this layer does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class_name")]
pub enum NodeAttr {
    /// A text span, generated or forwarded.
    TextOutput {
        /// The literal text of the span.
        value: String,
        /// Span belongs to the prompt.
        #[serde(default)]
        is_input: bool,
        /// Span was sampled by the model.
        #[serde(default)]
        is_generated: bool,
        /// Span was supplied by the kernel rather than sampled.
        #[serde(default)]
        is_force_forwarded: bool,
        /// Number of tokens the span decodes to.
        #[serde(default)]
        token_count: u64,
        /// Joint probability of the span.
        #[serde(default)]
        prob: f64,
        /// Per-token detail, when the kernel chose to attach it.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tokens: Vec<GenToken>,
    },

    /// A rendered image.
    ImageOutput {
        /// Base64 payload.
        value: String,
        /// Image was supplied by the caller rather than generated.
        #[serde(default)]
        is_input: bool,
        /// Media format hint (e.g. "png"), absent if unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    /// A rendered audio clip.
    AudioOutput {
        /// Base64 payload.
        value: String,
        /// Clip was supplied by the caller rather than generated.
        #[serde(default)]
        is_input: bool,
        /// Media format hint (e.g. "wav"), absent if unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    /// A rendered video clip.
    VideoOutput {
        /// Base64 payload.
        value: String,
        /// Clip was supplied by the caller rather than generated.
        #[serde(default)]
        is_input: bool,
        /// Media format hint (e.g. "mp4"), absent if unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },

    /// Opening marker of a chat role block.
    RoleOpenerInput {
        /// Role name (e.g. "assistant"), absent if unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Literal opener text the kernel injected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Closer text the matching `RoleCloserInput` will carry.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        closer_text: Option<String>,
    },

    /// Closing marker of a chat role block.
    RoleCloserInput {
        /// Role name (e.g. "assistant"), absent if unknown.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Literal closer text the kernel injected.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    /// Literal prompt text supplied by the caller.
    LiteralInput {
        /// The supplied text.
        value: String,
    },

    /// Caller-supplied text containing embedded sub-programs.
    EmbeddedInput {
        /// The supplied text, tags included.
        value: String,
    },
}

impl NodeAttr {
    /// The `class_name` tag this attribute serializes under.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::TextOutput { .. } => node_tag::TEXT_OUTPUT,
            Self::ImageOutput { .. } => node_tag::IMAGE_OUTPUT,
            Self::AudioOutput { .. } => node_tag::AUDIO_OUTPUT,
            Self::VideoOutput { .. } => node_tag::VIDEO_OUTPUT,
            Self::RoleOpenerInput { .. } => node_tag::ROLE_OPENER_INPUT,
            Self::RoleCloserInput { .. } => node_tag::ROLE_CLOSER_INPUT,
            Self::LiteralInput { .. } => node_tag::LITERAL_INPUT,
            Self::EmbeddedInput { .. } => node_tag::EMBEDDED_INPUT,
        }
    }

    /// Plain text output with provenance flags cleared.
    pub fn text(value: impl Into<String>) -> Self {
        Self::TextOutput {
            value: value.into(),
            is_input: false,
            is_generated: false,
            is_force_forwarded: false,
            token_count: 0,
            prob: 1.0,
            tokens: Vec::new(),
        }
    }

    /// Literal caller input.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::LiteralInput {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matches_wire_class_name() {
        let attr = NodeAttr::text("hi");
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["class_name"], attr.class_name());
    }

    #[test]
    fn text_output_round_trip() {
        let attr = NodeAttr::TextOutput {
            value: "hello".to_owned(),
            is_input: false,
            is_generated: true,
            is_force_forwarded: false,
            token_count: 2,
            prob: 0.5,
            tokens: vec![GenToken::new(1, 0.7, "hel"), GenToken::new(2, 0.71, "lo")],
        };
        let json = serde_json::to_string(&attr).unwrap();
        let back: NodeAttr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attr);
    }

    #[test]
    fn text_output_without_tokens_field_parses() {
        // The per-token detail is optional on the wire.
        let json = r#"{"class_name": "TextOutput", "value": "hi", "is_input": false,
                       "is_generated": true, "is_force_forwarded": false,
                       "token_count": 1, "prob": 0.92}"#;
        let attr: NodeAttr = serde_json::from_str(json).unwrap();
        match attr {
            NodeAttr::TextOutput { ref value, tokens: ref toks, .. } => {
                assert_eq!(value, "hi");
                assert!(toks.is_empty());
            }
            _ => panic!("expected TextOutput"),
        }
    }

    #[test]
    fn role_markers_tolerate_absent_names() {
        let json = r#"{"class_name": "RoleOpenerInput"}"#;
        let attr: NodeAttr = serde_json::from_str(json).unwrap();
        match attr {
            NodeAttr::RoleOpenerInput { name, text, closer_text } => {
                assert!(name.is_none());
                assert!(text.is_none());
                assert!(closer_text.is_none());
            }
            _ => panic!("expected RoleOpenerInput"),
        }
    }

    #[test]
    fn media_outputs_round_trip() {
        let attr = NodeAttr::ImageOutput {
            value: "aGVsbG8=".to_owned(),
            is_input: false,
            format: Some("png".to_owned()),
        };
        let json = serde_json::to_string(&attr).unwrap();
        assert!(json.contains("\"class_name\":\"ImageOutput\""));
        let back: NodeAttr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attr);
    }
}
