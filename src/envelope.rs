//! Transport envelope.
//!
//! Every payload crossing the host↔client boundary is wrapped in a
//! three-way discriminated envelope so the transport glue can route it
//! without inspecting the content:
//!
//! ```text
//! { "type": "resize",    "content": <any> }   viewport sizing intent
//! { "type": "clientmsg", "content": <any> }   client → kernel payload
//! { "type": "kernelmsg", "content": <any> }   kernel → client payload
//! ```
//!
//! `content` is untyped here; the receiving side applies the
//! [`guards`](crate::guards) predicates (or [`decode_message_value`]) to
//! recover a concrete message, and ignores content that matches nothing.
//! An envelope `type` outside the three tags, by contrast, means the two
//! ends disagree about the protocol itself — [`Envelope::parse`] makes
//! that a hard error rather than something to skip.
//!
//! [`decode_message_value`]: crate::messages::decode_message_value

// Rust guideline compliant 2026-02

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{ENVELOPE_CLIENTMSG, ENVELOPE_KERNELMSG, ENVELOPE_RESIZE};

/// Transport wrapper distinguishing intent from payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    /// Viewport/layout sizing intent. The content shape is the host's
    /// layout glue's business, not this layer's.
    Resize {
        /// Opaque sizing payload.
        content: Value,
    },
    /// Payload originating from the embedded client, destined for the
    /// kernel.
    Clientmsg {
        /// Untyped message payload.
        content: Value,
    },
    /// Payload originating from the kernel, destined for the embedded
    /// client.
    Kernelmsg {
        /// Untyped message payload.
        content: Value,
    },
}

impl Envelope {
    /// Wrap a client-originated payload.
    pub fn client(content: Value) -> Self {
        Self::Clientmsg { content }
    }

    /// Wrap a kernel-originated payload.
    pub fn kernel(content: Value) -> Self {
        Self::Kernelmsg { content }
    }

    /// Wrap a sizing intent.
    pub fn resize(content: Value) -> Self {
        Self::Resize { content }
    }

    /// Parse an envelope from its JSON wire form.
    ///
    /// A `type` outside the three recognized tags is a protocol/version
    /// mismatch and fails hard — unlike unrecognized *content*, which is
    /// an ordinary skip for the receiver.
    pub fn parse(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("malformed channel envelope")
    }

    /// The wire `type` tag of this envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resize { .. } => ENVELOPE_RESIZE,
            Self::Clientmsg { .. } => ENVELOPE_CLIENTMSG,
            Self::Kernelmsg { .. } => ENVELOPE_KERNELMSG,
        }
    }

    /// Borrow the wrapped content.
    pub fn content(&self) -> &Value {
        match self {
            Self::Resize { content } | Self::Clientmsg { content } | Self::Kernelmsg { content } => {
                content
            }
        }
    }

    /// Take the wrapped content.
    pub fn into_content(self) -> Value {
        match self {
            Self::Resize { content } | Self::Clientmsg { content } | Self::Kernelmsg { content } => {
                content
            }
        }
    }
}
