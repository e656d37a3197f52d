//! Token-level value objects.
//!
//! [`GenToken`] is the leaf record for a single vocabulary token as the
//! kernel issued it; [`GenTokenExtra`] adds the alternative candidates the
//! sampler considered. Both appear inside [`TokensMessage`] batches and,
//! for input spans, inside a [`TextOutput`] node attribute.
//!
//! [`TokensMessage`]: crate::messages::MessageBody::TokensMessage
//! [`TextOutput`]: crate::trace::NodeAttr::TextOutput

// Rust guideline compliant 2026-02

use serde::{Deserialize, Serialize};

/// A single issued token with sampling metadata.
///
/// The four provenance flags are independent of one another: a token can be
/// both an input token and force-forwarded, or generated under a mask.
/// Consumers branch on them individually to pick a rendering style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenToken {
    /// Vocabulary id of the token.
    pub token: u64,
    /// Probability the sampler assigned to this token.
    pub prob: f64,
    /// Literal text of the token as decoded by the tokenizer.
    pub text: String,
    /// Wall-clock latency of the forward pass that issued this token.
    #[serde(default)]
    pub latency_ms: f64,
    /// Token was excluded by the active grammar mask.
    #[serde(default)]
    pub is_masked: bool,
    /// Token was sampled by the model (as opposed to supplied).
    #[serde(default)]
    pub is_generated: bool,
    /// Token was supplied by the kernel rather than sampled.
    #[serde(default)]
    pub is_force_forwarded: bool,
    /// Token belongs to the prompt rather than the completion.
    #[serde(default)]
    pub is_input: bool,
}

impl GenToken {
    /// Create a token with all provenance flags cleared.
    pub fn new(token: u64, prob: f64, text: impl Into<String>) -> Self {
        Self {
            token,
            prob,
            text: text.into(),
            latency_ms: 0.0,
            is_masked: false,
            is_generated: false,
            is_force_forwarded: false,
            is_input: false,
        }
    }

    /// Mark as sampled by the model.
    pub fn generated(mut self) -> Self {
        self.is_generated = true;
        self
    }

    /// Mark as supplied by the kernel instead of sampled.
    pub fn force_forwarded(mut self) -> Self {
        self.is_force_forwarded = true;
        self
    }

    /// Mark as part of the prompt.
    pub fn input(mut self) -> Self {
        self.is_input = true;
        self
    }
}

/// An issued token plus the alternative candidates the sampler considered.
///
/// On the wire this is a [`GenToken`] with one extra `top_k` field — the
/// base fields are flattened, not nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenTokenExtra {
    /// The issued token itself.
    #[serde(flatten)]
    pub token: GenToken,
    /// Alternative top-k candidates, highest probability first.
    ///
    /// Producers keep this within [`MAX_TOP_K`](crate::constants::MAX_TOP_K);
    /// the codec accepts any length.
    #[serde(default)]
    pub top_k: Vec<GenToken>,
}

impl GenTokenExtra {
    /// Wrap an issued token with its alternative candidates.
    pub fn new(token: GenToken, top_k: Vec<GenToken>) -> Self {
        Self { token, top_k }
    }
}

impl From<GenToken> for GenTokenExtra {
    fn from(token: GenToken) -> Self {
        Self { token, top_k: Vec::new() }
    }
}
