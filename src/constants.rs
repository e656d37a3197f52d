//! Protocol-wide constants for tracebridge.
//!
//! The string literals here are the wire contract: `class_name` tags for
//! both record families, the envelope `type` tags, and the channel names.
//! Guards, codecs, and tests all read from this module so a tag can never
//! drift between the serializer and the discriminators.
//!
//! # Categories
//!
//! - **Message tags**: `class_name` values of the kernel↔client message family
//! - **Node tags**: `class_name` values of the trace node-attribute family
//! - **Envelope**: transport wrapper `type` values and channel names
//! - **Limits**: recommended producer/consumer bounds

// ============================================================================
// Message tags (GuidanceMessage family)
// ============================================================================

/// `class_name` tag literals for the kernel↔client message family.
///
/// Every member of this family additionally carries a `message_id`.
pub mod message_tag {
    /// Incremental trace-tree update.
    pub const TRACE: &str = "TraceMessage";
    /// Client should clear all rendered output.
    pub const RESET_DISPLAY: &str = "ResetDisplayMessage";
    /// A new execution has begun on the kernel side.
    pub const EXECUTION_STARTED: &str = "ExecutionStartedMessage";
    /// The execution finished; references the final trace node.
    pub const EXECUTION_COMPLETED: &str = "ExecutionCompletedMessage";
    /// Batch of generated tokens plus the reconstructed text span.
    pub const TOKENS: &str = "TokensMessage";
    /// Embedded client finished booting and can receive messages.
    pub const CLIENT_READY: &str = "ClientReadyMessage";
    /// Kernel acknowledgment of `ClientReadyMessage`.
    pub const CLIENT_READY_ACK: &str = "ClientReadyAckMessage";
    /// Client asks the kernel to (re)send renderable output.
    pub const OUTPUT_REQUEST: &str = "OutputRequestMessage";
    /// Named metric sample for the client's stat display.
    pub const METRIC: &str = "MetricMessage";

    /// Every tag in the family, for membership checks.
    pub const ALL: [&str; 9] = [
        TRACE,
        RESET_DISPLAY,
        EXECUTION_STARTED,
        EXECUTION_COMPLETED,
        TOKENS,
        CLIENT_READY,
        CLIENT_READY_ACK,
        OUTPUT_REQUEST,
        METRIC,
    ];
}

// ============================================================================
// Node tags (NodeAttr family)
// ============================================================================

/// `class_name` tag literals for trace node attributes.
///
/// These records never carry a `message_id`; they appear only nested inside
/// a `TraceMessage`'s `node_attr` field.
pub mod node_tag {
    /// Generated or forwarded text span.
    pub const TEXT_OUTPUT: &str = "TextOutput";
    /// Base64 image payload.
    pub const IMAGE_OUTPUT: &str = "ImageOutput";
    /// Base64 audio payload.
    pub const AUDIO_OUTPUT: &str = "AudioOutput";
    /// Base64 video payload.
    pub const VIDEO_OUTPUT: &str = "VideoOutput";
    /// Opening marker of a chat role block.
    pub const ROLE_OPENER_INPUT: &str = "RoleOpenerInput";
    /// Closing marker of a chat role block.
    pub const ROLE_CLOSER_INPUT: &str = "RoleCloserInput";
    /// Literal prompt text supplied by the caller.
    pub const LITERAL_INPUT: &str = "LiteralInput";
    /// Caller-supplied text with embedded sub-programs.
    pub const EMBEDDED_INPUT: &str = "EmbeddedInput";

    /// Every tag in the family, for membership checks.
    pub const ALL: [&str; 8] = [
        TEXT_OUTPUT,
        IMAGE_OUTPUT,
        AUDIO_OUTPUT,
        VIDEO_OUTPUT,
        ROLE_OPENER_INPUT,
        ROLE_CLOSER_INPUT,
        LITERAL_INPUT,
        EMBEDDED_INPUT,
    ];
}

// ============================================================================
// Envelope
// ============================================================================

/// Envelope `type` tag for viewport sizing intents.
pub const ENVELOPE_RESIZE: &str = "resize";

/// Envelope `type` tag for client-originated payloads (client → kernel).
pub const ENVELOPE_CLIENTMSG: &str = "clientmsg";

/// Envelope `type` tag for kernel-originated payloads (kernel → client).
pub const ENVELOPE_KERNELMSG: &str = "kernelmsg";

/// Field holding the discriminant tag on every record of both families.
pub const CLASS_NAME_FIELD: &str = "class_name";

/// Field holding the monotonic id on kernel↔client messages.
pub const MESSAGE_ID_FIELD: &str = "message_id";

// ============================================================================
// Limits
// ============================================================================

/// Recommended cap on `GenTokenExtra::top_k` alternatives.
///
/// The kernel samples at most this many alternative candidates per issued
/// token. The codec does not enforce the cap — a larger batch is still
/// decoded — but producers in this crate's tests stay within it.
pub const MAX_TOP_K: usize = 5;

/// Default capacity of the trace forest's orphan buffer.
///
/// Orphaned children (parent not yet seen) are parked up to this count
/// before the oldest is promoted to a root. 64 comfortably covers the
/// out-of-order window a single execution produces while bounding memory
/// on a malformed stream.
pub const DEFAULT_ORPHAN_CAPACITY: usize = 64;
