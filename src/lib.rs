//! Tracebridge - message contract between a generative-text kernel and its
//! embedded visualization client.
//!
//! A notebook/IDE host embeds a visualization client that renders the
//! incremental trace of a generative-text execution. This crate is the
//! protocol layer between the two: the closed set of tagged message
//! shapes, the runtime discriminators that narrow untyped payloads, the
//! transport envelope, and the two latest-value broadcast channels the
//! transport glue and renderer meet at.
//!
//! # Architecture
//!
//! ```text
//! kernel producer ──► GuidanceMessage ──► Envelope(kernelmsg) ─┐
//!                                                              ▼
//!                                                       VisBridge::route
//!                                                              │
//!                     renderer ◄── kernelmsg LatestSlot ◄──────┤
//!                  kernel glue ◄── clientmsg LatestSlot ◄──────┘
//! ```
//!
//! Everything here is data and plumbing — no I/O, no rendering, no
//! transport. Those are the host's collaborators.
//!
//! # Modules
//!
//! - [`messages`] - Kernel↔client message family and JSON codec
//! - [`trace`] - Trace node attributes and forest reconstruction
//! - [`tokens`] - Token-level value objects
//! - [`guards`] - Runtime discriminators over untyped payloads
//! - [`envelope`] - Transport envelope (resize/clientmsg/kernelmsg)
//! - [`bus`] - Latest-value broadcast slot
//! - [`bridge`] - The dual channels plus envelope routing
//! - [`config`] - Tuning knobs hosts embed in their own config
//! - [`constants`] - Wire tags and recommended bounds

// Library modules
pub mod bridge;
pub mod bus;
pub mod config;
pub mod constants;
pub mod envelope;
pub mod guards;
pub mod messages;
pub mod tokens;
pub mod trace;

// Re-export commonly used types
pub use bridge::{Routed, VisBridge};
pub use bus::{LatestSlot, Subscription};
pub use config::BridgeConfig;
pub use envelope::Envelope;
pub use messages::metric::MetricValue;
pub use messages::{decode_message, decode_message_value, encode_message};
pub use messages::{Decoded, GuidanceMessage, MessageBody};
pub use tokens::{GenToken, GenTokenExtra};
pub use trace::forest::{TraceForest, TraceNode};
pub use trace::NodeAttr;
