//! Bot platform interfaces
//!
//! Platform-agnostic message types and the delivery seam the chat
//! transports implement

pub mod message;
pub mod sink;

pub use message::{IncomingMessage, OutboundMessage, ParseMode};
pub use sink::MessageSink;
