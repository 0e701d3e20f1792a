//! Delivery seam between the bot and a chat platform

use super::message::OutboundMessage;
use crate::error::Result;
use async_trait::async_trait;

/// Something that can deliver messages to a chat
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, chat_id: i64, message: &OutboundMessage) -> Result<()>;
}
