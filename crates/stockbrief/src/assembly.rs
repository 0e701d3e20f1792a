//! Response assembly and chunking
//!
//! Turns analysis answers into chat messages that respect the platform's
//! size limit. A single answer is passed through with a hard cut; a batch is
//! reduced to its numbered section lines, labeled per instrument and packed
//! into as few messages as the soft threshold allows.
//!
//! Lengths are counted in Unicode scalar values.

use crate::error::{BotError, Result};
use crate::interface::OutboundMessage;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary used when an answer has no recognizable section lines
pub const FALLBACK_SUMMARY: &str = "(No clear response. Possibly too long or malformed.)";

/// Separator between labeled blocks inside one message
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Message size limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLimits {
    /// Hard cap; nothing longer is ever sent
    pub max_chars: usize,
    /// A batch buffer is flushed before it would reach this size
    pub soft_threshold: usize,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self {
            max_chars: 4000,
            soft_threshold: 3900,
        }
    }
}

impl MessageLimits {
    pub fn new(max_chars: usize, soft_threshold: usize) -> Self {
        Self {
            max_chars,
            soft_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 || self.soft_threshold == 0 {
            return Err(BotError::Config(
                "message limits must be greater than zero".to_string(),
            ));
        }
        if self.soft_threshold >= self.max_chars {
            return Err(BotError::Config(format!(
                "soft threshold ({}) must be below the message cap ({})",
                self.soft_threshold, self.max_chars
            )));
        }
        Ok(())
    }
}

/// Keycap markers that open the six answer sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionMarker {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl SectionMarker {
    pub const ALL: [SectionMarker; 6] = [
        SectionMarker::One,
        SectionMarker::Two,
        SectionMarker::Three,
        SectionMarker::Four,
        SectionMarker::Five,
        SectionMarker::Six,
    ];

    /// Digit, variation selector 16, combining enclosing keycap
    pub fn as_str(self) -> &'static str {
        match self {
            SectionMarker::One => "1\u{FE0F}\u{20E3}",
            SectionMarker::Two => "2\u{FE0F}\u{20E3}",
            SectionMarker::Three => "3\u{FE0F}\u{20E3}",
            SectionMarker::Four => "4\u{FE0F}\u{20E3}",
            SectionMarker::Five => "5\u{FE0F}\u{20E3}",
            SectionMarker::Six => "6\u{FE0F}\u{20E3}",
        }
    }

    /// Marker opening a line, ignoring leading whitespace
    pub fn leading(line: &str) -> Option<SectionMarker> {
        let line = line.trim_start();
        Self::ALL.into_iter().find(|m| line.starts_with(m.as_str()))
    }
}

/// Cut `text` to at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Single-answer passthrough: one plain message, hard-cut to the cap
pub fn passthrough(answer: &str, limits: &MessageLimits) -> OutboundMessage {
    OutboundMessage::plain(truncate_chars(answer, limits.max_chars))
}

/// Keep only the lines that open a numbered section
///
/// Kept lines are copied verbatim and the joined result is trimmed. An empty
/// string means no section line was found.
pub fn filter_sections(answer: &str) -> String {
    answer
        .trim()
        .lines()
        .filter(|line| SectionMarker::leading(line).is_some())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Section lines of an answer, or [`FALLBACK_SUMMARY`] when there are none
pub fn summarize(answer: &str) -> String {
    let summary = filter_sections(answer);
    if summary.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        summary
    }
}

/// Labeled batch block for a successful analysis
pub fn summary_block(name: &str, answer: &str) -> String {
    format!("📊 **{name}**\n{}", summarize(answer))
}

/// Inline batch block for a failed analysis
pub fn error_block(name: &str, error: &impl std::fmt::Display) -> String {
    format!("⚠️ Error analyzing {name}: {error}")
}

/// Packs batch blocks into size-bounded Markdown messages
///
/// Blocks are never split or reordered. The buffer is flushed before
/// appending a block would bring it to the soft threshold, and every flushed
/// buffer is cut to the hard cap, which only bites when one block is itself
/// oversized.
#[derive(Debug)]
pub struct BatchAssembler {
    limits: MessageLimits,
    buffer: String,
    buffer_chars: usize,
    messages: Vec<OutboundMessage>,
}

impl BatchAssembler {
    pub fn new(limits: MessageLimits) -> Self {
        Self {
            limits,
            buffer: String::new(),
            buffer_chars: 0,
            messages: Vec::new(),
        }
    }

    /// Append one labeled block
    pub fn push(&mut self, block: &str) {
        let block_chars = block.chars().count();
        let separator_chars = BLOCK_SEPARATOR.chars().count();

        if !self.buffer.is_empty()
            && self.buffer_chars + separator_chars + block_chars >= self.limits.soft_threshold
        {
            self.flush();
        }

        if self.buffer.is_empty() {
            self.buffer.push_str(block);
            self.buffer_chars = block_chars;
        } else {
            self.buffer.push_str(BLOCK_SEPARATOR);
            self.buffer.push_str(block);
            self.buffer_chars += separator_chars + block_chars;
        }
    }

    /// Flush what is left and return the messages in order
    pub fn finish(mut self) -> Vec<OutboundMessage> {
        self.flush();
        self.messages
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        if self.buffer_chars > self.limits.max_chars {
            debug!(
                chars = self.buffer_chars,
                max = self.limits.max_chars,
                "Truncating oversized batch message"
            );
        }
        let text = truncate_chars(&self.buffer, self.limits.max_chars).to_string();
        self.messages.push(OutboundMessage::markdown(text));
        self.buffer.clear();
        self.buffer_chars = 0;
    }
}

/// Pack a sequence of blocks with [`BatchAssembler`]
pub fn assemble_batch<I, S>(blocks: I, limits: &MessageLimits) -> Vec<OutboundMessage>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = BatchAssembler::new(*limits);
    for block in blocks {
        assembler.push(block.as_ref());
    }
    assembler.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::ParseMode;

    const ANSWER: &str = "Here is the analysis.\n\
        1\u{FE0F}\u{20E3} Fundamental Analysis\n\
        BUY — solid margins\n\
        2\u{FE0F}\u{20E3} Valuation BUY — P/E below peers\n\
        Some closing remark\n\
        6\u{FE0F}\u{20E3} Latest News AVOID — weak guidance";

    fn joined(messages: &[OutboundMessage]) -> String {
        messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    #[test]
    fn test_default_limits_are_valid() {
        let limits = MessageLimits::default();
        assert_eq!(limits.max_chars, 4000);
        assert_eq!(limits.soft_threshold, 3900);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_invalid_limits() {
        assert!(MessageLimits::new(100, 100).validate().is_err());
        assert!(MessageLimits::new(100, 0).validate().is_err());
        assert!(MessageLimits::new(0, 0).validate().is_err());
    }

    #[test]
    fn test_marker_detection() {
        assert_eq!(
            SectionMarker::leading("  3\u{FE0F}\u{20E3} Growth"),
            Some(SectionMarker::Three)
        );
        assert_eq!(SectionMarker::leading("3 Growth"), None);
        assert_eq!(SectionMarker::leading("3\u{FE0F} Growth"), None);
        assert_eq!(SectionMarker::leading("7\u{FE0F}\u{20E3} Extra"), None);
    }

    #[test]
    fn test_filter_keeps_marker_lines_verbatim() {
        assert_eq!(
            filter_sections(ANSWER),
            "1\u{FE0F}\u{20E3} Fundamental Analysis\n\
             2\u{FE0F}\u{20E3} Valuation BUY — P/E below peers\n\
             6\u{FE0F}\u{20E3} Latest News AVOID — weak guidance"
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let answers = [
            ANSWER,
            "   1\u{FE0F}\u{20E3} indented\n  2\u{FE0F}\u{20E3} also indented  ",
            "nothing here",
            "",
        ];
        for answer in answers {
            let once = filter_sections(answer);
            assert_eq!(filter_sections(&once), once);
        }
    }

    #[test]
    fn test_summary_falls_back_when_nothing_matches() {
        assert_eq!(summarize("no sections at all"), FALLBACK_SUMMARY);
        assert_eq!(summarize("   \n  "), FALLBACK_SUMMARY);
        assert!(!summarize("").is_empty());
    }

    #[test]
    fn test_block_formats() {
        assert_eq!(
            summary_block("TCS", "1\u{FE0F}\u{20E3} ok"),
            "📊 **TCS**\n1\u{FE0F}\u{20E3} ok"
        );
        assert_eq!(
            error_block("INFY", &"timeout"),
            "⚠️ Error analyzing INFY: timeout"
        );
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_passthrough_cuts_to_exactly_the_cap() {
        let answer = "x".repeat(5000);
        let message = passthrough(&answer, &MessageLimits::default());
        assert_eq!(message.char_len(), 4000);
        assert_eq!(message.parse_mode, None);
    }

    #[test]
    fn test_passthrough_short_answer_is_untouched() {
        let message = passthrough("short", &MessageLimits::default());
        assert_eq!(message.text, "short");
    }

    #[test]
    fn test_passthrough_counts_characters_not_bytes() {
        let answer = "📊".repeat(4500);
        let message = passthrough(&answer, &MessageLimits::default());
        assert_eq!(message.char_len(), 4000);
    }

    #[test]
    fn test_empty_batch_sends_nothing() {
        let blocks: Vec<String> = Vec::new();
        assert!(assemble_batch(blocks, &MessageLimits::default()).is_empty());
    }

    #[test]
    fn test_small_batch_fits_one_markdown_message() {
        let blocks = ["📊 **A**\nx", "📊 **B**\ny", "📊 **C**\nz"];
        let messages = assemble_batch(blocks, &MessageLimits::default());

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "📊 **A**\nx\n\n📊 **B**\ny\n\n📊 **C**\nz");
        assert_eq!(messages[0].parse_mode, Some(ParseMode::Markdown));
    }

    #[test]
    fn test_batch_splits_and_preserves_order() {
        let blocks: Vec<String> = (0..7)
            .map(|i| format!("📊 **S{i}**\n{}", "a".repeat(1200)))
            .collect();
        let messages = assemble_batch(&blocks, &MessageLimits::default());

        assert!(messages.len() > 1);
        assert!(messages.iter().all(|m| m.char_len() <= 4000));
        assert_eq!(joined(&messages), blocks.join(BLOCK_SEPARATOR));
    }

    #[test]
    fn test_flush_happens_at_soft_threshold() {
        let limits = MessageLimits::new(100, 50);
        // 20 + 2 + 27 = 49 stays, one more char would reach 50
        let messages = assemble_batch(["a".repeat(20), "b".repeat(27)], &limits);
        assert_eq!(messages.len(), 1);

        let messages = assemble_batch(["a".repeat(20), "b".repeat(28)], &limits);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, "b".repeat(28));
    }

    #[test]
    fn test_oversized_block_is_cut_alone() {
        let blocks = ["short".to_string(), "z".repeat(4500), "tail".to_string()];
        let messages = assemble_batch(&blocks, &MessageLimits::default());

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].text, "short");
        assert_eq!(messages[1].text, "z".repeat(4000));
        assert_eq!(messages[2].text, "tail");
    }

    #[test]
    fn test_every_block_lands_in_exactly_one_message() {
        let blocks: Vec<String> = (0..40)
            .map(|i| format!("📊 **T{i}**\n{}", "q".repeat(50 + i * 37)))
            .collect();
        let messages = assemble_batch(&blocks, &MessageLimits::default());

        for block in &blocks {
            let hits = messages.iter().filter(|m| m.text.contains(block.as_str())).count();
            assert_eq!(hits, 1, "block {block:.12} appears {hits} times");
        }
        assert!(messages.iter().all(|m| m.char_len() <= 4000));
        assert_eq!(joined(&messages), blocks.join(BLOCK_SEPARATOR));
    }
}
