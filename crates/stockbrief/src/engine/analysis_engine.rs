//! Analysis Engine - drives one instrument or the watchlist through the pipeline

use crate::analysis::{AnalysisRequester, LlmAnalyst};
use crate::api;
use crate::assembly::{self, BatchAssembler, MessageLimits};
use crate::config::BotConfig;
use crate::error::Result;
use crate::interface::OutboundMessage;
use crate::metrics::MetricsFetcher;
use crate::prompts::PromptComposer;
use crate::ticker::InstrumentRef;
use crate::watchlist::WatchlistEntry;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Analysis Engine - owns the collaborators behind every command
pub struct AnalysisEngine {
    fetcher: Arc<dyn MetricsFetcher>,
    analyst: Arc<dyn AnalysisRequester>,
    composer: PromptComposer,
    limits: MessageLimits,
    watchlist: Vec<WatchlistEntry>,
}

impl AnalysisEngine {
    pub fn new(
        fetcher: Arc<dyn MetricsFetcher>,
        analyst: Arc<dyn AnalysisRequester>,
        config: &BotConfig,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            analyst,
            composer: PromptComposer::new()?,
            limits: config.limits,
            watchlist: config.watchlist.clone(),
        })
    }

    /// Engine wired to the configured data provider and chat model
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let fetcher = api::fetcher_from_config(config)?;
        let analyst = Arc::new(LlmAnalyst::from_config(config)?);
        info!(
            data_provider = fetcher.name(),
            model = %config.model,
            watchlist = config.watchlist.len(),
            "Analysis engine ready"
        );
        Self::new(fetcher, analyst, config)
    }

    pub fn watchlist(&self) -> &[WatchlistEntry] {
        &self.watchlist
    }

    /// Analyze a single instrument and return the raw answer as one message
    ///
    /// The prompt names the instrument by its provider identifier and carries
    /// the exchange label exactly as the user typed it.
    #[instrument(skip(self))]
    pub async fn analyze(&self, symbol: &str, exchange_label: &str) -> Result<OutboundMessage> {
        let instrument = InstrumentRef::new(symbol, exchange_label);
        let answer = self
            .answer(
                &instrument.normalized_id,
                &instrument.exchange_label,
                &instrument.normalized_id,
            )
            .await?;
        debug!(answer_chars = answer.chars().count(), "Analysis complete");
        Ok(assembly::passthrough(&answer, &self.limits))
    }

    /// Analyze every watchlist entry in order and pack the summaries
    ///
    /// A failing instrument contributes an inline error block; it never
    /// aborts the batch.
    #[instrument(skip(self), fields(instruments = self.watchlist.len()))]
    pub async fn batch(&self) -> Vec<OutboundMessage> {
        let mut assembler = BatchAssembler::new(self.limits);
        let mut failures = 0usize;

        for entry in &self.watchlist {
            let block = match self.analyze_entry(entry).await {
                Ok(answer) => assembly::summary_block(&entry.name, &answer),
                Err(e) => {
                    failures += 1;
                    warn!(instrument = %entry.name, error = %e, "Batch analysis failed");
                    assembly::error_block(&entry.name, &e)
                }
            };
            assembler.push(&block);
        }

        let messages = assembler.finish();
        info!(
            messages = messages.len(),
            failures, "Batch assembled"
        );
        messages
    }

    /// Raw answer for one watchlist entry
    pub async fn analyze_entry(&self, entry: &WatchlistEntry) -> Result<String> {
        self.answer(&entry.name, &entry.exchange_label, &entry.ticker)
            .await
    }

    async fn answer(&self, name: &str, exchange_label: &str, ticker: &str) -> Result<String> {
        let metrics = self.fetcher.fetch(ticker).await?;
        let prompt = self.composer.compose(name, exchange_label, &metrics)?;
        debug!(
            ticker,
            available = metrics.available_count(),
            prompt_chars = prompt.chars().count(),
            "Prompt composed"
        );
        self.analyst.request(&prompt).await
    }
}
