//! Prompt composition
//!
//! Renders the static fundamental-analysis template with MiniJinja. The
//! environment runs with strict undefined behaviour, so a placeholder with
//! no matching variable is a [`BotError::Template`] rather than an empty
//! string.

mod fundamental;

pub use fundamental::FUNDAMENTAL_TEMPLATE;

use crate::error::{BotError, Result};
use crate::metrics::MetricsRecord;
use minijinja::{Environment, UndefinedBehavior};
use serde_json::json;

const FUNDAMENTAL_NAME: &str = "stock.fundamental";

/// Renders analysis prompts
pub struct PromptComposer {
    env: Environment<'static>,
    template_name: &'static str,
}

impl PromptComposer {
    /// Composer for the fundamental-analysis template
    pub fn new() -> Result<Self> {
        Self::with_template(FUNDAMENTAL_NAME, FUNDAMENTAL_TEMPLATE)
    }

    /// Composer for an arbitrary template source
    pub fn with_template(name: &'static str, source: &'static str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template(name, source)?;

        Ok(Self {
            env,
            template_name: name,
        })
    }

    /// Render the template with arbitrary variables
    pub fn render(&self, vars: &serde_json::Value) -> Result<String> {
        let template = self.env.get_template(self.template_name)?;
        template.render(vars).map_err(|e| {
            BotError::Template(format!("failed to render '{}': {e}", self.template_name))
        })
    }

    /// Build the analysis prompt for one instrument
    pub fn compose(
        &self,
        instrument_name: &str,
        exchange_label: &str,
        metrics: &MetricsRecord,
    ) -> Result<String> {
        self.render(&json!({
            "stock_name": instrument_name,
            "exchange": exchange_label,
            "stock_data": metrics.to_listing(),
        }))
    }
}
