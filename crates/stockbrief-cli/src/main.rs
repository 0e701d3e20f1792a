//! Command-line interface for stockbrief
//!
//! ```bash
//! export BOT_TOKEN=... OPENAI_API_KEY=...
//! stockbrief serve --mode polling
//! stockbrief analyze TCS NSE
//! stockbrief batch
//! ```

use clap::{Parser, Subcommand};
use std::sync::Arc;
use stockbrief::{AnalysisEngine, BotConfig, DataProvider, StockBot, TelegramBot, TransportMode};
use stockbrief_utils::{LogFormat, init_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stockbrief")]
#[command(version, about = "Telegram bot for LLM-written stock fundamentals briefs", long_about = None)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, global = true, env = "STOCKBRIEF_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Market-data provider: yahoo or alpha_vantage
    #[arg(long, global = true)]
    data_provider: Option<DataProvider>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the Telegram bot
    Serve {
        /// Update transport: webhook or polling
        #[arg(long)]
        mode: Option<TransportMode>,
    },
    /// Analyze one instrument and print the answer
    Analyze {
        /// Ticker symbol, e.g. TCS
        symbol: String,
        /// Exchange label, e.g. NSE
        exchange: String,
    },
    /// Summarize the watchlist and print the batch messages
    Batch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut builder = BotConfig::env_builder()?;
    if let Some(provider) = cli.data_provider {
        builder = builder.data_provider(provider);
    }
    if let Commands::Serve { mode: Some(mode) } = &cli.command {
        builder = builder.mode(*mode);
    }
    let config = builder.build()?;

    let engine = Arc::new(AnalysisEngine::from_config(&config)?);

    match cli.command {
        Commands::Serve { .. } => {
            info!(mode = ?config.mode, "Starting stockbrief");
            let telegram = TelegramBot::from_config(&config, StockBot::new(engine))?;
            telegram.run(&config).await?;
        }
        Commands::Analyze { symbol, exchange } => {
            let message = engine.analyze(&symbol, &exchange).await?;
            println!("{}", message.text);
        }
        Commands::Batch => {
            for message in engine.batch().await {
                println!("{}\n", message.text);
            }
        }
    }

    Ok(())
}
