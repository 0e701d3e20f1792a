//! Webhook HTTP endpoint

use super::TelegramBot;
use super::telegram::Update;
use crate::error::{BotError, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use tracing::info;

/// Path Telegram posts updates to
pub const WEBHOOK_PATH: &str = "/webhook";

/// Routes: `POST /webhook` and `GET /healthz`
pub fn router(bot: TelegramBot) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .route("/healthz", get(healthz))
        .with_state(bot)
}

/// POST /webhook - acknowledges at once, handles the update on its own task
async fn receive_update(State(bot): State<TelegramBot>, Json(update): Json<Update>) -> StatusCode {
    bot.spawn_update(update);
    StatusCode::OK
}

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}

/// Register `<public_url>/webhook` and serve until Ctrl-C
pub async fn serve(bot: TelegramBot, public_url: &str, port: u16) -> Result<()> {
    let hook_url = format!("{}{WEBHOOK_PATH}", public_url.trim_end_matches('/'));
    bot.client().set_webhook(&hook_url).await?;
    info!(url = %hook_url, "Webhook registered");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Transport(format!("failed to bind {addr}: {e}")))?;
    info!("Webhook server listening on http://{}", addr);

    axum::serve(listener, router(bot))
        .with_graceful_shutdown(super::shutdown_signal())
        .await
        .map_err(|e| BotError::Transport(format!("webhook server failed: {e}")))
}
