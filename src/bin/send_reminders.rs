//! 翌日の確定済み予約にリマインドメールを送って終了する。cron などから 1 日 1 回実行する想定。
//!
//! 引数に `YYYY-MM-DD` を渡すと、その日を「今日」として扱う。

use adapter::{database::connect_database_with, repository::reservation::ReservationRepositoryImpl};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use kernel::{
    clock::{Clock, FixedClock, SystemClock},
    reminder::ReminderBatch,
};
use registry::build_notifier;
use shared::config::AppConfig;
use space_booking::init_logger;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;

    let clock: Arc<dyn Clock> = match std::env::args().nth(1) {
        Some(arg) => {
            let today = NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
                .with_context(|| format!("invalid date argument: {arg}"))?;
            Arc::new(FixedClock::new(today))
        }
        None => Arc::new(SystemClock),
    };

    let app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    let notifier = build_notifier(&app_config).await?;
    let batch = ReminderBatch::new(
        Arc::new(ReservationRepositoryImpl::new(pool)),
        notifier,
        clock,
    );

    let sent = batch
        .run()
        .await
        .context("failed to load reservations for reminders")
        .inspect_err(|e| {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "reminder batch failed")
        })?;
    tracing::info!(sent, "reminders sent");
    Ok(())
}
