use async_trait::async_trait;
use kernel::notification::{Notification, NotificationSender};
use shared::error::AppResult;

pub mod gmail;

pub use gmail::GmailNotificationSender;

/// Gmail が設定されていない環境向け。送信内容をログに出すだけ
#[derive(Default)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        tracing::info!(
            to = %notification.recipient_email,
            subject = %notification.subject,
            body = %notification.body,
            "mail delivery is not configured; notification logged only"
        );
        Ok(())
    }
}
