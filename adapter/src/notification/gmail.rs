use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::notification::{Notification, NotificationSender};
use reqwest::Client;
use shared::{
    config::GmailConfig,
    error::{AppError, AppResult},
};
use yup_oauth2::{
    authenticator::DefaultAuthenticator, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
};

const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";
const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

/// Gmail API 経由でメールを送る。アクセストークンは送信ごとに取得し、
/// 期限切れの場合は yup-oauth2 がキャッシュから更新する
pub struct GmailNotificationSender {
    auth: DefaultAuthenticator,
    client: Client,
}

impl GmailNotificationSender {
    pub async fn connect(config: &GmailConfig) -> anyhow::Result<Self> {
        let secret = yup_oauth2::read_application_secret(&config.client_secret_path).await?;
        let auth =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::Interactive)
                .persist_tokens_to_disk(&config.token_cache_path)
                .build()
                .await?;
        // 起動時に一度トークンを取得し、認証情報の不備をここで検出する
        auth.token(&[GMAIL_SEND_SCOPE]).await?;
        Ok(Self {
            auth,
            client: Client::new(),
        })
    }

    async fn access_token(&self) -> AppResult<String> {
        let token = self
            .auth
            .token(&[GMAIL_SEND_SCOPE])
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
        token
            .token()
            .map(str::to_string)
            .ok_or_else(|| AppError::ExternalServiceError("Gmail returned no access token".into()))
    }
}

#[async_trait]
impl NotificationSender for GmailNotificationSender {
    async fn send(&self, notification: Notification) -> AppResult<()> {
        let access_token = self.access_token().await?;
        let res = self
            .client
            .post(GMAIL_SEND_URL)
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "raw": encode_message(&notification) }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Gmail rejected the message ({status}): {body}"
            )));
        }

        tracing::debug!(to = %notification.recipient_email, "mail sent via Gmail");
        Ok(())
    }
}

// RFC 822 形式のメッセージを base64url（パディングなし）でエンコードする
fn encode_message(notification: &Notification) -> String {
    let message = format!(
        "To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
        notification.recipient_email, notification.subject, notification.body
    );
    general_purpose::URL_SAFE_NO_PAD.encode(message.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_url_safe_base64_of_rfc822() {
        let encoded = encode_message(&Notification {
            recipient_email: "alice@example.com".into(),
            subject: "Reservation reminder".into(),
            body: "See you tomorrow.".into(),
        });
        assert!(!encoded.contains('=') && !encoded.contains('+') && !encoded.contains('/'));

        let decoded = general_purpose::URL_SAFE_NO_PAD.decode(encoded).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert_eq!(
            text,
            "To: alice@example.com\r\nSubject: Reservation reminder\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\nSee you tomorrow."
        );
    }
}
