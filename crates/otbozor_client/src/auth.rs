//! Login with the one-time code issued by the Telegram bot.
use otbozor_core::{AuthSession, User};
use otbozor_logging::market_info;
use reqwest::Method;
use serde::Serialize;

use crate::client::{encode, ApiClient};
use crate::error::ApiError;
use crate::settings::AuthStrategy;

#[derive(Serialize)]
struct VerifyCode<'a> {
    code: &'a str,
}

impl ApiClient {
    pub async fn verify_telegram_code(&self, code: &str) -> Result<AuthSession, ApiError> {
        let url = self.endpoint(&["api", "auth", "telegram", "verify"])?;
        let session: AuthSession = self
            .send_data(Method::POST, url, Some(encode(&VerifyCode { code: code.trim() })?))
            .await?;
        market_info!(
            "Logged in as {} (admin: {})",
            session.user.display_name,
            session.user.is_admin
        );
        Ok(session)
    }

    /// Client that sends the session's access token from now on.
    pub fn authenticated(&self, session: &AuthSession) -> Self {
        self.with_auth(AuthStrategy::Bearer(session.access_token.clone()))
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_data(self.endpoint(&["api", "auth", "me"])?).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "logout"])?;
        self.send_unit(Method::POST, url, None).await
    }
}
