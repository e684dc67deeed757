use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use url::Url;

use crate::config::ClientConfig;
use crate::models::{
    FontType, LineSpacingType, TextBoldnessType, TextSizeType, ThemeType, User,
};
use crate::telemetry::REQUEST_CNTR;

use super::{HttpTransport, RawResponse, ReqwestTransport, ServiceError};

/// A remote operation: where it lives and what to report when the server
/// gives no message of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub fallback: &'static str,
}

const EMAIL_VERIFICATION: Endpoint = Endpoint {
    path: "user/emailVerification",
    fallback: "Error while sending an email verification",
};
const ADD_USER: Endpoint = Endpoint {
    path: "user/addUser",
    fallback: "Error while creating a new user",
};
const LOGIN_USER: Endpoint = Endpoint {
    path: "user/loginUser",
    fallback: "Error when logging in user",
};
const SEND_PASSWORD_RESET: Endpoint = Endpoint {
    path: "user/sendPasswordReset",
    fallback: "Error sending password reset email",
};
const RESET_PASSWORD: Endpoint = Endpoint {
    path: "user/resetPassword",
    fallback: "Error sending password reset email",
};
const CHANGE_THEME: Endpoint = Endpoint {
    path: "user/changeTheme",
    fallback: "Error while changing theme",
};
const CHANGE_BACKGROUND_COLOR: Endpoint = Endpoint {
    path: "user/changeBackgroundColor",
    fallback: "Error while changing background color",
};
const CHANGE_TEXT_COLOR: Endpoint = Endpoint {
    path: "user/changeTextColor",
    fallback: "Error while changing text color",
};
const CHANGE_BUTTON_COLOR: Endpoint = Endpoint {
    path: "user/changeButtonColor",
    fallback: "Error while changing button color",
};
const CHANGE_TEXT_SIZE: Endpoint = Endpoint {
    path: "user/changeTextSize",
    fallback: "Error while updating text size",
};
const CHANGE_TEXT_BOLDNESS: Endpoint = Endpoint {
    path: "user/changeTextBoldness",
    fallback: "Error while updating text boldness",
};
const CHANGE_FONT: Endpoint = Endpoint {
    path: "user/changeFont",
    fallback: "Error while updating font style",
};
const CHANGE_LINE_SPACING: Endpoint = Endpoint {
    path: "user/changeLineSpacing",
    fallback: "Error while updating line spacing",
};
const GOOGLE_CALLBACK: Endpoint = Endpoint {
    path: "api/auth/google/callback",
    fallback: "Error while authenticating with Google",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSentResponse {
    pub message: String,
    pub email_recipient: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: User,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordResetResponse {
    pub message: String,
    pub user: User,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    Theme(ThemeType),
    BackgroundColor(String),
    TextColor(String),
    ButtonColor(String),
    TextSize(TextSizeType),
    TextBoldness(TextBoldnessType),
    Font(FontType),
    LineSpacing(LineSpacingType),
}

impl SettingChange {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Theme(_) => CHANGE_THEME,
            Self::BackgroundColor(_) => CHANGE_BACKGROUND_COLOR,
            Self::TextColor(_) => CHANGE_TEXT_COLOR,
            Self::ButtonColor(_) => CHANGE_BUTTON_COLOR,
            Self::TextSize(_) => CHANGE_TEXT_SIZE,
            Self::TextBoldness(_) => CHANGE_TEXT_BOLDNESS,
            Self::Font(_) => CHANGE_FONT,
            Self::LineSpacing(_) => CHANGE_LINE_SPACING,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Theme(_) => "theme",
            Self::BackgroundColor(_) => "backgroundColor",
            Self::TextColor(_) => "textColor",
            Self::ButtonColor(_) => "buttonColor",
            Self::TextSize(_) => "textSize",
            Self::TextBoldness(_) => "textBoldness",
            Self::Font(_) => "font",
            Self::LineSpacing(_) => "lineSpacing",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Theme(theme) => theme.as_str(),
            Self::BackgroundColor(color) | Self::TextColor(color) | Self::ButtonColor(color) => {
                color
            }
            Self::TextSize(size) => size.as_str(),
            Self::TextBoldness(boldness) => boldness.as_str(),
            Self::Font(font) => font.as_str(),
            Self::LineSpacing(spacing) => spacing.as_str(),
        }
    }

    fn body(&self, username: &str) -> Value {
        let mut body = Map::new();
        body.insert("username".to_owned(), Value::String(username.to_owned()));
        body.insert(self.field().to_owned(), Value::String(self.value().to_owned()));
        Value::Object(body)
    }
}

pub struct UserAuthService<T = ReqwestTransport> {
    transport: T,
    server_url: Url,
}

impl UserAuthService<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ServiceError> {
        let transport = ReqwestTransport::new(config.request_timeout(), &config.user_agent)?;
        Ok(Self::new(transport, config.server_url.clone()))
    }
}

impl<T: HttpTransport> UserAuthService<T> {
    pub fn new(transport: T, server_url: Url) -> Self {
        Self {
            transport,
            server_url,
        }
    }

    pub async fn send_email_verification(
        &self,
        user: &User,
    ) -> Result<EmailSentResponse, ServiceError> {
        self.post(EMAIL_VERIFICATION, serde_json::to_value(user)?)
            .await
    }

    pub async fn add_user(&self, token: &SecretString) -> Result<AuthResponse, ServiceError> {
        self.post(ADD_USER, json!({ "token": token.expose_secret() }))
            .await
    }

    pub async fn login_user(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<AuthResponse, ServiceError> {
        self.post(
            LOGIN_USER,
            json!({ "username": username, "password": password.expose_secret() }),
        )
        .await
    }

    pub async fn send_password_reset(
        &self,
        username: &str,
    ) -> Result<EmailSentResponse, ServiceError> {
        self.post(SEND_PASSWORD_RESET, json!({ "username": username }))
            .await
    }

    pub async fn reset_password(
        &self,
        token: &SecretString,
        new_password: &SecretString,
    ) -> Result<PasswordResetResponse, ServiceError> {
        self.post(
            RESET_PASSWORD,
            json!({
                "token": token.expose_secret(),
                "newPassword": new_password.expose_secret(),
            }),
        )
        .await
    }

    pub async fn change_setting(
        &self,
        username: &str,
        change: &SettingChange,
    ) -> Result<Value, ServiceError> {
        self.post(change.endpoint(), change.body(username)).await
    }

    pub async fn change_theme(&self, username: &str, theme: ThemeType) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::Theme(theme))
            .await
    }

    pub async fn change_background_color(
        &self,
        username: &str,
        background_color: &str,
    ) -> Result<Value, ServiceError> {
        self.change_setting(
            username,
            &SettingChange::BackgroundColor(background_color.to_owned()),
        )
        .await
    }

    pub async fn change_text_color(
        &self,
        username: &str,
        text_color: &str,
    ) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::TextColor(text_color.to_owned()))
            .await
    }

    pub async fn change_button_color(
        &self,
        username: &str,
        button_color: &str,
    ) -> Result<Value, ServiceError> {
        self.change_setting(
            username,
            &SettingChange::ButtonColor(button_color.to_owned()),
        )
        .await
    }

    pub async fn change_text_size(
        &self,
        username: &str,
        text_size: TextSizeType,
    ) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::TextSize(text_size))
            .await
    }

    pub async fn change_text_boldness(
        &self,
        username: &str,
        text_boldness: TextBoldnessType,
    ) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::TextBoldness(text_boldness))
            .await
    }

    pub async fn change_font(&self, username: &str, font: FontType) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::Font(font))
            .await
    }

    pub async fn change_line_spacing(
        &self,
        username: &str,
        line_spacing: LineSpacingType,
    ) -> Result<Value, ServiceError> {
        self.change_setting(username, &SettingChange::LineSpacing(line_spacing))
            .await
    }

    pub async fn authenticate_with_google(&self, code: &str) -> Result<Value, ServiceError> {
        let mut url = self.endpoint(GOOGLE_CALLBACK)?;
        url.query_pairs_mut().append_pair("code", code);
        tracing::debug!(endpoint = GOOGLE_CALLBACK.path, "sending request");
        let response = self.transport.get(url).await;
        finish(GOOGLE_CALLBACK, response)
    }

    async fn post<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Value,
    ) -> Result<R, ServiceError> {
        let url = self.endpoint(endpoint)?;
        tracing::debug!(endpoint = endpoint.path, "sending request");
        let response = self.transport.post_json(url, body).await;
        finish(endpoint, response)
    }

    fn endpoint(&self, endpoint: Endpoint) -> Result<Url, ServiceError> {
        let raw = format!(
            "{}/{}",
            self.server_url.as_str().trim_end_matches('/'),
            endpoint.path
        );
        Url::parse(&raw).map_err(|source| ServiceError::InvalidUrl { url: raw, source })
    }
}

fn finish<R: DeserializeOwned>(
    endpoint: Endpoint,
    response: Result<RawResponse, ServiceError>,
) -> Result<R, ServiceError> {
    let result = response.and_then(|response| check_response(endpoint, response));
    let outcome = match &result {
        Ok(_) => "ok",
        Err(ServiceError::RequestFailed { .. }) => "rejected",
        Err(_) => "error",
    };
    REQUEST_CNTR
        .with_label_values(&[endpoint.path, outcome])
        .inc();
    if let Err(err) = &result {
        tracing::warn!(endpoint = endpoint.path, "request failed: {err}");
    }
    result
}

/// Accepts exactly 200; anything else becomes `RequestFailed` with the
/// server's `message` or the endpoint's fallback.
pub fn check_response<R: DeserializeOwned>(
    endpoint: Endpoint,
    response: RawResponse,
) -> Result<R, ServiceError> {
    if response.status != StatusCode::OK {
        let message = server_message(&response.body)
            .unwrap_or_else(|| endpoint.fallback.to_owned());
        return Err(ServiceError::RequestFailed {
            status: response.status,
            message,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}
