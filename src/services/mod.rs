mod error;
mod transport;
pub mod user_auth;

pub use error::ServiceError;
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
pub use user_auth::{
    AuthResponse, EmailSentResponse, PasswordResetResponse, SettingChange, UserAuthService,
};
