//! Wire objects shared between the dashboard and the backend API.

pub mod auth;
pub mod bot;
pub mod config;
pub mod files;
pub mod payment;

pub use auth::{API_KEY_HEADER, LoginRequest, LoginResponse};
pub use bot::BotInfo;
pub use config::{ConfigEntry, ConfigKey, ConfigUpdate};
pub use files::{FileUrlResponse, UploadResponse};
pub use payment::{
    Payment, PaymentActionAck, PaymentActionRequest, PaymentStatus, PaymentType, ReviewDecision,
};
