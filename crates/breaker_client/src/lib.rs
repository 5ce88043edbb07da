pub mod api;
pub mod client_trait;
pub mod error;
pub mod utils;

pub use api::client::BreakerClient;
pub use breaker_core::Config;
pub use client_trait::SessionApi;
pub use error::ApiError;
