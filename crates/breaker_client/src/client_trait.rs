use async_trait::async_trait;

use crate::api::models::{AuthCodeResponse, BasicResponse, LoginResponse, UserResponse, VerifyResponse};
use crate::error::ApiError;

/// The endpoints a login session depends on.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn get_code(&self, number: &str) -> Result<AuthCodeResponse, ApiError>;

    async fn login(&self, number: &str, code: &str) -> Result<LoginResponse, ApiError>;

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError>;

    async fn logout(&self, token: &str) -> Result<BasicResponse, ApiError>;

    async fn get_user(&self, id: &str) -> Result<UserResponse, ApiError>;
}
