use std::sync::Arc;

use async_trait::async_trait;
use breaker_core::config::Config;
use breaker_core::models::{MentionsData, UserData, UserPatch};
use log::info;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::models::{
    AdminsResponse, AuthCodeResponse, BackupsResponse, BasicResponse, CodeRequest,
    CreateUserRequest, DailyBonusResponse, DeleteUserResponse, HealthResponse, LoginRequest,
    LoginResponse, MentionsResponse, SecretSantaResponse, TokenRequest, UserResponse,
    UsersListResponse, VerifyResponse,
};
use crate::client_trait::SessionApi;
use crate::error::ApiError;
use crate::utils::http_utils::{read_envelope, RequestLogger};

/// Client for the BreakerBot management API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct BreakerClient {
    client: Arc<ClientWithMiddleware>,
    base_url: Url,
}

impl BreakerClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Self::build_http_client(config)?;
        Self::with_client(Self::build_middleware_client(client), config.api_base())
    }

    /// Uses an already configured client, e.g. one with extra middleware.
    pub fn with_client(client: ClientWithMiddleware, base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    fn build_http_client(config: &Config) -> Result<Client, ApiError> {
        let mut builder = Client::builder().default_headers(Self::get_default_headers());
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy).map_err(ApiError::Build)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy).map_err(ApiError::Build)?);
        }
        builder.build().map_err(ApiError::Build)
    }

    fn build_middleware_client(client: Client) -> ClientWithMiddleware {
        ClientBuilder::new(client).with(RequestLogger).build()
    }

    pub fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.client.request(method, self.endpoint(segments));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        read_envelope(response).await
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, segments, None).await
    }

    // Users

    pub async fn list_users(&self) -> Result<UsersListResponse, ApiError> {
        self.get(&["api", "users"]).await
    }

    pub async fn create_user(&self, id: &str, data: &UserPatch) -> Result<UserResponse, ApiError> {
        let body = CreateUserRequest { id, data };
        self.request(Method::POST, &["api", "users"], Some(&body)).await
    }

    pub async fn update_user(&self, id: &str, data: &UserPatch) -> Result<UserResponse, ApiError> {
        self.request(Method::PATCH, &["api", "users", id], Some(data))
            .await
    }

    pub async fn replace_user(&self, id: &str, data: &UserData) -> Result<UserResponse, ApiError> {
        self.request(Method::PUT, &["api", "users", id], Some(data))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<DeleteUserResponse, ApiError> {
        info!("Deleting user {id}");
        self.request::<(), _>(Method::DELETE, &["api", "users", id], None)
            .await
    }

    // Backups

    pub async fn list_backups(&self) -> Result<BackupsResponse, ApiError> {
        self.get(&["api", "backup", "users"]).await
    }

    pub async fn restore_backup(&self, id: &str) -> Result<UserResponse, ApiError> {
        info!("Restoring backup of user {id}");
        self.request::<(), _>(Method::POST, &["api", "backup", "restore", id], None)
            .await
    }

    // Settings and misc

    pub async fn daily_bonus(&self) -> Result<DailyBonusResponse, ApiError> {
        self.get(&["api", "daily-bonus"]).await
    }

    pub async fn mentions(&self) -> Result<MentionsResponse, ApiError> {
        self.get(&["api", "mentions"]).await
    }

    pub async fn update_mentions(&self, data: &MentionsData) -> Result<MentionsResponse, ApiError> {
        self.request(Method::PUT, &["api", "mentions"], Some(data))
            .await
    }

    pub async fn admins(&self) -> Result<AdminsResponse, ApiError> {
        self.get(&["api", "admins"]).await
    }

    pub async fn secret_santa_groups(&self) -> Result<SecretSantaResponse, ApiError> {
        self.get(&["api", "amigo-secreto"]).await
    }

    pub async fn secret_santa_for_user(&self, id: &str) -> Result<SecretSantaResponse, ApiError> {
        self.get(&["api", "amigo-secreto", "user", id]).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get(&["api", "health"]).await
    }
}

#[async_trait]
impl SessionApi for BreakerClient {
    async fn get_code(&self, number: &str) -> Result<AuthCodeResponse, ApiError> {
        let body = CodeRequest { number };
        self.request(Method::POST, &["api", "auth", "getCode"], Some(&body))
            .await
    }

    async fn login(&self, number: &str, code: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { number, code };
        self.request(Method::POST, &["api", "auth", "login"], Some(&body))
            .await
    }

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        let body = TokenRequest { token };
        self.request(Method::POST, &["api", "auth", "verify"], Some(&body))
            .await
    }

    async fn logout(&self, token: &str) -> Result<BasicResponse, ApiError> {
        let body = TokenRequest { token };
        self.request(Method::POST, &["api", "auth", "logout"], Some(&body))
            .await
    }

    async fn get_user(&self, id: &str) -> Result<UserResponse, ApiError> {
        self.get(&["api", "users", id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BreakerClient {
        let http = Client::builder().no_proxy().build().expect("client");
        BreakerClient::with_client(ClientBuilder::new(http).build(), base).expect("base url")
    }

    #[test]
    fn endpoint_joins_segments_onto_base() {
        let c = client("http://localhost:3001");
        assert_eq!(
            c.endpoint(&["api", "auth", "getCode"]).as_str(),
            "http://localhost:3001/api/auth/getCode"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("https://bot.example/dashboard/");
        assert_eq!(
            c.endpoint(&["api", "health"]).as_str(),
            "https://bot.example/dashboard/api/health"
        );
    }

    #[test]
    fn endpoint_encodes_ids() {
        let c = client("http://localhost:3001");
        let url = c.endpoint(&["api", "users", "a b/c?d"]);
        assert_eq!(url.path(), "/api/users/a%20b%2Fc%3Fd");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        let http = Client::builder().no_proxy().build().expect("client");
        assert!(matches!(
            BreakerClient::with_client(ClientBuilder::new(http.clone()).build(), "not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            BreakerClient::with_client(ClientBuilder::new(http).build(), "mailto:bot@example.com"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
