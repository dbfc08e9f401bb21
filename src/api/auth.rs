use super::ApiClient;
use crate::core::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::Result;

/// `/auth` endpoints
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        self.client.post_json("auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.client.post_json("auth/register", request).await
    }
}
