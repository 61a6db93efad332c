use reqwest::Method;
use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

impl ApiClient {
    /// Log in and store the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.post(&["auth", "login"], &body).await?;
        self.store_token(&auth.token)?;
        info!(user_id = %auth.user.id, "Logged in");
        Ok(auth.user)
    }

    /// Create an account and store the returned token.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let auth: AuthResponse = self.post(&["auth", "register"], request).await?;
        self.store_token(&auth.token)?;
        info!(user_id = %auth.user.id, "Registered");
        Ok(auth.user)
    }

    /// Tell the server the session is over and forget the token.
    ///
    /// The token is cleared even if the server call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self
            .request_empty::<()>(Method::POST, &["auth", "logout"], None)
            .await;
        if let Err(ref e) = result {
            warn!(error = %e, "Logout request failed, clearing local session anyway");
        }
        self.session()
            .clear()
            .map_err(|e| ApiError::Session(format!("{:#}", e)))?;
        result
    }

    /// The account behind the current session.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get(&["auth", "me"]).await
    }

    fn store_token(&self, token: &str) -> Result<(), ApiError> {
        self.session()
            .set_token(token)
            .map_err(|e| ApiError::Session(format!("{:#}", e)))
    }
}
