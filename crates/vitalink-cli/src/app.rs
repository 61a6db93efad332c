//! Wiring of configuration, session store, cache and API client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;
use vitalink_core::{
    ApiClient, AuthFailure, AuthFailureHandler, CacheManager, ClientConfig, Config,
    FileSessionStore, Gateway, KeyringSessionStore, SessionStore,
};

/// Subdirectory of the cache dir holding cached API responses.
/// Kept apart from `session.json` so clearing the cache keeps the store intact.
const RESPONSES_DIR: &str = "responses";

/// Tells the user where to sign in again after the server rejects the session.
/// Silenced while the user is deliberately ending the session.
struct LoginRedirect {
    frontend_url: String,
    suppressed: AtomicBool,
}

impl LoginRedirect {
    fn new(frontend_url: &str) -> Self {
        Self {
            frontend_url: frontend_url.to_string(),
            suppressed: AtomicBool::new(false),
        }
    }

    fn suppress(&self) {
        self.suppressed.store(true, Ordering::SeqCst);
    }

    fn message(&self, failure: &AuthFailure) -> Option<String> {
        if self.suppressed.load(Ordering::SeqCst) {
            return None;
        }
        Some(format!(
            "Session rejected (HTTP {}). Run `vitalink login` or sign in at {}{}",
            failure.status,
            self.frontend_url.trim_end_matches('/'),
            failure.redirect_to
        ))
    }
}

impl AuthFailureHandler for LoginRedirect {
    fn on_auth_failure(&self, failure: &AuthFailure) {
        if let Some(message) = self.message(failure) {
            crate::output::error(&message);
        }
    }
}

pub struct App {
    pub client: ApiClient,
    pub cache: Arc<CacheManager>,
    pub config: Config,
    pub client_config: ClientConfig,
    pub json: bool,
    login_redirect: Arc<LoginRedirect>,
}

impl App {
    pub fn new(json: bool, file_session: bool) -> Result<Self> {
        let config = Config::load().context("Failed to load config")?;
        let mut client_config = ClientConfig::from_env();
        config.apply(&mut client_config);

        let cache_dir = config.cache_dir()?;
        let session: Arc<dyn SessionStore> = if file_session {
            Arc::new(FileSessionStore::open(cache_dir.clone())?)
        } else {
            Arc::new(KeyringSessionStore::new()?)
        };
        let cache = Arc::new(CacheManager::new(cache_dir.join(RESPONSES_DIR))?);

        let login_redirect = Arc::new(LoginRedirect::new(&client_config.frontend_url));
        let gateway = Gateway::with_timeout(session, client_config.timeout())?
            .with_cache(cache.clone())
            .with_auth_failure_handler(login_redirect.clone());
        let client = ApiClient::with_gateway(&client_config.api_url, gateway)?;
        debug!(api_url = %client_config.api_url, file_session = file_session, "Client ready");

        Ok(Self {
            client,
            cache,
            config,
            client_config,
            json,
            login_redirect,
        })
    }

    /// Stop telling the user to sign in again for the rest of this run.
    pub fn suppress_login_redirect(&self) {
        self.login_redirect.suppress();
    }

    /// Fail early with a helpful message when no token is stored.
    pub fn require_login(&self) -> Result<()> {
        if self.client.is_authenticated() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Not logged in. Run `vitalink login` first."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(status: u16) -> AuthFailure {
        AuthFailure {
            status,
            redirect_to: "/login".to_string(),
        }
    }

    #[test]
    fn test_login_redirect_message() {
        let redirect = LoginRedirect::new("https://app.vitalink.health/");
        assert_eq!(
            redirect.message(&failure(401)).as_deref(),
            Some(
                "Session rejected (HTTP 401). Run `vitalink login` or sign in at \
                 https://app.vitalink.health/login"
            )
        );
    }

    #[test]
    fn test_login_redirect_silent_when_suppressed() {
        let redirect = LoginRedirect::new("https://app.vitalink.health");
        redirect.suppress();
        assert_eq!(redirect.message(&failure(401)), None);
        assert_eq!(redirect.message(&failure(403)), None);
    }
}
