/// Route the UI should navigate to after an authentication failure.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Notification emitted once per request that came back 401 or 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFailure {
    pub status: u16,
    pub redirect_to: String,
}

/// Receiver of authentication-failure signals.
///
/// Called synchronously after the session and cache have been cleared and
/// before the request's error is returned. Implementations must not block;
/// navigation is fire-and-forget.
pub trait AuthFailureHandler: Send + Sync {
    fn on_auth_failure(&self, failure: &AuthFailure);
}

impl<F> AuthFailureHandler for F
where
    F: Fn(&AuthFailure) + Send + Sync,
{
    fn on_auth_failure(&self, failure: &AuthFailure) {
        self(failure)
    }
}
