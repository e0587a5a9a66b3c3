//! Per-user-agent session state, stored field-per-cookie in an encrypted
//! (private) cookie jar. The service itself keeps nothing server-side.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::PrivateCookieJar;
use time::Duration;

pub const STATE_COOKIE: &str = "__inkgate_state";
pub const TOKEN_COOKIE: &str = "__inkgate_token";

/// Typed view of the two session fields.
#[derive(Debug, Default)]
pub struct Session {
    /// Anti-forgery state, alive for one callback round trip.
    pub state: Option<String>,
    /// OAuth bearer credential, alive until provider expiry or a new login.
    pub access_token: Option<String>,
}

impl Session {
    pub fn from_jar(jar: &PrivateCookieJar) -> Self {
        Self {
            state: jar.get(STATE_COOKIE).map(|c| c.value().to_string()),
            access_token: jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()),
        }
    }
}

/// State cookie for the authorization redirect. Short-lived: it only has to
/// survive the round trip through the provider.
pub fn state_cookie(state: &str) -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, state.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::minutes(10))
        .build()
}

/// Removal cookie for the state, added once the callback has consumed it.
pub fn clear_state_cookie() -> Cookie<'static> {
    Cookie::build((STATE_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Access-token cookie. No explicit max-age: the token outlives the browser
/// session only as long as the provider honors it anyway.
pub fn token_cookie(access_token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, access_token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}
