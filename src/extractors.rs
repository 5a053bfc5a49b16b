use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::state::AppState;

/// The currently authenticated user, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub profile: UserProfile,
}

impl CurrentUser {
    /// Unverified accounts get read access only; every mutating handler
    /// checks this before touching the backend.
    pub fn is_read_only(&self) -> bool {
        self.profile.verification_status.is_read_only()
    }
}

/// Extractor that requires authentication.
/// Returns 401 if no valid session is found.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(parts, &state.config.auth.cookie_name)
            .ok_or(AppError::Unauthorized)?
            .to_string();

        let session = state
            .sessions
            .current(&token)
            .await
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser {
            token,
            profile: session.profile,
        })
    }
}

/// Optional user extractor — returns None instead of 401 when not
/// authenticated.
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(_) => Ok(MaybeUser(None)),
        }
    }
}

fn extract_session_token<'a>(parts: &'a Parts, cookie_name: &str) -> Option<&'a str> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == cookie_name {
                Some(val)
            } else {
                None
            }
        })
}
