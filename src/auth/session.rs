use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tokio::sync::{watch, RwLock};

use crate::backend::{BackendClient, Query};
use crate::error::{AppError, AppResult};
use crate::models::UserProfile;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: uuid::Uuid,
    pub token: String,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// In-process session store with a narrow interface: sign-in, sign-out,
/// profile refresh, current-session lookup and a change subscription.
/// Sessions are fabricated locally; no token is exchanged with an
/// identity provider.
#[derive(Clone)]
pub struct SessionService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl_hours: u64,
    changes: watch::Sender<u64>,
}

impl SessionService {
    pub fn new(ttl_hours: u64) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_hours,
            changes,
        }
    }

    /// Sign in by profile email lookup. The password is accepted but not
    /// verified against any credential store; this mirrors the upstream
    /// behavior on purpose (see DESIGN.md) rather than inventing a check.
    pub async fn sign_in(
        &self,
        backend: &BackendClient,
        email: &str,
        _password: &str,
    ) -> AppResult<Session> {
        let profile: Option<UserProfile> = backend
            .select_one("user_profiles", &Query::new().eq("email", email))
            .await?;
        let profile = profile.ok_or(AppError::NotFound)?;

        let now = Utc::now();
        let session = Session {
            id: uuid::Uuid::now_v7(),
            token: generate_token(),
            profile,
            created_at: now,
            expires_at: now + Duration::hours(self.ttl_hours as i64),
        };
        tracing::info!(session_id = %session.id, "signed in {}", email);

        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        self.notify();
        Ok(session)
    }

    /// Current session for a token; expired sessions are treated as absent.
    pub async fn current(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.clone()),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    /// Clears local state unconditionally and asks the backend to
    /// invalidate any server-side session (best-effort).
    pub async fn sign_out(&self, backend: &BackendClient, token: &str) {
        self.sessions.write().await.remove(token);
        self.notify();
        if let Err(e) = backend.sign_out().await {
            tracing::warn!("backend sign-out failed: {}", e);
        }
    }

    /// Re-fetch the profile row and replace the cached copy. Fetch errors
    /// are logged and leave the cached copy untouched; without a session
    /// this is a no-op.
    pub async fn refresh_profile(&self, backend: &BackendClient, token: &str) {
        let profile_id = match self.current(token).await {
            Some(session) => session.profile.id,
            None => return,
        };

        let fetched: Result<Option<UserProfile>, _> = backend
            .select_one("user_profiles", &Query::new().eq("id", &profile_id))
            .await;

        match fetched {
            Ok(Some(profile)) => {
                let mut sessions = self.sessions.write().await;
                if let Some(session) = sessions.get_mut(token) {
                    session.profile = profile;
                }
                drop(sessions);
                self.notify();
            }
            Ok(None) => tracing::warn!("profile {} no longer exists", profile_id),
            Err(e) => tracing::error!("profile refresh failed: {}", e),
        }
    }

    /// Subscribe to session changes. The value is a generation counter
    /// bumped on every sign-in, sign-out and profile refresh.
    pub fn on_change(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
