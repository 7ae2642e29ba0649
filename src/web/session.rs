//! Cookie sessions for the admin area.

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const COOKIE_NAME: &str = "storefront.sid";

#[derive(Clone, Debug)]
pub struct Session {
    pub authenticated: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    pub async fn create_authenticated(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session { authenticated: true, expires_at: Utc::now() + self.ttl };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > Utc::now());
        sessions.insert(id, session);
        id
    }

    /// True for a live authenticated session. Expired sessions are dropped.
    pub async fn is_authenticated(&self, id: Uuid) -> bool {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                Some(s) if s.expires_at > now => return s.authenticated,
                None => return false,
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(&id);
        false
    }

    pub async fn destroy(&self, id: Uuid) { self.sessions.write().await.remove(&id); }

    pub async fn count(&self) -> usize { self.sessions.read().await.len() }
}

/// Session id from the request's `Cookie` headers, if well-formed.
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

pub fn set_cookie(id: Uuid, ttl: Duration) -> String {
    format!("{COOKIE_NAME}={id}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}", ttl.num_seconds())
}

pub fn clear_cookie() -> String { format!("{COOKIE_NAME}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0") }

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = SessionStore::new(Duration::hours(24));
        let id = store.create_authenticated().await;
        assert!(store.is_authenticated(id).await);
        assert!(!store.is_authenticated(Uuid::new_v4()).await);
        store.destroy(id).await;
        assert!(!store.is_authenticated(id).await);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = SessionStore::new(Duration::seconds(-1));
        let id = store.create_authenticated().await;
        assert!(!store.is_authenticated(id).await);
        assert_eq!(store.count().await, 0);
    }

    #[test]
    fn test_cookie_parsing() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(&format!("theme=dark; {COOKIE_NAME}={id}")).unwrap());
        assert_eq!(session_id(&headers), Some(id));

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("storefront.sid=garbage"));
        assert_eq!(session_id(&headers), None);
        assert!(set_cookie(id, Duration::hours(1)).contains("Max-Age=3600"));
    }
}
