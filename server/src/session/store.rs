use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Attributes kept per browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAttrs {
    pub username: Option<String>,
    pub flashes: Vec<Flash>,
}

impl SessionAttrs {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.flashes.is_empty()
    }
}

/// Server-side session storage keyed by the opaque cookie token.
pub trait SessionStore: Send + Sync {
    fn get(&self, token: &str) -> Option<SessionAttrs>;

    fn set(&self, token: &str, attrs: SessionAttrs);

    fn clear(&self, token: &str);
}

pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone)]
struct SessionEntry {
    attrs: SessionAttrs,
    // None when the expiry lies beyond what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl SessionEntry {
    fn is_expired(&self) -> bool {
        self.expires_at
            .map_or(false, |expires_at| Instant::now() >= expires_at)
    }
}

#[derive(Clone)]
pub struct MemorySessionStore {
    // token -> entry
    sessions: Arc<DashMap<String, SessionEntry>>,
    expiry: Duration,
}

impl MemorySessionStore {
    pub fn new(expiry_hours: u64) -> Self {
        Self::with_expiry(Duration::from_secs(expiry_hours.saturating_mul(3600)))
    }

    pub fn with_expiry(expiry: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            expiry,
        }
    }

    pub fn cleanup_expired(&self) -> usize {
        let mut removed = 0;

        self.sessions.retain(|token, entry| {
            if entry.is_expired() {
                log::debug!("Cleaned up expired session: {}", token);
                removed += 1;
                false
            } else {
                true
            }
        });

        removed
    }

    pub fn active_session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token: &str) -> Option<SessionAttrs> {
        let entry = self.sessions.get(token)?;

        if entry.is_expired() {
            drop(entry);
            self.sessions.remove(token);
            return None;
        }

        Some(entry.attrs.clone())
    }

    fn set(&self, token: &str, attrs: SessionAttrs) {
        let expires_at = Instant::now().checked_add(self.expiry);

        if let Some(mut entry) = self.sessions.get_mut(token) {
            entry.attrs = attrs;
            entry.expires_at = expires_at;
            return;
        }

        let removed = self.cleanup_expired();
        if removed > 0 {
            log::info!("Cleaned up {} expired sessions", removed);
        }

        self.sessions
            .insert(token.to_string(), SessionEntry { attrs, expires_at });
        log::debug!("Created session {}", token);
    }

    fn clear(&self, token: &str) {
        if self.sessions.remove(token).is_some() {
            log::debug!("Cleared session: {}", token);
        }
    }
}
