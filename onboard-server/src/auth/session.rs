//! Session activity policy
//!
//! Optional enforcement of idle and absolute session windows on top of
//! token validation. When enabled, any access after the idle or absolute
//! window elapses drops the session before the requested operation is
//! evaluated; the caller is anonymous again and must log back in.

use dashmap::DashMap;

/// Idle window: 30 minutes without a request ends the session
pub const IDLE_TIMEOUT_MS: i64 = 30 * 60 * 1000;

/// Absolute window: 8 hours after login the session ends regardless
pub const ABSOLUTE_TIMEOUT_MS: i64 = 8 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy)]
struct Activity {
    login_at: i64,
    last_seen: i64,
}

/// Outcome of an activity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCheck {
    Active,
    Expired,
}

/// Per-user activity tracker.
///
/// Server-side state is keyed by user id; a token seen after a restart is
/// re-admitted with a fresh window (the token's own expiry still caps its
/// total lifetime).
#[derive(Debug, Default)]
pub struct SessionTracker {
    sessions: DashMap<String, Activity>,
    enforce: bool,
}

impl SessionTracker {
    pub fn new(enforce: bool) -> Self {
        Self {
            sessions: DashMap::new(),
            enforce,
        }
    }

    /// Record a fresh login
    pub fn begin(&self, user_id: &str, now: i64) {
        self.sessions.insert(
            user_id.to_string(),
            Activity {
                login_at: now,
                last_seen: now,
            },
        );
    }

    /// Check and refresh activity for a request at `now`
    pub fn touch(&self, user_id: &str, now: i64) -> SessionCheck {
        if !self.enforce {
            return SessionCheck::Active;
        }

        let mut entry = self
            .sessions
            .entry(user_id.to_string())
            .or_insert(Activity {
                login_at: now,
                last_seen: now,
            });

        if now - entry.login_at > ABSOLUTE_TIMEOUT_MS || now - entry.last_seen > IDLE_TIMEOUT_MS {
            drop(entry);
            self.sessions.remove(user_id);
            return SessionCheck::Expired;
        }

        entry.last_seen = now;
        SessionCheck::Active
    }

    /// Explicit logout
    pub fn end(&self, user_id: &str) {
        self.sessions.remove(user_id);
    }
}
