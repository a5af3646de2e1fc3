//! Cookie-backed sessions
//!
//! [`session_middleware`] resolves the visitor's session before any handler
//! runs and writes it back afterwards. Handlers receive it as
//! `Extension<Session>`.
//!
//! A request without a usable session cookie, or whose session has expired,
//! gets a fresh empty session and a `Set-Cookie` header on the response.
//! Starting a session also sweeps expired ones, at most once per
//! [`PurgeThrottle`] interval.

use crate::error::Result;
use crate::server::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header::{COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderValue};
use listkeeper_common::log_with_severity;
use listkeeper_todo::{SessionData, SessionId};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

/// Shared handle to the current request's session data
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<SessionData>>,
}

impl Session {
    pub fn new(data: SessionData) -> Self {
        Self {
            inner: Arc::new(Mutex::new(data)),
        }
    }

    /// Lock the session for reading or mutation
    pub async fn lock(&self) -> MutexGuard<'_, SessionData> {
        self.inner.lock().await
    }

    /// Copy of the current data, as it will be persisted
    pub async fn snapshot(&self) -> SessionData {
        self.inner.lock().await.clone()
    }
}

/// Limits how often new sessions trigger a sweep of expired ones
#[derive(Debug)]
pub struct PurgeThrottle {
    interval_secs: i64,
    /// Unix seconds of the last claimed sweep
    last_run: AtomicI64,
}

impl PurgeThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_secs: i64::try_from(interval.as_secs()).unwrap_or(i64::MAX),
            last_run: AtomicI64::new(i64::MIN),
        }
    }

    /// Claim the sweep due at `now`, in unix seconds
    ///
    /// Returns false while the previous sweep is younger than the interval or
    /// when another request claimed it first.
    pub fn try_claim(&self, now: i64) -> bool {
        let last = self.last_run.load(Ordering::Acquire);
        if now.saturating_sub(last) < self.interval_secs {
            return false;
        }
        self.last_run
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Claim a sweep at the current wall clock time
    pub fn try_claim_now(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or_default();
        self.try_claim(now)
    }
}

/// Find the session id carried by the `Cookie` headers, if any
///
/// Cookies with the right name but an unparseable value are ignored.
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(name, _)| *name == cookie_name)
        .find_map(|(_, value)| value.trim().trim_matches('"').parse().ok())
}

/// `Set-Cookie` value issuing a session id
pub fn session_cookie(cookie_name: &str, id: &SessionId) -> Result<HeaderValue> {
    Ok(HeaderValue::from_str(&format!(
        "{cookie_name}={id}; Path=/; HttpOnly; SameSite=Lax"
    ))?)
}

/// Load the session, run the handler, then persist the session
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let existing = match session_id_from_headers(request.headers(), &state.cookie_name) {
        Some(id) => match state.store.load(&id).await {
            Ok(data) => data.map(|data| (id, data)),
            Err(err) => {
                // An unreadable session is replaced rather than locking the visitor out
                log_with_severity("Discarding unreadable session", &err);
                None
            }
        },
        None => None,
    };

    let (id, data, is_new) = match existing {
        Some((id, data)) => {
            trace!("Resumed session {}", id);
            (id, data, false)
        }
        None => {
            if state.purge.try_claim_now() {
                let removed = state.store.purge_expired().await?;
                if removed > 0 {
                    debug!("Purged {} expired sessions", removed);
                }
            }
            let id = SessionId::new();
            debug!("Started session {}", id);
            (id, SessionData::default(), true)
        }
    };

    let session = Session::new(data);
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    state.store.save(&id, session.snapshot().await).await?;
    if is_new {
        response
            .headers_mut()
            .append(SET_COOKIE, session_cookie(&state.cookie_name, &id)?);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        headers
    }

    #[test]
    fn test_finds_named_cookie() {
        let id = SessionId::new();
        let headers = headers(&[&format!("theme=dark; listkeeper.session={id}; lang=en")]);
        assert_eq!(
            session_id_from_headers(&headers, "listkeeper.session"),
            Some(id)
        );
    }

    #[test]
    fn test_searches_every_cookie_header() {
        let id = SessionId::new();
        let headers = headers(&["theme=dark", &format!("sid={id}")]);
        assert_eq!(session_id_from_headers(&headers, "sid"), Some(id));
    }

    #[test]
    fn test_missing_or_garbage_cookie() {
        assert_eq!(session_id_from_headers(&HeaderMap::new(), "sid"), None);
        assert_eq!(session_id_from_headers(&headers(&["sid=nope"]), "sid"), None);
        assert_eq!(
            session_id_from_headers(&headers(&["other=01H0000000000000000000000"]), "sid"),
            None
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let id = SessionId::new();
        let value = session_cookie("sid", &id).unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            format!("sid={id}; Path=/; HttpOnly; SameSite=Lax")
        );
    }

    #[test]
    fn test_purge_throttle_claims_once_per_interval() {
        let throttle = PurgeThrottle::new(Duration::from_secs(60));
        assert!(throttle.try_claim(1_000));
        assert!(!throttle.try_claim(1_000));
        assert!(!throttle.try_claim(1_059));
        assert!(throttle.try_claim(1_060));
        assert!(!throttle.try_claim(1_061));
    }

    #[test]
    fn test_purge_throttle_zero_interval_always_claims() {
        let throttle = PurgeThrottle::new(Duration::ZERO);
        assert!(throttle.try_claim(5));
        assert!(throttle.try_claim(5));
        assert!(throttle.try_claim_now());
    }

    #[test]
    fn test_purge_throttle_single_winner_across_threads() {
        let throttle = Arc::new(PurgeThrottle::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let throttle = Arc::clone(&throttle);
                std::thread::spawn(move || throttle.try_claim(42))
            })
            .collect();
        let claimed = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|claimed| *claimed)
            .count();
        assert_eq!(claimed, 1);
    }

    #[tokio::test]
    async fn test_session_handle_shares_data() {
        let session = Session::default();
        let other = session.clone();
        session.lock().await.flash.set_success("saved");
        assert_eq!(other.snapshot().await.flash.success.as_deref(), Some("saved"));
    }
}
