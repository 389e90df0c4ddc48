//! Optional process-wide default session
//!
//! Nothing is created implicitly: callers that want a shared session call
//! `init_default_session` once and reach it through `with_default_session`.

use once_cell::sync::OnceCell;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use super::Session;
use crate::config::SessionConfig;
use crate::errors::{IesError, Result};

static DEFAULT_SESSION: OnceCell<Mutex<Option<Session>>> = OnceCell::new();

fn lock() -> Result<MutexGuard<'static, Option<Session>>> {
    DEFAULT_SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| IesError::Session("default session lock poisoned".to_string()))
}

/// Build the default session from `config`
///
/// Returns `false` (and leaves the existing session alone) if one is
/// already initialised.
pub fn init_default_session(config: SessionConfig) -> Result<bool> {
    let mut slot = lock()?;
    if slot.is_some() {
        return Ok(false);
    }
    *slot = Some(Session::new(config)?);
    info!("default session initialised");
    Ok(true)
}

/// Run `f` against the default session
pub fn with_default_session<R>(f: impl FnOnce(&mut Session) -> R) -> Result<R> {
    let mut slot = lock()?;
    let session = slot
        .as_mut()
        .ok_or_else(|| IesError::Session("default session not initialised".to_string()))?;
    Ok(f(session))
}

/// Clear the default session's graph and cache, keeping it initialised
pub fn reset_default_session() -> Result<()> {
    with_default_session(|session| session.clear().map(|_| ()))?
}

/// Drop the default session; returns whether one existed
pub fn shutdown_default_session() -> Result<bool> {
    let dropped = lock()?.take().is_some();
    if dropped {
        info!("default session shut down");
    }
    Ok(dropped)
}

pub fn is_default_session_initialised() -> bool {
    lock().map(|slot| slot.is_some()).unwrap_or(false)
}
