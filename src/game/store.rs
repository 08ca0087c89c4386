//! JSON persistence of the day's level states
//!
//! File layout:
//!
//! ```json
//! { "date": "2025-10-18", "states": { "noob": { "completed": true, ... } } }
//! ```
//!
//! Loading never fails: a missing, unreadable or stale file yields a fresh
//! session for the requested day. Saved states whose flags disagree with
//! their attempts are repaired.

use super::{LevelState, Session};
use crate::core::Level;
use crate::generator::date_string;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode level states: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Saved {
    date: String,
    states: BTreeMap<Level, LevelState>,
}

/// File-backed level state store
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session for `today`, starting fresh when nothing usable is saved
    #[must_use]
    pub fn load(&self, today: NaiveDate) -> Session {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(target: "funcle::store", path = %self.path.display(), "no saved states");
                return Session::new(today);
            }
            Err(error) => {
                warn!(target: "funcle::store", path = %self.path.display(), %error, "cannot read saved states");
                return Session::new(today);
            }
        };

        let mut saved: Saved = match serde_json::from_str(&text) {
            Ok(saved) => saved,
            Err(error) => {
                warn!(target: "funcle::store", path = %self.path.display(), %error, "ignoring corrupt saved states");
                return Session::new(today);
            }
        };

        if saved.date != date_string(today) {
            debug!(target: "funcle::store", saved = %saved.date, "saved states are from another day");
            return Session::new(today);
        }
        for (level, state) in &mut saved.states {
            if state.repair() {
                warn!(target: "funcle::store", %level, "repaired inconsistent saved state");
            }
        }
        Session::with_states(today, saved.states)
    }

    /// Write the session's states
    ///
    /// # Errors
    /// Returns `StoreError` if encoding or writing fails; the session is
    /// unaffected either way.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let saved = Saved {
            date: date_string(session.date()),
            states: session.states().clone(),
        };
        let json = serde_json::to_string_pretty(&saved)?;

        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&self.path, json).map_err(io_error)?;

        debug!(target: "funcle::store", path = %self.path.display(), "saved level states");
        Ok(())
    }
}
