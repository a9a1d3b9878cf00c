use std::path::Path;

use otbozor_client::{read_optional, remove_if_exists, write_atomic, AuthStrategy};
use otbozor_core::AuthSession;
use otbozor_logging::{market_error, market_info, market_warn};
use serde::{Deserialize, Serialize};

const SESSION_FILENAME: &str = ".otbozor_session.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PersistedSession {
    access_token: String,
    display_name: String,
    is_admin: bool,
}

/// What the app remembers between runs.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StoredSession {
    pub access_token: String,
    pub display_name: String,
    pub is_admin: bool,
}

impl StoredSession {
    pub fn auth(&self) -> AuthStrategy {
        AuthStrategy::Bearer(self.access_token.clone())
    }
}

pub(crate) fn load_session(state_dir: &Path) -> Option<StoredSession> {
    let path = state_dir.join(SESSION_FILENAME);
    let content = match read_optional(&path) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(err) => {
            market_warn!("Failed to read session from {:?}: {}", path, err);
            return None;
        }
    };

    let session: PersistedSession = match ron::from_str(&content) {
        Ok(session) => session,
        Err(err) => {
            market_warn!("Failed to parse session from {:?}: {}", path, err);
            return None;
        }
    };

    market_info!("Loaded session for {}", session.display_name);
    Some(StoredSession {
        access_token: session.access_token,
        display_name: session.display_name,
        is_admin: session.is_admin,
    })
}

pub(crate) fn save_session(state_dir: &Path, session: &AuthSession) -> bool {
    let state = PersistedSession {
        access_token: session.access_token.clone(),
        display_name: session.user.display_name.clone(),
        is_admin: session.user.is_admin,
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            market_error!("Failed to serialize session: {}", err);
            return false;
        }
    };

    match write_atomic(state_dir, SESSION_FILENAME, &content) {
        Ok(path) => {
            market_info!("Session saved to {:?}", path);
            true
        }
        Err(err) => {
            market_error!("Failed to write session to {:?}: {}", state_dir, err);
            false
        }
    }
}

pub(crate) fn clear_session(state_dir: &Path) {
    if let Err(err) = remove_if_exists(&state_dir.join(SESSION_FILENAME)) {
        market_warn!("Failed to remove session file: {}", err);
    }
}
