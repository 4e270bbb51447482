pub mod auth;
pub mod config;
pub mod emotion;
pub mod journal;
pub mod stats;
pub mod task;
pub mod timer;

use std::sync::Arc;

use uuid::Uuid;

use halcyon_core::backend::credentials;
use halcyon_core::{Backend, Config, RestBackend};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Backend credentials resolved from the keyring, with the config file as a
/// fallback for the URL and user id. The API key only ever lives in the
/// keyring.
pub(crate) struct Session {
    pub backend: Arc<dyn Backend>,
    pub user: Uuid,
}

pub(crate) fn session() -> CliResult<Session> {
    let config = Config::load()?;

    let url = match credentials::get(credentials::BACKEND_URL)? {
        Some(url) => Some(url),
        None => config.backend.base_url.clone(),
    };
    let key = credentials::get(credentials::BACKEND_KEY)?;
    let user = match credentials::get(credentials::USER_ID)? {
        Some(raw) => Some(raw.parse::<Uuid>()?),
        None => config.backend.user_id,
    };

    match (url, key, user) {
        (Some(url), Some(key), Some(user)) => Ok(Session {
            backend: Arc::new(RestBackend::new(&url, key)?),
            user,
        }),
        _ => Err("not signed in; run `halcyon auth login` first".into()),
    }
}
