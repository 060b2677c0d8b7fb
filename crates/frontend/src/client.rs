//! Client configuration and initialization

use crate::config::FrontendConfig;
use console_core::FetchPolicy;
use console_http::{ClientError, ConsoleClient};
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
use web_sys::window;

/// Global client instance; its query cache lives as long as the page
static CLIENT: Lazy<Mutex<Option<ConsoleClient>>> = Lazy::new(|| Mutex::new(None));

/// Get the GraphQL endpoint for API calls
fn get_endpoint() -> String {
    let origin = window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();

    format!("{origin}{}", FrontendConfig::GRAPHQL_PATH)
}

/// Get the shared configuration API client
pub fn console_client() -> Result<ConsoleClient, ClientError> {
    let mut client_lock = CLIENT.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }

    let client = ConsoleClient::builder()
        .endpoint(get_endpoint())
        .fetch_policy(FetchPolicy::CacheOnly)
        .build()?;
    *client_lock = Some(client.clone());
    Ok(client)
}
