//! HTTP client for the portwatch backend.
//!
//! All functions use gloo-net against the configured API base (same origin
//! `/api` by default). Reads decode JSON bodies; writes only care about the
//! status code.

use gloo_net::http::{Request, Response};
use portwatch_common::config::DashboardConfig;
use portwatch_common::error::GatewayError;
use portwatch_common::models::{
    ColumnConfigRequest, Interface, SavePreference, SavedPreferences, Service,
};
use serde::de::DeserializeOwned;

/// Ergonomic result alias.
pub type ApiResult<T> = Result<T, GatewayError>;

async fn get_json<T: DeserializeOwned>(config: &DashboardConfig, path: &str) -> ApiResult<T> {
    let url = config.endpoint(path);
    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;

    if resp.ok() {
        resp.json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    } else {
        Err(GatewayError::status(resp.status(), url))
    }
}

async fn post_json<B: serde::Serialize>(
    config: &DashboardConfig,
    path: &str,
    body: &B,
) -> ApiResult<()> {
    let url = config.endpoint(path);
    let resp = Request::post(&url)
        .json(body)
        .map_err(|e| GatewayError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| GatewayError::Network(e.to_string()))?;
    check_status(resp, url)
}

fn check_status(resp: Response, url: String) -> ApiResult<()> {
    if resp.ok() {
        Ok(())
    } else {
        Err(GatewayError::status(resp.status(), url))
    }
}

// ── Reads ───────────────────────────────────────────────────────────

pub async fn get_saved_preferences(config: &DashboardConfig) -> ApiResult<SavedPreferences> {
    get_json(config, "/saved-service-names").await
}

pub async fn get_interfaces(config: &DashboardConfig) -> ApiResult<Vec<Interface>> {
    // A `null` body means no interfaces.
    let list: Option<Vec<Interface>> = get_json(config, "/interfaces").await?;
    Ok(list.unwrap_or_default())
}

pub async fn get_services(config: &DashboardConfig) -> ApiResult<Vec<Service>> {
    let list: Option<Vec<Service>> = get_json(config, "/services").await?;
    Ok(list.unwrap_or_default())
}

// ── Writes ──────────────────────────────────────────────────────────

/// Upsert a service name, interface link setting, or URL path.
pub async fn save_preference(config: &DashboardConfig, update: &SavePreference) -> ApiResult<()> {
    post_json(config, update.endpoint(), update).await
}

pub async fn save_column_config(
    config: &DashboardConfig,
    request: &ColumnConfigRequest,
) -> ApiResult<()> {
    post_json(config, "/save-column-config", request).await
}
