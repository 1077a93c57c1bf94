// ABOUTME: reqwest-backed request builder routed through the active tenant
// ABOUTME: Adds JSON content type, bearer token and the tenant's request timeout to every call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ApiRouter;
use crate::context::TenantContextManager;
use crate::errors::{AppError, AppResult};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// HTTP client whose URLs always follow the active tenant
///
/// The tenant is read at request time, so a request built after a switch
/// targets the new tenant's namespace.
pub struct ApiClient {
    http: Client,
    router: ApiRouter,
    manager: Arc<TenantContextManager>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Client routing through `router` for the tenant active in `manager`
    #[must_use]
    pub fn new(router: ApiRouter, manager: Arc<TenantContextManager>) -> Self {
        let http = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            router,
            manager,
            token: RwLock::new(None),
        }
    }

    /// Set or clear the bearer token sent with every request
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Router used to build request URLs
    #[must_use]
    pub const fn router(&self) -> &ApiRouter {
        &self.router
    }

    /// Absolute URL of `endpoint` for the active tenant
    #[must_use]
    pub fn url<I, K, V>(&self, endpoint: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let tenant = self.manager.current_key();
        self.router
            .build_url_with_params(endpoint, tenant.as_str(), params)
    }

    /// Request to `endpoint` with tenant routing, headers and timeout applied
    pub fn request<I, K, V>(&self, method: Method, endpoint: &str, params: I) -> RequestBuilder
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let config = self.manager.current_config();
        let url = self.router.build_url_with_params(endpoint, config.key.as_str(), params);
        debug!(%method, %url, tenant = %config.key, "Building API request");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(Duration::from_millis(config.api.timeout));
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// GET `endpoint` and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_UNAVAILABLE` for transport failures and non-success
    /// statuses, `SERIALIZATION_ERROR` when the body is not the expected JSON.
    pub async fn get_json<T, I, K, V>(&self, endpoint: &str, params: I) -> AppResult<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let response = self
            .request(Method::GET, endpoint, params)
            .send()
            .await
            .map_err(|e| AppError::unavailable(format!("request to {endpoint} failed")).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::unavailable(format!(
                "{endpoint} responded with {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::unavailable(format!("cannot read {endpoint} response")).with_source(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}
