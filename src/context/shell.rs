// ABOUTME: Dependency bundle wiring configuration, registry, selection store, context manager and router
// ABOUTME: Bootstraps the shell from ShellConfig and owns its background tasks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::manager::TenantContextManager;
use super::reload::ReloadScheduler;
use crate::config::{SelectionStoreKind, ShellConfig};
use crate::errors::AppResult;
use crate::persistence::{FileSelectionStore, SelectionStore, SharedStorage};
use crate::routing::ApiRouter;
use crate::tenant::TenantRegistry;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Shell context containing every tenant-aware dependency
///
/// # Dependencies
/// - `config`: environment configuration
/// - `registry`: immutable tenant registry
/// - `manager`: active tenant for this process
/// - `router`: API URL builder rooted at the configured base URL
#[derive(Clone)]
pub struct ShellContext {
    config: Arc<ShellConfig>,
    registry: Arc<TenantRegistry>,
    manager: Arc<TenantContextManager>,
    router: Arc<ApiRouter>,
    file_store: Option<Arc<FileSelectionStore>>,
}

impl ShellContext {
    /// Build every dependency described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error when the tenant table cannot be loaded or the
    /// selection file location cannot be determined.
    pub fn bootstrap(config: ShellConfig, reload: Arc<dyn ReloadScheduler>) -> AppResult<Self> {
        let registry = Arc::new(config.load_registry()?);

        let (store, file_store) = match config.selection_store {
            SelectionStoreKind::Memory => (
                Arc::new(SharedStorage::new().open_context()) as Arc<dyn SelectionStore>,
                None,
            ),
            SelectionStoreKind::File => {
                let store = Arc::new(FileSelectionStore::new(config.selection_file_path()?));
                (Arc::clone(&store) as Arc<dyn SelectionStore>, Some(store))
            }
        };

        let manager = Arc::new(
            TenantContextManager::builder(Arc::clone(&registry), store)
                .with_reload_scheduler(reload)
                .with_options(config.context_options())
                .build(),
        );
        let router = Arc::new(ApiRouter::new(config.api_base_url.clone()));

        info!(
            tenants = registry.len(),
            default = %registry.default_key(),
            summary = %config.summary(),
            "Shell context ready"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            manager,
            router,
            file_store,
        })
    }

    /// Follow selection changes made by other contexts
    ///
    /// # Errors
    ///
    /// Returns `INTERNAL_ERROR` when called outside a Tokio runtime.
    pub fn start_background_tasks(&self) -> AppResult<BackgroundTasks> {
        self.manager.spawn_external_listener()?;
        let watcher = match &self.file_store {
            Some(store) => Some(store.spawn_watcher(self.config.store_poll_interval)?),
            None => None,
        };
        Ok(BackgroundTasks {
            manager: Arc::clone(&self.manager),
            watcher,
        })
    }

    /// URL of `endpoint` for the active tenant
    #[must_use]
    pub fn url_for(&self, endpoint: &str, params: &[(String, String)]) -> String {
        let tenant = self.manager.current_key();
        self.router.build_url_with_params(
            endpoint,
            tenant.as_str(),
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    /// Request builder bound to this context's manager and router
    #[cfg(feature = "http-client")]
    #[must_use]
    pub fn api_client(&self) -> crate::routing::ApiClient {
        crate::routing::ApiClient::new(self.router.as_ref().clone(), Arc::clone(&self.manager))
    }

    /// Configuration the context was built from
    #[must_use]
    pub const fn config(&self) -> &Arc<ShellConfig> {
        &self.config
    }

    /// Tenant registry
    #[must_use]
    pub const fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    /// Context manager owning the active tenant
    #[must_use]
    pub const fn manager(&self) -> &Arc<TenantContextManager> {
        &self.manager
    }

    /// URL router for the configured API base
    #[must_use]
    pub const fn router(&self) -> &Arc<ApiRouter> {
        &self.router
    }

    /// File store backing the selection, when configured
    #[must_use]
    pub const fn file_store(&self) -> Option<&Arc<FileSelectionStore>> {
        self.file_store.as_ref()
    }
}

/// Background work started by [`ShellContext::start_background_tasks`]
///
/// Dropping the value stops the file watcher; call [`Self::shutdown`] to also
/// stop the manager's listener and pending reload.
pub struct BackgroundTasks {
    manager: Arc<TenantContextManager>,
    watcher: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Stop the watcher, the external listener and any pending reload
    pub fn shutdown(mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
        self.manager.shutdown();
    }
}

impl Drop for BackgroundTasks {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}
