//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use storefront_cache::Cache;
use storefront_cart::CartStore;
use storefront_data::rest::RestBackend;
use storefront_data::{ApiClient, CouponService, FlatRateCoupons};
use tracing::debug;

use crate::config::{CliConfig, CouponMode};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, Path::new(path))),
            None => CliConfig::find(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        debug!(path = ?config_path, "loaded configuration");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory holding the persisted cart.
    pub fn storage_dir(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.storage.dir)
    }

    /// HTTP client for the configured backend.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.api.client_config())
            .with_context(|| format!("Invalid API settings for {}", self.config.api.base_url))
    }

    /// REST services over one client.
    pub fn backend(&self) -> Result<RestBackend> {
        Ok(RestBackend::new(self.client()?))
    }

    /// Open the persisted cart wired to `backend`.
    pub fn cart_store(&self, backend: &RestBackend) -> Result<CartStore> {
        let dir = self.storage_dir();
        self.output
            .debug(&format!("Cart storage: {}", dir.display()));
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;

        let coupons: Arc<dyn CouponService> = match self.config.coupons.mode {
            CouponMode::Server => Arc::new(backend.coupons.clone()),
            CouponMode::Flat => Arc::new(FlatRateCoupons::new(self.config.coupons.flat_amount)),
        };

        let store = CartStore::open(cache, Arc::new(backend.orders.clone()), coupons)
            .with_policy(self.config.pricing);

        if let Some(error) = store.last_persistence_error() {
            self.output
                .warn(&format!("Saved cart could not be loaded: {}", error));
        }

        Ok(store)
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Cart store over a scratch directory with coupons priced locally.
#[cfg(test)]
pub(crate) fn test_store(dir: &Path) -> CartStore {
    let mut config = CliConfig::default();
    config.coupons.mode = CouponMode::Flat;
    let ctx = Context {
        config,
        config_path: None,
        output: Output::new(false, true),
        cwd: dir.to_path_buf(),
    };
    let backend = ctx.backend().unwrap();
    ctx.cart_store(&backend).unwrap()
}

/// Like [`test_store`], but a directory sits where the cart file belongs so
/// every write fails.
#[cfg(test)]
pub(crate) fn unwritable_test_store(dir: &Path) -> CartStore {
    let storage = dir.join(CliConfig::default().storage.dir);
    std::fs::create_dir_all(storage.join("storefront~cart.json")).unwrap();
    test_store(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_storage_dir_is_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        assert_eq!(ctx.storage_dir(), dir.path().join(".storefront"));
    }

    #[test]
    fn test_cart_store_persists_under_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.coupons.mode = CouponMode::Flat;
        let ctx = context_in(dir.path(), config);

        let backend = ctx.backend().unwrap();
        let store = ctx.cart_store(&backend).unwrap();
        assert!(store.cart().is_empty());
        store.save().unwrap();
        assert!(ctx.storage_dir().is_dir());
    }

    #[test]
    fn test_unwritable_storage_still_opens() {
        let dir = tempfile::tempdir().unwrap();
        let store = unwritable_test_store(dir.path());
        assert!(store.cart().is_empty());
        assert!(store.last_persistence_error().is_some());
        assert!(store.save().is_err());
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.api.base_url = "localhost".to_string();
        let ctx = context_in(dir.path(), config);

        let err = ctx.client().unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid API settings"));
    }
}
