//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use storefront_commerce::cart::PricingPolicy;
use storefront_commerce::Money;
use storefront_data::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_FLAT_AMOUNT};

/// Environment variable that overrides `[api] token`.
pub const TOKEN_ENV: &str = "STOREFRONT_TOKEN";

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiSection,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageSection,

    /// Shipping rules and display currency.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Coupon validation.
    #[serde(default)]
    pub coupons: CouponSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Find the nearest config file at or above `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Problems that would stop the CLI from working. Empty when valid.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            problems.push(format!("api.base_url must be an http(s) URL, got '{}'", url));
        }
        if self.api.timeout_secs == 0 {
            problems.push("api.timeout_secs must be greater than zero".to_string());
        }
        if self.storage.dir.as_os_str().is_empty() {
            problems.push("storage.dir must not be empty".to_string());
        }
        if self.pricing.shipping_cost < Money::zero() {
            problems.push("pricing.shipping_cost must not be negative".to_string());
        }
        if self.pricing.free_shipping_threshold < Money::zero() {
            problems.push("pricing.free_shipping_threshold must not be negative".to_string());
        }
        if self.coupons.mode == CouponMode::Flat && !self.coupons.flat_amount.is_positive() {
            problems.push("coupons.flat_amount must be positive in flat mode".to_string());
        }

        problems
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Storefront API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Auth token; prefer the environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ApiSection {
    /// Token from the environment, falling back to the file.
    pub fn token(&self) -> Option<SecretString> {
        std::env::var(TOKEN_ENV)
            .ok()
            .or_else(|| self.token.clone())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }

    /// Client settings for this section.
    pub fn client_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            token: self.token(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Directory holding the persisted cart, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".storefront")
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// How coupon codes are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponMode {
    /// Ask the backend.
    #[default]
    Server,
    /// Accept any code for a fixed amount.
    Flat,
}

impl CouponMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouponMode::Server => "server",
            CouponMode::Flat => "flat",
        }
    }
}

/// `[coupons]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponSection {
    #[serde(default)]
    pub mode: CouponMode,

    /// Discount granted in flat mode.
    #[serde(default = "default_flat_amount")]
    pub flat_amount: Money,
}

fn default_flat_amount() -> Money {
    DEFAULT_FLAT_AMOUNT
}

impl Default for CouponSection {
    fn default() -> Self {
        Self {
            mode: CouponMode::default(),
            flat_amount: default_flat_amount(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront CLI configuration

[api]
base_url = "{base_url}"
timeout_secs = 30
# token = "..."   # or set {token_env}

[storage]
dir = ".storefront"

[pricing]
shipping_cost = 29.99
free_shipping_threshold = 150.0
currency = "TRY"

[coupons]
mode = "server"   # or "flat"
flat_amount = 20.0
"#,
        base_url = DEFAULT_BASE_URL,
        token_env = TOKEN_ENV,
    )
}
