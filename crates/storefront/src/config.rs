//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the storefront runs with built-in defaults.
//!
//! - `MAYGLOSS_CART_PATH` - Path of the durable cart slot
//!   (default: `maygloss_cart.json`)
//! - `MAYGLOSS_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is
//!   free (default: 50)
//! - `MAYGLOSS_FLAT_SHIPPING_FEE` - Shipping fee below the threshold
//!   (default: 5.95)
//! - `GEMINI_API_KEY` - Assistant API key; the assistant is disabled when
//!   unset
//! - `MAYGLOSS_ASSISTANT_MODEL` - Assistant model name
//!   (default: gemini-3-flash-preview)

use std::path::PathBuf;
use std::str::FromStr;

use maygloss_core::Price;
use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

/// Default file for the durable cart slot.
pub const DEFAULT_CART_PATH: &str = "maygloss_cart.json";

const DEFAULT_FREE_SHIPPING_THRESHOLD: &str = "50";
const DEFAULT_FLAT_SHIPPING_FEE: &str = "5.95";
const DEFAULT_ASSISTANT_MODEL: &str = "gemini-3-flash-preview";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path of the durable cart slot.
    pub cart_path: PathBuf,
    /// Checkout pricing configuration.
    pub checkout: CheckoutConfig,
    /// Assistant collaborator configuration, if an API key is present.
    pub assistant: Option<AssistantConfig>,
}

/// Checkout pricing configuration.
///
/// The canonical values are a $50 free-shipping threshold with a $5.95
/// flat fee; shipping is free strictly above the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Subtotal above which shipping is free.
    pub free_shipping_threshold: Price,
    /// Flat shipping fee charged at or below the threshold.
    pub flat_shipping_fee: Price,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Price::from_dollars(50),
            flat_shipping_fee: Price::from_cents(595),
        }
    }
}

/// Assistant (Gemini API) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AssistantConfig {
    /// Gemini API key.
    pub api_key: SecretString,
    /// Model name (e.g., gemini-3-flash-preview).
    pub model: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a pricing variable is set but does not
    /// parse as a decimal amount.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let cart_path = PathBuf::from(get_env_or_default("MAYGLOSS_CART_PATH", DEFAULT_CART_PATH));
        let checkout = CheckoutConfig::from_env()?;
        let assistant = AssistantConfig::from_env();

        Ok(Self {
            cart_path,
            checkout,
            assistant,
        })
    }
}

impl CheckoutConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let threshold = get_env_or_default(
            "MAYGLOSS_FREE_SHIPPING_THRESHOLD",
            DEFAULT_FREE_SHIPPING_THRESHOLD,
        );
        let fee = get_env_or_default("MAYGLOSS_FLAT_SHIPPING_FEE", DEFAULT_FLAT_SHIPPING_FEE);

        Ok(Self {
            free_shipping_threshold: parse_price("MAYGLOSS_FREE_SHIPPING_THRESHOLD", &threshold)?,
            flat_shipping_fee: parse_price("MAYGLOSS_FLAT_SHIPPING_FEE", &fee)?,
        })
    }
}

impl AssistantConfig {
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("GEMINI_API_KEY")?;
        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("MAYGLOSS_ASSISTANT_MODEL", DEFAULT_ASSISTANT_MODEL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a decimal dollar amount into a `Price`.
fn parse_price(var_name: &str, value: &str) -> Result<Price, ConfigError> {
    Decimal::from_str(value)
        .map(Price::new)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}
