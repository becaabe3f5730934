//! # Console Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by lib::run)         │
//! │     --snapshot cart.json --quantity-policy reject                       │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHOPFRONT_QUANTITY_POLICY=reject                                   │
//! │     SHOPFRONT_SNAPSHOT=/path/to/cart.json                              │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/shopfront-cart/console.toml (Linux)                      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     accept policy, 100 lines, "đ" suffix, no decimals                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! quantity_policy = "accept"  # accept | reject | clamp
//! max_lines = 100
//! event_capacity = 64
//!
//! [currency]
//! code = "VND"
//! symbol = "đ"
//! decimals = 0
//! symbol_position = "suffix"  # prefix | suffix
//!
//! [session]
//! snapshot_path = "cart.json"
//! ```

use serde::{Deserialize, Serialize};
use shopfront_core::{QuantityPolicy, DEFAULT_EVENT_CAPACITY, MAX_CART_LINES};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSettings {
    /// How quantity edits are treated.
    #[serde(default)]
    pub quantity_policy: QuantityPolicy,

    /// Maximum number of lines in one cart.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Notification buffer size per subscriber.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_max_lines() -> usize {
    MAX_CART_LINES
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            quantity_policy: QuantityPolicy::default(),
            max_lines: default_max_lines(),
            event_capacity: default_event_capacity(),
        }
    }
}

// =============================================================================
// Currency Settings
// =============================================================================

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `$12.34`
    Prefix,

    /// `400đ`
    #[default]
    Suffix,
}

/// How amounts are displayed. The cart itself only knows minor units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Currency code (ISO 4217)
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    /// Number of decimal places for currency
    #[serde(default)]
    pub decimals: u8,

    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

fn default_currency_code() -> String {
    "VND".to_string()
}

fn default_currency_symbol() -> String {
    "đ".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: 0,
            symbol_position: SymbolPosition::default(),
        }
    }
}

impl CurrencySettings {
    /// Formats a minor-unit amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_console_lib::config::CurrencySettings;
    ///
    /// let vnd = CurrencySettings::default();
    /// assert_eq!(vnd.format(400), "400đ");
    /// ```
    pub fn format(&self, minor_units: i64) -> String {
        let magnitude = minor_units.unsigned_abs();
        let amount = if self.decimals > 0 {
            let divisor = 10_u64.pow(u32::from(self.decimals));
            format!(
                "{}.{:0width$}",
                magnitude / divisor,
                magnitude % divisor,
                width = usize::from(self.decimals)
            )
        } else {
            magnitude.to_string()
        };
        let sign = if minor_units < 0 { "-" } else { "" };

        match self.symbol_position {
            SymbolPosition::Prefix => format!("{}{}{}", sign, self.symbol, amount),
            SymbolPosition::Suffix => format!("{}{}{}", sign, amount, self.symbol),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Where the session's initial cart comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// JSON snapshot to start the session with. Empty cart if unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

// =============================================================================
// Main Console Configuration
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ConsoleConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (console.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(AppError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.cart.max_lines == 0 {
            return Err(AppError::InvalidConfig(
                "cart.max_lines must be greater than 0".into(),
            ));
        }

        if self.cart.event_capacity == 0 {
            return Err(AppError::InvalidConfig(
                "cart.event_capacity must be greater than 0".into(),
            ));
        }

        if self.currency.decimals > 6 {
            return Err(AppError::InvalidConfig(format!(
                "currency.decimals must be at most 6, got {}",
                self.currency.decimals
            )));
        }

        Ok(())
    }

    /// Applies `SHOPFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup("SHOPFRONT_QUANTITY_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding quantity policy from environment");
                    self.cart.quantity_policy = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring SHOPFRONT_QUANTITY_POLICY"),
            }
        }

        if let Some(max) = lookup("SHOPFRONT_MAX_LINES") {
            match max.parse::<usize>() {
                Ok(m) => self.cart.max_lines = m,
                Err(_) => warn!(value = %max, "Ignoring non-numeric SHOPFRONT_MAX_LINES"),
            }
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(decimals) = lookup("SHOPFRONT_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency.decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring non-numeric SHOPFRONT_CURRENCY_DECIMALS"),
            }
        }

        if let Some(path) = lookup("SHOPFRONT_SNAPSHOT") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.session.snapshot_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "shopfront-cart")
            .map(|dirs| dirs.config_dir().join("console.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Accept);
        assert_eq!(config.cart.max_lines, MAX_CART_LINES);
        assert_eq!(config.currency.symbol, "đ");
        assert!(config.session.snapshot_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency_suffix() {
        let currency = CurrencySettings::default();
        assert_eq!(currency.format(400), "400đ");
        assert_eq!(currency.format(0), "0đ");
        assert_eq!(currency.format(-200), "-200đ");
    }

    #[test]
    fn test_format_currency_prefix_with_decimals() {
        let currency = CurrencySettings {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            decimals: 2,
            symbol_position: SymbolPosition::Prefix,
        };
        assert_eq!(currency.format(1234), "$12.34");
        assert_eq!(currency.format(1), "$0.01");
        assert_eq!(currency.format(-1234), "-$12.34");
    }

    #[test]
    fn test_format_currency_at_bounds() {
        let vnd = CurrencySettings::default();
        assert_eq!(vnd.format(i64::MIN), "-9223372036854775808đ");
        assert_eq!(vnd.format(i64::MAX), "9223372036854775807đ");

        let usd = CurrencySettings {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            decimals: 2,
            symbol_position: SymbolPosition::Prefix,
        };
        assert_eq!(usd.format(i64::MIN), "-$92233720368547758.08");
    }

    #[test]
    fn test_parse_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cart]\nquantity_policy = \"reject\"\n\n[currency]\nsymbol = \"$\"\ndecimals = 2\nsymbol_position = \"prefix\""
        )
        .unwrap();

        let config = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Reject);
        assert_eq!(config.cart.max_lines, MAX_CART_LINES);
        assert_eq!(config.currency.format(250), "$2.50");
        assert_eq!(config.currency.code, "VND");
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ConsoleConfig::load(Some(missing)),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cart\nmax_lines = ").unwrap();
        assert!(matches!(
            ConsoleConfig::from_file(file.path()),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = ConsoleConfig::default();
        config.cart.max_lines = 0;
        assert!(config.validate().is_err());

        let mut config = ConsoleConfig::default();
        config.cart.event_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("SHOPFRONT_QUANTITY_POLICY", "clamp"),
            ("SHOPFRONT_MAX_LINES", "5"),
            ("SHOPFRONT_SNAPSHOT", "/tmp/cart.json"),
            ("SHOPFRONT_CURRENCY_DECIMALS", "2"),
        ]);
        let mut config = ConsoleConfig::default();

        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Clamp);
        assert_eq!(config.cart.max_lines, 5);
        assert_eq!(config.currency.decimals, 2);
        assert_eq!(
            config.session.snapshot_path,
            Some(PathBuf::from("/tmp/cart.json"))
        );
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = ConsoleConfig::default();
        config.apply_overrides(|name| match name {
            "SHOPFRONT_QUANTITY_POLICY" => Some("floor".to_string()),
            "SHOPFRONT_MAX_LINES" => Some("many".to_string()),
            "SHOPFRONT_CURRENCY_DECIMALS" => Some("two".to_string()),
            _ => None,
        });

        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Accept);
        assert_eq!(config.cart.max_lines, MAX_CART_LINES);
        assert_eq!(config.currency.decimals, 0);
    }
}
