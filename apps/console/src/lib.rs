//! # Shopfront Console Library
//!
//! Runs one cart session in the terminal. The console plays the storefront
//! view: it loads the session's snapshot, drives the cart commands from
//! stdin and renders the drawer after each action.
//!
//! ## Module Organization
//! ```text
//! shopfront_console_lib/
//! ├── lib.rs          ◄─── You are here (CLI, logging, session run loop)
//! ├── config.rs       ◄─── TOML + env configuration
//! ├── error.rs        ◄─── ApiError for commands, AppError for the process
//! ├── snapshot.rs     ◄─── Snapshot file loading
//! ├── driver.rs       ◄─── Line commands, toasts and drawer rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── Session cart state
//! └── commands/
//!     ├── mod.rs      ◄─── Command exports
//!     └── cart.rs     ◄─── Cart manipulation commands
//! ```

pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod snapshot;
pub mod state;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use shopfront_core::QuantityPolicy;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use config::ConsoleConfig;
use driver::{Driver, Flow};
use error::AppResult;
use state::CartState;

/// Command-line flags. These override the config file and environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "shopfront-console", version, about = "Interactive shopping cart session")]
pub struct Cli {
    /// Config file (default: platform config dir / console.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON snapshot to start the session with
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Quantity edit policy: accept, reject or clamp
    #[arg(long)]
    pub quantity_policy: Option<QuantityPolicy>,
}

impl Cli {
    /// Applies command-line flags on top of a loaded config.
    pub fn apply_to(&self, config: &mut ConsoleConfig) {
        if let Some(path) = &self.snapshot {
            config.session.snapshot_path = Some(path.clone());
        }
        if let Some(policy) = self.quantity_policy {
            config.cart.quantity_policy = policy;
        }
    }
}

/// Runs one cart session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ──► tracing-subscriber on stderr, RUST_LOG       │
/// │  2. Load Config ─────────► defaults, console.toml, SHOPFRONT_*, flags   │
/// │  3. Load Snapshot ───────► session file, or an empty cart               │
/// │  4. Start CartState ─────► policy, line limit, notifier                 │
/// │  5. Drive ───────────────► stdin lines until quit or EOF                │
/// │  6. End Session ─────────► cart cleared                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    info!("Starting Shopfront cart console");

    let mut config = ConsoleConfig::load(cli.config.clone())?;
    cli.apply_to(&mut config);
    debug!(?config, "Configuration resolved");

    let drafts = match &config.session.snapshot_path {
        Some(path) if path.exists() => snapshot::load_snapshot_file(path)?,
        Some(path) => {
            info!(?path, "Snapshot file not found, starting with an empty cart");
            Vec::new()
        }
        None => Vec::new(),
    };

    let cart = CartState::start(&config.cart, drafts)?;
    let mut driver = Driver::new(cart.clone(), config.currency.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    drive(&mut driver, stdin, &mut std::io::stdout()).await?;

    cart.end_session();
    info!("Shopfront cart console stopped");
    Ok(())
}

/// Renders the drawer, then feeds `input` to the driver line by line until
/// `quit` or end of input.
pub async fn drive<R, W>(driver: &mut Driver, input: R, out: &mut W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    driver.execute("show", out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if driver.execute(&line, out)? == Flow::Quit {
            break;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the drawer on stdout stays readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_core=trace` - Show notification fan-out
/// - Default: INFO, DEBUG for the shopfront crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = build_subscriber(filter, std::io::stderr).try_init();
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,shopfront_core=debug,shopfront_console_lib=debug";

/// The `fmt` subscriber, gated only by `filter`.
fn build_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::{Money, NewLineItem, ProductRef};
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_logs(filter: &str, emit: impl FnOnce()) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = build_subscriber(EnvFilter::new(filter), move || writer.clone());
        tracing::subscriber::with_default(subscriber, emit);
        sink.contents()
    }

    fn drawer_driver() -> Driver {
        let drafts = vec![
            NewLineItem::new(
                ProductRef::new("Product 1", "product-1", Money::from_minor_units(100), "Category 1"),
                2,
            ),
            NewLineItem::new(
                ProductRef::new("Product 2", "product-2", Money::from_minor_units(200), "Category 2"),
                1,
            ),
        ];
        let state = CartState::start(&Default::default(), drafts).unwrap();
        Driver::new(state, Default::default())
    }

    #[test]
    fn test_log_filter_drops_events_below_level() {
        let logs = capture_logs("warn", || {
            tracing::debug!(target: "other_crate", "debug from elsewhere");
            tracing::warn!(target: "other_crate", "warning from elsewhere");
        });

        assert!(!logs.contains("debug from elsewhere"));
        assert!(logs.contains("warning from elsewhere"));
    }

    #[test]
    fn test_default_log_filter_targets_shopfront_crates() {
        let logs = capture_logs(DEFAULT_LOG_FILTER, || {
            tracing::debug!(target: "shopfront_core::cart", "cart debug");
            tracing::debug!(target: "other_crate", "foreign debug");
            tracing::trace!(target: "shopfront_core::events", "cart trace");
            tracing::info!(target: "other_crate", "foreign info");
        });

        assert!(logs.contains("cart debug"));
        assert!(logs.contains("foreign info"));
        assert!(!logs.contains("foreign debug"));
        assert!(!logs.contains("cart trace"));
    }

    #[tokio::test]
    async fn test_drive_runs_session_until_quit() {
        let mut driver = drawer_driver();
        let input: &[u8] = b"qty 1 3\nrm 0\nquit\nshow\n";
        let mut out = Vec::new();

        drive(&mut driver, BufReader::new(input), &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Your Shopping Carts\n"));
        assert!(out.contains("Total: 800đ"));
        assert_eq!(out.matches("** Removed from Cart **").count(), 1);
        assert!(out.contains("Total: 600đ"));
        assert_eq!(out.matches("Your Shopping Carts").count(), 3);
    }

    #[tokio::test]
    async fn test_drive_stops_at_end_of_input() {
        let mut driver = drawer_driver();
        let input: &[u8] = b"rm 9\n";
        let mut out = Vec::new();

        drive(&mut driver, BufReader::new(input), &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: Index 9 is out of range for a cart of 2 items\n"));
        assert!(out.ends_with("> \n"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "shopfront-console",
            "--snapshot",
            "cart.json",
            "--quantity-policy",
            "clamp",
        ])
        .unwrap();

        assert_eq!(cli.snapshot, Some(PathBuf::from("cart.json")));
        assert_eq!(cli.quantity_policy, Some(QuantityPolicy::Clamp));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["shopfront-console", "--quantity-policy", "round"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "shopfront-console",
            "-s",
            "/tmp/other.json",
            "--quantity-policy",
            "reject",
        ])
        .unwrap();
        let mut config = ConsoleConfig::default();
        config.apply_overrides(|name| match name {
            "SHOPFRONT_SNAPSHOT" => Some("/tmp/env.json".to_string()),
            _ => None,
        });

        cli.apply_to(&mut config);

        assert_eq!(
            config.session.snapshot_path,
            Some(PathBuf::from("/tmp/other.json"))
        );
        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Reject);
    }

    #[test]
    fn test_flags_leave_config_alone_when_absent() {
        let cli = Cli::try_parse_from(["shopfront-console"]).unwrap();
        let mut config = ConsoleConfig::default();
        config.cart.quantity_policy = QuantityPolicy::Clamp;

        cli.apply_to(&mut config);

        assert_eq!(config.cart.quantity_policy, QuantityPolicy::Clamp);
        assert!(config.session.snapshot_path.is_none());
    }
}
