//! # Console Driver
//!
//! Stands in for the storefront view. Each input line is one user action
//! on the cart drawer; the driver runs the matching command, prints any
//! toast the cart raised, and re-renders the drawer.
//!
//! ## Commands
//! ```text
//! show | ls                  render the drawer
//! keys                       list line positions with their keys
//! qty <index|key> <n>        set a line's quantity
//! rm <index|key>             remove a line
//! add <json>                 add a line (snapshot line format)
//! clear                      end the session (checkout / logout)
//! export                     print the cart as a JSON snapshot
//! help                       list commands
//! quit | exit                leave the console
//! ```

use std::io::{self, Write};
use std::str::FromStr;

use shopfront_core::snapshot::export_snapshot_json;
use shopfront_core::{CartEvent, LineKey, NewLineItem};
use thiserror::Error;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use crate::commands::{self, CartResponse};
use crate::config::CurrencySettings;
use crate::error::{ApiError, AppResult};
use crate::state::CartState;

const HELP: &str = "\
Commands:
  show | ls                  render the cart
  keys                       list line positions with their keys
  qty <index|key> <n>        set a line's quantity
  rm <index|key>             remove a line
  add <json>                 add a line, e.g. add {\"product\": {...}, \"quantity\": 1}
  clear                      check out and empty the cart
  export                     print the cart as a JSON snapshot
  help                       show this message
  quit | exit                leave";

// =============================================================================
// Parsing
// =============================================================================

/// How a command names a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Index(usize),
    Key(LineKey),
}

impl FromStr for LineRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(index) = s.parse::<usize>() {
            return Ok(LineRef::Index(index));
        }
        s.parse::<LineKey>()
            .map(LineRef::Key)
            .map_err(|_| ParseError::InvalidLine(s.to_string()))
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Keys,
    Quantity { line: LineRef, quantity: i64 },
    Remove(LineRef),
    Add(NewLineItem),
    Clear,
    Export,
    Help,
    Quit,
}

/// Input the driver could not understand.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is neither a line position nor a line key")]
    InvalidLine(String),

    #[error("'{0}' is not a whole number")]
    InvalidQuantity(String),

    #[error("Invalid line item: {0}")]
    InvalidItem(#[from] serde_json::Error),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "show" | "ls" => Ok(Command::Show),
            "keys" => Ok(Command::Keys),
            "qty" => {
                let mut args = rest.split_whitespace();
                let line = args.next().ok_or(ParseError::MissingArgument {
                    command: "qty",
                    argument: "a line and a quantity",
                })?;
                let quantity = args.next().ok_or(ParseError::MissingArgument {
                    command: "qty",
                    argument: "a quantity",
                })?;
                Ok(Command::Quantity {
                    line: line.parse()?,
                    quantity: quantity
                        .parse()
                        .map_err(|_| ParseError::InvalidQuantity(quantity.to_string()))?,
                })
            }
            "rm" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "rm",
                        argument: "a line",
                    });
                }
                Ok(Command::Remove(rest.parse()?))
            }
            "add" => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument {
                        command: "add",
                        argument: "a JSON line item",
                    });
                }
                Ok(Command::Add(serde_json::from_str(rest)?))
            }
            "clear" => Ok(Command::Clear),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the drawer: the empty state, or the lines and the total.
pub fn render_cart<W: Write>(
    response: &CartResponse,
    currency: &CurrencySettings,
    out: &mut W,
) -> io::Result<()> {
    if response.is_empty {
        return writeln!(out, "Your cart is empty :(");
    }

    writeln!(out, "Your Shopping Carts")?;
    writeln!(
        out,
        "{:>3}  {:<24} {:<16} {:<6} {:<8} {:>5} {:>14}",
        "#", "Product", "Category", "Size", "Color", "Qty", "Price"
    )?;
    for (index, item) in response.items.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<24} {:<16} {:<6} {:<8} {:>5} {:>14}",
            index,
            item.product.name,
            item.product.category.name,
            item.size,
            item.color,
            item.quantity,
            currency.format(item.line_total().minor_units()),
        )?;
    }
    writeln!(
        out,
        "Total: {}",
        currency.format(response.totals.total_price.minor_units())
    )
}

// =============================================================================
// Driver
// =============================================================================

/// Whether the session continues after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs input lines against one cart session.
pub struct Driver {
    state: CartState,
    currency: CurrencySettings,
    toasts: broadcast::Receiver<CartEvent>,
}

impl Driver {
    pub fn new(state: CartState, currency: CurrencySettings) -> Self {
        let toasts = state.subscribe();
        Driver {
            state,
            currency,
            toasts,
        }
    }

    /// Runs one input line. Command failures are printed and the session
    /// continues; only output failures are returned.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> AppResult<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                debug!(error = %e, "unparsed input");
                writeln!(out, "error: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let quit = command == Command::Quit;
        match self.dispatch(command, out)? {
            Some(Ok(response)) => {
                self.flush_toasts(out)?;
                render_cart(&response, &self.currency, out)?;
            }
            Some(Err(e)) => writeln!(out, "error: {}", e.message)?,
            None => {}
        }

        Ok(if quit { Flow::Quit } else { Flow::Continue })
    }

    /// Runs a parsed command. Returns the cart to render, if the command
    /// produces one.
    fn dispatch<W: Write>(
        &self,
        command: Command,
        out: &mut W,
    ) -> AppResult<Option<Result<CartResponse, ApiError>>> {
        let state = &self.state;
        let result = match command {
            Command::Show => Ok(commands::get_cart(state)),
            Command::Quantity { line, quantity } => match line {
                LineRef::Index(index) => commands::update_cart_item(state, index, quantity),
                LineRef::Key(key) => commands::update_cart_item_by_key(state, key, quantity),
            },
            Command::Remove(line) => match line {
                LineRef::Index(index) => commands::remove_from_cart(state, index),
                LineRef::Key(key) => commands::remove_from_cart_by_key(state, key),
            },
            Command::Add(draft) => commands::add_to_cart(state, draft),
            Command::Clear => Ok(commands::clear_cart(state)),
            Command::Keys => {
                let items = state.with_cart(|c| c.snapshot());
                for (index, item) in items.iter().enumerate() {
                    writeln!(out, "{:>3}  {}  {}", index, item.key, item.product.name)?;
                }
                return Ok(None);
            }
            Command::Export => {
                match state.with_cart(|c| export_snapshot_json(c.items())) {
                    Ok(json) => writeln!(out, "{}", json)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
                return Ok(None);
            }
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(None);
            }
            Command::Quit => return Ok(None),
        };
        Ok(Some(result))
    }

    /// Prints one toast per notification raised since the last command.
    fn flush_toasts<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        loop {
            match self.toasts.try_recv() {
                Ok(event) => {
                    debug!(?event, "cart notification");
                    writeln!(out, "** {} **", event.message())?;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "cart notifications dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
            }
        }
    }
}
