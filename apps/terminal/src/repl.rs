//! # Command Parsing and Dispatch
//!
//! Translates typed lines into store operations. Coercion happens here:
//! the core only ever sees parsed ids and `Money` values, and domain
//! errors come back as printable messages rather than ending the session.

use std::io::{self, Write};

use storefront_core::{Money, PaymentOutcome, Store};

use crate::render;

/// A parsed shopper command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Cart,
    Add(u32),
    Increase(u32),
    Decrease(u32),
    Remove(u32),
    Empty,
    Pay(Money),
    Help,
    Quit,
}

/// Session control flow after a dispatched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut tokens = line.split_whitespace();
    let keyword = match tokens.next() {
        Some(k) => k,
        None => return Ok(None),
    };

    let command = match keyword {
        "list" | "ls" => Command::List,
        "cart" => Command::Cart,
        "add" => Command::Add(parse_id(tokens.next())?),
        "inc" | "+" => Command::Increase(parse_id(tokens.next())?),
        "dec" | "-" => Command::Decrease(parse_id(tokens.next())?),
        "rm" | "remove" => Command::Remove(parse_id(tokens.next())?),
        "empty" => Command::Empty,
        "pay" => {
            let raw = tokens
                .next()
                .ok_or_else(|| "usage: pay <amount>".to_string())?;
            let amount = parse_money(raw)
                .ok_or_else(|| format!("'{}' is not an amount (try 5 or 5.00)", raw))?;
            Command::Pay(amount)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(Some(command))
}

fn parse_id(token: Option<&str>) -> Result<u32, String> {
    let token = token.ok_or_else(|| "expected a product id".to_string())?;
    token
        .parse()
        .map_err(|_| format!("'{}' is not a product id", token))
}

/// Parses a decimal money string (`5`, `5.5`, `5.50`, `$5.50`, `-3`) into
/// cents. Sign is preserved; the core decides whether it is acceptable.
pub fn parse_money(raw: &str) -> Option<Money> {
    let raw = raw.trim();
    let raw = raw.strip_prefix('$').unwrap_or(raw);
    let (negative, raw) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let (major, minor) = match raw.split_once('.') {
        Some((major, minor)) => {
            if minor.is_empty() || minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // "5.5" means 50 cents, not 5
            let scale = if minor.len() == 1 { 10 } else { 1 };
            (major, minor.parse::<i64>().ok()? * scale)
        }
        None => (raw, 0),
    };

    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let cents = major.parse::<i64>().ok()? * 100 + minor;
    Some(Money::from_cents(if negative { -cents } else { cents }))
}

// =============================================================================
// Dispatch
// =============================================================================

/// Parses and executes one line against the store, writing any response
/// to `output`. Domain errors become messages, never session failures.
pub fn dispatch<W: Write>(store: &mut Store, line: &str, output: &mut W) -> io::Result<Flow> {
    let command = match parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(Flow::Continue),
        Err(message) => {
            writeln!(output, "{}", message)?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::List => writeln!(output, "{}", render::render_catalog(store.catalog()))?,
        Command::Cart => writeln!(output, "{}", render::render_cart(store.cart()))?,
        Command::Add(id) | Command::Increase(id) => {
            if let Err(e) = store.add_product(id) {
                writeln!(output, "{}", e)?;
            }
        }
        Command::Decrease(id) => store.decrease_quantity(id),
        Command::Remove(id) => store.remove_product(id),
        Command::Empty => store.empty_cart(),
        Command::Pay(amount) => match store.pay(amount) {
            Ok(outcome) => {
                writeln!(output, "{}", render::render_outcome(&outcome))?;
                if let PaymentOutcome::Settled { receipt } = &outcome {
                    writeln!(output, "{}", render::render_receipt(receipt))?;
                }
            }
            Err(e) => writeln!(output, "{}", e)?,
        },
        Command::Help => writeln!(output, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

const HELP: &str = "\
Commands:
  list           show the product catalog
  cart           show the current cart
  add <id>       add one unit of a product
  inc <id>       increase a line's quantity by one
  dec <id>       decrease a line's quantity by one
  rm <id>        remove a line from the cart
  empty          empty the cart
  pay <amount>   tender cash toward the cart total
  help           show this help
  quit           leave the storefront";

// =============================================================================
// Unit Tests
// =============================================================================
