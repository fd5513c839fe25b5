//! # Storefront Terminal Library
//!
//! The presentation adapter the core treats as an external collaborator:
//! it reads catalog/cart state, renders it, and forwards shopper gestures
//! into the store's operations.
//!
//! ## Module Organization
//! ```text
//! storefront_terminal_lib/
//! ├── lib.rs       ◄─── You are here (setup & session loop)
//! ├── repl.rs      ◄─── Command parsing and dispatch
//! └── render.rs    ◄─── Catalog/cart/receipt formatting
//! ```

pub mod render;
pub mod repl;

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};

use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront_core::{Catalog, Product, Store};

/// Environment variable naming a JSON catalog file (an array of products).
/// Without it, the built-in sample catalog is used.
pub const CATALOG_ENV: &str = "STOREFRONT_CATALOG";

/// Runs the interactive storefront session.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let catalog = load_catalog()?;
    info!(products = catalog.len(), "Storefront starting");

    let mut store = Store::new(catalog);

    // Re-render the cart after every mutation, the way a UI surface would.
    store.subscribe(|cart| {
        println!("{}", render::render_cart(cart));
    });

    println!("Welcome to the storefront. Type 'help' for commands.");
    println!("{}", render::render_catalog(store.catalog()));

    let stdin = io::stdin();
    run_session(&mut store, stdin.lock(), io::stdout())
}

/// Drives the command loop over arbitrary input/output, so tests can feed
/// scripted sessions without a terminal.
pub fn run_session<R, W>(store: &mut Store, input: R, mut output: W) -> Result<(), Box<dyn Error>>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        match repl::dispatch(store, &line, &mut output)? {
            repl::Flow::Continue => {}
            repl::Flow::Quit => break,
        }
    }

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - show debug messages
/// - Default: INFO, with debug for the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the catalog from the STOREFRONT_CATALOG file if set, falling
/// back to the built-in sample catalog.
fn load_catalog() -> Result<Catalog, Box<dyn Error>> {
    match std::env::var(CATALOG_ENV) {
        Ok(path) => {
            let raw = fs::read_to_string(&path)?;
            let products: Vec<Product> = serde_json::from_str(&raw)?;
            info!(%path, products = products.len(), "Catalog loaded from file");
            Ok(Catalog::new(products)?)
        }
        Err(_) => Ok(Catalog::sample()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_scripted_session_settles() {
        let mut store = Store::with_sample_catalog();
        let script = "add 1\nadd 1\nadd 2\npay 5.00\npay 2.00\nquit\n";
        let mut output = Vec::new();

        run_session(&mut store, Cursor::new(script), &mut output).unwrap();

        assert!(store.cart().is_empty());
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Remaining balance: $2.00"));
        assert!(printed.contains("No change due"));
    }

    #[test]
    fn test_session_survives_bad_input() {
        let mut store = Store::with_sample_catalog();
        let script = "add nonsense\nadd 99\npay -3\nadd 1\n";
        let mut output = Vec::new();

        run_session(&mut store, Cursor::new(script), &mut output).unwrap();

        // The one valid command landed despite the noise before it.
        assert_eq!(store.cart().line_count(), 1);
    }
}
