//! # Storefront Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load the catalog (STOREFRONT_CATALOG file or built-in sample)
//! 3. Create the store and register the cart renderer as a listener
//! 4. Run the interactive session until `quit` or EOF

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    match storefront_terminal_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
