//! Domain error types for PiiGuard.
//!
//! All fallible operations at module boundaries return [`Result<T, PiiGuardError>`]:
//!
//! ```rust,no_run
//! use piiguard::domain::Result;
//!
//! fn example() -> Result<()> {
//!     // Errors are converted using the ? operator
//!     let config = piiguard::config::load_config("piiguard.toml")?;
//!     println!("{}", config.server.bind_address);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::PiiGuardError;
pub use result::Result;
