//! Token-gated path migration.
//!
//! A session may only move to a new network path after presenting a token
//! obtained from the control path. The [`Migrator`] holds the most recent token
//! and drives the external [`TokenIssuer`] and [`PathDialer`] capabilities.

pub mod path;
pub mod services;
pub mod token;

mod migrator;

pub use path::{validate_direct_path, DirectPath};
pub use services::{PathDialer, TokenIssuer};
pub use token::MigrationToken;

pub use migrator::Migrator;
