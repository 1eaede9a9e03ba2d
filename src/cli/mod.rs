//! CLI module
//!
//! Command-line front end over the client.
//!
//! # Commands
//!
//! - `get` - Paginated GET of a collection endpoint
//! - `post` - POST a JSON body or form fields
//! - `put` - PUT a JSON body
//! - `delete` - DELETE, optionally with a JSON body

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
