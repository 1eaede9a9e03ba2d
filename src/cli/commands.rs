//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GitLab REST request helper
#[derive(Parser, Debug)]
#[command(name = "gitlab-requester")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client options file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// GitLab host URL (without /api/v4)
    #[arg(long, global = true, env = "GITLAB_URL")]
    pub url: Option<String>,

    /// Private token
    #[arg(long, global = true, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// OAuth token (preferred over --token)
    #[arg(long, global = true, env = "GITLAB_OAUTH_TOKEN", hide_env_values = true)]
    pub oauth_token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a collection endpoint, following pagination links
    Get {
        /// Endpoint path relative to the API root (e.g. projects)
        endpoint: String,

        /// Fetch only this page
        #[arg(long)]
        page: Option<u32>,

        /// Records per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Stop following links at this page number (0 is no limit)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Wrap output with pagination metadata
        #[arg(long)]
        show_pagination: bool,

        /// Extra query parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Print records as each page arrives instead of collecting them
        #[arg(long, conflicts_with = "show_pagination")]
        stream: bool,
    },

    /// POST to an endpoint
    Post {
        /// Endpoint path relative to the API root
        endpoint: String,

        /// JSON body
        #[arg(short, long)]
        data: Option<String>,

        /// Send the body as url-encoded form fields
        #[arg(long)]
        form: bool,
    },

    /// PUT to an endpoint
    Put {
        /// Endpoint path relative to the API root
        endpoint: String,

        /// JSON body
        #[arg(short, long)]
        data: Option<String>,
    },

    /// DELETE an endpoint
    Delete {
        /// Endpoint path relative to the API root
        endpoint: String,

        /// JSON body
        #[arg(short, long)]
        data: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
}
