//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::ClientContext;
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::pagination::PaginationOptions;
use crate::types::{JsonObject, JsonValue};
use futures::TryStreamExt;
use std::pin::pin;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let ctx = ClientContext::new(self.client_options()?)?;
        debug!("Using {:?}", ctx);

        match &self.cli.command {
            Commands::Get {
                endpoint,
                page,
                per_page,
                max_pages,
                show_pagination,
                params,
                stream,
            } => {
                let mut options = PaginationOptions {
                    page: *page,
                    per_page: *per_page,
                    max_pages: *max_pages,
                    show_pagination: *show_pagination,
                    query: JsonObject::new(),
                };
                for param in params {
                    let (key, value) = parse_param(param)?;
                    options.query.insert(key, value);
                }

                if *stream {
                    return self.stream(&ctx, endpoint, &options).await;
                }

                let result = ctx.get::<JsonValue>(endpoint, &options).await?;
                self.output(&serde_json::to_value(result)?)
            }
            Commands::Post {
                endpoint,
                data,
                form,
            } => {
                let body = parse_body(data.as_deref())?;
                let response = if *form {
                    let JsonValue::Object(fields) = body else {
                        return Err(Error::config("--form requires a JSON object in --data"));
                    };
                    ctx.post_form(endpoint, &fields).await?
                } else {
                    ctx.post(endpoint, body).await?
                };
                self.output(&response)
            }
            Commands::Put { endpoint, data } => {
                let response = ctx.put(endpoint, parse_body(data.as_deref())?).await?;
                self.output(&response)
            }
            Commands::Delete { endpoint, data } => {
                let response = ctx.delete(endpoint, parse_body(data.as_deref())?).await?;
                self.output(&response)
            }
        }
    }

    /// Resolve client options: config file, then environment, then flags
    fn client_options(&self) -> Result<ClientOptions> {
        let mut options = match &self.cli.config {
            Some(path) => ClientOptions::from_file(path)?,
            None => ClientOptions::default(),
        }
        .with_env();

        if let Some(url) = &self.cli.url {
            options.url.clone_from(url);
        }
        if let Some(token) = &self.cli.token {
            options.token = Some(token.clone());
        }
        if let Some(token) = &self.cli.oauth_token {
            options.oauth_token = Some(token.clone());
        }

        Ok(options)
    }

    /// Print records page by page
    async fn stream(
        &self,
        ctx: &ClientContext,
        endpoint: &str,
        options: &PaginationOptions,
    ) -> Result<()> {
        let mut pages = pin!(ctx.pages::<JsonValue>(endpoint, options));
        while let Some(page) = pages.try_next().await? {
            for record in &page.records {
                self.output(record)?;
            }
        }
        Ok(())
    }

    /// Output a JSON document
    fn output(&self, value: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Parse `key=value`; the value is read as JSON when it parses, else as a string
fn parse_param(param: &str) -> Result<(String, JsonValue)> {
    let (key, raw) = param
        .split_once('=')
        .ok_or_else(|| Error::config(format!("Invalid parameter '{param}', expected key=value")))?;

    let value = serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));
    Ok((key.trim().to_string(), value))
}

fn parse_body(data: Option<&str>) -> Result<JsonValue> {
    match data {
        Some(text) => Ok(serde_json::from_str(text)?),
        None => Ok(JsonValue::Null),
    }
}
