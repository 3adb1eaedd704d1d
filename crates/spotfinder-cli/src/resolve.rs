//! Command handlers for `resolve` and `parse`.
//!
//! Both read their input from a file or stdin and write JSON to stdout.
//! Logs go to stderr so the output can be piped.

use std::path::Path;

use anyhow::Context;
use spotfinder_core::{AppConfig, ResolveRequest};
use spotfinder_resolver::Resolver;
use tokio::io::AsyncReadExt;

/// Read the whole input, from `path` when given, otherwise from stdin.
pub(crate) async fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Turn raw input into a request, either as JSON or as suggestion text.
pub(crate) fn parse_request(raw: &str, suggestions: bool) -> anyhow::Result<ResolveRequest> {
    if suggestions {
        return Ok(spotfinder_core::parse_suggestions(raw));
    }
    serde_json::from_str(raw).context("input is not a valid request payload")
}

pub(crate) fn render<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// Run the full pipeline and print `{results}`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, a category list
/// is missing, or the provider clients cannot be built. Provider failures
/// during resolution only shrink the result list.
pub(crate) async fn run_resolve(
    config: &AppConfig,
    input: Option<&Path>,
    suggestions: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    let raw = read_input(input).await?;
    let request = parse_request(&raw, suggestions)?;

    let resolver = Resolver::from_config(config)?;
    let response = resolver.resolve_request(request).await?;

    tracing::info!(records = response.results.len(), "resolution complete");
    println!("{}", render(&response, pretty)?);
    Ok(())
}

/// Print the request extracted from suggestion text.
pub(crate) async fn run_parse(input: Option<&Path>) -> anyhow::Result<()> {
    let raw = read_input(input).await?;
    let request = spotfinder_core::parse_suggestions(&raw);
    println!("{}", render(&request, true)?);
    Ok(())
}
