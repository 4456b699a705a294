//! File and stdio helpers shared by the command handlers.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and parse a JSON document from `path`, or from stdin when `path`
/// is `-`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Serialize `value` as JSON to `path`, or to stdout when `path` is `None`.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    path: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    rendered.push('\n');

    match path {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("failed to write stdout")?,
    }
    Ok(())
}
