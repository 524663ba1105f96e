//! Outline ingestion: turns the achievement library markdown into blocks.
//!
//! Recognised structure:
//!   `## CATEGORY`      category heading (leading emoji stripped)
//!   `#### Subcategory` optional grouping inside a category
//!   `### Title`        block title, followed by a `**bold**` achievement line
//!
//! Anything else is skipped. A title without a bold line is dropped without
//! error; only a source with no category heading at all is rejected.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info};

use crate::blocks::classify::classify;
use crate::blocks::models::Block;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold pattern"));

/// Category headings whose sections are commentary, not achievements.
const SKIPPED_SECTIONS: &[&str] = &["NOTES ON", "ACHIEVEMENT THEMES"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Source contains no category headings")]
    NoCategories,

    #[error("Failed to read block source {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the outline file.
pub async fn read_source(path: &Path) -> Result<String, IngestError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })
}

fn category_name(heading: &str) -> &str {
    heading
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
}

/// Parses outline text into classified blocks, in source order.
pub fn ingest(source: &str) -> Result<Vec<Block>, IngestError> {
    let lines: Vec<&str> = source.lines().map(str::trim).collect();

    let mut blocks = Vec::new();
    let mut saw_category = false;
    let mut category: Option<String> = None;
    let mut subcategory: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;

        if line.is_empty() || line.starts_with("*Note:") || line == "---" {
            continue;
        }

        if let Some(heading) = line.strip_prefix("## ") {
            saw_category = true;
            let name = category_name(heading);
            subcategory = None;
            if SKIPPED_SECTIONS.iter().any(|s| name.starts_with(s)) {
                debug!("Skipping section '{name}'");
                category = None;
            } else {
                category = Some(name.to_string());
            }
            continue;
        }

        let Some(current) = category.as_deref() else {
            continue;
        };

        if let Some(heading) = line.strip_prefix("#### ") {
            subcategory = Some(heading.trim().to_string());
            continue;
        }

        if let Some(heading) = line.strip_prefix("### ") {
            let title = heading.trim();
            let content = lines
                .get(i)
                .and_then(|next| BOLD.captures(next))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str());

            match content {
                Some(content) => {
                    i += 1;
                    blocks.push(classify(current, subcategory.as_deref(), title, content));
                }
                None => debug!("Block '{title}' has no bold achievement line, skipping"),
            }
        }
    }

    if !saw_category {
        return Err(IngestError::NoCategories);
    }

    info!("Ingested {} blocks", blocks.len());
    Ok(blocks)
}
