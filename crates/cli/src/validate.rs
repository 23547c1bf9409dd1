// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{Error, Result};

// Input length limits
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_DESCRIPTION_LENGTH: usize = 1_000_000;
pub const MAX_CONTENT_LENGTH: usize = 200_000;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_TAG_LENGTH: usize = 50;
pub const MAX_TAGS_PER_NOTE: usize = 20;

fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(Error::FieldTooLong { field, actual, max });
    }
    Ok(())
}

/// Validate a required single-line field, returning it trimmed.
pub fn validate_title(field: &'static str, title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field });
    }
    check_length(field, trimmed, MAX_TITLE_LENGTH)?;
    Ok(trimmed.to_string())
}

/// Validate that a description is within length limits
pub fn validate_description(description: &str) -> Result<()> {
    check_length("Description", description, MAX_DESCRIPTION_LENGTH)
}

/// Validate that note content is within length limits
pub fn validate_content(content: &str) -> Result<()> {
    check_length("Content", content, MAX_CONTENT_LENGTH)
}

/// Validate a category, returning it trimmed.
pub fn validate_category(category: &str) -> Result<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field: "Category" });
    }
    check_length("Category", trimmed, MAX_CATEGORY_LENGTH)?;
    Ok(trimmed.to_string())
}

/// Trim tags, drop empty ones and duplicates, and enforce the limits.
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>> {
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || result.iter().any(|t| t == tag) {
            continue;
        }
        check_length("Tag", tag, MAX_TAG_LENGTH)?;
        result.push(tag.to_string());
    }
    if result.len() > MAX_TAGS_PER_NOTE {
        return Err(Error::TagLimitExceeded {
            max: MAX_TAGS_PER_NOTE,
        });
    }
    Ok(result)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Validate an export or import file path, expanding a leading `~/`.
pub fn validate_file_path(path: &str) -> Result<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return Err(Error::FieldEmpty { field: "File path" });
    }
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = dirs::home_dir().ok_or_else(|| {
                Error::InvalidInput("could not determine home directory".to_string())
            })?;
            Ok(home.join(rest))
        }
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
