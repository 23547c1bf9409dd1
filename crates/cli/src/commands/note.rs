// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use sh_core::{Note, Table};

use crate::cli::OutputFormat;
use crate::display::{format_note_detail, format_note_line, format_outcome};
use crate::error::Result;
use crate::sync::{SyncService, Transport};
use crate::validate::{normalize_tags, validate_category, validate_content, validate_title};

use super::{matches_category, new_id, print_json, with_connected, with_local};

/// Note fields given on the command line.
#[derive(Debug, Clone, Default)]
pub struct NoteFields {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

pub fn add(fields: NoteFields, output: OutputFormat) -> Result<()> {
    with_connected(|ctx| async move { add_impl(&ctx.service, fields, output).await.map(|_| ()) })
}

pub(crate) async fn add_impl<T: Transport>(
    service: &SyncService<T>,
    fields: NoteFields,
    output: OutputFormat,
) -> Result<Note> {
    let title = validate_title("Title", &fields.title)?;
    let content = fields.content.unwrap_or_default();
    validate_content(&content)?;
    let tags = normalize_tags(&fields.tags)?;

    let now = Utc::now();
    let id = new_id(service, "note", Table::Notes, &title, now).await?;
    let mut note = Note::new(id, title, content, now);
    note.tags = tags;
    if let Some(category) = &fields.category {
        note.category = validate_category(category)?;
    }

    let outcome = service.coordinator().create(&note).await?;
    note.synced = outcome.is_synced();

    match output {
        OutputFormat::Text => println!("Created {} ({})", note.id, format_outcome(&outcome)),
        OutputFormat::Json => print_json(&note)?,
    }
    Ok(note)
}

pub fn list(tag: Option<String>, category: Option<String>, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move {
        list_impl(&ctx.service, tag.as_deref(), category.as_deref(), output).await
    })
}

pub(crate) async fn list_impl<T: Transport>(
    service: &SyncService<T>,
    tag: Option<&str>,
    category: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let notes = filter_notes(service.coordinator().list::<Note>().await?, tag, category);

    match output {
        OutputFormat::Json => print_json(&notes)?,
        OutputFormat::Text if notes.is_empty() => println!("No notes"),
        OutputFormat::Text => {
            for note in &notes {
                println!("{}", format_note_line(note));
            }
        }
    }
    Ok(())
}

/// Most recently updated first.
pub(crate) fn filter_notes(notes: Vec<Note>, tag: Option<&str>, category: Option<&str>) -> Vec<Note> {
    let tag = tag.map(str::trim);
    let mut notes: Vec<Note> = notes
        .into_iter()
        .filter(|n| match tag {
            Some(tag) => n.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
            None => true,
        })
        .filter(|n| matches_category(category, &n.category))
        .collect();
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    notes
}

pub fn show(id: String, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move { show_impl(&ctx.service, &id, output).await })
}

pub(crate) async fn show_impl<T: Transport>(
    service: &SyncService<T>,
    id: &str,
    output: OutputFormat,
) -> Result<()> {
    let note = service.coordinator().require::<Note>(id).await?;
    match output {
        OutputFormat::Text => println!("{}", format_note_detail(&note)),
        OutputFormat::Json => print_json(&note)?,
    }
    Ok(())
}

pub fn rm(ids: Vec<String>) -> Result<()> {
    with_connected(|ctx| async move { rm_impl(&ctx.service, &ids).await })
}

pub(crate) async fn rm_impl<T: Transport>(service: &SyncService<T>, ids: &[String]) -> Result<()> {
    for id in ids {
        service.coordinator().require::<Note>(id).await?;
        let outcome = service.coordinator().delete::<Note>(id).await?;
        println!("Deleted {} ({})", id, format_outcome(&outcome));
    }
    Ok(())
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
