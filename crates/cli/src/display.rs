// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sh_core::{Flashcard, Note, Priority, StudySession, Task};

use crate::sync::{QueueReason, SkipReason, SyncOutcome, SyncReport, SyncStatus};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Wrap text at word boundaries if it's a single line.
///
/// - If content contains newlines: return as-is (preserve user formatting)
/// - If content is single line >width: wrap at word boundaries
/// - If content is single line <=width: return as-is
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.len() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

fn indent(content: &str) -> String {
    wrap_text(content, WRAP_WIDTH)
        .lines()
        .map(|l| format!("    {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Marker shown after records the remote has not confirmed.
fn sync_marker(synced: bool) -> &'static str {
    if synced {
        ""
    } else {
        " *"
    }
}

/// Format a task as a single line.
///
/// Output format: `[x] task-a1b2c3d4  Title (high, due 2026-03-01)`
pub fn format_task_line(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    let mut extras = Vec::new();
    if task.priority != Priority::Medium {
        extras.push(task.priority.to_string());
    }
    if let Some(due) = task.due_date {
        extras.push(format!("due {}", due));
    }
    let extras = if extras.is_empty() {
        String::new()
    } else {
        format!(" ({})", extras.join(", "))
    };
    format!(
        "[{}] {}  {}{}{}",
        check,
        task.id,
        task.title,
        extras,
        sync_marker(task.synced)
    )
}

pub fn format_task_detail(task: &Task) -> String {
    let mut lines = vec![
        format!("[{}] {}", task.category, task.id),
        format!("Title: {}", task.title),
        format!(
            "Status: {}",
            if task.completed { "done" } else { "open" }
        ),
        format!("Priority: {}", task.priority),
    ];
    if let Some(due) = task.due_date {
        lines.push(format!("Due: {}", due));
    }
    lines.push(format!("Created: {}", format_time(&task.created_at)));
    lines.push(format!("Updated: {}", format_time(&task.updated_at)));
    lines.push(format!("Synced: {}", if task.synced { "yes" } else { "no" }));
    if !task.description.is_empty() {
        lines.push(String::new());
        lines.push("Description:".to_string());
        lines.push(indent(&task.description));
    }
    lines.join("\n")
}

/// Format a flashcard as a single line, with its next review date.
pub fn format_card_line(card: &Flashcard, now: DateTime<Utc>) -> String {
    let review = match card.next_review {
        Some(next) if next > now => format!("next {}", next.format("%Y-%m-%d")),
        _ => "due".to_string(),
    };
    format!(
        "{}  {} -> {} ({}, {}){}",
        card.id,
        card.front,
        card.back,
        card.difficulty,
        review,
        sync_marker(card.synced)
    )
}

pub fn format_note_line(note: &Note) -> String {
    let tags = if note.tags.is_empty() {
        String::new()
    } else {
        format!(" #{}", note.tags.join(" #"))
    };
    format!(
        "{}  {}{}{}",
        note.id,
        note.title,
        tags,
        sync_marker(note.synced)
    )
}

/// Format a note with metadata and indented content.
///
/// Output format:
/// ```text
/// [general] note-a1b2c3d4
/// Title: Cell biology
/// Updated: 2026-01-10 10:30
///
///     Content goes here, potentially
///     wrapped across multiple lines.
/// ```
pub fn format_note_detail(note: &Note) -> String {
    let mut lines = vec![
        format!("[{}] {}", note.category, note.id),
        format!("Title: {}", note.title),
    ];
    if !note.tags.is_empty() {
        lines.push(format!("Tags: {}", note.tags.join(", ")));
    }
    lines.push(format!("Updated: {}", format_time(&note.updated_at)));
    if !note.content.is_empty() {
        lines.push(String::new());
        lines.push(indent(&note.content));
    }
    lines.join("\n")
}

pub fn format_session_line(session: &StudySession) -> String {
    format!(
        "{}  {}  {} min {} ({}){}",
        session.id,
        format_time(&session.start_time),
        session.duration,
        session.session_type,
        session.subject,
        sync_marker(session.synced)
    )
}

/// Describe where a saved change went.
pub fn format_outcome(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced => "synced".to_string(),
        SyncOutcome::Queued {
            reason: QueueReason::Offline,
            ..
        } => "queued (offline)".to_string(),
        SyncOutcome::Queued {
            reason: QueueReason::RemoteFailed(msg),
            ..
        } => format!("queued ({})", msg),
    }
}

pub fn format_report(report: &SyncReport) -> String {
    match report.skipped {
        Some(SkipReason::Offline) => "Offline: nothing synced".to_string(),
        Some(SkipReason::AlreadySyncing) => "Sync already in progress".to_string(),
        None => {
            let mut line = format!("Synced {} change(s)", report.synced);
            if report.failed > 0 {
                line.push_str(&format!(", {} failed", report.failed));
            }
            if report.remaining > 0 {
                line.push_str(&format!(", {} still queued", report.remaining));
            }
            line
        }
    }
}

pub fn format_status(status: &SyncStatus, remote: Option<&str>) -> String {
    let mut lines = Vec::new();
    match remote {
        Some(url) => lines.push(format!("Remote: {}", url)),
        None => lines.push("Remote: none (local only)".to_string()),
    }
    lines.push(format!(
        "Status: {}",
        if status.is_online { "online" } else { "offline" }
    ));
    lines.push(format!("Pending: {}", status.pending_sync));
    if status.failing > 0 {
        lines.push(format!("Failing: {}", status.failing));
    }
    lines.push(format!(
        "Last sync: {}",
        status
            .last_sync
            .as_ref()
            .map(format_time)
            .unwrap_or_else(|| "never".to_string())
    ));
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
