// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sh_core::{SessionType, StudySession, Table};

use crate::cli::OutputFormat;
use crate::display::{format_outcome, format_session_line};
use crate::error::Result;
use crate::sync::{SyncService, Transport};
use crate::validate::validate_title;

use super::{new_id, print_json, with_connected, with_local};

pub fn log(subject: String, minutes: u32, session_type: String) -> Result<()> {
    with_connected(|ctx| async move {
        log_impl(&ctx.service, &subject, minutes, &session_type, Utc::now())
            .await
            .map(|_| ())
    })
}

/// Record a session of `minutes` that ended at `end_time`.
pub(crate) async fn log_impl<T: Transport>(
    service: &SyncService<T>,
    subject: &str,
    minutes: u32,
    session_type: &str,
    end_time: DateTime<Utc>,
) -> Result<StudySession> {
    let subject = validate_title("Subject", subject)?;
    let session_type: SessionType = session_type.parse()?;
    let id = new_id(service, "session", Table::StudySessions, &subject, end_time).await?;

    let mut session = StudySession::finished(id, subject, session_type, minutes, end_time);
    let outcome = service.coordinator().create(&session).await?;
    session.synced = outcome.is_synced();

    println!(
        "Logged {} ({} min {}) ({})",
        session.id,
        session.duration,
        session.session_type,
        format_outcome(&outcome)
    );
    Ok(session)
}

pub fn list(subject: Option<String>, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move { list_impl(&ctx.service, subject.as_deref(), output).await })
}

pub(crate) async fn list_impl<T: Transport>(
    service: &SyncService<T>,
    subject: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let sessions = filter_sessions(
        service.coordinator().list::<StudySession>().await?,
        subject,
    );

    match output {
        OutputFormat::Json => print_json(&sessions)?,
        OutputFormat::Text if sessions.is_empty() => println!("No sessions"),
        OutputFormat::Text => {
            for session in &sessions {
                println!("{}", format_session_line(session));
            }
            println!("Total: {} min", total_minutes(&sessions));
        }
    }
    Ok(())
}

/// Newest first. Subject matching ignores case.
pub(crate) fn filter_sessions(
    sessions: Vec<StudySession>,
    subject: Option<&str>,
) -> Vec<StudySession> {
    let mut sessions: Vec<StudySession> = sessions
        .into_iter()
        .filter(|s| match subject {
            Some(wanted) => s.subject.eq_ignore_ascii_case(wanted.trim()),
            None => true,
        })
        .collect();
    sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sessions
}

pub(crate) fn total_minutes(sessions: &[StudySession]) -> u64 {
    sessions.iter().map(|s| u64::from(s.duration)).sum()
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
