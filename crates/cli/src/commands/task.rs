// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use sh_core::{Table, Task};

use crate::cli::OutputFormat;
use crate::display::{format_outcome, format_task_detail, format_task_line};
use crate::error::{Error, Result};
use crate::sync::{SyncService, Transport};
use crate::validate::{parse_date, validate_category, validate_description, validate_title};

use super::{matches_category, new_id, print_json, with_connected, with_local};

/// Task fields given on the command line. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    /// `YYYY-MM-DD`, or `none` to clear.
    pub due: Option<String>,
    pub category: Option<String>,
}

/// Apply `fields` to `task`. Returns true if anything was given.
fn apply_fields(task: &mut Task, fields: &TaskFields) -> Result<bool> {
    let mut changed = false;
    if let Some(title) = &fields.title {
        task.title = validate_title("Title", title)?;
        changed = true;
    }
    if let Some(description) = &fields.description {
        validate_description(description)?;
        task.description = description.trim().to_string();
        changed = true;
    }
    if let Some(priority) = &fields.priority {
        task.priority = priority.parse()?;
        changed = true;
    }
    if let Some(due) = &fields.due {
        task.due_date = if due.trim().eq_ignore_ascii_case("none") {
            None
        } else {
            Some(parse_date(due)?)
        };
        changed = true;
    }
    if let Some(category) = &fields.category {
        task.category = validate_category(category)?;
        changed = true;
    }
    Ok(changed)
}

pub fn add(fields: TaskFields, output: OutputFormat) -> Result<()> {
    with_connected(|ctx| async move { add_impl(&ctx.service, fields, output).await.map(|_| ()) })
}

/// Internal implementation that accepts the service for testing.
pub(crate) async fn add_impl<T: Transport>(
    service: &SyncService<T>,
    fields: TaskFields,
    output: OutputFormat,
) -> Result<Task> {
    let title = validate_title("Title", fields.title.as_deref().unwrap_or_default())?;
    let now = Utc::now();
    let id = new_id(service, "task", Table::Tasks, &title, now).await?;

    let mut task = Task::new(id, title, now);
    apply_fields(
        &mut task,
        &TaskFields {
            title: None,
            ..fields
        },
    )?;

    let outcome = service.coordinator().create(&task).await?;
    task.synced = outcome.is_synced();

    match output {
        OutputFormat::Text => println!("Created {} ({})", task.id, format_outcome(&outcome)),
        OutputFormat::Json => print_json(&task)?,
    }
    Ok(task)
}

pub fn list(all: bool, category: Option<String>, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move { list_impl(&ctx.service, all, category.as_deref(), output).await })
}

pub(crate) async fn list_impl<T: Transport>(
    service: &SyncService<T>,
    all: bool,
    category: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let tasks = filter_tasks(service.coordinator().list::<Task>().await?, all, category);

    match output {
        OutputFormat::Json => print_json(&tasks)?,
        OutputFormat::Text if tasks.is_empty() => println!("No tasks"),
        OutputFormat::Text => {
            for task in &tasks {
                println!("{}", format_task_line(task));
            }
        }
    }
    Ok(())
}

/// Open tasks first, then by due date (undated last), then by creation.
pub(crate) fn filter_tasks(tasks: Vec<Task>, all: bool, category: Option<&str>) -> Vec<Task> {
    let mut tasks: Vec<Task> = tasks
        .into_iter()
        .filter(|t| all || !t.completed)
        .filter(|t| matches_category(category, &t.category))
        .collect();
    tasks.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    tasks
}

pub fn show(id: String, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move { show_impl(&ctx.service, &id, output).await })
}

pub(crate) async fn show_impl<T: Transport>(
    service: &SyncService<T>,
    id: &str,
    output: OutputFormat,
) -> Result<()> {
    let task = service.coordinator().require::<Task>(id).await?;
    match output {
        OutputFormat::Text => println!("{}", format_task_detail(&task)),
        OutputFormat::Json => print_json(&task)?,
    }
    Ok(())
}

pub fn done(ids: Vec<String>) -> Result<()> {
    with_connected(|ctx| async move { done_impl(&ctx.service, &ids).await })
}

pub(crate) async fn done_impl<T: Transport>(service: &SyncService<T>, ids: &[String]) -> Result<()> {
    for id in ids {
        let mut task = service.coordinator().require::<Task>(id).await?;
        if task.completed {
            println!("{} is already done", task.id);
            continue;
        }
        task.completed = true;
        task.updated_at = Utc::now();
        let outcome = service.coordinator().update(&task).await?;
        println!("Completed {} ({})", task.id, format_outcome(&outcome));
    }
    Ok(())
}

pub fn edit(id: String, fields: TaskFields, reopen: bool) -> Result<()> {
    with_connected(|ctx| async move { edit_impl(&ctx.service, &id, fields, reopen).await })
}

pub(crate) async fn edit_impl<T: Transport>(
    service: &SyncService<T>,
    id: &str,
    fields: TaskFields,
    reopen: bool,
) -> Result<()> {
    let mut task = service.coordinator().require::<Task>(id).await?;
    let mut changed = apply_fields(&mut task, &fields)?;
    if reopen {
        task.completed = false;
        changed = true;
    }
    if !changed {
        return Err(Error::NothingToEdit);
    }
    task.updated_at = Utc::now();

    let outcome = service.coordinator().update(&task).await?;
    println!("Updated {} ({})", task.id, format_outcome(&outcome));
    Ok(())
}

pub fn rm(ids: Vec<String>) -> Result<()> {
    with_connected(|ctx| async move { rm_impl(&ctx.service, &ids).await })
}

pub(crate) async fn rm_impl<T: Transport>(service: &SyncService<T>, ids: &[String]) -> Result<()> {
    for id in ids {
        service.coordinator().require::<Task>(id).await?;
        let outcome = service.coordinator().delete::<Task>(id).await?;
        println!("Deleted {} ({})", id, format_outcome(&outcome));
    }
    Ok(())
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
