// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sh_core::{Difficulty, Flashcard, Table};

use crate::cli::OutputFormat;
use crate::display::{format_card_line, format_outcome};
use crate::error::Result;
use crate::sync::{SyncService, Transport};
use crate::validate::{validate_category, validate_title};

use super::{matches_category, new_id, print_json, with_connected, with_local};

pub fn add(
    front: String,
    back: String,
    category: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    with_connected(|ctx| async move {
        add_impl(&ctx.service, &front, &back, category.as_deref(), output)
            .await
            .map(|_| ())
    })
}

pub(crate) async fn add_impl<T: Transport>(
    service: &SyncService<T>,
    front: &str,
    back: &str,
    category: Option<&str>,
    output: OutputFormat,
) -> Result<Flashcard> {
    let front = validate_title("Front", front)?;
    let back = validate_title("Back", back)?;
    let now = Utc::now();
    let id = new_id(service, "card", Table::Flashcards, &front, now).await?;

    let mut card = Flashcard::new(id, front, back, now);
    if let Some(category) = category {
        card.category = validate_category(category)?;
    }

    let outcome = service.coordinator().create(&card).await?;
    card.synced = outcome.is_synced();

    match output {
        OutputFormat::Text => println!("Created {} ({})", card.id, format_outcome(&outcome)),
        OutputFormat::Json => print_json(&card)?,
    }
    Ok(card)
}

pub fn list(due: bool, category: Option<String>, output: OutputFormat) -> Result<()> {
    with_local(|ctx| async move {
        list_impl(&ctx.service, due, category.as_deref(), output, Utc::now()).await
    })
}

pub(crate) async fn list_impl<T: Transport>(
    service: &SyncService<T>,
    due: bool,
    category: Option<&str>,
    output: OutputFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let cards = filter_cards(
        service.coordinator().list::<Flashcard>().await?,
        due,
        category,
        now,
    );

    match output {
        OutputFormat::Json => print_json(&cards)?,
        OutputFormat::Text if cards.is_empty() && due => println!("No cards due"),
        OutputFormat::Text if cards.is_empty() => println!("No cards"),
        OutputFormat::Text => {
            for card in &cards {
                println!("{}", format_card_line(card, now));
            }
        }
    }
    Ok(())
}

/// Cards ordered by next review, never-reviewed cards first.
pub(crate) fn filter_cards(
    cards: Vec<Flashcard>,
    due: bool,
    category: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<Flashcard> {
    let mut cards: Vec<Flashcard> = cards
        .into_iter()
        .filter(|c| !due || c.is_due(now))
        .filter(|c| matches_category(category, &c.category))
        .collect();
    cards.sort_by(|a, b| {
        a.next_review
            .cmp(&b.next_review)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    cards
}

pub fn review(id: String, difficulty: String) -> Result<()> {
    with_connected(|ctx| async move {
        review_impl(&ctx.service, &id, &difficulty, Utc::now())
            .await
            .map(|_| ())
    })
}

/// Record a review and schedule the next one from the rated difficulty.
pub(crate) async fn review_impl<T: Transport>(
    service: &SyncService<T>,
    id: &str,
    difficulty: &str,
    now: DateTime<Utc>,
) -> Result<Flashcard> {
    let difficulty: Difficulty = difficulty.parse()?;
    let mut card = service.coordinator().require::<Flashcard>(id).await?;
    card.review(difficulty, now);

    let outcome = service.coordinator().update(&card).await?;
    card.synced = outcome.is_synced();

    let next = card
        .next_review
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    println!(
        "Reviewed {} ({}), next review {} ({})",
        card.id,
        difficulty,
        next,
        format_outcome(&outcome)
    );
    Ok(card)
}

pub fn rm(ids: Vec<String>) -> Result<()> {
    with_connected(|ctx| async move { rm_impl(&ctx.service, &ids).await })
}

pub(crate) async fn rm_impl<T: Transport>(service: &SyncService<T>, ids: &[String]) -> Result<()> {
    for id in ids {
        service.coordinator().require::<Flashcard>(id).await?;
        let outcome = service.coordinator().delete::<Flashcard>(id).await?;
        println!("Deleted {} ({})", id, format_outcome(&outcome));
    }
    Ok(())
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
