//! Spaced-repetition item commands: add, review, list.

use std::io::BufRead;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use uuid::Uuid;
use vocab_core::scheduler::{ReviewStatus, SchedulerItem};

use super::{read_answer, truncate};
use crate::context::AppContext;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn add(ctx: &AppContext, content: String, summary: String, tags: Vec<String>) -> Result<()> {
    let store = ctx.items();
    let mut pools = store.load()?;
    let item = SchedulerItem::new(content, summary, tags, today());
    let id = pools.add(item);
    store.save(&pools)?;
    println!("Added item {id}");
    Ok(())
}

/// Interactive review of everything due today. Each item is saved as soon
/// as it is marked, so an abort keeps the reviews already made.
pub fn review(ctx: &AppContext, tags: &[String], input: &mut dyn BufRead) -> Result<()> {
    let store = ctx.items();
    let mut pools = store.load()?;
    let today = today();

    let due: Vec<Uuid> = pools.due(today, tags).iter().map(|it| it.id).collect();
    if due.is_empty() {
        println!("Nothing due today.");
        return Ok(());
    }

    for id in due {
        let Some(item) = pools.get_active(id) else {
            continue;
        };
        println!("\n{}", "-".repeat(60));
        println!("{}", item.content);
        if !item.summary.is_empty() {
            println!("[summary] {}", item.summary);
        }

        // Invalid marks re-prompt; nothing is mutated until the mark parses.
        let status = loop {
            let Some(mark) = read_answer(input, "Mark (O/Δ/X): ")? else {
                return Ok(());
            };
            match ReviewStatus::parse(&mark) {
                Ok(status) => break status,
                Err(err) => println!("{err}"),
            }
        };

        let summary_update = match read_answer(input, "Update summary (blank keeps current): ")? {
            Some(s) if !s.is_empty() => Some(s),
            _ => None,
        };

        let receipt = pools.review(id, status, summary_update, today)?;
        store.save(&pools)?;
        if receipt.promoted {
            println!("Mastered! Moved to completed.");
        } else {
            println!(
                "Next review: {} (strength {})",
                receipt.next_review_date, receipt.memory_count
            );
        }
    }

    println!("\nSession complete.");
    Ok(())
}

pub fn list(ctx: &AppContext, all: bool, completed: bool) -> Result<()> {
    let pools = ctx.items().load()?;
    let shown: Vec<&SchedulerItem> = if completed {
        pools.completed.iter().collect()
    } else if all {
        pools.active.iter().collect()
    } else {
        pools.due(today(), &[])
    };

    if shown.is_empty() {
        println!("(no items)");
        return Ok(());
    }
    for item in &shown {
        let id = item.id.to_string();
        println!(
            "{} | next={} | strength={} | {} | {}",
            &id[..8],
            item.next_review_date,
            item.memory_count,
            item.status.as_str(),
            truncate(&item.content, 60)
        );
    }
    println!("Total: {} items", shown.len());
    Ok(())
}
