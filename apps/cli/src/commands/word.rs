//! Word collection commands: add, edit, delete, show, say, list.

use anyhow::{bail, Result};
use chrono::Utc;
use vocab_core::types::{QuizMode, WordRecord};

use super::truncate;
use crate::context::AppContext;

/// Idempotent upsert: re-adding replaces definition, examples, and tags;
/// stats and added_at stay.
pub fn add(
    ctx: &AppContext,
    word: &str,
    definition: String,
    examples: Vec<String>,
    tags: Vec<String>,
) -> Result<()> {
    let key = word.trim().to_string();
    let store = ctx.words();
    let mut words = store.load()?;

    match words.get_mut(&key) {
        Some(existing) => {
            existing.definition = definition;
            existing.examples = examples;
            existing.tags = tags;
        }
        None => {
            words.insert(
                key.clone(),
                WordRecord::new(definition, examples, tags, Utc::now()),
            );
        }
    }
    store.save(&words)?;

    ctx.speech.speak(&key);
    println!("Added/updated '{key}'.");
    Ok(())
}

pub fn edit(
    ctx: &AppContext,
    word: &str,
    definition: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<()> {
    let key = word.trim();
    let store = ctx.words();
    let mut words = store.load()?;

    let Some(record) = words.get_mut(key) else {
        println!("Not found.");
        return Ok(());
    };
    if let Some(definition) = definition {
        record.definition = definition;
    }
    if let Some(tags) = tags {
        record.tags = tags;
    }
    store.save(&words)?;
    println!("'{key}' has been updated.");
    Ok(())
}

pub fn delete(ctx: &AppContext, word: &str) -> Result<()> {
    let key = word.trim();
    let store = ctx.words();
    let mut words = store.load()?;

    if words.remove(key).is_none() {
        println!("Not found.");
        return Ok(());
    }
    store.save(&words)?;
    ctx.speech.evict(key);
    println!("'{key}' has been deleted.");
    Ok(())
}

pub fn show(ctx: &AppContext, word: &str) -> Result<()> {
    let words = ctx.words().load()?;
    match words.get(word.trim()) {
        Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
        None => println!("Not found."),
    }
    Ok(())
}

/// Play the pronunciation of a word, or of one of its stored examples.
pub fn say(ctx: &AppContext, word: &str, example: Option<usize>) -> Result<()> {
    let key = word.trim();
    let words = ctx.words().load()?;
    let Some(record) = words.get(key) else {
        println!("Not found.");
        return Ok(());
    };

    let text = match example {
        None => key,
        Some(idx) => match record.examples.get(idx) {
            Some(example) => {
                println!("{example}");
                example.as_str()
            }
            None => {
                println!("Index out of range.");
                return Ok(());
            }
        },
    };

    if !ctx.speech.speak(text) {
        println!("(audio unavailable) {text}");
    }
    Ok(())
}

pub fn list(ctx: &AppContext, order: &str) -> Result<()> {
    let words = ctx.words().load()?;
    if words.is_empty() {
        println!("(no words yet)");
        return Ok(());
    }

    let mut entries: Vec<(&String, &WordRecord)> = words.iter().collect();
    match order {
        "alpha" => {}
        "wrong" => entries.sort_by_key(|(_, rec)| {
            std::cmp::Reverse(
                rec.stats_for(QuizMode::Choice).wrong + rec.stats_for(QuizMode::Spelling).wrong,
            )
        }),
        "recent" => entries.sort_by(|(_, a), (_, b)| b.added_at.cmp(&a.added_at)),
        other => bail!("unknown order '{other}' (alpha, wrong, recent)"),
    }

    for (key, rec) in entries {
        let choice = rec.stats_for(QuizMode::Choice);
        let spelling = rec.stats_for(QuizMode::Spelling);
        println!(
            "{:<20} choice {}/{} | spell {}/{}  {}",
            key,
            choice.correct,
            choice.wrong,
            spelling.correct,
            spelling.wrong,
            truncate(&rec.definition, 60)
        );
    }
    Ok(())
}
