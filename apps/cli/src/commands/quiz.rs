//! Interactive quiz sessions.
//!
//! The loop here only gathers answers and renders feedback; selection and
//! grading decisions come from `vocab-core` with the answer already in hand.

use std::io::BufRead;
use std::time::Instant;

use anyhow::{bail, Result};
use chrono::Utc;
use rand::Rng;
use vocab_core::quiz::{build_choice_prompt, grade_choice, grade_typed, Outcome, SessionTally};
use vocab_core::select::{select, Strategy, TagFilter};
use vocab_core::types::{QuizMode, SessionLogEntry, WordCollection};

use super::{read_answer, truncate};
use crate::context::AppContext;

pub struct QuizOptions {
    pub mode: QuizMode,
    pub count: usize,
    pub strategy: Strategy,
    pub filter: TagFilter,
}

pub fn parse_options(
    mode: &str,
    count: usize,
    strategy: &str,
    include: Vec<String>,
    exclude: Vec<String>,
) -> Result<QuizOptions> {
    let mode = match QuizMode::from_str(mode) {
        Some(QuizMode::Sentence) | None => {
            bail!("unknown quiz mode '{mode}' (choice, spelling, recall)")
        }
        Some(mode) => mode,
    };
    let Some(strategy) = Strategy::from_str(strategy) else {
        bail!("unknown strategy '{strategy}' (random, least, wrong, hard, fresh)");
    };
    Ok(QuizOptions {
        mode,
        count,
        strategy,
        filter: TagFilter { include, exclude },
    })
}

/// What happened to one selected item.
enum Step {
    Graded(Outcome),
    /// Not quizzable (e.g. no definition); does not count toward the total.
    Skipped,
    /// End of input; the session stops between items.
    Aborted,
}

pub fn run(ctx: &AppContext, opts: QuizOptions, input: &mut dyn BufRead) -> Result<()> {
    let store = ctx.words();
    let mut words = store.load()?;

    let mut rng = rand::thread_rng();
    let selected = select(
        &words,
        opts.count,
        opts.strategy,
        opts.mode,
        &opts.filter,
        &mut rng,
    );
    if selected.is_empty() {
        println!("Nothing to quiz.");
        return Ok(());
    }

    let started_at = Utc::now();
    let timer = Instant::now();
    let mut tally = SessionTally::default();

    for key in &selected {
        let step = match opts.mode {
            QuizMode::Choice => ask_choice(ctx, &words, key, &mut rng, input)?,
            QuizMode::Spelling => ask_spelling(ctx, &words, key, input)?,
            QuizMode::Recall => ask_recall(ctx, &words, key, input)?,
            QuizMode::Sentence => unreachable!("not a session mode"),
        };

        match step {
            Step::Graded(outcome) => {
                let record = words.get_mut(key).expect("selected keys exist");
                let scoring = record.scoring_mode(opts.mode);
                record.stats_mut(scoring).record(outcome.is_correct());
                tally.record(outcome);
                // Write-through: an abort or crash keeps every graded item.
                store.save(&words)?;
            }
            Step::Skipped => continue,
            Step::Aborted => break,
        }
    }

    if tally.total == 0 {
        println!("Nothing graded.");
        return Ok(());
    }

    println!(
        "\nAccuracy {}/{} ({}%)",
        tally.correct,
        tally.total,
        tally.accuracy()
    );
    let entry = SessionLogEntry::new(
        opts.mode,
        tally.total,
        tally.correct,
        started_at,
        timer.elapsed().as_secs_f64(),
    );
    ctx.log().append(&entry)?;
    Ok(())
}

fn ask_choice<R: Rng>(
    ctx: &AppContext,
    words: &WordCollection,
    key: &str,
    rng: &mut R,
    input: &mut dyn BufRead,
) -> Result<Step> {
    let Some(prompt) = build_choice_prompt(words, key, rng) else {
        tracing::debug!(word = %key, "no definition to quiz, skipping");
        return Ok(Step::Skipped);
    };

    if !ctx.speech.speak(key) {
        println!("\nWord: {key}");
    }
    println!("Choose the correct definition:");
    for (i, option) in prompt.options.iter().enumerate() {
        println!(" {} {}", i + 1, truncate(option, 80));
    }

    let Some(answer) = read_answer(input, "Your choice: ")? else {
        return Ok(Step::Aborted);
    };

    if grade_choice(&prompt, &answer) {
        println!("✔ Correct\n");
        Ok(Step::Graded(Outcome::Correct))
    } else {
        println!("✘ Wrong → {key}: {}\n", prompt.options[prompt.answer]);
        ctx.speech.speak(key);
        Ok(Step::Graded(Outcome::Wrong))
    }
}

fn ask_spelling(
    ctx: &AppContext,
    words: &WordCollection,
    key: &str,
    input: &mut dyn BufRead,
) -> Result<Step> {
    let is_sentence = words[key].is_sentence();

    if !ctx.speech.speak(key) {
        println!("\n(audio unavailable) Type this: {key}");
    }

    let Some(mut answer) = read_answer(input, "▶ Type what you heard: ")? else {
        return Ok(Step::Aborted);
    };
    if answer.is_empty() {
        // One automatic replay, then grade whatever comes back.
        if !ctx.speech.speak(key) {
            println!("(audio unavailable) Type this: {key}");
        }
        match read_answer(input, "▶ Type what you heard: ")? {
            Some(second) => answer = second,
            None => return Ok(Step::Aborted),
        }
    }

    let outcome = grade_typed(is_sentence, &answer, key, ctx.config.sentence_threshold);
    match outcome {
        Outcome::Correct => println!("✔ Perfect\n"),
        Outcome::Almost => println!("± Almost (1 letter off) → {key}\n"),
        Outcome::Wrong => println!("✘ Wrong → {key}\n"),
    }
    Ok(Step::Graded(outcome))
}

fn ask_recall(
    ctx: &AppContext,
    words: &WordCollection,
    key: &str,
    input: &mut dyn BufRead,
) -> Result<Step> {
    let record = &words[key];
    if record.definition.is_empty() {
        return Ok(Step::Skipped);
    }

    println!("\nDefinition: {}", record.definition);
    let Some(answer) = read_answer(input, "▶ Type the word: ")? else {
        return Ok(Step::Aborted);
    };

    let outcome = grade_typed(
        record.is_sentence(),
        &answer,
        key,
        ctx.config.sentence_threshold,
    );
    match outcome {
        Outcome::Correct => println!("✔ Correct\n"),
        Outcome::Almost => println!("± Almost (1 letter off) → {key}\n"),
        Outcome::Wrong => {
            println!("✘ Wrong → {key}\n");
            ctx.speech.speak(key);
        }
    }
    Ok(Step::Graded(outcome))
}
