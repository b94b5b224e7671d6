//! vocab CLI: interactive vocabulary and spaced-repetition trainer.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod context;
mod speech;
mod store;

#[derive(Parser)]
#[command(name = "vocab", version, about = "Personal vocabulary and spaced-repetition trainer")]
struct Cli {
    /// Base directory for all data (default: $VOCAB_HOME, then the
    /// platform data dir)
    #[arg(long, global = true)]
    base: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a word or sentence (re-adding replaces definition/examples/tags,
    /// stats are kept)
    Add {
        word: String,

        #[arg(long, default_value = "")]
        definition: String,

        /// Example sentence (repeatable)
        #[arg(long = "example")]
        examples: Vec<String>,

        /// Tag (repeatable; tag "sentence" marks a sentence-learning item)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Replace the definition and/or tags of an existing word
    Edit {
        word: String,

        #[arg(long)]
        definition: Option<String>,

        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },

    /// Delete a word and its cached audio
    Delete { word: String },

    /// Print one record as JSON
    Show { word: String },

    /// Play the pronunciation of a word, or of one of its examples
    Say {
        word: String,

        /// Example index (0-based) instead of the word itself
        #[arg(long)]
        example: Option<usize>,
    },

    /// List the collection with per-mode counters
    List {
        /// Sort order: alpha, wrong, recent
        #[arg(long, default_value = "alpha")]
        order: String,
    },

    /// Run an interactive quiz session
    Quiz {
        /// Quiz mode: choice, spelling, recall
        mode: String,

        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Selection strategy: random, least, wrong, hard, fresh
        #[arg(long, default_value = "random")]
        strategy: String,

        /// Only quiz words carrying this tag (repeatable)
        #[arg(long = "include-tag")]
        include: Vec<String>,

        /// Skip words carrying this tag (repeatable)
        #[arg(long = "exclude-tag")]
        exclude: Vec<String>,
    },

    /// Show recent quiz sessions, most recent first
    Sessions {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Spaced-repetition items (O/Δ/X review cycle)
    #[command(subcommand)]
    Item(ItemCommands),
}

#[derive(Subcommand)]
enum ItemCommands {
    /// Add a new learning item
    Add {
        content: String,

        #[arg(long, default_value = "")]
        summary: String,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Review everything due today
    Review {
        /// Only items sharing this tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List due items (default), all active items, or completed items
    List {
        #[arg(long)]
        all: bool,

        #[arg(long)]
        completed: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vocab=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let base = context::resolve_base(cli.base);

    let result = run(base, cli.command);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(base: PathBuf, command: Commands) -> anyhow::Result<()> {
    let ctx = context::AppContext::open(base)?;
    let stdin = io::stdin();

    match command {
        Commands::Add {
            word,
            definition,
            examples,
            tags,
        } => commands::word::add(&ctx, &word, definition, examples, tags),
        Commands::Edit {
            word,
            definition,
            tags,
        } => commands::word::edit(&ctx, &word, definition, tags),
        Commands::Delete { word } => commands::word::delete(&ctx, &word),
        Commands::Show { word } => commands::word::show(&ctx, &word),
        Commands::Say { word, example } => commands::word::say(&ctx, &word, example),
        Commands::List { order } => commands::word::list(&ctx, &order),
        Commands::Quiz {
            mode,
            count,
            strategy,
            include,
            exclude,
        } => commands::quiz::run(
            &ctx,
            commands::quiz::parse_options(&mode, count, &strategy, include, exclude)?,
            &mut stdin.lock(),
        ),
        Commands::Sessions { limit } => commands::sessions::show(&ctx, limit),
        Commands::Item(item) => match item {
            ItemCommands::Add {
                content,
                summary,
                tags,
            } => commands::item::add(&ctx, content, summary, tags),
            ItemCommands::Review { tags } => commands::item::review(&ctx, &tags, &mut stdin.lock()),
            ItemCommands::List { all, completed } => commands::item::list(&ctx, all, completed),
        },
    }
}
