//! Command implementations.

pub mod item;
pub mod quiz;
pub mod sessions;
pub mod word;

use std::io::{self, BufRead, Write};

use anyhow::Result;

/// Prompt and read one line. `None` means end of input, which aborts the
/// surrounding interactive loop.
pub(crate) fn read_answer(input: &mut dyn BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Char-safe truncation for table output.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    }
}
