//! Line-based terminal I/O.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Prompts on stdout and reads whole lines from stdin.
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Reads one trimmed line, `None` once stdin is closed.
    pub async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label} ");
        std::io::stdout().flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|line| line.trim().to_owned()))
    }

    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{question} [y/N]")).await?;
        Ok(answer.is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    pub fn say(&self, text: impl Display) {
        println!("{text}");
    }

    /// Wipes the screen so a memorised sequence does not stay readable.
    pub fn clear(&self) {
        print!("\x1b[2J\x1b[H");
        let _ = std::io::stdout().flush();
    }
}
