//! Interactive prompts for CLI user input.

use std::io::{self, BufRead, IsTerminal, Write};

use srsgen_generate::SeedMode;

/// Check if we're in interactive mode
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Result type for prompts
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur during prompts
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Input cancelled by user")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Ask how to treat an existing context directory. Empty input picks
/// maintenance; end of input cancels.
pub fn choose_seed_mode<R, W>(mut input: R, mut output: W, context_dir: &str) -> PromptResult<SeedMode>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{context_dir} already exists.")?;
    writeln!(output, "  [M]aintenance: keep existing files, add missing templates")?;
    writeln!(output, "  [C]lean: delete {context_dir} and rebuild it")?;

    loop {
        write!(output, "? Choose mode [M/c] › ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }

        match line.trim().to_lowercase().as_str() {
            "" | "m" | "maintenance" => return Ok(SeedMode::Maintenance),
            "c" | "clean" => return Ok(SeedMode::Clean),
            other => writeln!(output, "Unknown choice '{other}', enter M or C.")?,
        }
    }
}
