//! Interactive selection through `fzf`

use crate::error::{NoteVaultError, Result};
use log::debug;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Lets the user pick one of a list of items
pub trait FuzzyFinder {
    /// Index of the chosen item in `items`
    fn find<T>(&self, items: &[T], label: impl Fn(&T) -> String) -> Result<usize>;
}

/// `fzf` exit code when the user aborts with Esc or Ctrl-C
const FZF_INTERRUPTED: i32 = 130;

/// Spawns `fzf` and reads back the selected line
#[derive(Debug, Clone)]
pub struct FzfFinder {
    program: String,
}

impl FzfFinder {
    pub fn new() -> Self {
        Self {
            program: "fzf".to_string(),
        }
    }

    /// Use a different `fzf`-compatible binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FzfFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyFinder for FzfFinder {
    fn find<T>(&self, items: &[T], label: impl Fn(&T) -> String) -> Result<usize> {
        if items.is_empty() {
            return Err(NoteVaultError::NoSelection);
        }

        // Each line carries its index in a hidden first field
        let input: String = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}\t{}\n", i, label(item).replace(['\n', '\t'], " ")))
            .collect();

        let mut child = Command::new(&self.program)
            .args(["--delimiter", "\t", "--with-nth", "2..", "--layout", "reverse"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    NoteVaultError::picker_unavailable(format!("{} is not installed", self.program))
                }
                _ => NoteVaultError::picker_unavailable(e.to_string()),
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(input.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        match output.status.code() {
            Some(FZF_INTERRUPTED) => return Err(NoteVaultError::Cancelled),
            Some(0) => {}
            code => {
                debug!("{} exited with {:?}", self.program, code);
                return Err(NoteVaultError::NoSelection);
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_selection(&stdout, items.len())
    }
}

fn parse_selection(stdout: &str, len: usize) -> Result<usize> {
    stdout
        .lines()
        .next()
        .and_then(|line| line.split('\t').next())
        .and_then(|index| index.trim().parse::<usize>().ok())
        .filter(|&index| index < len)
        .ok_or(NoteVaultError::NoSelection)
}
