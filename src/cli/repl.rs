//! # Interactive Editor Loop
//!
//! The main interactive loop. Reads lines with rustyline (history, line
//! editing), dispatches the session words `q`/`quit`, `help`, and
//! `save`, and hands everything else to the table command language.
//! An applied command re-renders the table; a rejected command prints
//! its message and leaves the table as it was.
//!
//! Rejected commands do not terminate the loop. Use `q` or Ctrl+D to
//! exit; Ctrl+C cancels the current line.

use eyre::{Result, WrapErr};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;

use crate::cli::history::history_path;
use crate::cli::render::render_table;
use crate::commands::{CommandOutcome, help_text};
use crate::config::PROMPT;
use crate::session::Session;

pub struct Repl {
    session: Session,
    editor: DefaultEditor,
    dest: PathBuf,
    overwrite: bool,
}

impl Repl {
    pub fn new(session: Session, dest: PathBuf, overwrite: bool) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            session,
            editor,
            dest,
            overwrite,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome()?;

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(true);
        }

        self.editor.add_history_entry(trimmed).ok();

        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return Ok(false);
        }

        if trimmed.eq_ignore_ascii_case("help") {
            println!("{}", help_text());
            return Ok(true);
        }

        if trimmed.eq_ignore_ascii_case("save") {
            match self.session.save(&self.dest, self.overwrite) {
                Ok(()) => println!("Saved '{}'", self.dest.display()),
                Err(err) => eprintln!("Error: {:#}", err),
            }
            return Ok(true);
        }

        match self.session.apply(trimmed) {
            CommandOutcome::Applied => {
                println!("{}", render_table(self.session.table())?);
            }
            CommandOutcome::Rejected(message) => {
                eprintln!("{}", message);
            }
        }

        Ok(true)
    }

    fn print_welcome(&self) -> Result<()> {
        println!("binsheet {}", env!("CARGO_PKG_VERSION"));
        println!(
            "Editing '{}'. Enter \"help\" for commands.",
            self.session.source().display()
        );
        println!();
        println!("{}", render_table(self.session.table())?);
        Ok(())
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                eprintln!("Warning: could not save history: {}", e);
            }
        }
    }
}
