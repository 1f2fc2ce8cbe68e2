//! Interactive session: one ancestry tree, one command per input line.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::{debug, info, instrument, warn};

use crate::application::command::{read_line_lossy, Command, HELP_TEXT};
use crate::application::loader::load_file;
use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{AncestryTree, DomainError};

/// Label used in place of a node name for whole-tree queries.
const WHOLE_TREE: &str = "Ancestry Tree";

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Height as shown to the user: the raw node-counting height minus one, so a
/// lone root shows 0 and an empty tree or unknown name shows -1.
pub fn display_height(raw: usize) -> i64 {
    i64::try_from(raw).map_or(i64::MAX, |h| h - 1)
}

#[derive(Debug)]
pub struct Session {
    tree: AncestryTree,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            tree: AncestryTree::with_queue_increment(settings.queue_increment),
            settings,
        }
    }

    pub fn tree(&self) -> &AncestryTree {
        &self.tree
    }

    /// Bulk loads a family file. A missing file, a directory or rejected lines
    /// are reported on `err` and the session goes on.
    #[instrument(level = "debug", skip(self, err))]
    pub fn load<E: Write>(&mut self, path: &Path, err: &mut E) -> ApplicationResult<()> {
        if !path.exists() {
            writeln!(err, "{}: No such file or directory", path.display())?;
            return Ok(());
        }
        if path.is_dir() {
            writeln!(err, "{}: Is a directory", path.display())?;
            return Ok(());
        }
        let report = load_file(&mut self.tree, path)?;
        for rejected in &report.rejected {
            self.report(err, rejected)?;
        }
        info!(
            added = report.added,
            rejected = report.rejected.len(),
            "loaded {}",
            path.display()
        );
        Ok(())
    }

    /// Reads commands until `quit`, an unrecognized command or end of input.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
        err: &mut E,
    ) -> ApplicationResult<()> {
        let mut buf = Vec::new();
        loop {
            self.prompt(out)?;
            let Some(line) = read_line_lossy(&mut input, &mut buf).with_context("read command")?
            else {
                debug!("end of input");
                break;
            };
            if self.execute(Command::parse(&line), out, err)? == Flow::Quit {
                break;
            }
        }
        writeln!(out)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, out, err))]
    pub fn execute<W: Write, E: Write>(
        &mut self,
        command: Command,
        out: &mut W,
        err: &mut E,
    ) -> ApplicationResult<Flow> {
        match command {
            Command::Add { parent, children } => {
                writeln!(out, "adding...")?;
                for child in &children {
                    if let Err(e) = self.tree.add_child(&parent, Some(child.as_str())) {
                        self.report(err, &e)?;
                    }
                }
            }
            Command::Find(name) => match self.tree.find_node(&name) {
                Some(idx) => {
                    writeln!(out, "find {}:", name)?;
                    if let Some(line) = self.tree.family_of(idx) {
                        writeln!(out, "{}", line)?;
                    }
                }
                None => self.report(err, &DomainError::NotFound(name))?,
            },
            Command::Print(name) => {
                writeln!(out, "print {}:", name.as_deref().unwrap_or(WHOLE_TREE))?;
                if name.is_none() && self.tree.is_empty() {
                    writeln!(out)?;
                } else {
                    match self.tree.print_tree(name.as_deref(), out) {
                        Ok(()) => {}
                        Err(e @ DomainError::NotFound(_)) => self.report(err, &e)?,
                        Err(e) => return Err(e.into()),
                    }
                }
            }
            Command::Size(name) => {
                let size = self.tree.tree_size(name.as_deref());
                writeln!(out, "size {}: {}", name.as_deref().unwrap_or(WHOLE_TREE), size)?;
            }
            Command::Height(name) => {
                let height = display_height(self.tree.tree_height(name.as_deref()));
                writeln!(out, "height {}: {}", name.as_deref().unwrap_or(WHOLE_TREE), height)?;
            }
            Command::Tree(name) => match self.tree.to_termtree(name.as_deref()) {
                Ok(rendered) => write!(out, "{}", rendered)?,
                Err(e) => self.report(err, &e)?,
            },
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Init => {
                writeln!(out, "init")?;
                self.tree.clear();
            }
            Command::Quit => {
                self.tree.clear();
                return Ok(Flow::Quit);
            }
            Command::Usage(usage) => writeln!(out, "{}", usage)?,
            Command::Blank => {}
            Command::Unknown(word) => {
                warn!("unrecognized command '{}', ending session", word);
                self.tree.clear();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt<W: Write>(&self, out: &mut W) -> ApplicationResult<()> {
        if self.settings.color {
            write!(out, "{}", self.settings.prompt.cyan())?;
        } else {
            write!(out, "{}", self.settings.prompt)?;
        }
        out.flush()?;
        Ok(())
    }

    fn report<E: Write>(&self, err: &mut E, msg: &impl Display) -> ApplicationResult<()> {
        if self.settings.color {
            writeln!(err, "{}: {}", "error".red().bold(), msg)?;
        } else {
            writeln!(err, "error: {}", msg)?;
        }
        Ok(())
    }
}
