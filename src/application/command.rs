//! Line-oriented command parser for the interactive shell.
//!
//! The command word ends at the first space; the rest of the line is a
//! comma-separated field list. Fields are trimmed and empty ones dropped.

use std::io::{self, BufRead};

use tracing::{instrument, trace, warn};

pub const ADD_USAGE: &str = "Usage: 'add parent name, child1[, child2 ...]'";
pub const FIND_USAGE: &str = "Usage: 'find name'";

pub const HELP_TEXT: &str = "User Commands for offspring:
add parent_name, child1 [, child2 ...]\t# find parent and add child1,...
find name\t# search for name and print their family if name is found.
print [name]\t# breadth first traversal of offspring from name.
size [name]\t# count members in the [sub]tree.
height [name]\t# return the height of [sub]tree.
tree [name]\t# show the [sub]tree indented.
init\t\t# delete current tree and restart with an empty tree.
help\t\t# print this information.
quit\t\t# delete current tree and end program.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { parent: String, children: Vec<String> },
    Find(String),
    Print(Option<String>),
    Size(Option<String>),
    Height(Option<String>),
    Tree(Option<String>),
    Help,
    Init,
    Quit,
    /// Malformed arguments; carries the usage line to show.
    Usage(&'static str),
    /// Empty input line.
    Blank,
    Unknown(String),
}

/// Splits a comma-separated list into trimmed, non-empty fields.
pub fn split_fields(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(String::from)
        .collect()
}

/// Reads one line into `buf` and decodes it, replacing invalid UTF-8 with
/// U+FFFD. The line ending is stripped; `None` at end of input.
pub fn read_line_lossy<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    if let std::borrow::Cow::Owned(_) = line {
        warn!("replaced invalid UTF-8 in input line");
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

impl Command {
    #[instrument(level = "trace")]
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\n', '\r']).trim_start_matches(' ');
        if line.trim().is_empty() {
            return Command::Blank;
        }
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let mut fields = split_fields(rest);
        trace!(word, ?fields, "parsed");

        let name = fields.first().cloned();
        match word.trim() {
            "add" => {
                if fields.len() < 2 {
                    return Command::Usage(ADD_USAGE);
                }
                let parent = fields.remove(0);
                Command::Add {
                    parent,
                    children: fields,
                }
            }
            "find" => match name {
                Some(name) => Command::Find(name),
                None => Command::Usage(FIND_USAGE),
            },
            "print" => Command::Print(name),
            "size" => Command::Size(name),
            "height" => Command::Height(name),
            "tree" => Command::Tree(name),
            "help" => Command::Help,
            "init" => Command::Init,
            "quit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}
