// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::collections::HashSet;
use std::str::SplitInclusive;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::*;
use crate::heredoc::*;
use crate::util::*;

/// Parser directives recognized at the top of a Dockerfile.
const DIRECTIVE_NAMES: &[&str] = &["syntax", "escape", "check"];

/// One logical instruction: continuation lines joined, comments dropped and
/// any heredoc bodies captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
  /// The joined logical line, without heredoc bodies
  pub text: String,

  pub start_line: usize,

  /// The last physical line covered, including heredoc terminators
  pub end_line: usize,

  pub heredocs: Vec<Heredoc>,

  /// The escape character in effect for this block
  pub escape: char
}

/// Tracks `# directive=value` lines, which may only appear before anything
/// else in the file.
#[derive(Debug)]
struct Directives {
  escape: char,
  seen: HashSet<String>,
  done: bool
}

impl Directives {
  fn new() -> Directives {
    Directives {
      escape: '\\',
      seen: HashSet::new(),
      done: false
    }
  }

  fn process(&mut self, line: &str, line_number: usize) -> Result<()> {
    lazy_static! {
      static ref DIRECTIVE: Regex = Regex::new(
        r"^#\s*([a-zA-Z][a-zA-Z0-9]*)\s*=\s*(.+?)\s*$"
      ).unwrap();
    }

    if self.done {
      return Ok(());
    }

    let captures = match DIRECTIVE.captures(line) {
      Some(captures) => captures,
      None => {
        self.done = true;
        return Ok(());
      }
    };

    let key = captures[1].to_lowercase();
    let value = &captures[2];

    if !DIRECTIVE_NAMES.contains(&key.as_str()) {
      self.done = true;
      return Ok(());
    }

    if !self.seen.insert(key.clone()) {
      return Err(Error::StructuralError {
        line: line_number,
        message: format!("only one {} parser directive can be used", key)
      });
    }

    if key == "escape" {
      self.escape = match value {
        "\\" => '\\',
        "`" => '`',
        _ => return Err(Error::StructuralError {
          line: line_number,
          message: format!("invalid escape token '{}' does not match ` or \\", value)
        })
      };

      debug!(escape = %self.escape, "escape directive");
    }

    Ok(())
  }
}

fn is_comment(line: &str) -> bool {
  line.trim_start().starts_with('#')
}

/// Splits Dockerfile text into logical instruction blocks.
///
/// The lexer is a single-pass iterator; it yields at most one error, after
/// which it is exhausted.
pub(crate) struct Lexer<'a> {
  lines: SplitInclusive<'a, char>,
  directives: Directives,

  /// The number of the most recently consumed physical line
  line: usize,

  finished: bool
}

impl<'a> Lexer<'a> {
  pub(crate) fn new(input: &'a str) -> Lexer<'a> {
    Lexer {
      lines: input.split_inclusive('\n'),
      directives: Directives::new(),
      line: 0,
      finished: false
    }
  }

  fn next_line(&mut self) -> Option<&'a str> {
    let line = self.lines.next()?;
    self.line += 1;

    Some(line)
  }

  /// Strips a trailing escape character (and any spaces or tabs after it),
  /// returning whether the line continues onto the next one.
  fn trim_continuation<'l>(&self, line: &'l str) -> (&'l str, bool) {
    let trimmed = line.trim_end_matches(&[' ', '\t'][..]);

    match trimmed.strip_suffix(self.directives.escape) {
      Some(stripped) => (stripped, true),
      None => (line, false)
    }
  }

  fn capture_heredocs(&mut self, text: &str, start_line: usize) -> Result<Vec<Heredoc>> {
    let mut heredocs = Vec::new();

    for marker in heredoc_markers(text, start_line)? {
      let mut content = String::new();
      let mut terminated = false;

      while let Some(line) = self.next_line() {
        if marker.is_terminator(line) {
          terminated = true;
          break;
        }

        content.push_str(line);
      }

      if !terminated {
        return Err(Error::StructuralError {
          line: start_line,
          message: format!("unterminated heredoc {}", marker.name)
        });
      }

      trace!(name = %marker.name, end_line = self.line, "captured heredoc");
      heredocs.push(marker.into_heredoc(content));
    }

    Ok(heredocs)
  }

  fn next_block(&mut self) -> Result<Option<Block>> {
    while let Some(raw) = self.next_line() {
      let mut line = trim_newline(raw);
      if self.line == 1 {
        line = line.trim_start_matches('\u{feff}');
      }

      let line = line.trim_start();
      self.directives.process(line, self.line)?;
      if is_comment(line) {
        continue;
      }

      let start_line = self.line;
      let (content, mut continued) = self.trim_continuation(line);
      if !continued && content.is_empty() {
        continue;
      }

      let mut text = content.to_string();
      while continued {
        let raw = match self.next_line() {
          Some(raw) => raw,
          None => return Err(Error::StructuralError {
            line: start_line,
            message: "unterminated line continuation at end of file".into()
          })
        };

        // comments and blank lines inside a continuation are dropped but
        // still count towards the block's span
        let line = trim_newline(raw);
        if is_comment(line) || line.trim_start().is_empty() {
          continue;
        }

        let (content, more) = self.trim_continuation(line);
        text.push_str(content);
        continued = more;
      }

      let heredocs = self.capture_heredocs(&text, start_line)?;

      trace!(start_line, end_line = self.line, "assembled logical line");
      return Ok(Some(Block {
        text,
        start_line,
        end_line: self.line,
        heredocs,
        escape: self.directives.escape
      }));
    }

    Ok(None)
  }
}

impl<'a> Iterator for Lexer<'a> {
  type Item = Result<Block>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.finished {
      return None;
    }

    match self.next_block() {
      Ok(Some(block)) => Some(Ok(block)),
      Ok(None) => {
        self.finished = true;
        None
      },
      Err(e) => {
        self.finished = true;
        Some(Err(e))
      }
    }
  }
}
