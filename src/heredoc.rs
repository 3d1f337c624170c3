// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use enquote::unquote;
use pest::Parser;
use serde::Serialize;

use crate::error::*;
use crate::parser::*;
use crate::util::*;

/// Instructions whose shell-form arguments may open heredocs.
pub(crate) const HEREDOC_INSTRUCTIONS: &[&str] = &["add", "copy", "run"];

/// A heredoc body attached to an instruction.
///
/// # Example
///
/// ```
/// use dockerfile_instructions::*;
///
/// let instructions = parse("RUN 3<<EOF\nhello\nEOF\n").unwrap();
/// assert_eq!(
///   instructions[0].heredocs,
///   vec![Heredoc::new("EOF", 3, "hello\n")]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heredoc {
  /// The delimiter, with any shell quoting removed
  pub name: String,

  /// The file descriptor the heredoc is redirected to, `0` unless written as
  /// `N<<NAME`
  pub file_descriptor: u32,

  /// The verbatim body, including newlines, excluding the delimiter line
  pub content: String
}

impl Heredoc {
  pub fn new<S1, S2>(name: S1, file_descriptor: u32, content: S2) -> Heredoc
  where
    S1: Into<String>,
    S2: Into<String>,
  {
    Heredoc {
      name: name.into(),
      file_descriptor,
      content: content.into()
    }
  }
}

/// A heredoc redirection found on an instruction line, before its body has
/// been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeredocMarker {
  pub name: String,
  pub file_descriptor: u32,

  /// `<<-`: leading tabs are ignored when matching the delimiter
  pub chomp: bool
}

fn unescape_bare(s: &str) -> String {
  let mut ret = String::with_capacity(s.len());
  let mut chars = s.chars();

  while let Some(ch) = chars.next() {
    if ch == '\\' {
      if let Some(next) = chars.next() {
        ret.push(next);
      }
    } else {
      ret.push(ch);
    }
  }

  ret
}

fn unquote_word(word: Pair, line: usize) -> Result<String> {
  let mut ret = String::new();

  for part in word.into_inner() {
    match part.as_rule() {
      Rule::heredoc_double_quoted => {
        let s = unquote(part.as_str()).map_err(|e| Error::StructuralError {
          line,
          message: format!(
            "error unescaping heredoc delimiter {}: {:?}", part.as_str(), e
          )
        })?;

        ret.push_str(&s);
      },
      Rule::heredoc_single_quoted => {
        let s = part.as_str();
        ret.push_str(&s[1..s.len() - 1]);
      },
      Rule::heredoc_bare => ret.push_str(&unescape_bare(part.as_str())),
      _ => return Err(unexpected_token(part, line))
    }
  }

  Ok(ret)
}

impl HeredocMarker {
  /// Parses a single raw shell word such as `<<EOF` or `2<<-"END"`, returning
  /// `None` if the word isn't a heredoc redirection.
  pub(crate) fn parse(word: &str, line: usize) -> Result<Option<HeredocMarker>> {
    let record = match DockerfileParser::parse(Rule::heredoc, word) {
      Ok(mut pairs) => match pairs.next() {
        Some(record) => record,
        None => return Ok(None)
      },
      Err(_) => return Ok(None)
    };

    let mut name = None;
    let mut file_descriptor = 0;
    let mut chomp = false;

    for field in record.into_inner() {
      match field.as_rule() {
        // an absent or out of range descriptor means stdin
        Rule::heredoc_fd => file_descriptor = field.as_str().parse().unwrap_or(0),
        Rule::heredoc_chomp => chomp = true,
        Rule::heredoc_word => name = Some(unquote_word(field, line)?),
        Rule::EOI => (),
        _ => return Err(unexpected_token(field, line))
      }
    }

    Ok(name.map(|name| HeredocMarker {
      name, file_descriptor, chomp
    }))
  }

  /// Whether a raw physical line closes this heredoc.
  pub(crate) fn is_terminator(&self, line: &str) -> bool {
    let candidate = trim_newline(line);
    let candidate = if self.chomp {
      candidate.trim_start_matches('\t')
    } else {
      candidate
    };

    candidate == self.name
  }

  pub(crate) fn into_heredoc(self, content: String) -> Heredoc {
    Heredoc {
      name: self.name,
      file_descriptor: self.file_descriptor,
      content
    }
  }
}

/// Whether a word is a heredoc redirection, e.g. `<<EOF`.
pub(crate) fn is_heredoc_marker(word: &str) -> bool {
  matches!(HeredocMarker::parse(word, 0), Ok(Some(_)))
}

/// Finds the heredocs opened by a logical instruction line, in the order they
/// appear.
///
/// Only `RUN`, `COPY` and `ADD` (directly or below `ONBUILD`) take heredocs,
/// and only in shell form.
pub(crate) fn heredoc_markers(text: &str, line: usize) -> Result<Vec<HeredocMarker>> {
  if !text.contains("<<") {
    return Ok(Vec::new());
  }

  let head = InstructionHead::parse(text, line)?;
  let mut keyword = head.keyword();
  let mut arguments = head.arguments;

  if keyword == "onbuild" && !arguments.is_empty() {
    let nested = InstructionHead::parse(arguments, line)?;
    keyword = nested.keyword();
    arguments = nested.arguments;
  }

  if !HEREDOC_INSTRUCTIONS.contains(&keyword.as_str()) || is_json_shaped(arguments) {
    return Ok(Vec::new());
  }

  parse_words(text, '\\')
    .iter()
    .filter_map(|word| HeredocMarker::parse(word, line).transpose())
    .collect()
}
