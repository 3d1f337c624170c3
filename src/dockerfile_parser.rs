// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::fs::File;
use std::io::{Read, BufReader};
use std::path::Path;

use serde::Serialize;
use snafu::ResultExt;
use tracing::debug;

pub use crate::error::*;
pub use crate::heredoc::*;
pub use crate::keywords::*;

use crate::instructions::*;
use crate::lexer::*;
use crate::parser::*;

/// A single Dockerfile instruction.
///
/// Instructions are flat records: `ONBUILD` triggers keep `onbuild` as their
/// `name` and carry the embedded instruction's keyword in `sub_name`, with
/// that instruction's flags and values.
///
/// # Example
///
/// ```
/// use dockerfile_instructions::*;
///
/// let instructions = parse(r#"ONBUILD RUN ["cat", "bar"]"#).unwrap();
/// let ins = &instructions[0];
///
/// assert_eq!(ins.name, "onbuild");
/// assert_eq!(ins.sub_name.as_deref(), Some("run"));
/// assert!(ins.json);
/// assert_eq!(ins.values, vec!["cat", "bar"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
  /// The lowercase instruction keyword, e.g. `from`
  pub name: String,

  /// For `ONBUILD` only, the lowercase keyword of the triggered instruction
  pub sub_name: Option<String>,

  /// Whether the arguments were written in exec (JSON array) form
  pub json: bool,

  /// The logical source line (continuations joined), followed by any heredoc
  /// bodies and their delimiters
  pub original: String,

  /// The first source line of this instruction, starting at 1
  pub start_line: usize,

  /// The last source line of this instruction, including heredoc delimiters
  pub end_line: usize,

  /// Flags such as `--from=builder`, verbatim and in source order
  pub flags: Vec<String>,

  /// Positional arguments; see the crate documentation for how each
  /// instruction's arguments are split
  pub values: Vec<String>,

  pub heredocs: Vec<Heredoc>
}

impl Instruction {
  pub(crate) fn from_block(block: Block) -> Result<Instruction> {
    let line = block.start_line;
    let head = InstructionHead::parse(&block.text, line)?;

    let name = head.keyword();
    let mut flags: Vec<String> = head.flags.iter().map(|f| f.to_string()).collect();
    let mut sub_name = None;

    let arguments = if name != "onbuild" {
      parse_arguments(&name, head.arguments, block.escape, line)?
    } else if head.arguments.is_empty() {
      Arguments::default()
    } else {
      let trigger = InstructionHead::parse(head.arguments, line)?;
      let keyword = trigger.keyword();
      if keyword == "onbuild" {
        return Err(Error::FormError {
          line,
          message: "chaining ONBUILD via `ONBUILD ONBUILD` isn't allowed".into()
        });
      }

      flags.extend(trigger.flags.iter().map(|f| f.to_string()));
      let arguments = parse_arguments(&keyword, trigger.arguments, block.escape, line)?;
      sub_name = Some(keyword);

      arguments
    };

    let effective_name = sub_name.as_deref().unwrap_or(&name);
    if arguments.json && HEREDOC_INSTRUCTIONS.contains(&effective_name) {
      if let Some(marker) = arguments.values.iter().find(|v| is_heredoc_marker(v)) {
        return Err(Error::FormError {
          line,
          message: format!("heredoc {} is not supported in JSON form", marker)
        });
      }
    }

    let mut original = block.text;
    if !block.heredocs.is_empty() {
      original.push('\n');
      for heredoc in &block.heredocs {
        original.push_str(&heredoc.content);
        original.push_str(&heredoc.name);
        original.push('\n');
      }
    }

    Ok(Instruction {
      name,
      sub_name,
      json: arguments.json,
      original,
      start_line: block.start_line,
      end_line: block.end_line,
      flags,
      values: arguments.values,
      heredocs: block.heredocs
    })
  }

  /// The keyword whose rules produced `values`: the `sub_name` of an
  /// `ONBUILD` trigger, otherwise `name`.
  pub fn effective_name(&self) -> &str {
    self.sub_name.as_deref().unwrap_or(&self.name)
  }
}

/// Parses Dockerfile text into its instructions, in source order.
///
/// Parsing stops at the first error; no partial results are returned.
///
/// # Example
///
/// ```
/// use dockerfile_instructions::*;
///
/// let instructions = parse(r#"
///   FROM alpine:3.11 as builder
///   RUN echo "hello world" > /hello-world
///
///   FROM scratch
///   COPY --from=builder /hello-world /hello-world
/// "#).unwrap();
///
/// assert_eq!(instructions.len(), 4);
/// assert_eq!(instructions[3].flags, vec!["--from=builder"]);
/// assert_eq!(instructions[3].start_line, 6);
/// ```
pub fn parse(input: &str) -> Result<Vec<Instruction>> {
  let instructions = Lexer::new(input)
    .map(|block| block.and_then(Instruction::from_block))
    .collect::<Result<Vec<_>>>()?;

  if instructions.is_empty() {
    return Err(Error::StructuralError {
      line: input.lines().count(),
      message: "file with no instructions".into()
    });
  }

  debug!(instructions = instructions.len(), "parsed Dockerfile");
  Ok(instructions)
}

fn read_lossy<R: Read>(reader: R) -> std::io::Result<String> {
  let mut buf = Vec::new();
  let mut buf_reader = BufReader::new(reader);
  buf_reader.read_to_end(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parses a Dockerfile from a reader.
///
/// Input that isn't valid UTF-8 is decoded lossily.
pub fn parse_reader<R>(reader: R) -> Result<Vec<Instruction>>
where
  R: Read
{
  let content = read_lossy(reader).context(ReadError)?;

  parse(&content)
}

/// Parses the Dockerfile at `path`.
///
/// If the file can't be opened or read, an `Error::AccessError` naming the
/// path is returned.
pub fn parse_file<P>(path: P) -> Result<Vec<Instruction>>
where
  P: AsRef<Path>
{
  let path = path.as_ref();
  let content = File::open(path)
    .and_then(read_lossy)
    .context(AccessError { path })?;

  parse(&content)
}
