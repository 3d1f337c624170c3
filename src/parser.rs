// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use pest::Parser;

use crate::error::*;

/// The internal Pest parser.
#[derive(Parser)]
#[grammar = "dockerfile.pest"]
pub(crate) struct DockerfileParser;

/// A Pest Pair for Dockerfile rules.
pub(crate) type Pair<'a> = pest::iterators::Pair<'a, Rule>;

/// The leading parts of a logical instruction line: its name, any `--flags`
/// directly after it, and the remaining (trimmed) arguments.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct InstructionHead<'a> {
  pub name: &'a str,
  pub flags: Vec<&'a str>,
  pub arguments: &'a str
}

impl<'a> InstructionHead<'a> {
  pub(crate) fn parse(input: &'a str, line: usize) -> Result<InstructionHead<'a>> {
    let record = DockerfileParser::parse(Rule::instruction, input)
      .map_err(|e| Error::StructuralError {
        line,
        message: e.to_string()
      })?
      .next()
      .ok_or_else(|| Error::StructuralError {
        line,
        message: "expected an instruction".into()
      })?;

    let mut name = None;
    let mut flags = Vec::new();
    let mut arguments = "";

    for field in record.into_inner() {
      match field.as_rule() {
        Rule::instruction_name => name = Some(field.as_str()),
        Rule::instruction_flag => flags.push(field.as_str()),
        Rule::arguments => arguments = field.as_str().trim(),
        Rule::EOI => (),
        _ => return Err(unexpected_token(field, line))
      }
    }

    let name = name.ok_or_else(|| Error::StructuralError {
      line,
      message: "instructions require a name".into()
    })?;

    Ok(InstructionHead {
      name, flags, arguments
    })
  }

  /// The case-normalized instruction keyword.
  pub(crate) fn keyword(&self) -> String {
    self.name.to_lowercase()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn head_basic() -> Result<()> {
    assert_eq!(
      InstructionHead::parse("FROM alpine:3.11 as builder", 1)?,
      InstructionHead {
        name: "FROM",
        flags: vec![],
        arguments: "alpine:3.11 as builder"
      }
    );

    assert_eq!(
      InstructionHead::parse("  run\t echo hi  ", 1)?.keyword(),
      "run"
    );

    Ok(())
  }

  #[test]
  fn head_flags() -> Result<()> {
    assert_eq!(
      InstructionHead::parse("COPY --from=base --chown=1:1 /a /b", 1)?,
      InstructionHead {
        name: "COPY",
        flags: vec!["--from=base", "--chown=1:1"],
        arguments: "/a /b"
      }
    );

    // quoted sections may contain spaces and are kept verbatim
    assert_eq!(
      InstructionHead::parse(r#"RUN --mount="type=cache, target=/x" make"#, 1)?,
      InstructionHead {
        name: "RUN",
        flags: vec![r#"--mount="type=cache, target=/x""#],
        arguments: "make"
      }
    );

    // flags end at the first word that isn't flag-shaped
    assert_eq!(
      InstructionHead::parse("RUN -x --y", 1)?,
      InstructionHead {
        name: "RUN",
        flags: vec![],
        arguments: "-x --y"
      }
    );

    Ok(())
  }

  #[test]
  fn head_flag_terminator() -> Result<()> {
    assert_eq!(
      InstructionHead::parse("RUN --network=none -- --version", 1)?,
      InstructionHead {
        name: "RUN",
        flags: vec!["--network=none"],
        arguments: "--version"
      }
    );

    assert_eq!(
      InstructionHead::parse("RUN --", 1)?,
      InstructionHead {
        name: "RUN",
        flags: vec![],
        arguments: ""
      }
    );

    Ok(())
  }

  #[test]
  fn head_without_arguments() -> Result<()> {
    assert_eq!(
      InstructionHead::parse("ONBUILD", 1)?,
      InstructionHead {
        name: "ONBUILD",
        flags: vec![],
        arguments: ""
      }
    );

    Ok(())
  }

  #[test]
  fn head_empty() {
    let err = InstructionHead::parse("   ", 7).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(err.line(), Some(7));
  }
}
