// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

//! Per-instruction rules for turning an instruction's arguments into values.

mod exec;
pub(crate) use exec::*;

mod arg;
pub(crate) use arg::*;

mod env;
pub(crate) use env::*;

mod healthcheck;
pub(crate) use healthcheck::*;

mod misc;
pub(crate) use misc::*;

use crate::error::*;
use crate::util::*;

/// The positional values of an instruction and whether they were written in
/// exec (JSON) form.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub(crate) struct Arguments {
  pub values: Vec<String>,
  pub json: bool
}

impl Arguments {
  pub(crate) fn shell(values: Vec<String>) -> Arguments {
    Arguments { values, json: false }
  }

  pub(crate) fn exec(values: Vec<String>) -> Arguments {
    Arguments { values, json: true }
  }
}

/// Splits `arguments` according to the rules of the (lowercase) instruction
/// `keyword`.
///
/// Unrecognized keywords are treated like `RUN`: a JSON array or a single
/// shell string.
pub(crate) fn parse_arguments(
  keyword: &str,
  arguments: &str,
  escape: char,
  line: usize
) -> Result<Arguments> {
  match keyword {
    "add" | "copy" | "volume" => parse_maybe_json_list(arguments, line),
    "from" | "expose" => Ok(Arguments::shell(split_whitespace(arguments))),
    "maintainer" | "stopsignal" | "user" | "workdir" => Ok(parse_string(arguments)),
    "arg" => Ok(parse_name_or_name_value(arguments, escape)),
    "env" | "label" => parse_name_value(keyword, arguments, escape, line),
    "healthcheck" => parse_health_config(arguments, line),
    _ => parse_maybe_json(arguments, line)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::test_util::*;

  #[test]
  fn unknown_instructions() -> Result<()> {
    let ins = parse_single("FOO --bar baz qux")?;
    assert_eq!(ins.name, "foo");
    assert_eq!(ins.flags, strings(&["--bar"]));
    assert_eq!(ins.values, strings(&["baz qux"]));

    let ins = parse_single(r#"frobnicate ["a", "b"]"#)?;
    assert_eq!(ins.name, "frobnicate");
    assert!(ins.json);
    assert_eq!(ins.values, strings(&["a", "b"]));

    Ok(())
  }

  #[test]
  fn keyword_case() -> Result<()> {
    assert_eq!(
      parse_arguments("expose", "80/tcp  443", '\\', 1)?,
      Arguments::shell(strings(&["80/tcp", "443"]))
    );

    assert_eq!(parse_single("eXpOsE 80")?.name, "expose");

    Ok(())
  }
}
