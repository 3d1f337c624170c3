// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use super::Arguments;

/// Parses instructions taking a single free-form string (`MAINTAINER`,
/// `STOPSIGNAL`, `USER`, `WORKDIR`).
pub(crate) fn parse_string(arguments: &str) -> Arguments {
  if arguments.is_empty() {
    return Arguments::default();
  }

  Arguments::shell(vec![arguments.to_string()])
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::error::*;
  use crate::test_util::*;

  #[test]
  fn misc_strings() -> Result<()> {
    assert_eq!(parse_single("WORKDIR /my dir")?.values, strings(&["/my dir"]));
    assert_eq!(parse_single("USER 1000:1000")?.values, strings(&["1000:1000"]));
    assert_eq!(parse_single("STOPSIGNAL SIGKILL")?.values, strings(&["SIGKILL"]));
    assert_eq!(
      parse_single("MAINTAINER Jane Doe <jane@example.com>")?.values,
      strings(&["Jane Doe <jane@example.com>"])
    );

    // not exec form, even if it looks like it
    let ins = parse_single(r#"WORKDIR ["/app"]"#)?;
    assert!(!ins.json);
    assert_eq!(ins.values, strings(&[r#"["/app"]"#]));

    Ok(())
  }

  #[test]
  fn from_words() -> Result<()> {
    let ins = parse_single("FROM --platform=linux/amd64 alpine:3.11 AS builder")?;
    assert_eq!(ins.name, "from");
    assert_eq!(ins.flags, strings(&["--platform=linux/amd64"]));
    assert_eq!(ins.values, strings(&["alpine:3.11", "AS", "builder"]));

    Ok(())
  }

  #[test]
  fn empty_string() {
    assert_eq!(parse_string(""), Arguments::default());
  }
}
