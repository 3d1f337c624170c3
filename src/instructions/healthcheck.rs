// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::error::*;

use super::{parse_maybe_json, Arguments};

/// Parses `HEALTHCHECK` arguments: the check type (`CMD` or `NONE`) followed by
/// the command in shell or exec form.
pub(crate) fn parse_health_config(arguments: &str, line: usize) -> Result<Arguments> {
  let mut parts = arguments.splitn(2, char::is_whitespace);

  let kind = match parts.next() {
    Some(kind) if !kind.is_empty() => kind,
    _ => return Ok(Arguments::default())
  };

  let command = parts.next().unwrap_or("").trim_start();
  let mut ret = parse_maybe_json(command, line)?;
  ret.values.insert(0, kind.to_string());

  Ok(ret)
}
