// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::error::*;
use crate::util::*;

use super::Arguments;

/// Parses arguments for instructions with shell and exec forms (`RUN`, `CMD`,
/// `ENTRYPOINT`, `SHELL`): a JSON string array, or else the whole argument
/// string as one value.
pub(crate) fn parse_maybe_json(arguments: &str, line: usize) -> Result<Arguments> {
  if arguments.is_empty() {
    return Ok(Arguments::default());
  }

  if is_json_shaped(arguments) {
    return Ok(Arguments::exec(parse_json_arguments(arguments, line)?));
  }

  Ok(Arguments::shell(vec![arguments.to_string()]))
}

/// Parses arguments that are a list either way (`ADD`, `COPY`, `VOLUME`): a
/// JSON string array, or else whitespace-separated words.
pub(crate) fn parse_maybe_json_list(arguments: &str, line: usize) -> Result<Arguments> {
  if is_json_shaped(arguments) {
    return Ok(Arguments::exec(parse_json_arguments(arguments, line)?));
  }

  Ok(Arguments::shell(split_whitespace(arguments)))
}
