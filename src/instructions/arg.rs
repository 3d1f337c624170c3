// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::util::*;

use super::Arguments;

/// Parses `ARG` arguments: each word (`name` or `name=value`) is one value,
/// with quotes and escapes preserved.
pub(crate) fn parse_name_or_name_value(arguments: &str, escape: char) -> Arguments {
  Arguments::shell(parse_words(arguments, escape))
}
