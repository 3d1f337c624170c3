// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use crate::error::*;
use crate::util::*;

use super::Arguments;

/// Parses `ENV` and `LABEL` arguments into `[key, value, separator]` triples.
///
/// Both the legacy single pair form (`ENV key some value`, separator `""`) and
/// the `key=value ...` form (separator `"="`) are accepted. Quotes and escapes
/// are preserved in keys and values.
pub(crate) fn parse_name_value(
  keyword: &str,
  arguments: &str,
  escape: char,
  line: usize
) -> Result<Arguments> {
  let words = parse_words(arguments, escape);
  let first = match words.first() {
    Some(first) => first,
    None => return Ok(Arguments::default())
  };

  if !first.contains('=') {
    let parts = split_once_whitespace(arguments);
    if parts.len() < 2 {
      return Err(Error::FormError {
        line,
        message: format!("{} must have two arguments", keyword.to_uppercase())
      });
    }

    return Ok(Arguments::shell(vec![
      parts[0].to_string(),
      parts[1].to_string(),
      String::new()
    ]));
  }

  let mut values = Vec::with_capacity(words.len() * 3);
  for word in &words {
    let index = word.find('=').ok_or_else(|| Error::FormError {
      line,
      message: format!(
        "syntax error - can't find = in {:?}. Must be of the form: name=value",
        word
      )
    })?;

    values.push(word[..index].to_string());
    values.push(word[index + 1..].to_string());
    values.push("=".to_string());
  }

  Ok(Arguments::shell(values))
}
