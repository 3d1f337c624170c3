// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

use lazy_static::lazy_static;
use pest::Parser;
use regex::Regex;

use crate::error::*;
use crate::parser::*;

lazy_static! {
  static ref WHITESPACE: Regex = Regex::new(r"[\t\x0B\x0C\r ]+").unwrap();
}

/// Whether the arguments are delimited like an exec-form JSON array. Such
/// arguments must parse as a string array and never fall back to shell form.
pub(crate) fn is_json_shaped(arguments: &str) -> bool {
  let arguments = arguments.trim();

  arguments.starts_with('[') && arguments.ends_with(']')
}

/// Given a node ostensibly containing a string array, returns an unescaped
/// array of strings
pub(crate) fn parse_string_array(array: Pair, line: usize) -> Result<Vec<String>> {
  let mut ret = Vec::new();

  for field in array.into_inner() {
    match field.as_rule() {
      Rule::json_string => {
        let s = serde_json::from_str::<String>(field.as_str())
          .map_err(|e| Error::FormError {
            line,
            message: format!("invalid string {}: {}", field.as_str(), e)
          })?;

        ret.push(s);
      },
      Rule::json_other => return Err(Error::FormError {
        line,
        message: format!(
          "JSON arguments must be an array of strings, found {}",
          field.as_str()
        )
      }),
      Rule::EOI => (),
      _ => return Err(unexpected_token(field, line))
    }
  }

  Ok(ret)
}

/// Parses exec-form arguments, e.g. `["echo", "hello world"]`.
pub(crate) fn parse_json_arguments(arguments: &str, line: usize) -> Result<Vec<String>> {
  let array = DockerfileParser::parse(Rule::json_array, arguments)
    .map_err(|e| Error::FormError {
      line,
      message: format!("invalid JSON array {}:\n{}", arguments, e)
    })?
    .next()
    .ok_or_else(|| Error::FormError {
      line,
      message: format!("invalid JSON array {}", arguments)
    })?;

  parse_string_array(array, line)
}

/// Removes a single trailing line terminator (`\n` or `\r\n`).
pub(crate) fn trim_newline(line: &str) -> &str {
  let line = line.strip_suffix('\n').unwrap_or(line);

  line.strip_suffix('\r').unwrap_or(line)
}

/// Splits on runs of whitespace, dropping empty words.
pub(crate) fn split_whitespace(s: &str) -> Vec<String> {
  WHITESPACE.split(s.trim())
    .filter(|w| !w.is_empty())
    .map(String::from)
    .collect()
}

/// Splits `s` into at most two parts at the first run of whitespace.
pub(crate) fn split_once_whitespace(s: &str) -> Vec<&str> {
  WHITESPACE.splitn(s, 2).collect()
}

#[derive(PartialEq)]
enum WordPhase {
  Spaces,
  Word,
  Quote(char)
}

/// Splits a line into shell-like words without removing quotes or escapes.
///
/// Whitespace inside single or double quotes does not end a word, and the
/// escape character protects the character after it (except inside single
/// quotes). A trailing escape character is dropped.
pub(crate) fn parse_words(s: &str, escape: char) -> Vec<String> {
  let mut words = Vec::new();
  let mut word = String::new();
  let mut phase = WordPhase::Spaces;
  let mut blank_ok = false;
  let mut chars = s.chars();

  while let Some(ch) = chars.next() {
    if phase == WordPhase::Spaces {
      if ch.is_whitespace() {
        continue;
      }

      phase = WordPhase::Word;
    }

    match phase {
      WordPhase::Word => {
        if ch.is_whitespace() {
          phase = WordPhase::Spaces;
          if blank_ok || !word.is_empty() {
            words.push(std::mem::take(&mut word));
          }
          blank_ok = false;
          continue;
        }

        if ch == '\'' || ch == '"' {
          phase = WordPhase::Quote(ch);
          blank_ok = true;
        }

        if ch == escape {
          // a trailing escape is dropped
          if let Some(next) = chars.next() {
            word.push(ch);
            word.push(next);
          }
          continue;
        }

        word.push(ch);
      },
      WordPhase::Quote(quote) => {
        if ch == quote {
          phase = WordPhase::Word;
        } else if ch == escape && quote != '\'' {
          match chars.next() {
            Some(next) => {
              word.push(ch);
              word.push(next);
            },
            None => phase = WordPhase::Word
          }
          continue;
        }

        word.push(ch);
      },
      WordPhase::Spaces => ()
    }
  }

  if blank_ok || !word.is_empty() {
    words.push(word);
  }

  words
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::test_util::*;

  #[test]
  fn json_shape() {
    assert!(is_json_shaped(r#"["echo", "hi"]"#));
    assert!(is_json_shaped(" [] "));
    assert!(!is_json_shaped("[ -f /etc/hosts ] && cat /etc/hosts"));
    assert!(!is_json_shaped("echo [hi]"));
  }

  #[test]
  fn json_arguments() -> Result<()> {
    assert_eq!(
      parse_json_arguments(r#"["echo", "hello world"]"#, 1)?,
      strings(&["echo", "hello world"])
    );

    assert_eq!(
      parse_json_arguments(r#"[ "a\"b", "☃", "tab\there" ]"#, 1)?,
      strings(&["a\"b", "☃", "tab\there"])
    );

    assert_eq!(parse_json_arguments("[]", 1)?, Vec::<String>::new());

    Ok(())
  }

  #[test]
  fn json_arguments_not_strings() {
    for input in &[r#"["echo", 1]"#, r#"[true]"#, r#"["a", ["b"]]"#, r#"[{"a": "b"}]"#] {
      let err = parse_json_arguments(input, 3).unwrap_err();
      assert_eq!(err.kind(), ErrorKind::Form, "{}", input);
      assert_eq!(err.line(), Some(3));
    }
  }

  #[test]
  fn json_arguments_malformed() {
    for input in &[r#"["echo""#, r#"['echo']"#, r#"["a",]"#, "[echo]"] {
      let err = parse_json_arguments(input, 1).unwrap_err();
      assert_eq!(err.kind(), ErrorKind::Form, "{}", input);
    }
  }

  #[test]
  fn newlines() {
    assert_eq!(trim_newline("FROM a\n"), "FROM a");
    assert_eq!(trim_newline("FROM a\r\n"), "FROM a");
    assert_eq!(trim_newline("FROM a"), "FROM a");
    assert_eq!(trim_newline("EOF\n\n"), "EOF\n");
  }

  #[test]
  fn whitespace_splitting() {
    assert_eq!(split_whitespace("  a \t b  c "), strings(&["a", "b", "c"]));
    assert_eq!(split_whitespace(""), Vec::<String>::new());
    assert_eq!(split_once_whitespace("key some value"), vec!["key", "some value"]);
    assert_eq!(split_once_whitespace("key"), vec!["key"]);
  }

  #[test]
  fn words() {
    assert_eq!(
      parse_words(r#"a=b c="d e" f='g h'"#, '\\'),
      strings(&["a=b", r#"c="d e""#, "f='g h'"])
    );

    assert_eq!(
      parse_words(r#"a\ b "c\"d" e\"#, '\\'),
      strings(&[r"a\ b", r#""c\"d""#, "e"])
    );

    assert_eq!(parse_words(r#"x="""#, '\\'), strings(&[r#"x="""#]));
    assert_eq!(parse_words(r#""""#, '\\'), strings(&[r#""""#]));
    assert_eq!(parse_words("a`  b", '`'), strings(&["a` ", "b"]));
    assert_eq!(parse_words("   ", '\\'), Vec::<String>::new());
  }
}
