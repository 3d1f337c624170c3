// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
  /// Docker's builtin Dockerfile instructions, each with a short summary.
  ///
  /// The parser never consults this table: unknown instructions parse like
  /// any other. Pass it (or your own table) to `known_instructions()`.
  pub static ref DOCKERFILE_KEYWORDS: HashMap<&'static str, &'static str> = {
    let mut m = HashMap::new();
    m.insert("add", "copy files, directories or remote URLs into the image");
    m.insert("arg", "declare a build-time variable");
    m.insert("cmd", "set the default command of the container");
    m.insert("copy", "copy files or directories into the image");
    m.insert("entrypoint", "set the executable the container runs");
    m.insert("env", "set environment variables");
    m.insert("expose", "document the ports the container listens on");
    m.insert("from", "start a build stage from a base image");
    m.insert("healthcheck", "configure how to check the container is healthy");
    m.insert("label", "add metadata to the image");
    m.insert("maintainer", "set the image author (deprecated)");
    m.insert("onbuild", "add a trigger to run when the image is used as a base");
    m.insert("run", "execute a command in a new layer");
    m.insert("shell", "override the default shell for shell-form commands");
    m.insert("stopsignal", "set the signal that stops the container");
    m.insert("user", "set the user and group for later instructions");
    m.insert("volume", "create mount points for external volumes");
    m.insert("workdir", "set the working directory for later instructions");
    m
  };
}

/// Returns the keywords of an instruction table, lowercased and sorted.
///
/// Any map works, as long as its keys are strings; the values are ignored.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use dockerfile_instructions::known_instructions;
///
/// let mut table = BTreeMap::new();
/// table.insert("RUN", ());
/// table.insert("from", ());
///
/// assert_eq!(known_instructions(&table), vec!["from", "run"]);
/// ```
pub fn known_instructions<'a, I, K, V>(table: I) -> Vec<String>
where
  I: IntoIterator<Item = (&'a K, &'a V)>,
  K: AsRef<str> + ?Sized + 'a,
  V: ?Sized + 'a
{
  let mut keywords: Vec<String> = table.into_iter()
    .map(|(keyword, _)| keyword.as_ref().to_lowercase())
    .collect();

  keywords.sort();
  keywords.dedup();
  keywords
}

/// Returns Docker's builtin instruction keywords, sorted.
pub fn builtin_instructions() -> Vec<String> {
  known_instructions(&*DOCKERFILE_KEYWORDS)
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use pretty_assertions::assert_eq;

  use super::*;
  use crate::test_util::*;

  #[test]
  fn builtin() {
    let keywords = builtin_instructions();

    assert_eq!(&keywords[..3], &["add", "arg", "cmd"]);
    assert_eq!(keywords.len(), 18);
    assert_eq!(keywords.last().map(String::as_str), Some("workdir"));
  }

  #[test]
  fn idempotent() {
    assert_eq!(builtin_instructions(), builtin_instructions());
  }

  #[test]
  fn caller_tables() {
    let mut table: HashMap<String, u32> = HashMap::new();
    table.insert("Copy".into(), 1);
    table.insert("COPY".into(), 2);
    table.insert("add".into(), 3);
    assert_eq!(known_instructions(&table), strings(&["add", "copy"]));

    let empty: BTreeMap<&str, ()> = BTreeMap::new();
    assert_eq!(known_instructions(&empty), Vec::<String>::new());
  }
}
