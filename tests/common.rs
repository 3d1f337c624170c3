// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

#![allow(dead_code)]

use dockerfile_instructions::Instruction;

pub fn strings(strs: &[&str]) -> Vec<String> {
  strs.iter().map(|s| String::from(*s)).collect()
}

/// A shell-form instruction without flags, values or heredocs; fill in the
/// rest with struct update syntax.
pub fn instruction(name: &str, original: &str, start_line: usize, end_line: usize) -> Instruction {
  Instruction {
    name: name.into(),
    sub_name: None,
    json: false,
    original: original.into(),
    start_line,
    end_line,
    flags: vec![],
    values: vec![],
    heredocs: vec![]
  }
}

/// The path to a file in `tests/testfiles`.
pub fn testfile(name: &str) -> String {
  format!("{}/tests/testfiles/{}", env!("CARGO_MANIFEST_DIR"), name)
}
