// (C) Copyright 2019 Hewlett Packard Enterprise Development LP

use crate::dockerfile_parser::{parse, Instruction};
use crate::error::*;

/// Parses a string that should hold exactly one instruction.
pub fn parse_single(input: &str) -> Result<Instruction> {
  let mut instructions = parse(input)?;
  assert_eq!(
    instructions.len(), 1,
    "expected a single instruction, got {:?}", instructions
  );

  Ok(instructions.remove(0))
}

pub fn strings(strs: &[&str]) -> Vec<String> {
  strs.iter().map(|s| String::from(*s)).collect()
}
