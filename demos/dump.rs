// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

use snafu::ErrorCompat;

use dockerfile_instructions::{parse_file, Result};

fn wrap() -> Result<()> {
  let args: Vec<String> = std::env::args().collect();
  let path = args.get(1).expect("a path to a Dockerfile is required");

  let instructions = parse_file(path)?;
  let json = serde_json::to_string_pretty(&instructions)
    .expect("instructions must serialize");

  println!("{}", json);

  Ok(())
}

fn main() {
  match wrap() {
    Ok(()) => std::process::exit(0),
    Err(e) => {
      eprintln!("{:?} error: {}", e.kind(), e);
      if let Some(backtrace) = ErrorCompat::backtrace(&e) {
          eprintln!("{}", backtrace);
      }

      std::process::exit(1);
    }
  }
}

