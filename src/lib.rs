// (C) Copyright 2019-2020 Hewlett Packard Enterprise Development LP

#![forbid(unsafe_code)]

//! # Dockerfile instruction parser
//!
//! A pure Rust library that turns a Dockerfile into a flat list of
//! line-numbered instruction records, useful for performing static analysis,
//! writing linters, and creating automated tooling around Dockerfiles.
//!
//! Comments, parser directives (`# escape=`), line continuations, exec (JSON)
//! form arguments, instruction flags, `ONBUILD` triggers and heredocs are all
//! handled; instruction semantics are not validated.
//!
//! ## Quick start
//!
//! ```rust
//! use dockerfile_instructions::parse;
//!
//! let instructions = parse(r#"
//!   FROM alpine:3.11 as builder
//!   RUN echo "hello world" > /hello-world
//!
//!   FROM scratch
//!   COPY --from=builder /hello-world /hello-world
//! "#).unwrap();
//!
//! for ins in &instructions {
//!   println!("{}-{}: {} {:?} {:?}", ins.start_line, ins.end_line, ins.name, ins.flags, ins.values);
//! }
//! ```
//!
//! ## Values
//!
//! How an instruction's arguments become `values` depends on the instruction:
//!
//!  * `RUN`, `CMD`, `ENTRYPOINT`, `SHELL` and unknown instructions: the JSON
//!    array elements, or the whole argument string as one value
//!  * `ADD`, `COPY`, `VOLUME`: the JSON array elements, or whitespace
//!    separated words
//!  * `FROM`, `EXPOSE`: whitespace separated words
//!  * `MAINTAINER`, `STOPSIGNAL`, `USER`, `WORKDIR`: the argument string
//!  * `ARG`: quote-aware words, quotes kept
//!  * `ENV`, `LABEL`: `[key, value, separator]` triples, where the separator
//!    is `"="` for `key=value` pairs and `""` for the legacy `ENV key value`
//!  * `HEALTHCHECK`: the check type followed by the command as for `CMD`
//!
//! Exec form arguments must be a JSON array of strings; anything else that is
//! delimited by `[` and `]` is an error rather than shell form.

#[macro_use] extern crate pest_derive;

mod error;
mod parser;
mod util;
mod heredoc;
mod instructions;
mod keywords;
mod lexer;
mod dockerfile_parser;

pub use error::*;
pub use heredoc::*;
pub use keywords::*;
pub use crate::dockerfile_parser::*;

#[cfg(test)] mod test_util;
