//! Chordspell CLI library.
//!
//! This crate provides the functionality behind the `chordspell` binary:
//! dictionary loading with source provenance, logging setup, and the
//! command implementations.

pub mod commands;
pub mod input;
pub mod logging;
