//! Command protocol decoding modules.
//!
//! Each layer follows the same structure:
//! - `layout`: byte offsets, widths and protocol constants (source of truth)
//! - `reader`: safe byte access and wire conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; the dispatcher drives the transmitter
//! and collects diagnostics.

pub mod command;
pub mod common;
pub mod message;
pub mod panasonic;
pub mod raw;
