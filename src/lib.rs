//! `argtree` dispatches a command line into a declared tree of commands.
//!
//! A program declares its commands once, as a tree:
//! * a *leaf* [`Command`] is bound to a callback and a list of [`Argument`]s,
//! * a *group* [`Command`] maps names to child commands, nested arbitrarily deep.
//!
//! [`Dispatcher::dispatch`] then follows the input tokens down the tree, binds and converts the leaf's arguments, and calls its callback.
//! Help is generated for every level of the tree, aligned into columns across the whole output.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/service_manager.rs")]
//! ```
//!
//! ```console
//! $ service_manager service halt myservice --wait=5
//! Halting 'myservice' within 5 seconds.
//!
//! $ service_manager daemon
//! Usage:
//!    service_manager daemon <Command> : Daemon manager
//!
//! Commands:
//!    start                            : Starts Daemon
//!    stop  [Options]                  : Stops Daemon
//!          --force (-f)               : force shutdown (optional)
//!
//! Error: Please specify Command!
//! ```
//!
//! # Cli Semantics
//! * A token's prefix alone decides how it is matched.
//! `--name` matches an argument by name, `-short` by its short alias, and a bare token the first `UNNAMED` argument not yet bound.
//! * Values are given with `=`: `--wait=5` or `-w=5`.
//! Only the first `=` separates; `--key=a=b` gives the value `a=b`.
//! * One layer of single quotes is stripped from values: `--name='x'` gives `x`.
//! * `help`, `-help`, `--help` or `?` in first position prints the help of the current command.
//! * An argument left out takes its default; without one it fails if `REQUIRED`, and is otherwise bound to nothing.
//!
//! # Exit codes
//! * `0` ([`EXIT_SUCCESS`]): the callback returned nothing (or `0`), or help was requested.
//! * `-1` ([`EXIT_USAGE`]): the input was rejected; help and an error have been printed.
//! * `-2` ([`EXIT_MALFORMED`]): dispatch reached a command with neither a callback nor children.
//! * Anything else is the callback's own result.
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while dispatching.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;

pub use api::*;
pub use constant::{EXIT_MALFORMED, EXIT_SUCCESS, EXIT_USAGE};
pub use model::Flags;
pub use parser::{
    dispatch, print_help, ConfigError, ConsoleInterface, Dispatcher, Help, HelpLine, UsageError,
    UserInterface,
};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
