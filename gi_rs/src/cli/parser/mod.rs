//! Parsing of the raw `gi` command line.
//!
//! # Module Structure
//!
//! - [`core`] - the token classifier state machine
//! - [`helpers`] - reserved value parsing and command suggestions
//!
//! # Reserved flags
//!
//! | token                                                  | effect                               |
//! |--------------------------------------------------------|--------------------------------------|
//! | `--gi-do-not-process-dashes`                           | turn the dash policy off             |
//! | `--gi-print-me`                                        | print the git command line, don't run|
//! | `--gi-bash-completion-helper-with-comp-cword=<n>,<e>`  | completion-helper mode               |
//! | `--gi-git=<path>`                                      | git executable to wrap               |

pub mod core;
pub mod helpers;

pub use self::core::{GIT_GLOBAL_OPTS_WITH_ARG, classify};
pub use self::helpers::{CompletionRequest, suggest_similar_command};
