//! # gi
//!
//! **Unique-prefix expansion for git commands.** `gi` sits in front of git and
//! expands abbreviated commands and aliases the way Mercurial does:
//! `gi st` runs `git status`, `gi comm` runs `git commit`, and `gi upda`
//! reports that `update-index`, `update-ref` and `update-server-info` all
//! match.
//!
//! ## Pipeline
//!
//! ```text
//! argv ──▶ classifier ──▶ reserved options ──▶ expander ──▶ rewritten argv
//!           (TokenRole)      (GiOptions)        │   ▲          │
//!                                               ▼   │          ├─▶ git child process
//!                                          CommandProvider     ├─▶ completion payload
//!                                          (git, static)       └─▶ diagnostics
//! ```
//!
//! ## Library usage
//!
//! ```rust
//! use gi::cli::{Outcome, plan};
//! use gi::config::GiConfig;
//! use gi::provider::StaticCommands;
//!
//! let provider = StaticCommands::new(["commit", "commit-tree", "status"]);
//! let argv: Vec<String> = ["gi", "commit-t"].iter().map(|s| s.to_string()).collect();
//!
//! match plan(&argv, &GiConfig::default(), &provider).unwrap() {
//!     Outcome::Invoke(invocation) => {
//!         assert_eq!(invocation.shell_line().unwrap(), b"git commit-tree");
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! ## Reserved flags
//!
//! `gi` understands a handful of `--gi-*` flags and strips them before git
//! sees the command line; see [`cli::parser`].

// ============================================================================
// Core Modules
// ============================================================================

/// Argument classification, expansion, completion remapping and the entry point.
pub mod cli;

/// Command sets and the prefix resolver with its dash policy.
pub mod commands;

/// Optional `config.toml` support.
pub mod config;

/// Error type shared by the library.
pub mod error;

/// Git-backed [`provider::CommandProvider`] implementation.
pub mod git;

/// `tracing` subscriber setup for the binary.
pub mod logging;

/// The [`provider::CommandProvider`] trait and an in-memory implementation.
pub mod provider;

/// Tokens and their roles.
pub mod types;

pub use commands::{CommandSet, ResolutionOutcome, ResolutionScope, resolve};
pub use error::GiError;
pub use provider::CommandProvider;
