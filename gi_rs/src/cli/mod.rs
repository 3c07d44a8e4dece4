//! Command-line handling for gi.
//!
//! # Module Structure
//!
//! - [`parser`] - token classification and reserved value parsing
//! - [`options`] - options gathered from the reserved tokens
//! - [`expand`] - prefix resolution over the classified tokens
//! - [`completion`] - cursor remapping for the bash helper
//! - [`assemble`] - the final git command line
//! - [`entrypoint`] - runs a [`plan`] against the real git
//!
//! [`plan`] is the whole decision without side effects: it never spawns the
//! child and never prints, so it can be driven by a [`StaticCommands`]
//! provider in tests.
//!
//! [`StaticCommands`]: crate::provider::StaticCommands

pub mod assemble;
pub mod completion;
pub mod entrypoint;
pub mod expand;
pub mod options;
pub mod parser;

pub use assemble::{Invocation, shell_line};
pub use completion::{CompletionOutput, RemapState};
pub use entrypoint::run;
pub use expand::{Expansion, expand};
pub use options::GiOptions;
pub use parser::{CompletionRequest, classify};

use std::ffi::OsStr;

use tracing::warn;

use crate::config::GiConfig;
use crate::error::GiError;
use crate::provider::CommandProvider;
use crate::types::{ClassifiedToken, TokenRole};

/// What one gi invocation should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Run the wrapped tool.
    Invoke(Invocation),
    /// Write these lines to stdout and exit 0.
    Print(Vec<String>),
    /// Write this shell line to stdout and exit 0. Raw bytes: copied
    /// arguments need not be UTF-8.
    Show(Vec<u8>),
    /// Write these lines to stderr and exit 1.
    Reject(Vec<String>),
}

/// Classify, expand and decide.
///
/// Classification and resolution see a lossy UTF-8 view of `argv`; words gi
/// only copies go to git as given.
pub fn plan<S, P>(argv: &[S], config: &GiConfig, provider: &P) -> Result<Outcome, GiError>
where
    S: AsRef<OsStr>,
    P: CommandProvider,
{
    let text: Vec<String> = argv
        .iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect();
    let tokens = classify(&text)?;
    check_reserved_values(&tokens, argv)?;
    let options = GiOptions::from_tokens(&tokens, config)?;
    let expansion = expand(&tokens, &options, provider)?;

    if let Some(completion) = &expansion.completion {
        return Ok(Outcome::Print(completion.lines()));
    }

    if options.print_me {
        if expansion.is_unknown() || expansion.is_ambiguous() {
            let query = expansion.outcome.as_ref().map(|o| &o.query);
            warn!(query = ?query, "printing unresolved command");
        }
        return Ok(Outcome::Show(shell_line(&expansion.restore(argv))?));
    }

    if let Some(lines) = diagnostics(options.program_name(), &expansion) {
        return Ok(Outcome::Reject(lines));
    }

    Invocation::from_words(expansion.restore(argv))
        .map(Outcome::Invoke)
        .ok_or(GiError::MissingProgramName)
}

/// Reserved values are read as text, so one that is not UTF-8 is rejected
/// rather than silently mangled.
fn check_reserved_values<S: AsRef<OsStr>>(
    tokens: &[ClassifiedToken],
    argv: &[S],
) -> Result<(), GiError> {
    for token in tokens {
        if let TokenRole::GiKeyValue(key, value) = &token.role {
            let is_utf8 = argv
                .get(token.index())
                .is_some_and(|arg| arg.as_ref().to_str().is_some());
            if !is_utf8 {
                return Err(GiError::InvalidReservedValue {
                    key: key.as_str(),
                    value: value.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Stderr lines for an unknown or ambiguous command, `None` otherwise.
fn diagnostics(prog: &str, expansion: &Expansion) -> Option<Vec<String>> {
    let outcome = expansion.outcome.as_ref()?;

    if outcome.is_unknown() {
        let mut line = format!(
            "{prog}: could not find git command starting with '{}'",
            outcome.query
        );
        if let Some(name) = &expansion.suggestion {
            line.push_str(&format!(". Did you mean '{name}'?"));
        }
        return Some(vec![line]);
    }

    if outcome.is_ambiguous() {
        let mut lines = vec![
            format!("{prog}: ambiguous git command '{}'", outcome.query),
            "Possible git commands:".to_string(),
        ];
        lines.extend(outcome.candidates.iter().map(|c| format!("    {c}")));
        return Some(lines);
    }

    None
}
