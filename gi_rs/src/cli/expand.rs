//! Command expansion: resolves positional tokens and builds the git argv.
//!
//! Only positional tokens move the resolution state:
//!
//! ```text
//! WaitForCommand ──unique──▶ WaitForSubcommand ──any──▶ Passthrough
//!        │          (help, or command with sub-commands)      ▲
//!        ├──unique, no sub-commands───────────────────────────┤
//!        └──unknown / ambiguous───────────────────────────────┘
//! ```
//!
//! The nested scope lives inside the `WaitForSubcommand` stage and is dropped
//! with it.

use std::ffi::{OsStr, OsString};

use tracing::{debug, warn};

use crate::cli::completion::{CompletionOutput, RemapState};
use crate::cli::options::GiOptions;
use crate::cli::parser::suggest_similar_command;
use crate::commands::{ResolutionOutcome, ResolutionScope};
use crate::error::GiError;
use crate::provider::CommandProvider;
use crate::types::{ClassifiedToken, TokenRole};

/// The command whose nested scope is its own top-level scope.
pub const HELP_COMMAND: &str = "help";

enum Stage {
    WaitForCommand,
    WaitForSubcommand {
        command: String,
        scope: ResolutionScope,
    },
    Passthrough,
}

/// Result of one expansion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion {
    /// Git argv: tool path first, reserved tokens removed.
    pub rewritten: Vec<String>,
    /// For each rewritten word, the argv index it was copied from unchanged.
    pub sources: Vec<Option<usize>>,
    /// Outcome of the last resolution that counts; `None` if no positional was seen.
    pub outcome: Option<ResolutionOutcome>,
    /// Present in completion-helper mode.
    pub completion: Option<CompletionOutput>,
    /// Closest top-level name when the command was unknown.
    pub suggestion: Option<String>,
}

impl Expansion {
    pub fn is_ambiguous(&self) -> bool {
        self.outcome.as_ref().is_some_and(ResolutionOutcome::is_ambiguous)
    }

    pub fn is_unknown(&self) -> bool {
        self.outcome.as_ref().is_some_and(ResolutionOutcome::is_unknown)
    }

    /// Resolved command, `"<command> <subcommand>"` when a sub-command resolved too.
    pub fn target(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(ResolutionOutcome::resolved)
    }

    /// Rewritten words with every copied word taken from `argv` as given,
    /// so arguments that are not UTF-8 reach git byte for byte.
    pub fn restore<S: AsRef<OsStr>>(&self, argv: &[S]) -> Vec<OsString> {
        self.rewritten
            .iter()
            .zip(&self.sources)
            .map(|(word, source)| {
                source
                    .and_then(|index| argv.get(index))
                    .map(|original| original.as_ref().to_os_string())
                    .unwrap_or_else(|| OsString::from(word))
            })
            .collect()
    }
}

struct Expander<'a, P: CommandProvider> {
    options: &'a GiOptions,
    provider: &'a P,
    stage: Stage,
    rewritten: Vec<String>,
    sources: Vec<Option<usize>>,
    outcome: Option<ResolutionOutcome>,
    suggestion: Option<String>,
    remap: Option<RemapState>,
}

/// Expand classified tokens into the git argv.
pub fn expand<P: CommandProvider>(
    tokens: &[ClassifiedToken],
    options: &GiOptions,
    provider: &P,
) -> Result<Expansion, GiError> {
    let mut expander = Expander {
        options,
        provider,
        stage: Stage::WaitForCommand,
        rewritten: Vec::with_capacity(tokens.len()),
        sources: Vec::with_capacity(tokens.len()),
        outcome: None,
        suggestion: None,
        remap: options.completion.map(RemapState::new),
    };

    for token in tokens {
        expander.visit(token)?;
    }

    let completion = expander
        .remap
        .map(|remap| remap.finish(expander.rewritten.clone()));

    Ok(Expansion {
        rewritten: expander.rewritten,
        sources: expander.sources,
        outcome: expander.outcome,
        completion,
        suggestion: expander.suggestion,
    })
}

impl<P: CommandProvider> Expander<'_, P> {
    fn visit(&mut self, token: &ClassifiedToken) -> Result<(), GiError> {
        if token.role.is_reserved() {
            if let Some(remap) = self.remap.as_mut() {
                remap.exclude(token.index());
            }
            return Ok(());
        }

        match &token.role {
            TokenRole::ProgramName => self.push_new(self.options.git.clone()),
            TokenRole::GlobalOptionWithArg(option) => {
                self.push_new(option.clone());
                self.push_copy(token);
            }
            TokenRole::ToolOption => self.push_copy(token),
            TokenRole::ToolPositional => self.positional(token)?,
            TokenRole::GiOption(_) | TokenRole::GiKeyValue(..) => {}
        }
        Ok(())
    }

    fn push_new(&mut self, word: String) {
        self.rewritten.push(word);
        self.sources.push(None);
    }

    fn push_copy(&mut self, token: &ClassifiedToken) {
        self.rewritten.push(token.text().to_string());
        self.sources.push(Some(token.index()));
    }

    fn positional(&mut self, token: &ClassifiedToken) -> Result<(), GiError> {
        match std::mem::replace(&mut self.stage, Stage::Passthrough) {
            Stage::WaitForCommand => self.resolve_command(token),
            Stage::WaitForSubcommand { command, scope } => {
                self.resolve_subcommand(&command, &scope, token);
                Ok(())
            }
            Stage::Passthrough => {
                self.push_copy(token);
                Ok(())
            }
        }
    }

    fn resolve_command(&mut self, token: &ClassifiedToken) -> Result<(), GiError> {
        let text = token.text();
        let options = self.options;
        let git = options.git.as_str();
        let scope = ResolutionScope::new(
            self.provider.list_commands(git)?,
            self.options.process_dashes,
        );
        let outcome = scope.resolve(text);
        debug!(query = text, candidates = ?outcome.candidates, "resolved command");

        if let Some(command) = outcome.resolved().map(str::to_string) {
            self.push_new(command.clone());
            self.stage = if command == HELP_COMMAND {
                Stage::WaitForSubcommand { command, scope }
            } else {
                let subcommands = self
                    .provider
                    .list_subcommands(git, &command)
                    .unwrap_or_else(|e| {
                        warn!(command = %command, error = %e, "could not list sub-commands");
                        Default::default()
                    });
                if subcommands.is_empty() {
                    Stage::Passthrough
                } else {
                    debug!(command = %command, count = subcommands.len(), "entering sub-command scope");
                    Stage::WaitForSubcommand {
                        command,
                        scope: ResolutionScope::new(subcommands, self.options.process_dashes),
                    }
                }
            };
        } else {
            if outcome.is_unknown() {
                self.suggestion = suggest_similar_command(text, &scope.commands).map(str::to_string);
            }
            self.push_copy(token);
        }

        self.outcome = Some(outcome);
        Ok(())
    }

    fn resolve_subcommand(
        &mut self,
        command: &str,
        scope: &ResolutionScope,
        token: &ClassifiedToken,
    ) {
        let text = token.text();
        let sub = scope.resolve(text);
        debug!(command, query = text, candidates = ?sub.candidates, "resolved sub-command");

        match sub.resolved() {
            Some(name) => self.push_new(name.to_string()),
            None => self.push_copy(token),
        }

        // No match means the word is an ordinary argument; the command stands.
        if sub.is_unknown() {
            return;
        }
        let query = match &self.outcome {
            Some(parent) => format!("{} {}", parent.query, text),
            None => format!("{command} {text}"),
        };
        self.outcome = Some(ResolutionOutcome {
            query,
            candidates: sub
                .candidates
                .iter()
                .map(|candidate| format!("{command} {candidate}"))
                .collect(),
        });
    }
}
