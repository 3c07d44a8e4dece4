//! Token classifier: the finite-state walk over the raw argument list.
//!
//! ```text
//! Init ──argv[0]──▶ Normal ──-C/-c──▶ GlobalOptWithArg
//!                     ▲                      │
//!                     └────────any token─────┘
//! ```
//!
//! Every token gets exactly one [`TokenRole`]. The argument of `-C`/`-c` is
//! taken as an argument whatever it looks like, so in `gi -C stat pul` the
//! command is `pul` and `stat` is a directory.

use tracing::debug;

use crate::error::GiError;
use crate::types::{ClassifiedToken, GiFlag, GiKey, Token, TokenRole};

/// Git global options whose argument is a separate word that may look like a command.
pub const GIT_GLOBAL_OPTS_WITH_ARG: &[&str] = &["-C", "-c"];

#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Init,
    Normal,
    GlobalOptWithArg(Token),
    Done,
}

/// Classify every token of `argv`.
///
/// Fails only when `argv` is empty: without a program name there is nothing to
/// rewrite.
pub fn classify(argv: &[String]) -> Result<Vec<ClassifiedToken>, GiError> {
    if argv.is_empty() {
        return Err(GiError::MissingProgramName);
    }

    let mut state = State::Init;
    let mut classified = Vec::with_capacity(argv.len());

    for (index, text) in argv.iter().enumerate() {
        let token = Token {
            index,
            text: text.clone(),
        };
        let (next, emitted) = step(state, token);
        state = next;
        if let Some(item) = emitted {
            debug!(index = item.index(), role = ?item.role, "classified");
            classified.push(item);
        }
    }

    // A global option with nothing after it goes through as a plain option,
    // so the wrapped tool reports the missing argument.
    if let State::GlobalOptWithArg(option) = state {
        classified.push(emit(option, TokenRole::ToolOption));
    }
    state = State::Done;
    debug!(?state, tokens = classified.len(), "classification finished");

    Ok(classified)
}

/// The transition function. Returns the next state and the token to emit, if any.
fn step(state: State, token: Token) -> (State, Option<ClassifiedToken>) {
    match state {
        State::Init => (State::Normal, Some(emit(token, TokenRole::ProgramName))),
        State::GlobalOptWithArg(option) => {
            let role = TokenRole::GlobalOptionWithArg(option.text);
            (State::Normal, Some(emit(token, role)))
        }
        State::Normal => {
            let arg = token.text.as_str();
            if GIT_GLOBAL_OPTS_WITH_ARG.contains(&arg) {
                (State::GlobalOptWithArg(token), None)
            } else if let Some(flag) = GiFlag::from_arg(arg) {
                (State::Normal, Some(emit(token, TokenRole::GiOption(flag))))
            } else if let Some((key, value)) = reserved_key_value(arg) {
                let role = TokenRole::GiKeyValue(key, value.to_string());
                (State::Normal, Some(emit(token, role)))
            } else if arg.starts_with('-') {
                (State::Normal, Some(emit(token, TokenRole::ToolOption)))
            } else {
                (State::Normal, Some(emit(token, TokenRole::ToolPositional)))
            }
        }
        State::Done => (State::Done, None),
    }
}

fn emit(token: Token, role: TokenRole) -> ClassifiedToken {
    ClassifiedToken { token, role }
}

/// `--gi-key=value` with a reserved key. The split is at the first `=`.
fn reserved_key_value(arg: &str) -> Option<(GiKey, &str)> {
    let (key, value) = arg.split_once('=')?;
    GiKey::from_key(key).map(|key| (key, value))
}
