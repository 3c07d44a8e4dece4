//! Helper functions for reserved option values and diagnostics.
//!
//! - Completion-helper value parsing (`<cword>,<empty>`)
//! - Command suggestion via Levenshtein distance

use std::str::FromStr;

use strsim::levenshtein;

use crate::commands::CommandSet;
use crate::error::GiError;
use crate::types::GiKey;

/// Value of `--gi-bash-completion-helper-with-comp-cword`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Index of the word under the cursor in the original argv.
    pub cword: usize,
    /// The word under the cursor is empty and was not passed at all.
    pub cword_empty: bool,
}

impl FromStr for CompletionRequest {
    type Err = GiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || GiError::InvalidReservedValue {
            key: GiKey::BashCompletionHelper.as_str(),
            value: value.to_string(),
        };
        let (cword, empty) = value.split_once(',').ok_or_else(invalid)?;
        let cword = cword.trim().parse::<usize>().map_err(|_| invalid())?;
        let cword_empty = parse_bool(empty.trim()).ok_or_else(invalid)?;
        Ok(Self { cword, cword_empty })
    }
}

/// `true`/`false` in any letter case; bash sends `True`/`False`.
fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Suggest a similar command using Levenshtein distance.
/// Returns Some(suggestion) if a close match is found (distance <= 2).
pub fn suggest_similar_command<'a>(input: &str, commands: &'a CommandSet) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for cmd in commands.iter() {
        let distance = levenshtein(&input_lower, cmd);
        if distance > 2 {
            continue;
        }
        // Strictly smaller only, so ties keep the alphabetically first name.
        match best_match {
            Some((_, best_dist)) if distance >= best_dist => {}
            _ => best_match = Some((cmd, distance)),
        }
    }

    best_match.map(|(cmd, _)| cmd)
}
