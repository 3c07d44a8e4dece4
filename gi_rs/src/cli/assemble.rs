//! Final command line assembly.
//!
//! Words are `OsString`s: arguments gi only copies are handed to git exactly
//! as received, whether or not they are UTF-8.

use std::ffi::{OsStr, OsString};
use std::process::Command;

use crate::error::GiError;

/// The git command gi is about to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Split rewritten words (tool path first) into program and args.
    pub fn from_words(mut words: Vec<OsString>) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let program = words.remove(0);
        Some(Self {
            program,
            args: words,
        })
    }

    /// POSIX-shell rendering, each word quoted only when it needs it.
    pub fn shell_line(&self) -> Result<Vec<u8>, GiError> {
        shell_line(std::iter::once(&self.program).chain(&self.args))
    }

    /// Child process with inherited stdio, run directly rather than through a shell.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// Join `words` into one line a POSIX shell splits back into the same bytes.
///
/// Fails on a word no shell quoting can carry (one with a NUL byte).
pub fn shell_line<I, S>(words: I) -> Result<Vec<u8>, GiError>
where
    I: IntoIterator<Item = S> + Clone,
    S: AsRef<OsStr>,
{
    let bytes: Vec<Vec<u8>> = words
        .clone()
        .into_iter()
        .map(|word| word.as_ref().as_encoded_bytes().to_vec())
        .collect();

    shlex::bytes::try_join(bytes.iter().map(Vec::as_slice)).map_err(|_| {
        let word = words
            .into_iter()
            .find(|word| word.as_ref().as_encoded_bytes().contains(&0))
            .map(|word| word.as_ref().to_string_lossy().into_owned())
            .unwrap_or_default();
        GiError::Unquotable(word)
    })
}
