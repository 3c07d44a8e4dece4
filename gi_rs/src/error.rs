//! Error type for the gi library.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GiError {
    /// The argument list did not even contain the program name.
    #[error("argv should contain at least an executable name")]
    MissingProgramName,

    /// A reserved `--gi-*=<value>` flag carried a value that does not parse.
    #[error("bad value '{value}' for keyword arg {key}")]
    InvalidReservedValue { key: &'static str, value: String },

    /// The wrapped tool could not be queried for its command list.
    #[error("failed to query commands from '{tool}'")]
    Provider {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// A rewritten argument cannot be expressed as a shell word.
    #[error("argument cannot be quoted for a shell: {0:?}")]
    Unquotable(String),
}
