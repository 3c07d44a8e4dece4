//! Tokens of the original command line and the roles the classifier gives them.

/// Flag reserved by gi itself. Never forwarded to git.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GiFlag {
    /// `--gi-do-not-process-dashes`
    DoNotProcessDashes,
    /// `--gi-print-me`
    PrintMe,
}

/// `key=value` option reserved by gi itself. Never forwarded to git.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GiKey {
    /// `--gi-bash-completion-helper-with-comp-cword=<cword>,<empty>`
    BashCompletionHelper,
    /// `--gi-git=<path>`
    Git,
}

impl GiFlag {
    pub const ALL: [GiFlag; 2] = [GiFlag::DoNotProcessDashes, GiFlag::PrintMe];

    pub fn as_str(self) -> &'static str {
        match self {
            GiFlag::DoNotProcessDashes => "--gi-do-not-process-dashes",
            GiFlag::PrintMe => "--gi-print-me",
        }
    }

    pub fn from_arg(arg: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.as_str() == arg)
    }
}

impl GiKey {
    pub const ALL: [GiKey; 2] = [GiKey::BashCompletionHelper, GiKey::Git];

    pub fn as_str(self) -> &'static str {
        match self {
            GiKey::BashCompletionHelper => "--gi-bash-completion-helper-with-comp-cword",
            GiKey::Git => "--gi-git",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// One word of the original argument list.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    /// Position in the original argument list (0 is the program name).
    pub index: usize,
    pub text: String,
}

/// Syntactic role of a token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TokenRole {
    /// `argv[0]`
    ProgramName,
    /// Argument of a git global option such as `-C <path>`; carries the option.
    GlobalOptionWithArg(String),
    /// Any other dash-prefixed token, forwarded as is.
    ToolOption,
    /// A non-option token: command, sub-command or plain argument.
    ToolPositional,
    GiOption(GiFlag),
    GiKeyValue(GiKey, String),
}

impl TokenRole {
    /// Reserved tokens are consumed by gi and never reach the wrapped tool.
    pub fn is_reserved(&self) -> bool {
        matches!(self, TokenRole::GiOption(_) | TokenRole::GiKeyValue(..))
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ClassifiedToken {
    pub token: Token,
    pub role: TokenRole,
}

impl ClassifiedToken {
    pub fn index(&self) -> usize {
        self.token.index
    }

    pub fn text(&self) -> &str {
        &self.token.text
    }
}
