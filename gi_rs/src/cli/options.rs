//! Options collected from the reserved `--gi-*` tokens.

use crate::cli::parser::CompletionRequest;
use crate::config::GiConfig;
use crate::error::GiError;
use crate::types::{ClassifiedToken, GiFlag, GiKey, TokenRole};

/// Default wrapped tool when neither a flag nor the config names one.
pub const DEFAULT_GIT: &str = "git";

/// Everything gi itself was asked to do, separate from the git command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiOptions {
    /// `argv[0]` as invoked.
    pub me: String,
    /// Apply the dash policy when resolving.
    pub process_dashes: bool,
    /// Completion-helper mode, if requested.
    pub completion: Option<CompletionRequest>,
    /// Print the git command line instead of running it.
    pub print_me: bool,
    /// Executable that replaces `argv[0]`.
    pub git: String,
}

impl GiOptions {
    /// Collect reserved options. Runs before any resolution, so a malformed
    /// value aborts the whole invocation.
    pub fn from_tokens(tokens: &[ClassifiedToken], config: &GiConfig) -> Result<Self, GiError> {
        let me = tokens
            .iter()
            .find(|t| t.role == TokenRole::ProgramName)
            .map(|t| t.text().to_string())
            .ok_or(GiError::MissingProgramName)?;

        let mut options = Self {
            me,
            process_dashes: config.process_dashes.unwrap_or(true),
            completion: None,
            print_me: false,
            git: config
                .git
                .clone()
                .unwrap_or_else(|| DEFAULT_GIT.to_string()),
        };

        for token in tokens {
            match &token.role {
                TokenRole::GiOption(GiFlag::DoNotProcessDashes) => options.process_dashes = false,
                TokenRole::GiOption(GiFlag::PrintMe) => options.print_me = true,
                TokenRole::GiKeyValue(GiKey::BashCompletionHelper, value) => {
                    options.completion = Some(value.parse()?);
                }
                TokenRole::GiKeyValue(GiKey::Git, value) => options.git = value.clone(),
                TokenRole::ProgramName
                | TokenRole::GlobalOptionWithArg(_)
                | TokenRole::ToolOption
                | TokenRole::ToolPositional => {}
            }
        }

        Ok(options)
    }

    /// File name of `argv[0]`, for diagnostics.
    pub fn program_name(&self) -> &str {
        program_name(&self.me)
    }
}

/// Last path component of an `argv[0]`.
pub fn program_name(me: &str) -> &str {
    std::path::Path::new(me)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(me)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::classify;

    fn options(args: &[&str], config: &GiConfig) -> Result<GiOptions, GiError> {
        let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        GiOptions::from_tokens(&classify(&argv)?, config)
    }

    #[test]
    fn test_defaults() {
        let opts = options(&["/usr/bin/gi", "st"], &GiConfig::default()).unwrap();
        assert_eq!(opts.me, "/usr/bin/gi");
        assert_eq!(opts.program_name(), "gi");
        assert!(opts.process_dashes);
        assert!(!opts.print_me);
        assert_eq!(opts.completion, None);
        assert_eq!(opts.git, DEFAULT_GIT);
    }

    #[test]
    fn test_reserved_flags() {
        let opts = options(
            &[
                "gi",
                "--gi-do-not-process-dashes",
                "--gi-print-me",
                "--gi-git=/opt/git/bin/git",
                "--gi-bash-completion-helper-with-comp-cword=4,True",
            ],
            &GiConfig::default(),
        )
        .unwrap();
        assert!(!opts.process_dashes);
        assert!(opts.print_me);
        assert_eq!(opts.git, "/opt/git/bin/git");
        assert_eq!(
            opts.completion,
            Some(CompletionRequest {
                cword: 4,
                cword_empty: true
            })
        );
    }

    #[test]
    fn test_config_supplies_defaults_and_flags_override() {
        let config = GiConfig {
            git: Some("/usr/local/bin/git".into()),
            process_dashes: Some(false),
        };
        let opts = options(&["gi"], &config).unwrap();
        assert_eq!(opts.git, "/usr/local/bin/git");
        assert!(!opts.process_dashes);

        let opts = options(&["gi", "--gi-git=git2"], &config).unwrap();
        assert_eq!(opts.git, "git2");
    }

    #[test]
    fn test_malformed_completion_value_is_fatal() {
        let err = options(
            &["gi", "--gi-bash-completion-helper-with-comp-cword=abc"],
            &GiConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GiError::InvalidReservedValue { .. }));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_reserved_token_after_global_option_is_an_argument() {
        let opts = options(&["gi", "-c", "--gi-print-me"], &GiConfig::default()).unwrap();
        assert!(!opts.print_me);
    }
}
