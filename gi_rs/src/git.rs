//! Git as a command provider.
//!
//! Command names are scraped from git's own output, which is a heuristic:
//!
//! - commands: `git --list-cmds=main,others,nohelpers`, falling back to
//!   `git help -a` on gits that predate `--list-cmds`
//! - aliases: `git config --get-regexp --name-only ^alias\.`
//! - sub-commands: the `usage:` / `or:` lines of `git <command> -h`

use std::io;
use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::commands::CommandSet;
use crate::error::GiError;
use crate::provider::CommandProvider;

static COMMAND_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("valid command word regex"));

/// Captured output of one git run.
#[derive(Debug, Clone)]
pub struct ExecResult {
    pub ok: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run `tool` with `args`, capturing output. Only spawn failures are errors;
/// a non-zero exit is reported through [`ExecResult::ok`].
pub fn run_git(tool: &str, args: &[&str]) -> io::Result<ExecResult> {
    debug!(tool, ?args, "querying git");
    let out = Command::new(tool)
        .args(args)
        .stdin(Stdio::null())
        .output()?;
    Ok(ExecResult {
        ok: out.status.success(),
        exit_code: out.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
    })
}

/// [`CommandProvider`] that shells out to git.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    fn builtin_commands(&self, tool: &str) -> io::Result<CommandSet> {
        let listed = run_git(tool, &["--list-cmds=main,others,nohelpers"])?;
        if listed.ok {
            let commands = parse_command_list(&listed.stdout);
            if !commands.is_empty() {
                return Ok(commands);
            }
        }

        debug!(
            exit_code = listed.exit_code,
            "--list-cmds unavailable, falling back to `help -a`"
        );
        let help = run_git(tool, &["help", "-a"])?;
        Ok(parse_help_all(&help.stdout))
    }

    fn aliases(&self, tool: &str) -> io::Result<CommandSet> {
        // Exit status 1 just means "no alias configured".
        let result = run_git(tool, &["config", "--get-regexp", "--name-only", r"^alias\."])?;
        Ok(parse_alias_names(&result.stdout))
    }

    fn is_alias(&self, tool: &str, command: &str) -> io::Result<bool> {
        let key = format!("alias.{command}");
        Ok(run_git(tool, &["config", "--get", &key])?.ok)
    }
}

impl CommandProvider for GitCli {
    fn list_commands(&self, tool: &str) -> Result<CommandSet, GiError> {
        let provider_error = |source| GiError::Provider {
            tool: tool.to_string(),
            source,
        };
        let commands = self.builtin_commands(tool).map_err(provider_error)?;
        let aliases = self.aliases(tool).map_err(provider_error)?;
        debug!(
            commands = commands.len(),
            aliases = aliases.len(),
            "loaded command names"
        );
        Ok(commands.union(aliases))
    }

    fn list_subcommands(&self, tool: &str, command: &str) -> Result<CommandSet, GiError> {
        // Aliases are never run with `-h`: a shell alias would execute.
        match self.is_alias(tool, command) {
            Ok(true) => return Ok(CommandSet::default()),
            Ok(false) => {}
            Err(e) => {
                warn!(tool, command, error = %e, "could not check alias");
                return Ok(CommandSet::default());
            }
        }

        match run_git(tool, &[command, "-h"]) {
            Ok(result) => {
                let mut text = result.stdout;
                text.push_str(&result.stderr);
                Ok(parse_usage_subcommands(&text, command))
            }
            Err(e) => {
                warn!(tool, command, error = %e, "could not read usage");
                Ok(CommandSet::default())
            }
        }
    }
}

/// One command name per line, as printed by `git --list-cmds`.
pub fn parse_command_list(text: &str) -> CommandSet {
    text.lines()
        .map(str::trim)
        .filter(|line| COMMAND_WORD.is_match(line))
        .collect()
}

/// Names from `git help -a`: skip the header paragraph, then take the first
/// word of every indented line.
pub fn parse_help_all(text: &str) -> CommandSet {
    text.lines()
        .skip_while(|line| !line.trim().is_empty())
        .filter(|line| line.starts_with(' ') || line.starts_with('\t'))
        .filter_map(|line| line.split_whitespace().next())
        .filter(|word| COMMAND_WORD.is_match(word))
        .collect()
}

/// Alias names from `alias.<name>` lines.
pub fn parse_alias_names(text: &str) -> CommandSet {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("alias."))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Sub-commands from the usage text of `git <command> -h`: the first plain
/// word after `git <command>` on every `usage:` / `or:` line.
pub fn parse_usage_subcommands(text: &str, command: &str) -> CommandSet {
    text.lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let rest = line
                .strip_prefix("usage:")
                .or_else(|| line.strip_prefix("or:"))?;
            let mut words = rest.split_whitespace();
            if words.next()? != "git" || words.next()? != command {
                return None;
            }
            words.find(|word| COMMAND_WORD.is_match(word))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &CommandSet) -> Vec<&str> {
        set.iter().collect()
    }

    #[test]
    fn test_parse_command_list() {
        let set = parse_command_list("add\ncommit\n\ncommit-tree\nnot a command\n");
        assert_eq!(names(&set), vec!["add", "commit", "commit-tree"]);
    }

    #[test]
    fn test_parse_help_all_modern_layout() {
        let text = "\
See 'git help <command>' to read about a specific subcommand

Main Porcelain Commands
   add                     Add file contents to the index
   commit                  Record changes to the repository

Low-level Commands / Manipulators
   commit-tree             Create a new commit object

Command aliases
   co                      checkout
";
        let set = parse_help_all(text);
        assert_eq!(names(&set), vec!["add", "co", "commit", "commit-tree"]);
    }

    #[test]
    fn test_parse_help_all_skips_header() {
        let text = "usage: git [--version] [--help]\n   indented header\n\n  status\n";
        assert_eq!(names(&parse_help_all(text)), vec!["status"]);
    }

    #[test]
    fn test_parse_alias_names() {
        let set = parse_alias_names("alias.co\nalias.st\n\nuser.name\n");
        assert_eq!(names(&set), vec!["co", "st"]);
    }

    #[test]
    fn test_parse_usage_subcommands() {
        let text = "\
usage: git stash list [<log-options>]
   or: git stash show [-u | --include-untracked] [<stash>]
   or: git stash drop [-q | --quiet] [<stash>]
   or: git stash pop [--index] [-q | --quiet] [<stash>]
   or: git stash push [-p | --patch] [-S | --staged]
                      [--] [<pathspec>...]
";
        let set = parse_usage_subcommands(text, "stash");
        assert_eq!(names(&set), vec!["drop", "list", "pop", "push", "show"]);
    }

    #[test]
    fn test_parse_usage_skips_options_before_subcommand() {
        let text = "\
usage: git remote [-v | --verbose]
   or: git remote add [-t <branch>] [-m <master>] <name> <url>
   or: git remote [-v | --verbose] show [-n] <name>
";
        let set = parse_usage_subcommands(text, "remote");
        assert_eq!(names(&set), vec!["add", "show"]);
    }

    #[test]
    fn test_parse_usage_without_subcommands() {
        let text = "usage: git commit [-a | --interactive | --patch] [-s] [-v] [--] [<pathspec>...]\n";
        assert!(parse_usage_subcommands(text, "commit").is_empty());
    }

    #[test]
    fn test_parse_usage_ignores_other_commands() {
        let text = "usage: git worktree add [<options>] <path>\n";
        assert!(parse_usage_subcommands(text, "stash").is_empty());
    }
}
