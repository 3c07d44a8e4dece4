//! Entry point shared by the `gi` binary: plan against the real git, then act.

use std::ffi::OsString;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{Invocation, Outcome, plan};
use crate::config::GiConfig;
use crate::git::GitCli;

/// Exit status for unknown or ambiguous commands.
pub const EXIT_UNRESOLVED: u8 = 1;

/// Run gi for `argv` (program name first) and return the process exit status.
pub fn run(argv: &[OsString]) -> Result<u8> {
    let config = GiConfig::load();
    debug!(?config, "loaded config");

    match plan(argv, &config, &GitCli)? {
        Outcome::Print(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(0)
        }
        Outcome::Show(mut line) => {
            line.push(b'\n');
            std::io::stdout()
                .lock()
                .write_all(&line)
                .context("failed to write the command line")?;
            Ok(0)
        }
        Outcome::Reject(lines) => {
            for line in lines {
                eprintln!("{line}");
            }
            Ok(EXIT_UNRESOLVED)
        }
        Outcome::Invoke(invocation) => invoke(&invocation),
    }
}

/// Run the child with inherited stdio and pass its status through.
fn invoke(invocation: &Invocation) -> Result<u8> {
    debug!(program = ?invocation.program, args = ?invocation.args, "running");
    let status = invocation.to_command().status().with_context(|| {
        format!(
            "failed to run '{}'",
            invocation.program.to_string_lossy()
        )
    })?;

    // Killed by a signal: no code to pass on.
    let code = status.code().unwrap_or(1);
    Ok(u8::try_from(code).unwrap_or(1))
}
