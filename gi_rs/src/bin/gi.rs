use std::any::Any;
use std::ffi::OsString;
use std::panic;
use std::process::ExitCode;

use gi::cli::{entrypoint, options::program_name};
use gi::logging;

/// Exit status for configuration, provider and spawn failures.
const EXIT_FATAL: u8 = 2;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> ExitCode {
    install_broken_pipe_handler();
    logging::init();

    // nosemgrep: rust.lang.security.args.args
    // argv is only rewritten and handed to git; nothing here trusts it. Words
    // that are not UTF-8 must reach git unchanged.
    let argv: Vec<OsString> = std::env::args_os().collect();

    match entrypoint::run(&argv) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let me = argv
                .first()
                .map(|me| me.to_string_lossy().into_owned())
                .unwrap_or_else(|| "gi".to_string());
            eprintln!("{}: {e:#}", program_name(&me));
            ExitCode::from(EXIT_FATAL)
        }
    }
}
