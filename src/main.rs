use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use log::{debug, error};

use icon_path::{select_backend, IconPathResult, Resolver};

/// Argument that only checks a desktop backend is usable, without reading stdin.
const TEST_ARG: &str = "test";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() == 2 && args[1] == TEST_ARG {
        return check();
    }

    match run() {
        Ok(count) => {
            debug!("Resolved {} lines", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn check() -> ExitCode {
    match select_backend() {
        Ok(backend) => {
            debug!("Desktop backend {} is available", backend.name());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> IconPathResult<usize> {
    let backend = select_backend()?;
    debug!("Using desktop backend {}", backend.name());

    let resolver = Resolver::new(backend.as_ref());
    resolver.run(io::stdin().lock(), io::stdout().lock())
}
