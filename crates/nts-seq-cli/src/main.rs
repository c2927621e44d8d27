//! The `nts-seq` binary: the `run [options] input.ll` entrypoint, wiring the
//! reference frontend (`nts-frontend`) to the sequentialization driver
//! (`nts-seq`).

mod cli;
mod error;

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Once;

use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use cli::{Cli, Command, RunArgs};
use error::CliError;
use nts_frontend::{IrLoader, LoadOptions, TextLoader};

fn main() {
    let _log_guard = configure_logging();
    install_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Wrong CLI usage prints its message and exits 0, the same as
            // `-h`/`--help` — clap's own exit code for a usage error
            // doesn't match that, so it's overridden here.
            let _ = err.print();
            std::process::exit(0);
        }
    };

    let Command::Run(args) = cli.command;
    match run(&args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            tracing::error!(error = %err, "sequentialization failed");
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn run(args: &RunArgs) -> Result<(), CliError> {
    let config = nts_frontend::load_config(&nts_frontend::discover_config());

    let thread_pool_size = args
        .threads
        .or_else(|| config.sequentialize.threads.and_then(|n| NonZeroUsize::new(n as usize)))
        .unwrap_or_else(|| NonZeroUsize::new(1).expect("1 is non-zero"));
    let load_options = LoadOptions { thread_pool_size };

    info!(input = %args.input.display(), "loading");
    let loader = TextLoader;
    let loaded = loader.load(&args.input, &load_options)?;

    let inlined = nts_frontend::inline(loaded);
    if let Some(path) = &args.inliner_output {
        write_to_path(path, &nts_frontend::write_nts(&inlined))
            .map_err(|source| CliError::Write { path: path.clone(), source })?;
    }

    let seq_config = nts_seq::SeqConfig {
        mode: if args.no_por || config.sequentialize.no_por {
            nts_seq::SeqMode::Simple
        } else {
            nts_seq::SeqMode::Por
        },
        main_name: config.sequentialize.main_name.clone(),
    };

    let target = nts_seq::sequentialize(&inlined, &seq_config)?;
    let rendered = nts_frontend::write_nts(&target);

    match &args.output {
        Some(path) => {
            write_to_path(path, &rendered).map_err(|source| CliError::Write { path: path.clone(), source })?
        }
        None => {
            // Write to stdout only now that sequentialization has already
            // fully succeeded, so there are no partial outputs on failure —
            // trivially true for stdout since nothing is written before
            // this point.
            print!("{rendered}");
            io::stdout().flush().map_err(|source| CliError::Write { path: "<stdout>".into(), source })?;
        }
    }

    Ok(())
}

fn write_to_path(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_path = Path::new(".").join("nts-seq.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(".", "nts-seq.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
