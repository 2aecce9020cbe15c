mod args;
mod check;
mod debug;
mod error;
mod export;
mod init;

use clap::Parser;
use proc_exit::prelude::*;

use crate::error::*;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = match args::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return proc_exit::sysexits::USAGE_ERR.ok();
        }
        Err(e) => {
            let _ = e.print();
            return proc_exit::Code::SUCCESS.ok();
        }
    };

    cli.color.write_global();
    let colored_stderr = !matches!(
        anstream::AutoStream::choice(&std::io::stderr()),
        anstream::ColorChoice::Never
    );
    args::init_logging(&cli.verbose, colored_stderr);

    cli.command
        .run()
        .map_err(|e| format!("{e:#}"))
        .with_code(proc_exit::Code::FAILURE)?;

    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum Command {
    Init(init::InitArgs),
    Check(check::CheckArgs),
    Export(export::ExportArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(),
            Self::Check(cmd) => cmd.run(),
            Self::Export(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}
