use std::process::ExitCode;

use clap::Parser;

use mass::{Bootstrap, Cli, MusicAssistant};

fn main() -> ExitCode {
    // Usage errors exit here, before anything touches the host.
    let cli = Cli::parse();

    let prepared = match Bootstrap::from_host().prepare(cli, MusicAssistant::new) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("mass: startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    prepared.run().exit_code()
}
