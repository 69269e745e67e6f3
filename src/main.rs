// src/main.rs
use std::io;

use clap::Parser;
use huffpack::commands;
use huffpack::config::{self, Cli, Commands};
use huffpack::logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for(cli.verbose, cli.quiet));

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Commands::Run { input, output, stats } => commands::run_pipeline(&mut out, &input, &output, stats),
        Commands::Encode { input, output } => {
            let path = output.unwrap_or_else(|| config::default_archive_path(&input));
            commands::encode_to_archive(&mut out, &input, &path)
        }
        Commands::Decode { archive, output } => commands::decode_archive(&mut out, &archive, output.as_deref()),
        Commands::Codes { input, tree } => commands::print_codes(&mut out, &input, tree),
        Commands::Inspect { archive } => commands::inspect_archive(&mut out, &archive),
    };

    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}
