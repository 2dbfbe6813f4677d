use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::files::FilesCommands;
use commands::tl::TlCommands;

#[derive(Parser)]
#[command(name = "rpytl")]
#[command(about = "Carry finished translations between Ren'Py tl scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translation Operations (Patch/Extract)
    #[command(subcommand)]
    Tl(TlCommands),
    /// File Tree Operations (Rename/Prefix/Dedupe)
    #[command(subcommand)]
    Files(FilesCommands),
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tl(cmd) => commands::tl::handle(cmd)?,
        Commands::Files(cmd) => commands::files::handle(cmd)?,
    }

    Ok(())
}
