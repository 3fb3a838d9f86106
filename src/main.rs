use clap::Parser;
use miette::Result;
use tilepack::cli::{Cli, Commands};
use tilepack::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => tilepack::cli::build::run(args, &printer)?,
        Commands::Palette(args) => tilepack::cli::palette::run(args, &printer)?,
        Commands::Collision(args) => tilepack::cli::collision::run(args, &printer)?,
        Commands::Init(args) => tilepack::cli::init::run(args, &printer)?,
        Commands::Completions(args) => tilepack::cli::completions::run(args)?,
    }

    Ok(())
}
