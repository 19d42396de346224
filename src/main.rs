use clap::Parser;
use miette::Result;
use tint::cli::{Cli, Commands};
use tint::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Paint(args) => tint::cli::paint::run(args, &printer)?,
        Commands::Info(args) => tint::cli::info::run(args, &printer)?,
        Commands::Palette(args) => tint::cli::palette::run(args, &printer)?,
        Commands::Init(args) => tint::cli::init::run(args, &printer)?,
        Commands::Completions(args) => tint::cli::completions::run(args)?,
    }

    Ok(())
}
