use clap::Parser;
use cli::Command;

mod cli;
mod commands;
mod compiler;
mod config;

#[cfg(test)]
mod tests;

fn main() -> miette::Result<()> {
    let cli = cli::Cli::parse();
    match cli.command() {
        Command::Check(args) => commands::run_check(args)?,
    }

    Ok(())
}
