mod cmd;

use clap::Parser;

use cmd::Cli;

fn main() {
    let cli = Cli::parse();
    cli.command.run();
}
