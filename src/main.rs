use clap::Parser;
use user_management::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(args) => cli::serve::run(args).await,
    }
}
