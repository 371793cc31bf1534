use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "granobot")]
#[command(author, version, about = "Telegram bot for registering payment documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Print the environment status report and exit
    Estado,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
