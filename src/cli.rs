use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Command {
    Feed,
    Fetch,
    Post,
    Search,
    Chat,
}

#[derive(Parser, Debug, Default)]
#[command(
    about = concat!(env!("CARGO_CRATE_NAME"), " - social feed in the terminal"),
)]
pub struct Flags {
    /// what to do; the interactive feed when omitted
    pub command: Option<Command>,

    /// search query for `search`
    pub query: Option<String>,

    /// page number for `fetch`
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit on error.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Feed)
    }
}
