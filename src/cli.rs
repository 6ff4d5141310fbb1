use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rowdb")]
#[command(author, version, about = "A personal data table manager")]
pub struct Cli {
    /// Table files (.odt) to load at startup
    pub files: Vec<PathBuf>,

    /// Run a single command and exit instead of starting the interactive prompt
    #[arg(short, long)]
    pub command: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
