use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Save one thread and exit instead of serving the HTTP API.
    #[arg(long, value_name = "URL")]
    pub save_url: Option<String>,
}
