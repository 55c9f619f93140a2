use clap::Parser;

/// Runs the meal battle API through a fixed end-to-end smoke-test scenario
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Pretty-print the JSON body of every successful response
    #[arg(short, long)]
    pub verbose: bool,

    /// Base address of the API under test, without a trailing slash
    #[arg(
        long,
        env = "SMOKE_BASE_URL",
        default_value = "http://localhost:5000/api"
    )]
    pub base_url: String,
}
