use std::process::ExitCode;

// Module declarations
mod builder;
mod server;
mod config;
mod markdown;
mod front_matter;
mod feed;
mod cli;
mod utils;
mod layout;

#[tokio::main]
async fn main() -> ExitCode {
    cli::run().await
}
