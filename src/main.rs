//! Sparovec binary.
//!
//! `sparovec serve` runs the web application;
//! `sparovec create-user <username> <password>` registers an account.

use clap::Parser;
use sparovec::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.log()?;
    cli.run(config).await
}
