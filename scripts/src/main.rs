use std::{io, process::ExitCode};

use clap::Parser;
use freelance_scripts::{
    cli::Cli, errors::ScriptError, toolkit::AlloyToolkit, utils::setup_client,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Stdout is reserved for the deployment report
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Deploy the contract selected on the command line
async fn run(cli: Cli) -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        artifacts,
        confirmations,
        deploy,
        ..
    } = cli;

    let client = setup_client(&priv_key, &rpc_url)?;
    let toolkit = AlloyToolkit::new(client, artifacts, confirmations);

    deploy.run(&toolkit, &mut io::stdout()).await?;
    Ok(())
}
