use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use joint_state_server::{
    cli::{Cli, Command},
    client, server,
    store::JointStore,
};

fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            let listener = server::bind(args.listen).await?;
            let server = server::Server::new(listener, Arc::new(JointStore::pepper()));
            let addr = server.local_addr()?;
            info!("serving joint state on {}", addr);
            if let Err(err) = server.run_until_ctrl_c().await {
                warn!("server exited with error: {err:?}");
                return Err(err);
            }
        }
        Command::Names(args) => client::run_names(args).await?,
        Command::Angles(args) => client::run_angles(args).await?,
        Command::Set(args) => client::run_set(args).await?,
    }

    Ok(())
}
