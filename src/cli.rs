use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the joint-state service.
    Serve(ServeArgs),
    /// Print the joint-name table advertised by a running service.
    Names(QueryArgs),
    /// Fetch the current angle frame and print one value per joint.
    Angles(QueryArgs),
    /// Send a full frame of joint angles.
    Set(SetArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Socket address the service should bind to. Use port 0 for an
    /// ephemeral port.
    #[arg(long, default_value = "0.0.0.0:13000")]
    pub listen: SocketAddr,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Address of the service to query.
    #[arg(long, default_value = "127.0.0.1:13000")]
    pub server: SocketAddr,
}

#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Address of the service to send to.
    #[arg(long, default_value = "127.0.0.1:13000")]
    pub server: SocketAddr,

    /// One angle per joint, in the order reported by `names`.
    #[arg(required = true, allow_negative_numbers = true)]
    pub angles: Vec<f32>,
}
