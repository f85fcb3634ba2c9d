//! Client side of the joint-state protocol.
//!
//! [`AngleClient`] mirrors the angle sender that feeds the service in
//! production: one persistent TCP connection, one request per write, one
//! reply per read.

use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::info;

use crate::{
    cli::{QueryArgs, SetArgs},
    protocol,
    store::BYTES_PER_JOINT,
};

/// Largest reply a single request is expected to produce.
const REPLY_BUFFER_SIZE: usize = 1024;

pub struct AngleClient {
    stream: TcpStream,
    names: Vec<String>,
}

impl AngleClient {
    /// Connects to a running service and fetches its joint table.
    ///
    /// The table is fixed for the life of the service, so it is read once up
    /// front; frame sizes can then be checked locally before sending.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("failed to connect to {addr}"))?;
        info!("connected to {}", addr);

        let mut client = Self {
            stream,
            names: Vec::new(),
        };
        let reply = client.raw_request(protocol::GET_NAMES).await?;
        let text = String::from_utf8(reply).context("joint names were not valid UTF-8")?;
        client.names = text.split(' ').map(str::to_string).collect();
        Ok(client)
    }

    /// The joint names advertised by the service, in wire order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Sends one request and reads the single reply the service writes back.
    ///
    /// The request must go out in one write so the service sees it as one
    /// message; likewise the reply is taken from one read.
    pub async fn raw_request(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        self.stream
            .write_all(request)
            .await
            .context("failed to send request")?;

        let mut buf = vec![0u8; REPLY_BUFFER_SIZE];
        let received = self
            .stream
            .read(&mut buf)
            .await
            .context("failed to read reply")?;
        if received == 0 {
            bail!("server closed the connection");
        }
        buf.truncate(received);
        Ok(buf)
    }

    /// Fetches the current angle frame as raw bytes.
    pub async fn angles(&mut self) -> Result<Vec<u8>> {
        self.raw_request(protocol::GET_ANGLES).await
    }

    /// Fetches the current frame decoded as one little-endian f32 per joint.
    ///
    /// The decoding is a peer convention; the service itself never
    /// interprets the bytes.
    pub async fn angles_f32(&mut self) -> Result<Vec<f32>> {
        let frame = self.angles().await?;
        let expected = self.names.len() * BYTES_PER_JOINT;
        if frame.len() != expected {
            bail!(
                "frame length {} does not match {} joints",
                frame.len(),
                self.names.len()
            );
        }
        Ok(frame
            .chunks_exact(BYTES_PER_JOINT)
            .map(|slot| f32::from_le_bytes([slot[0], slot[1], slot[2], slot[3]]))
            .collect())
    }

    /// Sends a full frame of angles, encoded little-endian f32 per joint.
    ///
    /// Returns whether the service accepted the frame. An angle count that
    /// does not match the advertised joint list is an error before anything
    /// is sent.
    pub async fn set_angles(&mut self, angles: &[f32]) -> Result<bool> {
        if angles.len() != self.names.len() {
            bail!("expected {} angles, got {}", self.names.len(), angles.len());
        }

        let mut request =
            Vec::with_capacity(protocol::SET_ANGLES.len() + angles.len() * BYTES_PER_JOINT);
        request.extend_from_slice(protocol::SET_ANGLES);
        for angle in angles {
            request.extend_from_slice(&angle.to_le_bytes());
        }

        let reply = self.raw_request(&request).await?;
        Ok(reply == protocol::REPLY_ACCEPTED)
    }
}

/// Runs the `names` subcommand: print the joint table, one name per line.
pub async fn run_names(args: QueryArgs) -> Result<()> {
    let client = AngleClient::connect(args.server).await?;
    for name in client.names() {
        write_stdout(name).await?;
    }
    Ok(())
}

/// Runs the `angles` subcommand: print each joint's current value.
pub async fn run_angles(args: QueryArgs) -> Result<()> {
    let mut client = AngleClient::connect(args.server).await?;
    let values = client.angles_f32().await?;
    for (name, value) in client.names().iter().zip(values) {
        write_stdout(&format!("{name} {value}")).await?;
    }
    Ok(())
}

/// Runs the `set` subcommand: send one full frame of angles.
pub async fn run_set(args: SetArgs) -> Result<()> {
    let mut client = AngleClient::connect(args.server).await?;
    if client.set_angles(&args.angles).await? {
        write_stdout("frame accepted").await?;
        Ok(())
    } else {
        bail!("server rejected the frame")
    }
}

async fn write_stdout(line: &str) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
