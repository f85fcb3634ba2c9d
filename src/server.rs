use std::{future::Future, io, net::SocketAddr, sync::Arc};

use anyhow::Result;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpSocket, TcpStream},
    select,
};
use tracing::{debug, info, warn};

use crate::{protocol, store::JointStore};

/// Accept backlog used by the reference deployment.
const BACKLOG: u32 = 10;

/// Upper bound on how many bytes one readiness event delivers. A request
/// larger than this cannot be served, because reads are never reassembled.
const RECV_BUFFER_SIZE: usize = 4096;

/// Binds a listener with the service's accept backlog.
pub async fn bind(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(BACKLOG)
}

/// The joint-state service: one listening socket, one task per accepted
/// connection, all connections sharing a single [`JointStore`].
pub struct Server {
    listener: TcpListener,
    store: Arc<JointStore>,
}

impl Server {
    pub fn new(listener: TcpListener, store: Arc<JointStore>) -> Self {
        Self { listener, store }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves connections until `shutdown` completes.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Server { listener, store } = self;
        tokio::pin!(shutdown);

        loop {
            select! {
                _ = &mut shutdown => {
                    info!("server shutting down");
                    break;
                }
                accept_result = listener.accept() => {
                    handle_accept_result(accept_result, &store);
                }
            }
        }

        Ok(())
    }

    pub async fn run_until_ctrl_c(self) -> Result<()> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = ?err, "failed to install ctrl-c handler");
            }
        })
        .await
    }
}

fn handle_accept_result(result: io::Result<(TcpStream, SocketAddr)>, store: &Arc<JointStore>) {
    match result {
        Ok((stream, peer)) => spawn_connection_handler(stream, peer, store),
        Err(err) => warn!(error = ?err, "failed to accept connection"),
    }
}

fn spawn_connection_handler(stream: TcpStream, peer: SocketAddr, store: &Arc<JointStore>) {
    let store = Arc::clone(store);
    info!(peer = %peer, "new connection established");
    tokio::spawn(async move {
        match serve_connection(stream, store).await {
            Ok(()) => info!(peer = %peer, "disconnected"),
            Err(err) => warn!(peer = %peer, error = ?err, "connection closed with error"),
        }
    });
}

/// Request-reply cycles for one connection.
///
/// Each read is one message: whatever bytes the socket delivers in a single
/// read are handed to the dispatcher as-is, and the reply (when the protocol
/// defines one) is written straight back. Nothing is buffered across reads,
/// so a frame split over TCP segments is rejected rather than reassembled —
/// that is the wire contract the peers were built against.
async fn serve_connection(mut stream: TcpStream, store: Arc<JointStore>) -> io::Result<()> {
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    loop {
        let received = stream.read(&mut buf).await?;
        if received == 0 {
            return Ok(());
        }
        match protocol::dispatch(&buf[..received], &store) {
            Some(reply) => stream.write_all(&reply).await?,
            None => debug!(len = received, "unrecognized command, no reply sent"),
        }
    }
}
