//! The authority side of the proof protocol.
//!
//! The authority owns the Merkle tree and can produce the ordered sibling digests of any
//! transaction's inclusion path. How it builds and maintains that tree is its own business:
//! the serve loop only speaks the wire contract and delegates path lookup to a
//! [`SiblingSource`].

use anyhow::{anyhow, bail, Result};
use futures::SinkExt as _;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::{timeout, Duration};
use tokio_stream::StreamExt as _;
use tracing::{debug, info, warn};

use mip_core::SiblingPath;

use crate::wire::{self, SENTINEL};

/// How long the authority waits for the request line before giving up on a connection.
const REQUEST_DEADLINE: Duration = Duration::from_secs(5);

/// Looks up the ordered sibling digests forming a transaction's inclusion path.
pub trait SiblingSource {
    /// The siblings of `tx`'s inclusion path, in leaf-to-root order.
    fn path_for(&self, tx: &str) -> SiblingPath;
}

/// A [`SiblingSource`] answering every lookup with the same fixed path.
///
/// This is the reference double: it exercises the client protocol deterministically without
/// any tree behind it.
pub struct CannedSource {
    path: SiblingPath,
}

impl CannedSource {
    pub fn new(path: SiblingPath) -> Self {
        Self { path }
    }
}

impl SiblingSource for CannedSource {
    fn path_for(&self, _tx: &str) -> SiblingPath {
        self.path.clone()
    }
}

/// Accept connections and serve the proof protocol until ctrl-c.
///
/// Connections are handled one at a time, end-to-end; a connection that violates the protocol
/// is dropped and logged without disturbing the loop.
pub async fn serve<S: SiblingSource>(listener: TcpListener, source: S) -> Result<()> {
    let local = listener.local_addr()?;
    info!(%local, "authority listening");
    loop {
        tokio::select! {
            conn = listener.accept() => {
                let (stream, peer) = conn?;
                debug!(%peer, "accepted connection");
                if let Err(e) = handle(stream, &source).await {
                    warn!(%peer, "connection failed: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}

/// Read the request line, write the sibling digests and the sentinel, then drop the
/// connection.
async fn handle<S: SiblingSource>(stream: TcpStream, source: &S) -> Result<()> {
    let (mut rd_lines, mut wr_lines) = wire::split_lines(stream);

    let tx = match timeout(REQUEST_DEADLINE, rd_lines.next()).await {
        Ok(Some(line)) => line.map_err(|e| anyhow!("read request line: {}", e))?,
        Ok(None) => bail!("connection closed before the request line"),
        Err(_) => bail!("timed out waiting for the request line"),
    };
    info!(tx, "received transaction");

    let path = source.path_for(&tx);
    for sibling in &path.0 {
        wr_lines.send(sibling.to_hex()).await?;
    }
    wr_lines.send(SENTINEL).await?;
    debug!(tx, siblings = path.len(), "answered");
    Ok(())
}
