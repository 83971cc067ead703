//! The client side of the proof protocol.
//!
//! Each transaction is checked over its own connection, carrying exactly one request and one
//! response; the connection handle lives for exactly that one exchange and is dropped on every
//! exit path. Transactions are checked concurrently and their outcomes merged by submission
//! index afterwards, so no aggregation state is shared between in-flight checks.

use std::sync::Arc;
use std::time::Duration;

use futures::SinkExt as _;
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_stream::StreamExt as _;
use tokio_util::codec::LinesCodecError;
use tracing::{debug, warn};

use mip_core::{proof, Digest, DigestHasher, SiblingPath};

use crate::error::Error;
use crate::request::{Outcome, ProofRequest, VerificationReport};
use crate::wire::{self, SENTINEL};

pub(crate) async fn check_all<H>(request: ProofRequest) -> VerificationReport
where
    H: DigestHasher + Send + Sync + 'static,
{
    let ProofRequest {
        address,
        port,
        root,
        transactions,
        connect_timeout,
        read_timeout,
    } = request;
    let address: Arc<str> = address.into();

    // Aborts in-flight checks if the returned future is dropped, so an abandoned run never
    // reports a partial result.
    let mut tasks = JoinSet::new();
    for (index, tx) in transactions.iter().enumerate() {
        let address = address.clone();
        let tx = tx.clone();
        tasks.spawn(async move {
            let outcome =
                check_one::<H>(&address, port, &root, &tx, connect_timeout, read_timeout).await;
            (index, outcome)
        });
    }

    let mut outcomes: Vec<Option<Outcome>> = transactions.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            // A panicked task loses its index; the backfill below keeps the report complete.
            Err(e) => warn!("transaction check task failed: {}", e),
        }
    }

    let entries = transactions
        .into_iter()
        .zip(outcomes)
        .map(|(tx, outcome)| {
            let outcome = outcome.unwrap_or_else(|| {
                Outcome::Error(Error::Connection("check task did not complete".into()))
            });
            (tx, outcome)
        })
        .collect();
    VerificationReport::new(entries)
}

async fn check_one<H: DigestHasher>(
    address: &str,
    port: u16,
    root: &Digest,
    tx: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Outcome {
    match fetch_path(address, port, tx, connect_timeout, read_timeout).await {
        Ok(path) => {
            let valid = proof::verify::<H>(tx, &path, root);
            debug!(tx, siblings = path.len(), valid, "checked transaction");
            if valid {
                Outcome::Valid
            } else {
                Outcome::Invalid
            }
        }
        Err(e) => {
            warn!(tx, "could not check transaction: {}", e);
            Outcome::Error(e)
        }
    }
}

/// Run one request/response exchange: send the transaction identifier, then collect digest
/// lines until the sentinel.
///
/// End-of-stream before the sentinel is a protocol violation, not an empty path.
async fn fetch_path(
    address: &str,
    port: u16,
    tx: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<SiblingPath, Error> {
    let stream = match timeout(connect_timeout, TcpStream::connect((address, port))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Err(Error::Connection(format!(
                "connect to {}:{}: {}",
                address, port, e
            )))
        }
        Err(_) => {
            return Err(Error::Connection(format!(
                "connect to {}:{} timed out",
                address, port
            )))
        }
    };

    let (mut rd_lines, mut wr_lines) = wire::split_lines(stream);
    wr_lines
        .send(tx)
        .await
        .map_err(|e| codec_error("send request", e))?;

    let mut siblings = Vec::new();
    loop {
        let line = match timeout(read_timeout, rd_lines.next()).await {
            Ok(Some(Ok(line))) => line,
            Ok(Some(Err(e))) => return Err(codec_error("read response", e)),
            Ok(None) => {
                return Err(Error::Protocol(
                    "response stream ended before the sentinel".into(),
                ))
            }
            Err(_) => return Err(Error::Connection("read from authority timed out".into())),
        };

        if line == SENTINEL {
            return Ok(SiblingPath(siblings));
        }
        let digest = Digest::from_hex(&line)
            .map_err(|e| Error::Protocol(format!("malformed digest line: {}", e)))?;
        siblings.push(digest);
    }
}

fn codec_error(context: &str, e: LinesCodecError) -> Error {
    match e {
        LinesCodecError::MaxLineLengthExceeded => {
            Error::Protocol(format!("{}: line exceeds the maximum length", context))
        }
        LinesCodecError::Io(e) => Error::Connection(format!("{}: {}", context, e)),
    }
}
