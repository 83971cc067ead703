//! Building proof requests and reporting their outcomes.

use std::fmt;
use std::time::Duration;

use mip_core::{Digest, DigestHasher};

use crate::client;
use crate::error::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Accumulates the parameters of a [`ProofRequest`].
///
/// Validation is deferred to [`build`](Self::build); nothing touches the network before then.
pub struct ProofRequestBuilder {
    address: String,
    port: u16,
    root: String,
    transactions: Vec<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl ProofRequestBuilder {
    fn new(address: String, port: u16, root: String) -> Self {
        Self {
            address,
            port,
            root,
            transactions: Vec::new(),
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a transaction identifier to check. Order is preserved; duplicates are allowed
    /// and verified independently.
    pub fn add_transaction(mut self, tx: impl Into<String>) -> Self {
        self.transactions.push(tx.into());
        self
    }

    /// Set the timeout for establishing a connection to the authority.
    ///
    /// Default: 5 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the timeout for each read from the authority.
    ///
    /// Default: 5 seconds.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Validate the accumulated parameters and produce an immutable [`ProofRequest`].
    pub fn build(self) -> Result<ProofRequest, Error> {
        if self.address.is_empty() {
            return Err(Error::InvalidConfiguration(
                "authority address is empty".into(),
            ));
        }
        if self.port == 0 {
            return Err(Error::InvalidConfiguration("authority port is zero".into()));
        }
        if self.root.is_empty() {
            return Err(Error::InvalidConfiguration("root digest is empty".into()));
        }
        let root = Digest::from_hex(&self.root)
            .map_err(|e| Error::InvalidConfiguration(format!("root digest: {}", e)))?;
        Ok(ProofRequest {
            address: self.address,
            port: self.port,
            root,
            transactions: self.transactions,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        })
    }
}

/// An immutable request to verify a list of transactions against one trusted root.
///
/// Built once via [`ProofRequest::builder`] and consumed exactly once by
/// [`check`](Self::check).
#[derive(Debug)]
pub struct ProofRequest {
    pub(crate) address: String,
    pub(crate) port: u16,
    pub(crate) root: Digest,
    pub(crate) transactions: Vec<String>,
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
}

impl ProofRequest {
    /// Start building a request against the authority at `address:port`, verifying against
    /// `root` (64 lowercase hex characters).
    pub fn builder(
        address: impl Into<String>,
        port: u16,
        root: impl Into<String>,
    ) -> ProofRequestBuilder {
        ProofRequestBuilder::new(address.into(), port, root.into())
    }

    /// The trusted root every transaction is verified against.
    pub fn root(&self) -> &Digest {
        &self.root
    }

    /// The transaction identifiers to check, in submission order.
    pub fn transactions(&self) -> &[String] {
        &self.transactions
    }

    /// Execute the proof protocol for every transaction and return the aggregate report.
    ///
    /// Each transaction is checked on its own connection; connection and protocol failures are
    /// recorded per transaction in the report, never propagated.
    pub async fn check<H>(self) -> VerificationReport
    where
        H: DigestHasher + Send + Sync + 'static,
    {
        client::check_all::<H>(self).await
    }
}

/// The outcome of checking a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The recomputed candidate root equals the trusted root.
    Valid,
    /// The recomputed candidate root differs from the trusted root.
    Invalid,
    /// No outcome could be computed for this transaction.
    Error(Error),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Valid => f.write_str("valid"),
            Outcome::Invalid => f.write_str("invalid"),
            Outcome::Error(e) => write!(f, "error: {}", e),
        }
    }
}

/// The outcome of every submitted transaction, in submission order.
///
/// Every submitted identifier appears in exactly one of the valid, invalid, and error buckets
/// exactly once; duplicates appear once per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    entries: Vec<(String, Outcome)>,
}

impl VerificationReport {
    pub(crate) fn new(entries: Vec<(String, Outcome)>) -> Self {
        Self { entries }
    }

    /// All entries, in submission order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(tx, outcome)| (&**tx, outcome))
    }

    /// The transactions proven included under the root.
    pub fn valid(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, Outcome::Valid))
            .map(|(tx, _)| &**tx)
    }

    /// The transactions whose recomputed candidate did not match the root.
    pub fn invalid(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, Outcome::Invalid))
            .map(|(tx, _)| &**tx)
    }

    /// The transactions that could not be checked, with the reason.
    pub fn errored(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.entries.iter().filter_map(|(tx, o)| match o {
            Outcome::Error(e) => Some((&**tx, e)),
            _ => None,
        })
    }

    /// The total number of entries. Equals the number of submitted transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every submitted transaction came out valid.
    pub fn all_valid(&self) -> bool {
        self.entries.iter().all(|(_, o)| matches!(o, Outcome::Valid))
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (tx, outcome) in &self.entries {
            writeln!(f, "{}: {}", tx, outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_hex() -> String {
        "ab".repeat(32)
    }

    #[test]
    fn builder_accumulates_in_order() {
        let request = ProofRequest::builder("127.0.0.1", 1111, root_hex())
            .add_transaction("a")
            .add_transaction("b")
            .add_transaction("a")
            .build()
            .unwrap();
        assert_eq!(request.transactions(), &["a", "b", "a"]);
    }

    #[test]
    fn build_rejects_empty_address() {
        let err = ProofRequest::builder("", 1111, root_hex()).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn build_rejects_zero_port() {
        let err = ProofRequest::builder("127.0.0.1", 0, root_hex())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn build_rejects_empty_root() {
        let err = ProofRequest::builder("127.0.0.1", 1111, "").build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn build_rejects_malformed_root() {
        let err = ProofRequest::builder("127.0.0.1", 1111, "not-a-digest")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn report_partitions_entries() {
        let report = VerificationReport::new(vec![
            ("a".into(), Outcome::Valid),
            ("b".into(), Outcome::Invalid),
            ("a".into(), Outcome::Error(Error::Connection("refused".into()))),
        ]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.valid().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(report.invalid().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(report.errored().count(), 1);
        assert!(!report.all_valid());

        let rendered = format!("{}", report);
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.contains("b: invalid"));
    }
}
