use std::net::SocketAddr;

use tokio::net::TcpListener;

use mip::{serve, Blake3Hasher, CannedSource, Digest, DigestHasher, ProofRequest, SiblingPath};

pub fn digest(input: &str) -> Digest {
    Blake3Hasher::digest(input.as_bytes())
}

/// The root a correct authority run would recompute for `tx` over `path`.
#[allow(dead_code)]
pub fn fold(tx: &str, path: &SiblingPath) -> Digest {
    mip_core::fold_candidate::<Blake3Hasher>(tx, path)
}

/// The canned sibling path of the reference deployment.
#[allow(dead_code)]
pub fn reference_path() -> SiblingPath {
    SiblingPath(vec![digest("3"), digest("4567"), digest("12")])
}

/// Bind an ephemeral port and serve `path` from a canned authority on it.
#[allow(dead_code)]
pub async fn spawn_authority(path: SiblingPath) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, CannedSource::new(path)));
    addr
}

pub fn request(addr: SocketAddr, root: &Digest, txs: &[&str]) -> ProofRequest {
    let mut builder = ProofRequest::builder(addr.ip().to_string(), addr.port(), root.to_hex());
    for tx in txs {
        builder = builder.add_transaction(*tx);
    }
    builder.build().unwrap()
}
