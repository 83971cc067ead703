use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;

use mip::{logging, wire, Blake3Hasher, CannedSource, Digest, ProofRequest, SiblingPath};

#[derive(Parser, Debug)]
#[command(name = "mip", about = "Merkle inclusion proof client and authority")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check transactions for inclusion under a trusted root.
    Check(CheckArgs),
    /// Serve inclusion paths to proof clients.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Host name or IP address of the authority.
    #[arg(long)]
    authority: String,

    /// TCP port of the authority.
    #[arg(long, default_value_t = wire::DEFAULT_PORT)]
    port: u16,

    /// The trusted root digest, 64 lowercase hex characters.
    #[arg(long)]
    root: String,

    /// Timeout for establishing each connection, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    connect_timeout_ms: u64,

    /// Timeout for each read from the authority, in milliseconds.
    #[arg(long, default_value_t = 5000)]
    read_timeout_ms: u64,

    /// The transaction identifiers to check.
    #[arg(required = true)]
    transactions: Vec<String>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// The address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// The TCP port to listen on.
    #[arg(long, default_value_t = wire::DEFAULT_PORT)]
    port: u16,

    /// A sibling digest of the canned inclusion path, in leaf-to-root order. Repeatable;
    /// when omitted the canned path is empty.
    #[arg(long = "sibling")]
    siblings: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    match Cli::parse().command {
        Command::Check(args) => check(args).await,
        Command::Serve(args) => serve(args).await,
    }
}

async fn check(args: CheckArgs) -> Result<()> {
    let mut builder = ProofRequest::builder(args.authority, args.port, args.root)
        .connect_timeout(Duration::from_millis(args.connect_timeout_ms))
        .read_timeout(Duration::from_millis(args.read_timeout_ms));
    for tx in args.transactions {
        builder = builder.add_transaction(tx);
    }

    let report = builder.build()?.check::<Blake3Hasher>().await;
    print!("{}", report);

    if !report.all_valid() {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut path = Vec::with_capacity(args.siblings.len());
    for sibling in &args.siblings {
        path.push(Digest::from_hex(sibling).map_err(|e| anyhow!("--sibling {}: {}", sibling, e))?);
    }

    let listener = TcpListener::bind((args.bind.as_str(), args.port))
        .await
        .with_context(|| format!("bind {}:{}", args.bind, args.port))?;
    mip::serve(listener, CannedSource::new(SiblingPath(path))).await
}
