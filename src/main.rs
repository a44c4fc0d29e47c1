use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rootdig::{RecordType, Resolved, Resolver, UdpTransport};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QueryKind {
    /// IPv4 address record
    A,
    /// Authoritative nameserver record
    Ns,
}

impl From<QueryKind> for RecordType {
    fn from(kind: QueryKind) -> Self {
        match kind {
            QueryKind::A => RecordType::A,
            QueryKind::Ns => RecordType::Ns,
        }
    }
}

/// Resolve a domain name iteratively, starting from a root nameserver.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Record type to resolve
    #[arg(ignore_case = true)]
    record_type: QueryKind,

    /// Domain name to resolve
    domain: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let resolver = Resolver::new(UdpTransport::default());

    match resolver.resolve(&args.domain, args.record_type.into()).await {
        Ok(Resolved::Address(addr)) => {
            println!("The IP of {} is {}", args.domain, addr);
            ExitCode::SUCCESS
        }
        Ok(Resolved::Nameserver(ns)) => {
            println!("The nameserver for {} is {}", args.domain, ns);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to resolve {}: {}", args.domain, err);
            ExitCode::FAILURE
        }
    }
}
