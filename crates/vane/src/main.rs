//! Command line DNS lookup: one question, one answer, printed.

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use vane_client::{ClientConfig, ClientError, Request, UdpTransport};
use vane_proto::{Name, Question};

#[derive(Debug, Parser)]
#[command(name = "vane", version, about = "Look up a domain name over DNS")]
struct Args {
    /// Domain name to look up
    domain: String,

    /// DNS server to query
    #[arg(short, long, default_value = "1.1.1.1:53")]
    server: SocketAddr,

    /// Record type to request
    #[arg(short = 't', long = "type", value_enum, default_value = "a")]
    record_type: QueryType,

    /// Seconds to wait for a response
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Log filter, e.g. "debug" or "vane_client=trace"
    #[arg(long, default_value = "warn")]
    log: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum QueryType {
    A,
    Aaaa,
    Ns,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log).context("invalid log filter")?,
        )
        .with_target(false)
        .init();

    let name = Name::from_str(&args.domain)
        .with_context(|| format!("invalid domain name {:?}", args.domain))?;

    let question = match args.record_type {
        QueryType::A => Question::a(name),
        QueryType::Aaaa => Question::aaaa(name),
        QueryType::Ns => Question::ns(name),
    };

    let config = ClientConfig {
        server: args.server,
        timeout: Duration::from_secs(args.timeout),
    };

    let request = Request::new(question);
    let response = request.send(&UdpTransport, &config).await.map_err(|e| match e {
        ClientError::Server(server) => anyhow!("{} answered: {server}", args.server),
        ClientError::Timeout => anyhow!("no response from {} within {}s", args.server, args.timeout),
        ClientError::Network(io) => anyhow!("network failure talking to {}: {io}", args.server),
        other => anyhow!("bad response from {}: {other}", args.server),
    })?;

    if response.records.is_empty() {
        println!(";; no records in answer");
    }
    for record in &response.records {
        println!("{record}");
    }

    Ok(())
}
