use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triage_common::{Config, ServiceRequest, TriageError};
use triage_engine::{TriageService, DEFAULT_TRAVERSAL_START, DEFAULT_URGENT_TAKE};

/// Municipal service-request triage engine.
///
/// The engine is rebuilt from the configured seed on every run
/// (TRIAGE_SEED, TRIAGE_SEED_COUNT, TRIAGE_SEED_ANCHOR).
#[derive(Parser)]
#[command(name = "triage", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every request, ordered by id
    All,
    /// Look up one request by id
    Find { id: u32 },
    /// Most urgent requests still queued
    Urgent {
        #[arg(long, default_value_t = DEFAULT_URGENT_TAKE)]
        take: usize,
    },
    /// Serve (dequeue) the most urgent requests
    ServeNext {
        #[arg(long, default_value_t = 1)]
        times: usize,
    },
    /// Ward names, sorted
    Wards,
    /// Walk the ward network (BFS or DFS)
    Traverse {
        #[arg(long, default_value = DEFAULT_TRAVERSAL_START)]
        start: String,
        #[arg(long, default_value = "BFS")]
        algo: String,
    },
    /// Minimum spanning tree of the ward network
    Mst {
        #[arg(long, default_value = DEFAULT_TRAVERSAL_START)]
        start: String,
    },
}

#[derive(Serialize)]
struct ServeReport {
    served: Vec<ServiceRequest>,
    remaining: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("triage_engine=info".parse()?)
                .add_directive("triage_graph=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let mut service = TriageService::seeded(&config);

    match cli.command {
        Command::All => print_json(&service.all())?,
        Command::Find { id } => match service.find_by_id(id) {
            Some(request) => print_json(request)?,
            None => bail!("request not found: {id}"),
        },
        Command::Urgent { take } => print_json(&service.urgent_top(take))?,
        Command::ServeNext { times } => {
            let mut served = Vec::with_capacity(times);
            let mut error = None;
            for _ in 0..times {
                match service.serve_next() {
                    Ok(request) => served.push(request.clone()),
                    Err(e @ TriageError::EmptyHeap) => {
                        error = Some(e.to_string());
                        break;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            info!(served = served.len(), remaining = service.queue_len(), "Serve run finished");
            let exhausted = error.is_some();
            print_json(&ServeReport {
                served,
                remaining: service.queue_len(),
                error,
            })?;
            if exhausted {
                bail!(TriageError::EmptyHeap);
            }
        }
        Command::Wards => print_json(&service.sorted_wards())?,
        Command::Traverse { start, algo } => print_json(&service.traverse(&start, &algo)?)?,
        Command::Mst { start } => print_json(&service.mst(&start)?)?,
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
