use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::snapshot;

use anyhow::Result;
use chrono::Utc;
use examtrack_core::memory::MemoryRepo;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run_cli(args: Cli) -> Result<()> {
    match args.cmd.clone() {
        Command::Stats(cmd) => stats_cmd(&args, cmd),
        Command::Sample(cmd) => sample_cmd(&args, cmd),
        Command::Serve(cmd) => serve_cmd(&args, cmd).await,
    }
}

fn snapshot_path(args: &Cli) -> PathBuf {
    args.snapshot
        .clone()
        .unwrap_or_else(snapshot::default_snapshot_file)
}

fn stats_cmd(args: &Cli, cmd: StatsCmd) -> Result<()> {
    let snap = snapshot::load_or_default(&snapshot_path(args));
    let stats =
        snapshot::build_statistics(&snap, Utc::now(), cmd.period, !cmd.no_recommendations);
    let out = if cmd.pretty {
        serde_json::to_string_pretty(&stats)?
    } else {
        serde_json::to_string(&stats)?
    };
    println!("{out}");
    Ok(())
}

fn sample_cmd(args: &Cli, cmd: SampleCmd) -> Result<()> {
    let path = snapshot_path(args);
    if path.exists() && !cmd.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let snap = snapshot::sample(Utc::now());
    snapshot::save(&path, &snap)?;
    println!("wrote {}", path.display());
    Ok(())
}

async fn serve_cmd(args: &Cli, cmd: ServeCmd) -> Result<()> {
    let snap = snapshot::load_or_default(&snapshot_path(args));
    let papers = snap.papers();
    let repo = Arc::new(MemoryRepo::new());
    snapshot::seed_repo(&*repo, &snap).await?;
    let addr: SocketAddr = cmd.addr.parse()?;
    api_server::run(repo, papers, addr).await
}
