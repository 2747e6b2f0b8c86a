use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "examtrack", version, about = "ExamTrack statistics CLI/API")]
pub struct Cli {
    /// Snapshot file to read and write (defaults to the app data dir)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the statistics dashboard as JSON
    Stats(StatsCmd),
    /// Write a demo snapshot to play with
    Sample(SampleCmd),
    /// Launch Axum HTTP API
    Serve(ServeCmd),
}

#[derive(Debug, Args, Clone)]
pub struct StatsCmd {
    /// Only count reviews and sessions from the last N days
    #[arg(long)]
    pub period: Option<i64>,

    /// Leave the recommendations list empty
    #[arg(long)]
    pub no_recommendations: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SampleCmd {
    /// Overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ServeCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
