//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "college-cost", version, about = "College cost-of-attendance lookup service")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "COLLEGE_COST_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// CSV dataset with College, Tuition (in-state), Tuition (out-of-state), Room & Board columns
    #[arg(long, env = "COLLEGE_COST_DATASET", default_value = "college_costs.csv")]
    pub dataset: PathBuf,

    /// Log output format
    #[arg(long, env = "COLLEGE_COST_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}
