use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser};
use vetsearch::{AppointmentStatus, ServiceType};

use crate::output::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "vetsearch")]
#[command(version, about = "Search veterinary appointments", long_about = None)]
pub struct Cli {
    /// JSON file holding an array of appointments
    #[arg(short, long)]
    pub data: PathBuf,

    /// YAML search configuration (page sizes)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub window: WindowArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// Print the search expression and its SQL translation (with --output
    /// json or yaml, instead of the results)
    #[arg(long)]
    pub explain: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Appointment id
    #[arg(long)]
    pub id: Option<i64>,

    /// Customer (owner) id
    #[arg(long)]
    pub customer: Option<i64>,

    /// Employee (veterinarian) id
    #[arg(long)]
    pub employee: Option<i64>,

    /// Pet id
    #[arg(long)]
    pub pet: Option<i64>,

    /// Service type, e.g. vaccination
    #[arg(long)]
    pub service: Option<ServiceType>,

    /// Appointment status, e.g. confirmed or no-show
    #[arg(long)]
    pub status: Option<AppointmentStatus>,

    /// Clinic id
    #[arg(long)]
    pub clinic: Option<i64>,

    /// First day of a date range (inclusive)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last day of a date range (inclusive)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Single scheduled day
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub on: Option<NaiveDate>,

    /// Match any filter instead of all of them
    #[arg(long)]
    pub any: bool,
}

#[derive(Args, Debug, Default)]
pub struct WindowArgs {
    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// 1-based page number, sized by --limit or the configured default
    #[arg(short, long, conflicts_with = "offset")]
    pub page: Option<usize>,

    /// Number of matching results to skip
    #[arg(long)]
    pub offset: Option<usize>,
}
