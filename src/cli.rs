use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jconverge")]
#[command(version)]
#[command(about = "Declarative convergence planner for Java runtimes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Policy table file (TOML or JSON); defaults to
    /// ~/.config/jconverge/policies.toml, falling back to the built-in table
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a host to its policy key and desired state
    Resolve(HostArgs),

    /// Compute the convergence plan for a host
    Plan(PlanArgs),

    /// Apply a plan against a simulated state snapshot
    Apply(ApplyArgs),

    /// List the loaded policy table
    Policies,

    /// Plan many hosts in parallel from a hosts file
    Batch(BatchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Host selection
// ============================================================================

#[derive(Args)]
pub struct HostArgs {
    /// Platform family (debian, ubuntu, centos, ...)
    #[arg(short, long)]
    pub family: String,

    /// Platform release version ("9.1", "7.4.1708", ...)
    #[arg(short = 'o', long = "os-version", value_name = "VERSION")]
    pub os_version: String,
}

// ============================================================================
// Plan / Apply
// ============================================================================

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub host: HostArgs,

    /// Override the derived install root (suppresses attribute derivation
    /// when --extra-package is also given)
    #[arg(long, value_name = "PATH")]
    pub java_home: Option<String>,

    /// Additional package beyond the policy entry; repeatable
    #[arg(long = "extra-package", value_name = "NAME")]
    pub extra_packages: Vec<String>,

    /// Observed state snapshot (TOML or JSON); defaults to an empty host
    #[arg(short, long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Show the plan without applying it
    #[arg(short, long)]
    pub dry_run: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Batch
// ============================================================================

#[derive(Args)]
pub struct BatchArgs {
    /// Hosts file: one "family version" pair per line, '#' for comments
    pub hosts_file: PathBuf,

    /// Number of parallel planning jobs
    #[arg(short, long, default_value = "4")]
    pub jobs: usize,
}
