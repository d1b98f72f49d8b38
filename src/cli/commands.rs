use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "forecast2github")]
#[command(
    author,
    version,
    about = "Migrate Forecast cards to GitHub issues, optionally with comments and a project column"
)]
pub struct Cli {
    /// Your Forecast API key
    #[arg(env = "FORECAST_API_KEY", hide_env_values = true)]
    pub forecast_api_key: String,

    /// Your GitHub username
    #[arg(env = "GITHUB_USERNAME")]
    pub github_username: String,

    /// Your GitHub API token
    #[arg(env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// GitHub repository owner or organization
    #[arg(env = "GITHUB_OWNER")]
    pub github_owner: String,

    /// GitHub repository
    #[arg(env = "GITHUB_REPOSITORY")]
    pub github_repository: String,

    /// Only pull cards from this Forecast project id
    #[arg(long)]
    pub forecast_project: Option<i64>,

    /// Only pull cards from this Forecast sprint id
    #[arg(long)]
    pub forecast_sprint: Option<i64>,

    /// Only pull cards from this Forecast workflow column id
    #[arg(long)]
    pub forecast_workflow_column: Option<i64>,

    /// Also add the issues to this GitHub project (first column)
    #[arg(long)]
    pub github_project_number: Option<u64>,

    /// Also migrate card comments (requires an extra query for each card)
    #[arg(long)]
    pub with_comments: bool,

    /// Label to add to migrated GitHub issues
    #[arg(long)]
    pub label: Option<String>,

    /// Milliseconds to wait between GitHub API requests [default: 1000]
    #[arg(long, value_name = "MS")]
    pub throttle: Option<u64>,

    /// Convert and print the issues as JSON without creating anything on GitHub
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The `--throttle` flag wins over the configured value.
    pub fn throttle_ms(&self, configured: u64) -> u64 {
        self.throttle.unwrap_or(configured)
    }
}
