use crate::cli::Cli;
use crate::convert::convert_cards;
use crate::forecast::{CardFilter, ForecastClient};
use crate::github::{GithubClient, Pusher, RepoTarget};
use crate::model::MigrationReport;
use crate::throttle::Throttle;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use tracing::info;

use super::CommandContext;

/// Parameters for a migration run
#[derive(Clone)]
pub struct MigrateParams {
    pub forecast_api_key: String,
    pub github_username: String,
    pub github_token: String,
    pub target: RepoTarget,
    pub filter: CardFilter,
    pub with_comments: bool,
    pub label: Option<String>,
    pub throttle: Throttle,
    pub dry_run: bool,
}

impl MigrateParams {
    /// Merge command-line flags over the loaded config.
    pub fn from_cli(cli: &Cli, ctx: &CommandContext) -> Self {
        let github = &ctx.config.github;
        Self {
            forecast_api_key: cli.forecast_api_key.clone(),
            github_username: cli.github_username.clone(),
            github_token: cli.github_token.clone(),
            target: RepoTarget {
                owner: cli.github_owner.clone(),
                repository: cli.github_repository.clone(),
                project_number: cli.github_project_number.filter(|&n| n != 0),
            },
            filter: CardFilter {
                project: given(cli.forecast_project),
                sprint: given(cli.forecast_sprint),
                workflow_column: given(cli.forecast_workflow_column),
            },
            with_comments: cli.with_comments,
            label: cli
                .label
                .clone()
                .or_else(|| github.label.clone())
                .filter(|l| !l.is_empty()),
            throttle: Throttle::from_millis(cli.throttle_ms(github.throttle_ms)),
            dry_run: cli.dry_run,
        }
    }
}

/// Forecast ids start at 1; a zero id means "no filter".
fn given(id: Option<i64>) -> Option<i64> {
    id.filter(|&id| id != 0)
}

pub fn handle_migrate(ctx: &CommandContext, params: MigrateParams) -> Result<MigrationReport> {
    // Pull
    let forecast = ForecastClient::new(&params.forecast_api_key, ctx.config.forecast_url()?)?;
    let cards = forecast
        .fetch_cards_with_comments(&params.filter, params.with_comments)
        .context("Failed to fetch Forecast cards")?;
    let persons = forecast
        .fetch_persons()
        .context("Failed to fetch Forecast persons")?;

    // Convert
    let issues = convert_cards(&cards, params.label.as_deref(), &persons)
        .context("Failed to convert Forecast cards")?;

    let fetched = MigrationReport {
        cards: cards.len(),
        card_comments: cards.iter().map(|c| c.comments.len()).sum(),
        ..Default::default()
    };

    if params.dry_run {
        println!("{}", serde_json::to_string_pretty(&issues)?);
        eprintln!(
            "{} {} issues would be created in {}/{}",
            "dry-run:".cyan(),
            issues.len(),
            params.target.owner,
            params.target.repository
        );
        return Ok(fetched);
    }

    // Push
    let github = GithubClient::new(
        &params.github_username,
        &params.github_token,
        ctx.config.github_url()?,
    )?;
    info!(
        throttle = ?params.throttle.interval(),
        "pushing {} issues to {}/{}",
        issues.len(),
        params.target.owner,
        params.target.repository
    );

    let pusher = Pusher::new(&github, &params.target, params.throttle);
    let pushed = pusher
        .push(&issues, |current, total| {
            print!("\rcreating issues ({}/{})", current, total);
            let _ = io::stdout().flush();
        })
        .context("Failed to push issues to GitHub")?;
    if !issues.is_empty() {
        println!();
    }

    let report = MigrationReport {
        cards: fetched.cards,
        card_comments: fetched.card_comments,
        ..pushed
    };
    info!("created {}", report);
    println!(
        "{} {} cards migrated",
        "Migration completed:".green(),
        report.cards
    );
    Ok(report)
}
