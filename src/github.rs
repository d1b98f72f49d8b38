//! GitHub API client and the issue pusher.

use crate::error::{MigrateError, Result};
use crate::http;
use crate::model::{CreatedIssue, Issue, MigrationReport, Project, ProjectColumn};
use crate::throttle::Throttle;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};
use url::Url;

/// Projects (classic) are only served with the inertia preview media type.
const PROJECTS_PREVIEW: &str = "application/vnd.github.inertia-preview+json";

#[derive(Debug, Serialize)]
struct NewIssue<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct NewComment<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct NewProjectCard {
    content_id: i64,
    content_type: &'static str,
}

/// Repository the issues are created in, plus the optional project board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub repository: String,
    pub project_number: Option<u64>,
}

impl RepoTarget {
    fn repo_path(&self, rest: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repository, rest)
    }
}

pub struct GithubClient {
    http: Client,
    base: Url,
    username: String,
    token: String,
}

impl GithubClient {
    pub fn new(username: impl Into<String>, token: impl Into<String>, base: Url) -> Result<Self> {
        let http = http::client_builder().build()?;
        Ok(Self {
            http,
            base,
            username: username.into(),
            token: token.into(),
        })
    }

    fn request(&self, method: Method, path: &str, preview: bool) -> RequestBuilder {
        let url = http::endpoint(&self.base, path);
        debug!(%method, %url, "github request");
        let builder = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.token));
        if preview {
            builder.header(ACCEPT, PROJECTS_PREVIEW)
        } else {
            builder
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str, preview: bool) -> Result<T> {
        let response = self.request(Method::GET, path, preview).send()?;
        http::read_json(response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, preview: bool) -> Result<T> {
        let response = self.request(Method::POST, path, preview).json(body).send()?;
        http::read_json(response)
    }

    pub fn list_projects(&self, target: &RepoTarget) -> Result<Vec<Project>> {
        self.get(&target.repo_path("projects"), true)
    }

    pub fn list_columns(&self, project_id: i64) -> Result<Vec<ProjectColumn>> {
        self.get(&format!("/projects/{}/columns", project_id), true)
    }

    /// Resolve a repository project number to the first column of that project.
    pub fn find_project_column(&self, target: &RepoTarget, number: u64) -> Result<ProjectColumn> {
        info!("listing repository projects");
        let project = self
            .list_projects(target)?
            .into_iter()
            .find(|p| p.number == number)
            .ok_or_else(|| MigrateError::ProjectNotFound {
                number,
                owner: target.owner.clone(),
                repository: target.repository.clone(),
            })?;

        info!(project = %project.name, "listing project {} columns", project.name);
        let column = self
            .list_columns(project.id)?
            .into_iter()
            .next()
            .ok_or(MigrateError::NoProjectColumns {
                project: project.name,
            })?;

        info!(column = %column.name, "using column {}", column.name);
        Ok(column)
    }

    pub fn create_issue(&self, target: &RepoTarget, issue: &Issue) -> Result<CreatedIssue> {
        let payload = NewIssue {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
        };
        self.post(&target.repo_path("issues"), &payload, false)
    }

    pub fn create_comment(&self, target: &RepoTarget, issue_number: u64, body: &str) -> Result<()> {
        let path = target.repo_path(&format!("issues/{}/comments", issue_number));
        let _: IgnoredAny = self.post(&path, &NewComment { body }, false)?;
        Ok(())
    }

    pub fn add_issue_to_column(&self, column_id: i64, issue_id: i64) -> Result<()> {
        let payload = NewProjectCard {
            content_id: issue_id,
            content_type: "Issue",
        };
        let path = format!("/projects/columns/{}/cards", column_id);
        let _: IgnoredAny = self.post(&path, &payload, true)?;
        Ok(())
    }
}

/// Creates issues one after another, sleeping before every request.
pub struct Pusher<'a> {
    client: &'a GithubClient,
    target: &'a RepoTarget,
    throttle: Throttle,
}

impl<'a> Pusher<'a> {
    pub fn new(client: &'a GithubClient, target: &'a RepoTarget, throttle: Throttle) -> Self {
        Self {
            client,
            target,
            throttle,
        }
    }

    /// Push every issue. `progress` is called with `(current, total)` before
    /// each issue is created. The first failing request aborts the run.
    pub fn push<F>(&self, issues: &[Issue], mut progress: F) -> Result<MigrationReport>
    where
        F: FnMut(usize, usize),
    {
        let column = match self.target.project_number {
            Some(number) => Some(self.client.find_project_column(self.target, number)?),
            None => None,
        };

        let mut report = MigrationReport::default();
        let total = issues.len();

        for (counter, issue) in issues.iter().enumerate() {
            progress(counter + 1, total);

            self.throttle.wait();
            let created = self.client.create_issue(self.target, issue)?;
            report.issues_created += 1;
            debug!(number = created.number, title = %issue.title, "created issue");

            for comment in &issue.comments {
                self.throttle.wait();
                self.client.create_comment(self.target, created.number, comment)?;
                report.comments_created += 1;
            }

            if let Some(column) = &column {
                self.throttle.wait();
                self.client.add_issue_to_column(column.id, created.id)?;
                report.project_cards_created += 1;
            }
        }

        Ok(report)
    }
}
