use serde::{Deserialize, Serialize};

/// A GitHub issue ready to be created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub title: String,
    pub body: String,
    pub comments: Vec<String>,
    pub labels: Vec<String>,
}

/// The parts of GitHub's issue response the migration needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedIssue {
    pub id: i64,
    pub number: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: i64,
    pub number: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectColumn {
    pub id: i64,
    pub name: String,
}
