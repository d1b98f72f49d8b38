use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub sprint: Option<i64>,

    #[serde(default)]
    pub workflow_column: Option<i64>,

    pub created_by: i64,

    /// Only populated when comments are fetched separately.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub person_id: i64,
    pub comment: String,
}

impl Card {
    pub fn new(id: i64, title: impl Into<String>, created_by: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            sprint: None,
            workflow_column: None,
            created_by,
            comments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sprint(mut self, sprint: i64) -> Self {
        self.sprint = Some(sprint);
        self
    }

    pub fn with_workflow_column(mut self, workflow_column: i64) -> Self {
        self.workflow_column = Some(workflow_column);
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn body(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl Comment {
    pub fn new(person_id: i64, comment: impl Into<String>) -> Self {
        Self {
            person_id,
            comment: comment.into(),
        }
    }
}
