use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub cards: usize,
    pub card_comments: usize,
    pub issues_created: usize,
    pub comments_created: usize,
    pub project_cards_created: usize,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} issues, {} comments, {} project cards",
            self.issues_created, self.comments_created, self.project_cards_created
        )
    }
}
