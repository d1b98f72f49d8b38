//! Data models for the migration.
//!
//! - [`Card`] and [`Comment`]: Forecast tasks as returned by the cards API
//! - [`Person`] and [`PersonMap`]: Forecast users, keyed by id
//! - [`Issue`]: the GitHub issue a card converts into
//! - [`MigrationReport`]: counters printed at the end of a run

mod card;
mod issue;
mod person;
mod report;

pub use card::{Card, Comment};
pub use issue::{CreatedIssue, Issue, Project, ProjectColumn};
pub use person::{Person, PersonMap};
pub use report::MigrationReport;
