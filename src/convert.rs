//! Conversion of Forecast cards into GitHub issues.

use crate::error::{MigrateError, Result};
use crate::model::{Card, Issue, Person, PersonMap};

/// Prefix an HTML body with the original author's name
pub fn prefix_author(body: &str, person: &Person) -> String {
    format!("<i>original author: {}</i><br>{}", person.display_name(), body)
}

fn lookup(persons: &PersonMap, id: i64) -> Result<&Person> {
    persons.get(id).ok_or(MigrateError::UnknownPerson(id))
}

/// Turn a Forecast card into a GitHub issue
pub fn convert_card(card: &Card, label: Option<&str>, persons: &PersonMap) -> Result<Issue> {
    let body = prefix_author(card.body(), lookup(persons, card.created_by)?);

    let comments = card
        .comments
        .iter()
        .map(|c| -> Result<String> {
            Ok(prefix_author(&c.comment, lookup(persons, c.person_id)?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Issue {
        title: card.title.clone(),
        body,
        comments,
        labels: label
            .filter(|l| !l.is_empty())
            .map(|l| vec![l.to_string()])
            .unwrap_or_default(),
    })
}

/// Convert a batch, failing on the first card with an unknown author.
pub fn convert_cards(cards: &[Card], label: Option<&str>, persons: &PersonMap) -> Result<Vec<Issue>> {
    cards
        .iter()
        .map(|card| convert_card(card, label, persons))
        .collect()
}
