//! Forecast API client: cards, their comments, and persons.

use crate::error::{MigrateError, Result};
use crate::http;
use crate::model::{Card, Comment, Person, PersonMap};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-forecast-api-key");

/// Which cards to migrate. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub project: Option<i64>,
    pub sprint: Option<i64>,
    pub workflow_column: Option<i64>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        if let Some(sprint) = self.sprint {
            if card.sprint != Some(sprint) {
                return false;
            }
        }
        if let Some(column) = self.workflow_column {
            if card.workflow_column != Some(column) {
                return false;
            }
        }
        true
    }

    /// Keep only matching cards. The project scope is applied server-side.
    pub fn apply(&self, mut cards: Vec<Card>) -> Vec<Card> {
        cards.retain(|card| self.matches(card));
        cards
    }

    fn cards_path(&self) -> String {
        match self.project {
            Some(project) => format!("/api/v1/projects/{}/cards", project),
            None => "/api/v1/cards".to_string(),
        }
    }
}

pub struct ForecastClient {
    http: Client,
    base: Url,
}

impl ForecastClient {
    pub fn new(api_key: &str, base: Url) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            MigrateError::Config("Forecast API key is not a valid header value".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let http = http::client_builder().default_headers(headers).build()?;
        Ok(Self { http, base })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = http::endpoint(&self.base, path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send()?;
        http::read_json(response)
    }

    pub fn fetch_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        info!("requesting cards");
        let cards: Vec<Card> = self.get(&filter.cards_path())?;
        let total = cards.len();
        let cards = filter.apply(cards);
        debug!(total, kept = cards.len(), "filtered cards");
        Ok(cards)
    }

    pub fn fetch_comments(&self, card_id: i64) -> Result<Vec<Comment>> {
        self.get(&format!("/api/v1/cards/{}/comments", card_id))
    }

    /// Fetch cards, then one comment request per card when `with_comments` is set.
    pub fn fetch_cards_with_comments(
        &self,
        filter: &CardFilter,
        with_comments: bool,
    ) -> Result<Vec<Card>> {
        let mut cards = self.fetch_cards(filter)?;

        let mut comment_count = 0;
        if with_comments {
            info!("requesting comments for every card");
            for card in &mut cards {
                card.comments = self.fetch_comments(card.id)?;
                comment_count += card.comments.len();
            }
        }

        info!(
            cards = cards.len(),
            comments = comment_count,
            "downloaded {} cards and {} comments",
            cards.len(),
            comment_count
        );
        Ok(cards)
    }

    pub fn fetch_persons(&self) -> Result<PersonMap> {
        info!("requesting persons");
        let persons: Vec<Person> = self.get("/api/v1/persons")?;
        let persons: PersonMap = persons.into_iter().collect();
        if persons.is_empty() {
            warn!("Forecast returned no persons, every card will fail to convert");
        }
        info!(persons = persons.len(), "downloaded {} persons", persons.len());
        Ok(persons)
    }
}
