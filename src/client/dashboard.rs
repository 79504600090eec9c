//! Dashboard state and its HTTP data source.
//!
//! Every failure path ends in a renderable table: a failed or empty summary
//! fetch is replaced with demo rows and a non-blocking advisory, and a failed
//! pitcher list is replaced with the placeholder roster.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::combine::derive_headline;
use super::demo::generate_demo;
use super::sort::SortState;
use crate::models::{HeadlineStats, PitcherListing, PitchTypeSummary, SummaryField};
use crate::roster::placeholder_listing;

/// Advisory shown whenever demo data stands in for real data.
pub const DEMO_ADVISORY: &str = "Using demo data - Database connection pending";

/// Client-side errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// The API calls the dashboard depends on.
#[async_trait]
pub trait PitchApi: Send + Sync {
    async fn pitchers(&self) -> Result<Vec<PitcherListing>, ClientError>;

    async fn summary(&self, token: &str) -> Result<Vec<PitchTypeSummary>, ClientError>;
}

/// [`PitchApi`] over HTTP with reqwest.
pub struct HttpPitchApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPitchApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL plus percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PitchApi for HttpPitchApi {
    async fn pitchers(&self) -> Result<Vec<PitcherListing>, ClientError> {
        let url = self.endpoint(&["api", "pitchers"])?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        Ok(resp.json().await?)
    }

    async fn summary(&self, token: &str) -> Result<Vec<PitchTypeSummary>, ClientError> {
        let url = self.endpoint(&["api", "pitcher", token, "summary"])?;
        let resp = self.client.get(url).send().await?;
        match resp.status() {
            s if s.is_success() => Ok(resp.json().await?),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(token.to_string())),
            s => Err(ClientError::Status(s.as_u16())),
        }
    }
}

/// Where a set of rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Demo,
}

/// Pitcher picker contents.
#[derive(Debug, Clone)]
pub struct PitcherList {
    pub pitchers: Vec<PitcherListing>,
    pub source: DataSource,
    pub advisory: Option<String>,
}

/// Everything the summary panel renders for the selected pitcher.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub pitcher: PitcherListing,
    pub rows: Vec<PitchTypeSummary>,
    pub headline: Option<HeadlineStats>,
    pub source: DataSource,
    pub advisory: Option<String>,
}

/// Issued on each selection; fetch results carry it back so stale ones can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    generation: u64,
    pitcher: PitcherListing,
}

impl SelectionTicket {
    pub fn pitcher(&self) -> &PitcherListing {
        &self.pitcher
    }
}

/// Outcome of a summary request, not yet applied to the dashboard.
#[derive(Debug)]
pub struct SummaryFetch {
    pub ticket: SelectionTicket,
    pub result: Result<Vec<PitchTypeSummary>, ClientError>,
}

/// Dashboard state: current selection, its summary view and the table ordering.
pub struct Dashboard<A, R> {
    api: A,
    rng: R,
    roster: Vec<String>,
    generation: u64,
    selected: Option<PitcherListing>,
    view: Option<SummaryView>,
    sort: SortState,
}

impl<A: PitchApi, R: Rng> Dashboard<A, R> {
    /// `rng` drives demo data; `roster` backs the placeholder pitcher list.
    pub fn new(api: A, rng: R, roster: Vec<String>) -> Self {
        Self {
            api,
            rng,
            roster,
            generation: 0,
            selected: None,
            view: None,
            sort: SortState::default(),
        }
    }

    /// Fetch the pitcher list, falling back to the placeholder roster.
    pub async fn load_pitchers(&self) -> PitcherList {
        match self.api.pitchers().await {
            Ok(pitchers) if !pitchers.is_empty() => PitcherList {
                pitchers,
                source: DataSource::Live,
                advisory: None,
            },
            Ok(_) => {
                info!("Pitcher list is empty, using placeholder roster");
                self.placeholder_pitchers()
            }
            Err(e) => {
                warn!("Error fetching pitchers: {}", e);
                self.placeholder_pitchers()
            }
        }
    }

    fn placeholder_pitchers(&self) -> PitcherList {
        PitcherList {
            pitchers: placeholder_listing(&self.roster),
            source: DataSource::Demo,
            advisory: Some(DEMO_ADVISORY.to_string()),
        }
    }

    /// Make `pitcher` the current selection. Clears the previous view and
    /// invalidates every ticket issued before.
    pub fn select(&mut self, pitcher: PitcherListing) -> SelectionTicket {
        self.generation += 1;
        self.selected = Some(pitcher.clone());
        self.view = None;
        SelectionTicket {
            generation: self.generation,
            pitcher,
        }
    }

    /// Request the summary for the ticket's pitcher, by id when it has a real one.
    pub async fn fetch_summary(&self, ticket: &SelectionTicket) -> SummaryFetch {
        let token = ticket.pitcher.lookup_token();
        debug!(token = %token, "Fetching pitch summary");
        SummaryFetch {
            ticket: ticket.clone(),
            result: self.api.summary(&token).await,
        }
    }

    /// Apply a fetch result. Returns `false` and leaves the view untouched if
    /// the ticket is stale.
    pub fn apply(&mut self, fetch: SummaryFetch) -> bool {
        if fetch.ticket.generation != self.generation {
            debug!(
                pitcher = %fetch.ticket.pitcher.name,
                "Discarding summary for stale selection"
            );
            return false;
        }

        let pitcher = fetch.ticket.pitcher;
        let (rows, source, advisory) = match fetch.result {
            Ok(rows) if !rows.is_empty() => (rows, DataSource::Live, None),
            Ok(_) => {
                warn!(pitcher = %pitcher.name, "Empty pitch summary, using demo data");
                self.demo_rows(&pitcher.name)
            }
            Err(e) => {
                warn!(pitcher = %pitcher.name, "Error fetching pitch data, using demo data: {}", e);
                self.demo_rows(&pitcher.name)
            }
        };

        self.view = Some(SummaryView {
            headline: derive_headline(&rows),
            pitcher,
            rows,
            source,
            advisory,
        });
        true
    }

    fn demo_rows(&mut self, name: &str) -> (Vec<PitchTypeSummary>, DataSource, Option<String>) {
        (
            generate_demo(name, &mut self.rng),
            DataSource::Demo,
            Some(DEMO_ADVISORY.to_string()),
        )
    }

    /// Select, fetch and apply in one go.
    pub async fn show(&mut self, pitcher: PitcherListing) -> Option<&SummaryView> {
        let ticket = self.select(pitcher);
        let fetch = self.fetch_summary(&ticket).await;
        self.apply(fetch);
        self.view.as_ref()
    }

    pub fn selected(&self) -> Option<&PitcherListing> {
        self.selected.as_ref()
    }

    pub fn view(&self) -> Option<&SummaryView> {
        self.view.as_ref()
    }

    /// Table header click.
    pub fn sort_by(&mut self, field: SummaryField) {
        self.sort.select(field);
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn set_sort_state(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Current rows in table order.
    pub fn sorted_rows(&self) -> Vec<PitchTypeSummary> {
        self.view
            .as_ref()
            .map(|v| self.sort.apply(&v.rows))
            .unwrap_or_default()
    }
}
