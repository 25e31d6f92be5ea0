//! HTTP client for the Plot Planner backend.
//!
//! Every protected route answers an anonymous request with a redirect to the
//! home page, so redirects are not followed and are reported as
//! [`ApiError::Unauthorized`].

use planner_grid::{AssignableEntry, CellSymbol, PersistenceApi, RequestError};
use planner_model::{
    CatalogPage, CellCoord, CellSymbolRecord, ConnectionState, EntityKind, Link, LinkAction,
    PaginationRequest, PlantId, PlantSearch, PlantlistEntriesResponse, PlantlistEntryId,
    PlantlistEntryRecord, PlantlistId, PlotId, SymbolGlyph, SymbolPayload,
};
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientSettings;
use crate::endpoints;
use crate::error::{ApiError, Result};

/// User agent string for backend requests.
const USER_AGENT_VALUE: &str = concat!("plot-planner/", env!("CARGO_PKG_VERSION"));

/// Name of the backend's session cookie.
const SESSION_COOKIE: &str = "session";

/// Client for one backend, optionally logged in through a session cookie.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    client: reqwest::Client,
    settings: ClientSettings,
}

impl PlannerClient {
    /// Creates a client from validated settings.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        settings.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(session) = &settings.session {
            let cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE}={session}"))
                .map_err(|e| ApiError::Config(format!("invalid session cookie: {e}")))?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::none())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Paints a plant-list entry's symbol onto one cell.
    pub async fn paint_cell(
        &self,
        plot: PlotId,
        coord: CellCoord,
        entry: PlantlistEntryId,
    ) -> Result<String> {
        self.post_text(&endpoints::add_cell_symbol(plot, coord, entry))
            .await
    }

    /// Removes whatever symbol a cell holds.
    pub async fn erase_cell(&self, plot: PlotId, coord: CellCoord) -> Result<String> {
        self.post_text(&endpoints::delete_cell_symbol(plot, coord))
            .await
    }

    /// Occupied cells of a plot as the backend reports them.
    pub async fn plot_cells(&self, plot: PlotId) -> Result<Vec<CellSymbolRecord>> {
        self.get_json(&endpoints::plot_cells(plot)).await
    }

    /// Plants of a plant list with the symbol chosen for each.
    pub async fn plantlist_entries(
        &self,
        plantlist: PlantlistId,
    ) -> Result<Vec<PlantlistEntryRecord>> {
        let response: PlantlistEntriesResponse = self
            .get_json(&endpoints::plantlist_entries(plantlist))
            .await?;
        Ok(response.plantlist_plants_symbols)
    }

    /// What `primary` is linked to among `secondary` entities, and what it
    /// could still be linked to.
    pub async fn connections(
        &self,
        primary: EntityKind,
        primary_id: u32,
        secondary: EntityKind,
    ) -> Result<ConnectionState> {
        self.get_json(&endpoints::connections(primary, primary_id, secondary))
            .await
    }

    /// Creates or removes a link.
    pub async fn update_link(&self, link: Link, action: LinkAction) -> Result<String> {
        self.post_text(&link.path(action)).await
    }

    /// Sets the symbol of one plant on one plant list.
    ///
    /// Returns the glyph the backend stored.
    pub async fn set_plant_symbol(
        &self,
        plantlist: PlantlistId,
        plant: PlantId,
        glyph: &SymbolGlyph,
    ) -> Result<SymbolGlyph> {
        let payload = SymbolPayload {
            symbol: glyph.to_markup(),
        };
        let stored: String = self
            .post_json(&endpoints::plant_symbol(plantlist, plant), &payload)
            .await?;
        Ok(SymbolGlyph::from_markup(&stored))
    }

    /// Runs a catalog search.
    pub async fn search_plants(&self, search: &PlantSearch) -> Result<CatalogPage> {
        let value: serde_json::Value = self
            .post_json(endpoints::PLANT_SEARCH, &search.to_form())
            .await?;
        Ok(CatalogPage::from_value(value)?)
    }

    /// Follows a page link from an earlier [`CatalogPage`].
    pub async fn paginate(&self, link: &str) -> Result<CatalogPage> {
        let body = PaginationRequest {
            pagination_link: link.to_string(),
        };
        let value: serde_json::Value = self.post_json(endpoints::PLANT_PAGINATION, &body).await?;
        Ok(CatalogPage::from_value(value)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.settings.url(path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let text = Self::handle_response(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.settings.url(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let text = Self::handle_response(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post_text(&self, path: &str) -> Result<String> {
        let url = self.settings.url(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Checks the status and returns the body text.
    async fn handle_response(response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if status.is_redirection()
            || status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: summarize_body(&body),
            });
        }

        Ok(response.text().await?)
    }
}

/// First line of an error body, shortened for log output.
fn summarize_body(body: &str) -> String {
    const LIMIT: usize = 200;
    let line = body.trim().lines().next().unwrap_or_default();
    match line.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line.to_string(),
    }
}

/// Converts a snapshot record, treating bad coordinates as a data error.
fn cell_symbol(record: CellSymbolRecord) -> std::result::Result<CellSymbol, RequestError> {
    let coord = record
        .coord()
        .map_err(|e| RequestError::new(format!("bad cell in plot snapshot: {e}")))?;
    Ok(CellSymbol {
        coord,
        glyph: record.glyph(),
        entry_id: record.plantlists_plants_id,
    })
}

fn assignable_entry(record: PlantlistEntryRecord) -> AssignableEntry {
    let glyph = record
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|markup| !markup.is_empty())
        .map(SymbolGlyph::from_markup);
    AssignableEntry {
        entry_id: record.plantlist_plants_id,
        plant_name: record.plant_name,
        glyph,
    }
}

impl PersistenceApi for PlannerClient {
    async fn add_cell_symbol(
        &self,
        plot: PlotId,
        coord: CellCoord,
        entry: PlantlistEntryId,
    ) -> std::result::Result<(), RequestError> {
        self.paint_cell(plot, coord, entry).await?;
        Ok(())
    }

    async fn delete_cell_symbol(
        &self,
        plot: PlotId,
        coord: CellCoord,
    ) -> std::result::Result<(), RequestError> {
        self.erase_cell(plot, coord).await?;
        Ok(())
    }

    async fn fetch_plot_cell_symbols(
        &self,
        plot: PlotId,
    ) -> std::result::Result<Vec<CellSymbol>, RequestError> {
        self.plot_cells(plot)
            .await?
            .into_iter()
            .map(cell_symbol)
            .collect()
    }

    async fn fetch_plantlist_assignable_entries(
        &self,
        plantlist: PlantlistId,
    ) -> std::result::Result<Vec<AssignableEntry>, RequestError> {
        let records = self.plantlist_entries(plantlist).await?;
        Ok(records.into_iter().map(assignable_entry).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejects_invalid_settings() {
        let settings = ClientSettings {
            base_url: "localhost:5000".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            PlannerClient::new(settings),
            Err(ApiError::Config(_))
        ));

        let settings = ClientSettings {
            session: Some("bad\nvalue".to_string()),
            ..ClientSettings::default()
        };
        assert!(matches!(
            PlannerClient::new(settings),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn error_bodies_are_shortened() {
        assert_eq!(summarize_body("  Not Found\n<html>"), "Not Found");
        let long = "x".repeat(300);
        assert_eq!(summarize_body(&long).len(), 203);
    }

    #[test]
    fn snapshot_records_convert_to_cells() {
        let record = CellSymbolRecord {
            cell_x: 4,
            cell_y: 1,
            symbol: "<i class='symbol fas fa-leaf' style='color:#00aa00;'></i>".to_string(),
            plantlists_plants_id: None,
        };
        let cell = cell_symbol(record).unwrap();
        assert_eq!(cell.coord, CellCoord::new(1, 4));
        assert_eq!(cell.glyph, SymbolGlyph::new("fas fa-leaf", "#00aa00"));

        let negative = CellSymbolRecord {
            cell_x: 0,
            cell_y: -2,
            symbol: String::new(),
            plantlists_plants_id: None,
        };
        let err = cell_symbol(negative).unwrap_err();
        assert!(!err.is_retryable());
    }

    #[test]
    fn entries_without_symbol_have_no_glyph() {
        let record = PlantlistEntryRecord {
            plantlist_plants_id: PlantlistEntryId(3),
            plant_id: PlantId(8),
            plant_name: "Kale".to_string(),
            symbol: Some(String::new()),
        };
        let entry = assignable_entry(record);
        assert_eq!(entry.glyph, None);
        assert_eq!(entry.plant_name, "Kale");
    }
}
