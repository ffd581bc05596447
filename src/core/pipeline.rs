use crate::domain::model::{CountryRow, CountryTable, IndicatorRecord};
use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, Storage};
use crate::render::{MapDocument, Marker};
use crate::utils::error::{GdpMapError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;

pub const MAP_FILENAME: &str = "gdp_per_capita.html";
pub const CSV_FILENAME: &str = "gdp_per_capita.csv";

const COUNTRIES_PER_PAGE: &str = "400";
const INDICATOR_PER_PAGE: &str = "300";

/// Region classification the provider assigns to its aggregate pseudo-countries
/// ("World", income groups, ...) in the country listing.
const AGGREGATE_REGION: &str = "Aggregates";

#[derive(Debug, Deserialize)]
struct CountryListing {
    #[serde(rename = "iso2Code")]
    iso2_code: String,
    region: RegionListing,
}

#[derive(Debug, Deserialize)]
struct RegionListing {
    value: String,
}

#[derive(Debug, Deserialize)]
struct IndicatorEntry {
    country: CountryRef,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CountryRef {
    id: String,
    value: String,
}

/// Provider responses arrive as `[metadata, entries]`; metadata is ignored.
fn parse_envelope<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<Vec<T>> {
    let entries = body
        .get(1)
        .and_then(|element| element.as_array())
        .cloned()
        .ok_or_else(|| GdpMapError::ProcessingError {
            message: "expected a two-element response envelope with an entry array".to_string(),
        })?;
    serde_json::from_value(serde_json::Value::Array(entries)).map_err(Into::into)
}

fn format_popup(row: &CountryRow) -> String {
    match row.gdp_per_capita {
        Some(value) => format!("{} - GDP per Capita: {}", row.country, value),
        None => format!("{} - GDP per Capita: n/a", row.country),
    }
}

fn table_to_csv(table: &CountryTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in table.rows() {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| GdpMapError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })
}

pub struct GdpMapPipeline<S: Storage, C: ConfigProvider, G: Geocoder> {
    storage: S,
    config: C,
    geocoder: G,
    client: Client,
}

impl<S: Storage, C: ConfigProvider, G: Geocoder> GdpMapPipeline<S, C, G> {
    pub fn new(storage: S, config: C, geocoder: G) -> Self {
        Self {
            storage,
            config,
            geocoder,
            client: Client::new(),
        }
    }

    /// The country listing marks aggregates explicitly, so exclusion does not
    /// depend on the provider keeping them at the head of the indicator data.
    async fn fetch_aggregate_ids(&self) -> Result<HashSet<String>> {
        let url = format!("{}/countries", self.config.api_base());
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("per_page", COUNTRIES_PER_PAGE)])
            .send()
            .await?;

        tracing::debug!("Country listing status: {}", response.status());
        let status = response.status();
        if !status.is_success() {
            return Err(GdpMapError::FetchError {
                status: status.as_u16(),
                url,
            });
        }

        let listings: Vec<CountryListing> = parse_envelope(response.json().await?)?;
        Ok(listings
            .into_iter()
            .filter(|listing| listing.region.value == AGGREGATE_REGION)
            .map(|listing| listing.iso2_code)
            .collect())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: Geocoder> Pipeline for GdpMapPipeline<S, C, G> {
    async fn fetch(&self) -> Result<Vec<IndicatorRecord>> {
        let aggregates = self.fetch_aggregate_ids().await?;
        tracing::debug!("Provider lists {} aggregate regions", aggregates.len());

        let url = format!(
            "{}/countries/all/indicators/{}",
            self.config.api_base(),
            self.config.indicator()
        );
        tracing::debug!("Making API request to: {}", url);

        let year = self.config.year().to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json"),
                ("per_page", INDICATOR_PER_PAGE),
                ("date", year.as_str()),
            ])
            .send()
            .await?;

        tracing::debug!("Indicator response status: {}", response.status());
        let status = response.status();
        if !status.is_success() {
            return Err(GdpMapError::FetchError {
                status: status.as_u16(),
                url,
            });
        }

        let entries: Vec<IndicatorEntry> = parse_envelope(response.json().await?)?;
        let records: Vec<IndicatorRecord> = entries
            .into_iter()
            .filter(|entry| !aggregates.contains(&entry.country.id))
            .map(|entry| IndicatorRecord {
                country: entry.country.value,
                value: entry.value,
            })
            .collect();

        tracing::info!(
            "Fetched {} country records for {}",
            records.len(),
            self.config.year()
        );
        Ok(records)
    }

    async fn shape(&self, records: Vec<IndicatorRecord>) -> Result<CountryTable> {
        Ok(CountryTable::from_records(records))
    }

    async fn geocode(&self, mut table: CountryTable) -> Result<CountryTable> {
        for row in table.rows_mut() {
            let location = self.geocoder.lookup(&row.country).await?;
            if location.is_none() {
                tracing::warn!("No geocoding match for '{}'", row.country);
            }
            row.set_location(location);
        }
        Ok(table)
    }

    async fn render(&self, table: CountryTable) -> Result<String> {
        let center = table.mean_center();
        let mut document = MapDocument::new(center, self.config.zoom());

        for row in table.rows() {
            let (Some(latitude), Some(longitude)) = (row.latitude, row.longitude) else {
                continue;
            };
            document.add_marker(Marker {
                latitude,
                longitude,
                popup: format_popup(row),
            });
        }

        tracing::debug!("Placing {} markers", document.marker_count());
        let html = document.to_html()?;
        self.storage.write_file(MAP_FILENAME, html.as_bytes()).await?;

        if self.config.csv_export() {
            let csv_data = table_to_csv(&table)?;
            self.storage.write_file(CSV_FILENAME, &csv_data).await?;
            tracing::info!("CSV export written alongside the map");
        }

        Ok(format!("{}/{}", self.config.output_path(), MAP_FILENAME))
    }
}
