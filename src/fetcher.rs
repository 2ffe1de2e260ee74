use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::fetch_error::FetchError;

/// One hourly temperature reading scraped from the observations page.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub station_id: String,
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// A source of hourly observations, queried one calendar day at a time.
///
/// The production implementation scrapes the meteociel observation table;
/// tests substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait ObservationSource {
    async fn fetch_day(
        &self,
        station_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<Observation>, FetchError>;
}

#[derive(Clone)]
pub struct ObservationFetcher {
    client: reqwest::Client,
    base_url: String,
    hour_re: Regex,
}

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

impl ObservationFetcher {
    pub fn new() -> Self {
        Self::with_base_url("https://www.meteociel.fr".to_string())
    }

    /// Create a fetcher against a custom base URL (for mocking)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            // Hour column values look like "0h00", "17h30"
            hour_re: Regex::new(r"^(\d{1,2})h(\d{2})$").unwrap(),
        }
    }

    fn parse_html(
        &self,
        station_id: &str,
        day: NaiveDate,
        html: &str,
    ) -> Result<Vec<Observation>, FetchError> {
        debug!("Parsing observations page");
        let document = Html::parse_document(html);
        // The hourly table is the third child of its block and stretched full width
        let table_selector = Selector::parse(r#"table:nth-child(3)[width="100%"]"#).unwrap();
        let row_selector = Selector::parse("tr").unwrap();
        let cell_selector = Selector::parse("td").unwrap();

        let table = match document.select(&table_selector).next() {
            Some(table) => table,
            None => {
                warn!("No observation table found for {}, treating day as empty", day);
                return Ok(Vec::new());
            }
        };

        let mut observations = Vec::new();
        let mut skipped_rows = 0;

        for row in table.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| cell.text().collect::<String>())
                .collect();

            // Temperature sits in the third column of a data row
            if cells.len() < 3 {
                continue;
            }

            let hour_text: String = cells[0].split_whitespace().collect();
            if hour_text == "Heurelocale" {
                continue;
            }

            match self.parse_observation(station_id, day, &hour_text, &cells[2]) {
                Ok(observation) => observations.push(observation),
                Err(e) => {
                    warn!("Dropping observation row for {}: {}", day, e);
                    skipped_rows += 1;
                }
            }
        }

        if skipped_rows > 0 {
            warn!("Skipped {} unparseable rows for {}", skipped_rows, day);
        }
        debug!("Parsed {} observations for {}", observations.len(), day);

        Ok(observations)
    }

    fn parse_observation(
        &self,
        station_id: &str,
        day: NaiveDate,
        hour_text: &str,
        temperature_text: &str,
    ) -> Result<Observation, FetchError> {
        let captures = self
            .hour_re
            .captures(hour_text)
            .ok_or_else(|| FetchError::HourError(hour_text.to_string()))?;

        let hour: u32 = captures[1]
            .parse()
            .map_err(|_| FetchError::HourError(hour_text.to_string()))?;
        let minute: u32 = captures[2]
            .parse()
            .map_err(|_| FetchError::HourError(hour_text.to_string()))?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| FetchError::HourError(hour_text.to_string()))?;

        let temperature = parse_temperature(temperature_text)?;

        Ok(Observation {
            station_id: station_id.to_string(),
            timestamp: day.and_time(time),
            temperature,
        })
    }
}

impl Default for ObservationFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationSource for ObservationFetcher {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_day(
        &self,
        station_id: &str,
        day: NaiveDate,
    ) -> Result<Vec<Observation>, FetchError> {
        // The site addresses days with a zero-based month
        let url = format!(
            "{}/temps-reel/obs_villes.php?code2={}&jour2={}&mois2={}&annee2={}&affint=1",
            self.base_url,
            station_id,
            day.day(),
            day.month0(),
            day.year(),
        );

        debug!("Sending HTTP request for day {}", day);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        debug!("Received HTTP response with status: {}", response.status());

        let html = response.text().await?;
        debug!("Retrieved HTML content, size: {} bytes", html.len());

        self.parse_html(station_id, day, &html)
    }
}

/// Extract the numeric value from a temperature cell such as `"12.5 °C"`.
///
/// The source page uses either `.` or `,` as the decimal separator; the
/// value is normalized to a plain `f64`.
fn parse_temperature(text: &str) -> Result<f64, FetchError> {
    let token: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .collect();

    if token.is_empty() {
        return Err(FetchError::NumberError(text.trim().to_string()));
    }

    token
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| FetchError::NumberError(text.trim().to_string()))
}
