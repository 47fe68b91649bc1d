use crate::config::toml_config::LookupConfig;
use crate::domain::model::{Coordinates, EnrichmentResult, LookupOutcome};
use crate::domain::ports::PlaceLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// `"{name} {city} {country}"`, skipping a blank city.
pub fn build_query(name: &str, city: Option<&str>, country: &str) -> String {
    let mut query = name.trim().to_string();
    if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
        query.push(' ');
        query.push_str(city);
    }
    if !country.is_empty() {
        query.push(' ');
        query.push_str(country);
    }
    query
}

/// Interpret a search response body.
///
/// `local_results[0]` wins; `place_results` is used only when the list is
/// absent or empty. A body or hit that is not a JSON object is a failure.
pub fn parse_search_response(body: &Value) -> LookupOutcome {
    if !body.is_object() {
        return LookupOutcome::Failed("malformed response".to_string());
    }

    if let Some(error) = body.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return LookupOutcome::Failed(message);
    }

    let best = body
        .get("local_results")
        .and_then(|v| v.as_array())
        .and_then(|results| results.first())
        .or_else(|| body.get("place_results"));

    match best {
        Some(place) if place.is_object() => LookupOutcome::Found(extract_place(place)),
        Some(_) => LookupOutcome::Failed("malformed result".to_string()),
        None => LookupOutcome::NotFound,
    }
}

fn text_field(place: &Value, key: &str) -> String {
    match place.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn extract_place(place: &Value) -> EnrichmentResult {
    let category = match text_field(place, "type") {
        t if t.is_empty() => place
            .get("types")
            .and_then(|v| v.as_array())
            .and_then(|types| types.first())
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        t => t,
    };

    let hours = match text_field(place, "hours") {
        h if h.is_empty() => text_field(place, "operating_hours"),
        h => h,
    };

    let coordinates = place.get("gps_coordinates").and_then(|gps| {
        Some(Coordinates {
            latitude: gps.get("latitude")?.as_f64()?,
            longitude: gps.get("longitude")?.as_f64()?,
        })
    });

    EnrichmentResult {
        name: text_field(place, "title"),
        address: text_field(place, "address"),
        phone: text_field(place, "phone"),
        website: text_field(place, "website"),
        category,
        rating: place.get("rating").and_then(|v| v.as_f64()),
        review_count: place.get("reviews").and_then(|v| v.as_u64()),
        hours,
        coordinates,
    }
}

/// SerpAPI (Google Maps engine) client.
pub struct SerpApiLookup {
    client: Client,
    config: LookupConfig,
}

impl SerpApiLookup {
    pub fn new(config: LookupConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            tracing::warn!(
                "⚠️ TLS certificate verification is DISABLED for {} (lookup.accept_invalid_certs)",
                config.endpoint
            );
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client, config })
    }

    async fn fetch(&self, query: &str) -> Result<LookupOutcome> {
        tracing::debug!("Searching for: {}", query);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("engine", self.config.engine.as_str()),
                ("q", query),
                ("api_key", self.config.api_key.as_str()),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.region.as_str()),
                ("type", self.config.result_type.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(_) if !status.is_success() => {
                return Ok(LookupOutcome::Failed(format!("HTTP {}", status)));
            }
            Err(e) => return Err(e.into()),
        };

        match parse_search_response(&json) {
            LookupOutcome::Failed(message) => Ok(LookupOutcome::Failed(message)),
            _ if !status.is_success() => Ok(LookupOutcome::Failed(format!("HTTP {}", status))),
            outcome => Ok(outcome),
        }
    }
}

#[async_trait]
impl PlaceLookup for SerpApiLookup {
    async fn lookup(&self, name: &str, city: Option<&str>) -> LookupOutcome {
        let query = build_query(name, city, &self.config.country);

        match self.fetch(&query).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!("Lookup for '{}' failed: {}", query, e);
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}
