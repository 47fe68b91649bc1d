use serde::{Deserialize, Serialize};

pub const COL_BUSINESS_ID: &str = "ytunnus";
pub const COL_NAME: &str = "nimi";
pub const COL_CITY: &str = "kaupunki";
pub const COL_INDUSTRY_CODE: &str = "toimialakoodi";
pub const COL_INDUSTRY_NAME: &str = "toimiala";

/// One row of the registry export. Columns are kept in header order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryRecord {
    fields: Vec<(String, String)>,
}

impl RegistryRecord {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn business_id(&self) -> &str {
        self.get(COL_BUSINESS_ID)
    }

    pub fn name(&self) -> &str {
        self.get(COL_NAME)
    }

    pub fn city(&self) -> &str {
        self.get(COL_CITY)
    }

    pub fn industry_code(&self) -> &str {
        self.get(COL_INDUSTRY_CODE)
    }

    pub fn industry_name(&self) -> &str {
        self.get(COL_INDUSTRY_NAME)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Contact details extracted from the first search hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentResult {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub category: String,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub hours: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(EnrichmentResult),
    NotFound,
    Failed(String),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Report row. The column set is fixed; enrichment columns stay empty
/// unless the lookup succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub ytunnus: String,
    pub nimi: String,
    pub kaupunki: String,
    pub toimiala: String,
    #[serde(rename = "löydetty_nimi")]
    pub loydetty_nimi: String,
    pub osoite: String,
    pub puhelin: String,
    pub verkkosivu: String,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub tyyppi: String,
    pub aukiolo: String,
    pub sijainti: String,
    pub onnistui: bool,
}

impl OutputRow {
    pub fn from_lookup(record: &RegistryRecord, outcome: &LookupOutcome) -> Self {
        let mut row = OutputRow {
            ytunnus: record.business_id().to_string(),
            nimi: record.name().to_string(),
            kaupunki: record.city().to_string(),
            toimiala: record.industry_name().to_string(),
            ..Default::default()
        };

        if let LookupOutcome::Found(found) = outcome {
            row.loydetty_nimi = found.name.clone();
            row.osoite = found.address.clone();
            row.puhelin = found.phone.clone();
            row.verkkosivu = found.website.clone();
            row.rating = found.rating;
            row.reviews = found.review_count;
            row.tyyppi = found.category.clone();
            row.aukiolo = found.hours.clone();
            row.sijainti = found
                .coordinates
                .map(|c| c.to_string())
                .unwrap_or_default();
            row.onnistui = true;
        }

        row
    }

    pub fn has_phone(&self) -> bool {
        !self.puhelin.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> RegistryRecord {
        RegistryRecord::from_pairs([
            ("ytunnus", "1234567-8"),
            ("nimi", "Parturi Pekka"),
            ("kaupunki", "Oulu"),
            ("toimialakoodi", "96210"),
            ("toimiala", "Kampaamot ja parturit"),
        ])
    }

    #[test]
    fn test_record_accessors_default_to_empty() {
        let record = RegistryRecord::from_pairs([("nimi", "Hius Oy")]);
        assert_eq!(record.name(), "Hius Oy");
        assert_eq!(record.city(), "");
        assert_eq!(record.industry_code(), "");
    }

    #[test]
    fn test_output_row_from_found() {
        let found = EnrichmentResult {
            name: "Parturi Pekka".to_string(),
            phone: "040 123 4567".to_string(),
            rating: Some(4.7),
            review_count: Some(31),
            coordinates: Some(Coordinates {
                latitude: 65.01,
                longitude: 25.47,
            }),
            ..Default::default()
        };

        let row = OutputRow::from_lookup(&sample_record(), &LookupOutcome::Found(found));

        assert!(row.onnistui);
        assert!(row.has_phone());
        assert_eq!(row.ytunnus, "1234567-8");
        assert_eq!(row.toimiala, "Kampaamot ja parturit");
        assert_eq!(row.reviews, Some(31));
        assert_eq!(row.sijainti, "65.01,25.47");
    }

    #[test]
    fn test_output_row_from_failure_keeps_registry_fields_only() {
        let failed = OutputRow::from_lookup(
            &sample_record(),
            &LookupOutcome::Failed("timeout".to_string()),
        );
        let missing = OutputRow::from_lookup(&sample_record(), &LookupOutcome::NotFound);

        for row in [failed, missing] {
            assert!(!row.onnistui);
            assert_eq!(row.nimi, "Parturi Pekka");
            assert!(row.loydetty_nimi.is_empty());
            assert!(!row.has_phone());
            assert_eq!(row.rating, None);
        }
    }
}
