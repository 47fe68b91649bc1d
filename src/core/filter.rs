use crate::config::toml_config::FilterConfig;
use crate::domain::model::RegistryRecord;
use crate::utils::error::Result;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const REGISTRY_DELIMITER: u8 = b';';

/// Selects hairdresser and barber rows: exact industry code, or any keyword
/// contained in the industry name or the business name.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    industry_code: String,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(industry_code: &str, keywords: &[S]) -> Self {
        Self {
            industry_code: industry_code.trim().to_string(),
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(&config.industry_code, config.keywords.as_slice())
    }

    fn contains_keyword(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    pub fn matches(&self, record: &RegistryRecord) -> bool {
        (!self.industry_code.is_empty() && record.industry_code().trim() == self.industry_code)
            || self.contains_keyword(record.industry_name())
            || self.contains_keyword(record.name())
    }
}

pub struct RegistryFilter {
    matcher: KeywordMatcher,
}

impl RegistryFilter {
    pub fn new(matcher: KeywordMatcher) -> Self {
        Self { matcher }
    }

    /// Matching rows of the export at `path`, in file order. Read failures are
    /// logged and yield an empty list.
    pub fn filter<P: AsRef<Path>>(&self, path: P, max_rows: Option<usize>) -> Vec<RegistryRecord> {
        let path = path.as_ref();

        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Registry file {} not found", path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match self.filter_bytes(&data, max_rows) {
            Ok(records) => {
                tracing::info!("Found {} hairdressers/barbers", records.len());
                records
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn filter_bytes(&self, data: &[u8], max_rows: Option<usize>) -> Result<Vec<RegistryRecord>> {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let limit = max_rows.filter(|n| *n > 0);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(REGISTRY_DELIMITER)
            .flexible(true)
            .from_reader(data);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut matches = Vec::new();

        for row in reader.records() {
            let row = row?;
            let record = RegistryRecord::new(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.clone(), v.to_string()))
                    .collect(),
            );

            if self.matcher.matches(&record) {
                matches.push(record);
                if limit.is_some_and(|n| matches.len() >= n) {
                    break;
                }
            }
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::DEFAULT_KEYWORDS;

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new("96210", DEFAULT_KEYWORDS)
    }

    fn record(name: &str, code: &str, industry: &str) -> RegistryRecord {
        RegistryRecord::from_pairs([
            ("ytunnus", "123"),
            ("nimi", name),
            ("kaupunki", "Tampere"),
            ("toimialakoodi", code),
            ("toimiala", industry),
        ])
    }

    #[test]
    fn test_code_match_alone_selects_row() {
        assert!(matcher().matches(&record("Kampaamo Liisa", "96210", "")));
        assert!(matcher().matches(&record("Liisa Oy", "96210", "Muut palvelut")));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(matcher().matches(&record("BARBER SHOP X", "", "")));
        assert!(matcher().matches(&record("Oy Ab", "47110", "Parturi- ja kampaamotoiminta")));
        assert!(!matcher().matches(&record("Autokorjaamo Virtanen", "45200", "Autojen huolto")));
    }

    #[test]
    fn test_code_must_match_exactly() {
        assert!(!matcher().matches(&record("Oy Ab", "962100", "")));
        assert!(!matcher().matches(&record("Oy Ab", "9621", "")));
    }

    #[test]
    fn test_filter_bytes_strips_bom_and_caps_matches() {
        let data = "\u{feff}ytunnus;nimi;kaupunki;toimialakoodi;toimiala\n\
                    1;Parturi A;Oulu;96210;\n\
                    2;Kahvila B;Oulu;56101;Kahvilat\n\
                    3;Hiusstudio C;Turku;;\n\
                    4;Hair D;Espoo;;\n";
        let filter = RegistryFilter::new(matcher());

        let all = filter.filter_bytes(data.as_bytes(), None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].business_id(), "1");

        let capped = filter.filter_bytes(data.as_bytes(), Some(2)).unwrap();
        let ids: Vec<&str> = capped.iter().map(|r| r.business_id()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let zero = filter.filter_bytes(data.as_bytes(), Some(0)).unwrap();
        assert_eq!(zero.len(), 3);
    }

    #[test]
    fn test_extra_columns_are_preserved() {
        let data = "ytunnus;nimi;postinumero;toimialakoodi\n9;Parturi Z;00100;96210\n";
        let records = RegistryFilter::new(matcher())
            .filter_bytes(data.as_bytes(), None)
            .unwrap();

        assert_eq!(records[0].get("postinumero"), "00100");
        assert_eq!(records[0].fields()[2].0, "postinumero");
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let records = RegistryFilter::new(matcher()).filter("/no/such/registry.csv", None);
        assert!(records.is_empty());
    }
}
