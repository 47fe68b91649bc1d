use crate::core::filter::REGISTRY_DELIMITER;
use crate::domain::model::OutputRow;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::NaiveDateTime;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `<prefix>_<YYYYMMDD_HHMMSS>.<extension>`
pub fn report_file_name(prefix: &str, extension: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format("%Y%m%d_%H%M%S"),
        extension.trim_start_matches('.')
    )
}

/// BOM-prefixed, semicolon-delimited CSV with a header row.
pub fn encode_rows(rows: &[OutputRow]) -> Result<Vec<u8>> {
    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(REGISTRY_DELIMITER)
            .from_writer(&mut buffer);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

pub fn decode_rows(data: &[u8]) -> Result<Vec<OutputRow>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(REGISTRY_DELIMITER)
        .from_reader(data);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub struct ReportWriter<S: Storage> {
    storage: S,
    prefix: String,
    extension: String,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S, prefix: String, extension: String) -> Self {
        Self {
            storage,
            prefix,
            extension,
        }
    }

    /// Write `rows` and return the file name relative to the storage root.
    pub async fn write(&self, rows: &[OutputRow], timestamp: NaiveDateTime) -> Result<String> {
        let file_name = report_file_name(&self.prefix, &self.extension, timestamp);
        let data = encode_rows(rows)?;

        tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), file_name);
        self.storage.write_file(&file_name, &data).await?;

        Ok(file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    pub with_phone: usize,
}

impl RunSummary {
    pub fn from_rows(rows: &[OutputRow]) -> Self {
        Self {
            total: rows.len(),
            successful: rows.iter().filter(|r| r.onnistui).count(),
            with_phone: rows.iter().filter(|r| r.has_phone()).count(),
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    pub fn success_percent(&self) -> f64 {
        self.percent(self.successful)
    }

    pub fn phone_percent(&self) -> f64 {
        self.percent(self.with_phone)
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Companies: {}", self.total)?;
        writeln!(
            f,
            "  Found: {} ({:.1}%)",
            self.successful,
            self.success_percent()
        )?;
        write!(
            f,
            "  Phone: {} ({:.1}%)",
            self.with_phone,
            self.phone_percent()
        )
    }
}

/// Keep at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `  <name padded to 40> | <phone>` for every row that has a phone number.
pub fn phone_listing(rows: &[OutputRow]) -> Vec<String> {
    rows.iter()
        .filter(|r| r.has_phone())
        .map(|r| format!("  {:40} | {}", truncate_chars(&r.nimi, 40), r.puhelin))
        .collect()
}
