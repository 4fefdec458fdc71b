use crate::csv::parse_csv_line;
use crate::record::COLUMN_COUNT;
use crate::{ArtisanRecord, Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// In-memory, read-only collection of artisan records.
///
/// Built once at startup and shared behind an `Arc`; there is no mutation API.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<ArtisanRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// Load the dataset at `path`.
    ///
    /// A missing or unreadable file yields an empty store: every downstream
    /// query then degrades to "no results" instead of failing.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(store) => {
                info!("Loaded {} artisans from {:?}", store.len(), path);
                store
            }
            Err(e) => {
                error!("Dataset unavailable at {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load the dataset, surfacing IO failures to the caller
    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse CSV text with a header line.
    ///
    /// Rows with fewer fields than the header and rows that fail validation
    /// are skipped; they never surface as partial records.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().enumerate();
        let header_len = match lines.next() {
            Some((_, header)) => parse_csv_line(header).len(),
            None => return Err(Error::DatasetUnavailable("empty dataset".to_string())),
        };
        if header_len < COLUMN_COUNT {
            warn!(
                "Dataset header has {} of {} columns; missing columns load as empty values",
                header_len, COLUMN_COUNT
            );
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (idx, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields = parse_csv_line(line);
            if fields.len() < header_len {
                skipped += 1;
                debug!("Skipping short row {} ({} of {} fields)", idx + 1, fields.len(), header_len);
                continue;
            }

            match parse_row(&fields, idx + 1) {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!("{}", e);
                }
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed rows", skipped);
        }

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<ArtisanRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            // First occurrence wins for id lookups
            by_id.entry(record.id.clone()).or_insert(idx);
        }
        Self { records, by_id }
    }

    /// All records, in source-file order
    #[inline]
    pub fn get_all(&self) -> &[ArtisanRecord] {
        &self.records
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&ArtisanRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_row(fields: &[String], line: usize) -> Result<ArtisanRecord> {
    let record = ArtisanRecord::from_fields(fields);
    if record.id.is_empty() {
        return Err(Error::RowParse { line, reason: "missing artisan id".to_string() });
    }
    if record.name.is_empty() {
        return Err(Error::RowParse { line, reason: "missing artisan name".to_string() });
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,name,gender,age,craft_type,state,district,village,languages,email,phone,phone_available,government_id,cluster_code";

    #[test]
    fn test_parse_keeps_source_order() {
        let csv = format!(
            "{}\n2,Asha,Female,30,Pottery,Gujarat,Kutch,Bhuj,Gujarati,a@x.in,,yes,G2,C1\n1,Babu,Male,45,Weaving,Assam,Kamrup,Hajo,Assamese,b@x.in,,no,G1,\n",
            HEADER
        );
        let store = RecordStore::parse(&csv).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_all()[0].id, "2");
        assert_eq!(store.get_all()[1].id, "1");
        assert_eq!(store.get("1").unwrap().name, "Babu");
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let csv = format!("{}\n1,Too,Short\n\n2,Asha,Female,30,Pottery,Gujarat,Kutch,Bhuj,Gujarati,a@x.in,,yes,G2,C1", HEADER);
        let store = RecordStore::parse(&csv).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_narrow_header_loads_empty_trailing_columns() {
        let csv = "id,name,gender,age,craft_type,state\n4,Meera,Female,33,Pottery,Gujarat\n";
        let store = RecordStore::parse(csv).unwrap();
        let record = store.get("4").unwrap();
        assert_eq!(record.location.state, "Gujarat");
        assert!(record.cluster_code.is_empty());
        assert!(!record.contact.phone_available);
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let csv = format!("{}\n,Nameless,Female,30,Pottery,Gujarat,Kutch,Bhuj,Gujarati,a@x.in,,yes,G2,C1", HEADER);
        let store = RecordStore::parse(&csv).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::load(dir.path().join("absent.csv"));
        assert!(store.is_empty());
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "7,\"Devi, Kamala\",Female,51,Madhubani,Bihar,Madhubani,Jitwarpur,\"Hindi, Maithili\",k@x.in,9.19812345678E+11,Yes,G7,MB-1").unwrap();

        let store = RecordStore::load(file.path());
        let record = store.get("7").unwrap();
        assert_eq!(record.name, "Devi, Kamala");
        assert_eq!(record.languages, vec!["Hindi", "Maithili"]);
        assert_eq!(record.contact.phone, "+919812345678");
    }
}
