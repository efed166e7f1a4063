use crate::error::{Error, Result};
use crate::record::{REQUIRED_COLUMNS, Record};
use std::io::Read;
use std::path::Path;

/// How `Dataset::lookup` treats names shared by more than one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Return the earliest row with the name.
    #[default]
    FirstMatch,
    /// Fail with `Error::AmbiguousName`.
    Reject,
}

/// Read-only, in-memory player table. Built once by the caller and passed by
/// reference to whatever needs it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    policy: DuplicatePolicy,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|err| Error::unavailable(&source_name, err))?;
        Self::from_reader_named(file, &source_name)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_named(reader, "<reader>")
    }

    fn from_reader_named<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|err| Error::unavailable(source_name, err))?
            .clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(Error::unavailable(
                source_name,
                format!("missing required columns: {}", missing.join(", ")),
            ));
        }

        let mut records = Vec::new();
        for (idx, row) in rdr.deserialize::<Record>().enumerate() {
            let record = row.map_err(|err| {
                Error::unavailable(source_name, format!("row {}: {err}", idx + 1))
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::unavailable(source_name, "no player rows"));
        }

        log::info!("loaded {} player records from {}", records.len(), source_name);
        let dataset = Self {
            records,
            policy: DuplicatePolicy::default(),
        };
        for name in dataset.duplicate_names() {
            log::warn!("player name {name:?} appears more than once");
        }
        Ok(dataset)
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names in file order; this is the option list of a selection control.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn lookup(&self, name: &str) -> Result<&Record> {
        let mut matches = self.records.iter().filter(|r| r.name == name);
        let Some(first) = matches.next() else {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        };
        if self.policy == DuplicatePolicy::Reject {
            let extra = matches.count();
            if extra > 0 {
                return Err(Error::AmbiguousName {
                    name: name.to_string(),
                    count: extra + 1,
                });
            }
        }
        Ok(first)
    }

    /// First and second rows; a single-row table selects its only row twice.
    pub fn default_selection(&self) -> (&Record, &Record) {
        let first = &self.records[0];
        let second = self.records.get(1).unwrap_or(first);
        (first, second)
    }

    fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for record in &self.records {
            if !seen.insert(record.name.as_str()) && !dupes.contains(&record.name.as_str()) {
                dupes.push(record.name.as_str());
            }
        }
        dupes
    }
}
