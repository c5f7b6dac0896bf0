//! GeoNames dump ingestion.
//!
//! Rows are tab-delimited with exactly [`GEONAMES_COLUMN_COUNT`] columns.
//! Malformed rows are logged and skipped; only I/O failures abort a load.

use std::io::Read;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::client::GazetteerWriter;
use super::error::GazetteerResult;
use super::model::GazetteerRecord;
use crate::constants::GEONAMES_COLUMN_COUNT;

/// Counters for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Rows parsed into records.
    pub parsed: usize,
    /// Rows dropped for a bad column count or unreadable id.
    pub skipped: usize,
    /// Records accepted by the index.
    pub indexed: usize,
    /// Records the index rejected.
    pub failed: usize,
}

/// Streaming reader over a GeoNames dump.
pub struct RecordReader<R: Read> {
    rows: csv::StringRecordsIntoIter<R>,
    row_number: usize,
    skipped: usize,
}

impl<R: Read> std::fmt::Debug for RecordReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("row_number", &self.row_number)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

/// Opens a dump for reading. Lines starting with `#` are ignored.
pub fn read_records<R: Read>(reader: R) -> RecordReader<R> {
    let rows = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader)
        .into_records();

    RecordReader {
        rows,
        row_number: 0,
        skipped: 0,
    }
}

impl<R: Read> RecordReader<R> {
    /// Rows skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = GazetteerResult<GazetteerRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let row = self.rows.next()?;
            let row_number = self.row_number;
            self.row_number += 1;

            let row = match row {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Some(Err(e.into())),
                Err(e) => {
                    warn!(row = row_number, error = %e, "Unreadable row, skipping");
                    self.skipped += 1;
                    continue;
                }
            };

            if row.len() != GEONAMES_COLUMN_COUNT {
                warn!(
                    row = row_number,
                    columns = row.len(),
                    expected = GEONAMES_COLUMN_COUNT,
                    "Row has wrong column count, skipping"
                );
                self.skipped += 1;
                continue;
            }

            match parse_row(&row) {
                Some(record) => return Some(Ok(record)),
                None => {
                    warn!(row = row_number, id = row.get(0), "Row has no numeric id, skipping");
                    self.skipped += 1;
                }
            }
        }
    }
}

/// Converts a 19-column row into a record. Returns `None` without a numeric id.
pub fn parse_row(row: &csv::StringRecord) -> Option<GazetteerRecord> {
    let field = |i: usize| row.get(i).map(str::trim).unwrap_or_default();
    let optional = |i: usize| {
        let value = field(i);
        (!value.is_empty()).then(|| value.to_string())
    };
    let list = |i: usize| {
        field(i)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    };

    let id = field(0).parse().ok()?;

    Some(GazetteerRecord {
        id,
        name: field(1).to_string(),
        ascii_name: field(2).to_string(),
        alternate_names: list(3),
        latitude: field(4).parse().unwrap_or_default(),
        longitude: field(5).parse().unwrap_or_default(),
        feature_class: field(6).to_string(),
        feature_code: field(7).to_string(),
        country_code: optional(8),
        secondary_country_codes: list(9),
        admin1_code: optional(10),
        admin2_code: optional(11),
        admin3_code: optional(12),
        admin4_code: optional(13),
        population: field(14).parse().ok(),
        elevation: field(15).parse().ok(),
        dem: field(16).parse().ok(),
        timezone: optional(17),
        modification_date: optional(18),
    })
}

/// Streams a dump into `writer` in `chunk_size` batches.
#[instrument(skip(writer, reader))]
pub async fn ingest<W, R>(writer: &W, reader: R, chunk_size: usize) -> GazetteerResult<IngestReport>
where
    W: GazetteerWriter,
    R: Read,
{
    let chunk_size = chunk_size.max(1);
    let mut records = read_records(reader);
    let mut report = IngestReport::default();
    let mut batch = Vec::with_capacity(chunk_size);

    for record in records.by_ref() {
        batch.push(record?);
        report.parsed += 1;

        if batch.len() == chunk_size {
            let outcome = writer.bulk_index(&batch).await?;
            report.indexed += outcome.indexed;
            report.failed += outcome.failed;
            batch.clear();
        }
    }

    if !batch.is_empty() {
        let outcome = writer.bulk_index(&batch).await?;
        report.indexed += outcome.indexed;
        report.failed += outcome.failed;
    }

    report.skipped = records.skipped();

    info!(
        parsed = report.parsed,
        skipped = report.skipped,
        indexed = report.indexed,
        failed = report.failed,
        "Ingestion complete"
    );

    Ok(report)
}
