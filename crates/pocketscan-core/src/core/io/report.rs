use super::summary::{RESIDUE_SEPARATOR, SummaryRow, TableError, split_residue_descriptors};
use super::traits::TableFile;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub const REPORT_HEADER: [&str; 3] = ["pocket_number", "score", "pocket_residues"];

/// One row of a consolidated pocket table written by a predictor.
///
/// P2Rank's own `rank` and `residue_ids` column names are accepted as
/// aliases. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketReportRow {
    #[serde(alias = "rank")]
    pub pocket_number: u32,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(alias = "residue_ids", default)]
    pub pocket_residues: Option<String>,
}

impl PocketReportRow {
    /// Number of non-empty descriptors in the residue list, split on `separator`.
    pub fn residue_count(&self, separator: &str) -> usize {
        split_residue_descriptors(self.pocket_residues.as_deref(), separator).count()
    }

    /// Projects the row onto a summary row.
    ///
    /// Descriptors are re-joined with the summary separator so the written
    /// table is uniform regardless of the predictor's own delimiter.
    pub fn to_summary_row(&self, separator: &str) -> SummaryRow {
        let descriptors: Vec<&str> =
            split_residue_descriptors(self.pocket_residues.as_deref(), separator).collect();
        SummaryRow {
            pocket_id: self.pocket_number,
            residue_count: descriptors.len(),
            residues: descriptors.join(RESIDUE_SEPARATOR),
        }
    }
}

pub fn summarize_report(rows: &[PocketReportRow], separator: &str) -> Vec<SummaryRow> {
    rows.iter().map(|row| row.to_summary_row(separator)).collect()
}

/// The consolidated `pocket_number,score,pocket_residues` table.
pub struct PocketReportFile;

impl TableFile for PocketReportFile {
    type Row = PocketReportRow;
    type Error = TableError;

    fn read_from(reader: &mut impl Read) -> Result<Vec<Self::Row>, Self::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.deserialize::<PocketReportRow>() {
            rows.push(result?);
        }
        Ok(rows)
    }

    fn write_to(rows: &[Self::Row], writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        wtr.write_record(REPORT_HEADER)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
