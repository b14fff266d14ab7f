use super::traits::TableFile;
use crate::core::models::pocket::Pocket;
use crate::core::models::residue::{Residue, ResidueSet};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Separator placed between residue descriptors in a summary row.
pub const RESIDUE_SEPARATOR: &str = "; ";
/// Delimiter used to split a stored residue list back into descriptors.
pub const RESIDUE_DELIMITER: &str = ";";

pub const SUMMARY_HEADER: [&str; 3] = ["Pocket_ID", "Residue_Count", "Residues"];
pub const RESIDUE_TABLE_HEADER: [&str; 3] =
    ["Amino acid", "HETATM Flag", "Residue Sequence Number"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Joins the descriptors of a residue set in canonical order.
pub fn serialize_residues(residues: &ResidueSet) -> String {
    residues
        .iter()
        .map(|r| r.key.to_string())
        .collect::<Vec<_>>()
        .join(RESIDUE_SEPARATOR)
}

/// Counts the non-empty descriptors in a stored residue list.
///
/// A missing or blank field counts as zero residues.
pub fn count_residue_descriptors(field: Option<&str>, separator: &str) -> usize {
    split_residue_descriptors(field, separator).count()
}

pub(crate) fn split_residue_descriptors<'a>(
    field: Option<&'a str>,
    separator: &'a str,
) -> impl Iterator<Item = &'a str> {
    field
        .unwrap_or("")
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// One row of the pocket summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Pocket_ID")]
    pub pocket_id: u32,
    #[serde(rename = "Residue_Count")]
    pub residue_count: usize,
    #[serde(rename = "Residues", default)]
    pub residues: String,
}

impl From<&Pocket> for SummaryRow {
    fn from(pocket: &Pocket) -> Self {
        Self {
            pocket_id: pocket.id.get(),
            residue_count: pocket.residue_count(),
            residues: serialize_residues(&pocket.residues),
        }
    }
}

/// Projects pockets onto summary rows, keeping their order.
pub fn summarize_pockets(pockets: &[Pocket]) -> Vec<SummaryRow> {
    pockets.iter().map(SummaryRow::from).collect()
}

/// One row of the raw residue dump of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueRow {
    #[serde(rename = "Amino acid")]
    pub residue_name: String,
    #[serde(rename = "HETATM Flag", default)]
    pub het_flag: String,
    #[serde(rename = "Residue Sequence Number")]
    pub residue_number: isize,
}

impl From<&Residue> for ResidueRow {
    fn from(residue: &Residue) -> Self {
        Self {
            residue_name: residue.name().to_string(),
            het_flag: residue.het_field().to_string(),
            residue_number: residue.number(),
        }
    }
}

fn write_table<T: Serialize>(
    header: &[&str],
    rows: &[T],
    writer: &mut impl Write,
) -> Result<(), TableError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_table<T: for<'de> Deserialize<'de>>(reader: &mut impl Read) -> Result<Vec<T>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize::<T>() {
        rows.push(result?);
    }
    Ok(rows)
}

/// The `Pocket_ID,Residue_Count,Residues` summary table.
pub struct PocketSummaryFile;

impl TableFile for PocketSummaryFile {
    type Row = SummaryRow;
    type Error = TableError;

    fn read_from(reader: &mut impl Read) -> Result<Vec<Self::Row>, Self::Error> {
        read_table(reader)
    }

    fn write_to(rows: &[Self::Row], writer: &mut impl Write) -> Result<(), Self::Error> {
        write_table(&SUMMARY_HEADER, rows, writer)
    }
}

/// The `Amino acid,HETATM Flag,Residue Sequence Number` residue dump.
pub struct ResidueTableFile;

impl TableFile for ResidueTableFile {
    type Row = ResidueRow;
    type Error = TableError;

    fn read_from(reader: &mut impl Read) -> Result<Vec<Self::Row>, Self::Error> {
        read_table(reader)
    }

    fn write_to(rows: &[Self::Row], writer: &mut impl Write) -> Result<(), Self::Error> {
        write_table(&RESIDUE_TABLE_HEADER, rows, writer)
    }
}
