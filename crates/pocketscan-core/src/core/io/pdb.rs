use crate::core::models::atom::{AtomRecord, RecordKind};
use crate::core::utils::identifiers;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// A fixed-width field of a PDB coordinate record, as a half-open byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// 1-indexed inclusive column range, as written in the PDB format guide.
    pub fn columns(&self) -> String {
        if self.end - self.start == 1 {
            format!("{}", self.end)
        } else {
            format!("{}-{}", self.start + 1, self.end)
        }
    }

    /// The field's bytes, decoded only if they are plain ASCII.
    fn ascii<'a>(&self, line: &'a [u8]) -> Option<Result<&'a str, ()>> {
        let bytes = line.get(self.start..self.end.min(line.len()))?;
        Some(
            std::str::from_utf8(bytes)
                .ok()
                .filter(|text| text.is_ascii())
                .ok_or(()),
        )
    }
}

/// Column layout of the `ATOM`/`HETATM` fields read by [`parse_atom_line`].
pub mod fields {
    use super::FieldSpan;

    pub const RECORD_NAME: FieldSpan = FieldSpan::new("record name", 0, 6);
    pub const RESIDUE_NAME: FieldSpan = FieldSpan::new("residue name", 17, 20);
    pub const CHAIN_ID: FieldSpan = FieldSpan::new("chain identifier", 21, 22);
    pub const RESIDUE_NUMBER: FieldSpan = FieldSpan::new("residue sequence number", 22, 26);
    pub const INSERTION_CODE: FieldSpan = FieldSpan::new("insertion code", 26, 27);

    /// Every required field ends at or before this byte offset.
    pub const REQUIRED_LEN: usize = RESIDUE_NUMBER.end;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("line has {len} bytes, at least {required} are required")]
    LineTooShort { len: usize, required: usize },
    #[error("{field} in columns {columns} is not plain ASCII")]
    InvalidEncoding {
        field: &'static str,
        columns: String,
    },
    #[error("invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
}

/// A line that carries an atom record name but whose fields cannot be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed {record} record on line {line}: {kind}")]
pub struct MalformedRecord {
    pub line: usize,
    pub record: RecordKind,
    pub kind: MalformedKind,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),
}

fn record_kind(line: &[u8]) -> Option<RecordKind> {
    let end = fields::RECORD_NAME.end.min(line.len());
    let name = std::str::from_utf8(line.get(fields::RECORD_NAME.start..end)?).ok()?;
    identifiers::record_kind(name.trim())
}

/// Parses one line of a PDB file.
///
/// Returns `None` for lines that are not `ATOM`/`HETATM` records. Atom lines
/// yield either the extracted record or the reason it could not be read.
pub fn parse_atom_line(line: &str, line_num: usize) -> Option<Result<AtomRecord, MalformedRecord>> {
    parse_atom_bytes(line.as_bytes(), line_num)
}

/// Byte-level form of [`parse_atom_line`]. Only the field columns of atom
/// records are decoded, so the rest of the line may hold any bytes.
pub fn parse_atom_bytes(
    line: &[u8],
    line_num: usize,
) -> Option<Result<AtomRecord, MalformedRecord>> {
    let kind = record_kind(line)?;
    Some(extract_fields(line, line_num, kind))
}

fn extract_fields(line: &[u8], line_num: usize, kind: RecordKind) -> Result<AtomRecord, MalformedRecord> {
    let malformed = |reason: MalformedKind| MalformedRecord {
        line: line_num,
        record: kind,
        kind: reason,
    };

    if line.len() < fields::REQUIRED_LEN {
        return Err(malformed(MalformedKind::LineTooShort {
            len: line.len(),
            required: fields::REQUIRED_LEN,
        }));
    }

    let field = |span: FieldSpan| match span.ascii(line) {
        Some(Ok(text)) => Ok(text.trim()),
        _ => Err(malformed(MalformedKind::InvalidEncoding {
            field: span.name,
            columns: span.columns(),
        })),
    };

    let residue_name = field(fields::RESIDUE_NAME)?;
    let chain_id = field(fields::CHAIN_ID)?.chars().next();
    let number_str = field(fields::RESIDUE_NUMBER)?;
    let residue_number: isize = number_str.parse().map_err(|_| {
        malformed(MalformedKind::InvalidInt {
            columns: fields::RESIDUE_NUMBER.columns(),
            value: number_str.to_string(),
        })
    })?;
    let insertion_code = match fields::INSERTION_CODE.ascii(line) {
        None => None,
        Some(Ok(code)) => code.trim().chars().next(),
        Some(Err(())) => {
            return Err(malformed(MalformedKind::InvalidEncoding {
                field: fields::INSERTION_CODE.name,
                columns: fields::INSERTION_CODE.columns(),
            }));
        }
    };

    Ok(AtomRecord {
        kind,
        chain_id,
        residue_name: residue_name.to_string(),
        residue_number,
        insertion_code,
        line: line_num,
    })
}

/// Lazy sequence of atom records read from a byte stream.
///
/// Lines are split on `\n` with a trailing `\r` removed; their content is never
/// required to be UTF-8. Malformed atom lines are yielded as errors without
/// stopping the scan; an I/O error is yielded once and ends the sequence.
pub struct AtomRecords<R> {
    reader: R,
    buf: Vec<u8>,
    line_num: usize,
    done: bool,
}

impl<R: BufRead> AtomRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_num: 0,
            done: false,
        }
    }
}

fn strip_line_ending(mut line: &[u8]) -> &[u8] {
    if let [rest @ .., b'\n'] = line {
        line = rest;
    }
    if let [rest @ .., b'\r'] = line {
        line = rest;
    }
    line
}

impl<R: BufRead> Iterator for AtomRecords<R> {
    type Item = Result<AtomRecord, PdbError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(PdbError::Io(e)));
                }
                Ok(_) => {
                    self.line_num += 1;
                    let line = strip_line_ending(&self.buf);
                    if let Some(parsed) = parse_atom_bytes(line, self.line_num) {
                        return Some(parsed.map_err(PdbError::from));
                    }
                }
            }
        }
        None
    }
}

pub struct PdbFile;

impl PdbFile {
    pub fn records<R: BufRead>(reader: R) -> AtomRecords<R> {
        AtomRecords::new(reader)
    }

    /// Opens `path` and returns its atom records. The file handle lives as
    /// long as the returned iterator.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<AtomRecords<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(AtomRecords::new(BufReader::new(file)))
    }
}
