use crate::core::io::summary::{ResidueRow, ResidueTableFile};
use crate::core::io::traits::TableFile;
use crate::engine::aggregator::{ResidueAggregator, ScanOutcome};
use crate::engine::config::MalformedPolicy;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Reads every residue of a structure file.
pub fn extract(structure: &Path, policy: MalformedPolicy) -> Result<ScanOutcome, EngineError> {
    ResidueAggregator::new(policy)
        .scan_path(structure)
        .map_err(|source| EngineError::Structure {
            path: structure.to_path_buf(),
            source,
        })
}

/// Extracts the residues of `structure` and writes them as a residue table.
#[instrument(skip_all, name = "residue_dump", fields(structure = %structure.display()))]
pub fn run(
    structure: &Path,
    policy: MalformedPolicy,
    output: &Path,
    reporter: &ProgressReporter,
) -> Result<ScanOutcome, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading structure",
    });
    let outcome = extract(structure, policy)?;

    for chain in outcome.residues.chain_ids() {
        let label = chain.map_or_else(|| "(blank)".to_string(), |c| c.to_string());
        info!("Chain {}", label);
    }
    for skipped in &outcome.skipped {
        let message = format!("Skipped record in {}: {}", structure.display(), skipped);
        warn!("{}", message);
        reporter.report(Progress::Warning(message));
    }
    if outcome.residues.is_empty() {
        warn!("No ATOM/HETATM residues found in {:?}.", structure);
        reporter.report(Progress::Warning(format!(
            "No residues found in {}",
            structure.display()
        )));
    }
    info!(
        "Extracted {} residue(s) from {} atom record(s).",
        outcome.residues.len(),
        outcome.records_read
    );

    let rows: Vec<ResidueRow> = outcome.residues.iter().map(ResidueRow::from).collect();
    ResidueTableFile::write_to_path(&rows, output).map_err(|source| EngineError::TableWrite {
        path: output.to_path_buf(),
        source,
    })?;
    reporter.report(Progress::Message(format!(
        "Residue table saved to {}",
        output.display()
    )));
    reporter.report(Progress::PhaseFinish);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const STRUCTURE: &str = "\
HEADER    TRANSCRIPTION/DNA                       11-AUG-95   1TUP
ATOM      1  N   SER A  94      52.534  23.234  70.287  1.00 63.01           N
ATOM      2  CA  SER A  94      51.591  22.149  70.543  1.00 62.41           C
ATOM      3  N   SER B  95      50.000  22.000  71.000  1.00 60.00           N
HETATM 3001 ZN    ZN A 951      52.000  22.000  70.000  1.00 30.00          ZN
HETATM 3002  O   HOH A 601      40.000  20.000  60.000  1.00 30.00           O
END
";

    #[test]
    fn run_writes_residue_table_in_canonical_order() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("1tup.pdb");
        fs::write(&structure, STRUCTURE).unwrap();
        let output = dir.path().join("residue_data.csv");

        let outcome = run(
            &structure,
            MalformedPolicy::Skip,
            &output,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(outcome.residues.len(), 4);
        assert_eq!(outcome.records_read, 5);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "Amino acid,HETATM Flag,Residue Sequence Number\n\
             SER,,94\nHOH,W,601\nZN,H_ZN,951\nSER,,95\n"
        );
    }

    #[test]
    fn extract_names_missing_structure() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("missing.pdb");
        let err = extract(&structure, MalformedPolicy::Skip).unwrap_err();
        assert!(matches!(err, EngineError::Structure { ref path, .. } if *path == structure));
    }

    #[test]
    fn extract_honours_abort_policy() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("broken.pdb");
        fs::write(&structure, "ATOM      1  N   SER A\n").unwrap();
        assert!(extract(&structure, MalformedPolicy::Abort).is_err());
        assert!(extract(&structure, MalformedPolicy::Skip).is_ok());
    }
}
