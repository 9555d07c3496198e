use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::Incident;

pub const HEADER: &str =
    "Project,Loss,Vulnerability,Root Cause Link,Transaction Hash,Transaction Date,Transaction Time,Chain";

const INCIDENT_COLUMNS: usize = 4;
const TRANSACTION_COLUMNS: usize = 4;

/// Rows for one incident: one per transaction, with the incident columns only
/// on the first, or a single row with empty transaction columns when there are
/// no transactions. Values are joined as-is; commas inside them are not escaped.
pub fn incident_rows(incident: &Incident) -> impl Iterator<Item = String> + '_ {
    let incident_cells = [
        incident.project.clone(),
        incident.loss.to_string(),
        incident.vulnerability.clone(),
        incident.root_cause_link.clone().unwrap_or_default(),
    ];

    let transaction_cells: Vec<Option<[String; TRANSACTION_COLUMNS]>> =
        if incident.transactions.is_empty() {
            vec![None]
        } else {
            incident
                .transactions
                .iter()
                .map(|txn| {
                    Some([
                        txn.hash.clone(),
                        txn.date.clone(),
                        txn.time.clone(),
                        txn.chain.to_string(),
                    ])
                })
                .collect()
        };

    transaction_cells
        .into_iter()
        .enumerate()
        .map(move |(index, txn)| {
            let mut cells: Vec<String> = if index == 0 {
                incident_cells.to_vec()
            } else {
                vec![String::new(); INCIDENT_COLUMNS]
            };
            match txn {
                Some(txn) => cells.extend(txn),
                None => cells.extend(std::iter::repeat(String::new()).take(TRANSACTION_COLUMNS)),
            }
            cells.join(",")
        })
}

/// Creates the parent directory if needed and overwrites `path`.
pub fn write_csv(path: &Path, incidents: &[Incident]) -> Result<usize> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", HEADER)?;
    let mut rows = 0;
    for incident in incidents {
        for row in incident_rows(incident) {
            writeln!(out, "{}", row)?;
            rows += 1;
        }
    }
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(rows)
}
