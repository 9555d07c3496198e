use chrono::DateTime;
use thiserror::Error;

use crate::models::{Incident, RawIncident, RawResponse, RawTransaction, Transaction};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("missing field `{path}` in attack events response")]
    MissingField { path: String },
    #[error("timestamp {millis} at `{path}` is out of range")]
    InvalidTimestamp { path: String, millis: i64 },
}

pub fn process_data(response: RawResponse) -> Result<Vec<Incident>, TransformError> {
    let records = response.list.ok_or_else(|| missing("list"))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| to_incident(record, &format!("list[{}]", index)))
        .collect()
}

fn to_incident(record: RawIncident, path: &str) -> Result<Incident, TransformError> {
    let project = record.project.ok_or_else(|| missing(format!("{}.project", path)))?;
    let loss = record.loss.ok_or_else(|| missing(format!("{}.loss", path)))?;
    let vulnerability = record
        .root_cause
        .ok_or_else(|| missing(format!("{}.rootCause", path)))?;
    let raw_transactions = record
        .transactions
        .ok_or_else(|| missing(format!("{}.transactions", path)))?;

    let transactions = raw_transactions
        .into_iter()
        .enumerate()
        .map(|(index, txn)| to_transaction(txn, &format!("{}.transactions[{}]", path, index)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Incident {
        project,
        loss,
        vulnerability,
        root_cause_link: record.media,
        transactions,
    })
}

fn to_transaction(txn: RawTransaction, path: &str) -> Result<Transaction, TransformError> {
    let hash = txn.txn_hash.ok_or_else(|| missing(format!("{}.txnHash", path)))?;
    let millis = txn
        .txn_hash_date
        .ok_or_else(|| missing(format!("{}.txnHashDate", path)))?;
    let chain = txn.chain_id.ok_or_else(|| missing(format!("{}.chainId", path)))?;

    let (date, time) = split_timestamp(millis).ok_or_else(|| TransformError::InvalidTimestamp {
        path: format!("{}.txnHashDate", path),
        millis,
    })?;

    Ok(Transaction {
        hash,
        chain,
        date,
        time,
    })
}

/// Splits epoch milliseconds into a UTC calendar date and time of day.
pub fn split_timestamp(millis: i64) -> Option<(String, String)> {
    let instant = DateTime::from_timestamp_millis(millis)?;
    Some((
        instant.format(DATE_FORMAT).to_string(),
        instant.format(TIME_FORMAT).to_string(),
    ))
}

fn missing(path: impl Into<String>) -> TransformError {
    TransformError::MissingField { path: path.into() }
}
