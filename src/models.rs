use serde::Deserialize;
use std::fmt;

/// Response of the attack events endpoint. Every key is optional on the wire;
/// the transformer decides which ones are required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    pub list: Option<Vec<RawIncident>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIncident {
    pub project: Option<String>,
    pub loss: Option<f64>,
    pub root_cause: Option<String>,
    pub media: Option<String>,
    pub transactions: Option<Vec<RawTransaction>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub txn_hash: Option<String>,
    /// Epoch milliseconds.
    pub txn_hash_date: Option<i64>,
    pub chain_id: Option<ChainId>,
}

/// The endpoint sends chain ids as numbers for EVM chains and as names otherwise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChainId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Number(id) => write!(f, "{}", id),
            ChainId::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    pub project: String,
    pub loss: f64,
    pub vulnerability: String,
    pub root_cause_link: Option<String>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub hash: String,
    pub chain: ChainId,
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// `HH:MM:SS`, UTC.
    pub time: String,
}
