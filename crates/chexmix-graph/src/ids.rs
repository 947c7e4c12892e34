//! Composite node identifiers: `HEADER:RAWID`.
//!
//! Headers are fixed-width (4 characters) namespace codes, so the header and
//! raw id are recovered by character offset rather than by splitting on `:`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Canonical node identifier.
pub type NodeId = String;

/// Width of every header produced by [`create_node_id`].
pub const HEADER_WIDTH: usize = 4;

// ============================================================================
// Header
// ============================================================================

/// Namespace code identifying an entity's source ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Header {
    #[serde(rename = "ARTI")]
    Article,
    #[serde(rename = "TAXO")]
    Taxonomy,
    #[serde(rename = "MSHD")]
    MeSHD,
    #[serde(rename = "MSHC")]
    MeSHC,
    #[serde(rename = "CLFR")]
    ChemOnto,
    #[serde(rename = "INCK")]
    Chemical,
    #[serde(rename = "GENE")]
    Gene,
    #[serde(rename = "MUTA")]
    Mutation,
}

impl Header {
    pub const ALL: [Header; 8] = [
        Header::Article,
        Header::Taxonomy,
        Header::MeSHD,
        Header::MeSHC,
        Header::ChemOnto,
        Header::Chemical,
        Header::Gene,
        Header::Mutation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Header::Article => "ARTI",
            Header::Taxonomy => "TAXO",
            Header::MeSHD => "MSHD",
            Header::MeSHC => "MSHC",
            Header::ChemOnto => "CLFR",
            Header::Chemical => "INCK",
            Header::Gene => "GENE",
            Header::Mutation => "MUTA",
        }
    }

    /// Header of `node_id`, if it is one of the known namespaces.
    pub fn of(node_id: &str) -> Option<Header> {
        get_header(node_id).parse().ok()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Header {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Header::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| GraphError::UnknownHeader(s.to_string()))
    }
}

impl AsRef<str> for Header {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ============================================================================
// Raw ids
// ============================================================================

/// Source-specific key of a node id.
///
/// All-decimal keys are canonicalized to integers, so leading zeros do not
/// survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(u64),
    Str(String),
}

impl RawId {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            RawId::Int(n) => Some(*n),
            RawId::Str(_) => None,
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(n) => write!(f, "{n}"),
            RawId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RawId {
    fn from(value: u64) -> Self {
        RawId::Int(value)
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Str(value.to_string())
    }
}

// ============================================================================
// Encoding / decoding
// ============================================================================

/// Build a node id (`TAXO:9606`, `MSHD:D050197`). No escaping is applied.
pub fn create_node_id(header: impl fmt::Display, raw_id: impl fmt::Display) -> NodeId {
    format!("{header}:{raw_id}")
}

/// First four characters of a node id (`TAXO:1234` -> `TAXO`).
pub fn get_header(node_id: &str) -> &str {
    match node_id.char_indices().nth(HEADER_WIDTH) {
        Some((end, _)) => &node_id[..end],
        None => node_id,
    }
}

/// Everything after the header and its `:` (`TAXO:1234` -> `1234`).
pub fn get_raw_id(node_id: &str) -> RawId {
    let raw = match node_id.char_indices().nth(HEADER_WIDTH + 1) {
        Some((start, _)) => &node_id[start..],
        None => "",
    };
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<u64>() {
            return RawId::Int(n);
        }
    }
    RawId::Str(raw.to_string())
}

/// Toggle the leading `_` that marks a reversed edge type.
pub fn reverse_prefix(edge_type: &str) -> String {
    match edge_type.strip_prefix('_') {
        Some(forward) => forward.to_string(),
        None => format!("_{edge_type}"),
    }
}
