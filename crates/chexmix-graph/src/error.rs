use thiserror::Error;

/// Errors raised by graph construction and graph operations.
///
/// All of these signal a data-contract violation by the caller or by the
/// ingestion layer; none of them are retried or swallowed inside the crate.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    UnknownNode(String),

    #[error("node {node} has no '{key}' attribute")]
    MissingAttribute { node: String, key: String },

    #[error("attribute '{key}' of {node} has unexpected shape: {detail}")]
    InvalidAttribute {
        node: String,
        key: String,
        detail: String,
    },

    #[error("unknown node id header: {0}")]
    UnknownHeader(String),

    #[error("no node is named '{0}'")]
    UnknownName(String),

    #[error("raw id of {0} is not numeric")]
    InvalidRawId(String),

    #[error("data source failed: {0}")]
    Source(#[from] anyhow::Error),
}

impl GraphError {
    pub(crate) fn missing(node: &str, key: &str) -> Self {
        Self::MissingAttribute {
            node: node.to_string(),
            key: key.to_string(),
        }
    }

    pub(crate) fn invalid(node: &str, key: &str, detail: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            node: node.to_string(),
            key: key.to_string(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
