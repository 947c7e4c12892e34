//! NCBI taxdump records -> taxonomy table.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use chexmix_graph::{create_node_id, EdgeType, Header, NodeId, NodeType, Table, RELATIONSHIP};

use crate::error::{Result, SourceError};

/// Canonical NCBI ranks, most general first.
pub const RANKS: [&str; 41] = [
    "superkingdom",
    "kingdom",
    "subkingdom",
    "superphylum",
    "phylum",
    "subphylum",
    "infraphylum",
    "superclass",
    "class",
    "subclass",
    "infraclass",
    "cohort",
    "subcohort",
    "superorder",
    "order",
    "suborder",
    "infraorder",
    "parvorder",
    "superfamily",
    "family",
    "subfamily",
    "tribe",
    "subtribe",
    "genus",
    "subgenus",
    "section",
    "subsection",
    "series",
    "subseries",
    "species group",
    "species subgroup",
    "species",
    "forma specialis",
    "subspecies",
    "varietas",
    "subvariety",
    "forma",
    "serogroup",
    "serotype",
    "strain",
    "isolate",
];

const ROOT_TAX_ID: u64 = 1;

/// One joined row of `nodes.dmp` / `names.dmp` / `taxidlineage.dmp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    pub tax_id: u64,
    pub parent_tax_id: u64,
    pub rank: String,
    pub tax_name: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub genus: String,
    /// Ancestor tax ids, root side first
    #[serde(default)]
    pub lineage: Vec<u64>,
}

/// `(index + 1) * 2` for canonical ranks, `None` otherwise.
pub fn rank_level(rank: &str) -> Option<usize> {
    RANKS.iter().position(|r| *r == rank).map(|i| (i + 1) * 2)
}

fn taxon_id(tax_id: u64) -> NodeId {
    create_node_id(Header::Taxonomy, tax_id)
}

/// Level of `record`: its rank level, or one more than the nearest ranked
/// ancestor below the root, or 1.
fn level(record: &TaxonomyRecord, by_id: &IndexMap<u64, &TaxonomyRecord>) -> usize {
    if let Some(level) = rank_level(&record.rank) {
        return level;
    }
    let mut parent = record.parent_tax_id;
    // Bounded walk: a parent cycle ends after one pass over the table.
    for _ in 0..by_id.len() {
        if parent == ROOT_TAX_ID {
            break;
        }
        let Some(ancestor) = by_id.get(&parent) else {
            break;
        };
        if let Some(level) = rank_level(&ancestor.rank) {
            return level + 1;
        }
        parent = ancestor.parent_tax_id;
    }
    1
}

/// Build the taxonomy table. Every parent and lineage entry must itself be a
/// record; the root's self-parent pointer is not turned into a self-loop.
pub fn build_taxonomy_table(records: &[TaxonomyRecord]) -> Result<Table> {
    let by_id: IndexMap<u64, &TaxonomyRecord> = records.iter().map(|r| (r.tax_id, r)).collect();

    let mut includes: IndexMap<u64, BTreeSet<NodeId>> = IndexMap::new();
    let mut included_by: IndexMap<u64, BTreeSet<NodeId>> = IndexMap::new();
    for record in records {
        if !by_id.contains_key(&record.parent_tax_id) {
            return Err(SourceError::UnknownParent {
                tax_id: record.tax_id,
                parent_tax_id: record.parent_tax_id,
            });
        }
        if let Some(missing) = record.lineage.iter().find(|id| !by_id.contains_key(*id)) {
            return Err(SourceError::MissingRecord(format!(
                "{} in lineage of {}",
                taxon_id(*missing),
                taxon_id(record.tax_id)
            )));
        }
        if record.parent_tax_id == record.tax_id {
            continue;
        }
        includes
            .entry(record.parent_tax_id)
            .or_default()
            .insert(taxon_id(record.tax_id));
        included_by
            .entry(record.tax_id)
            .or_default()
            .insert(taxon_id(record.parent_tax_id));
    }

    let mut table = Table::new();
    for record in records {
        let id = taxon_id(record.tax_id);
        let lineage: Vec<NodeId> = record.lineage.iter().copied().map(taxon_id).collect();
        let mut relationship = Map::new();
        relationship.insert(
            EdgeType::Includes.as_str().to_string(),
            json!(includes.get(&record.tax_id).cloned().unwrap_or_default()),
        );
        relationship.insert(
            EdgeType::Includes.reversed(),
            json!(included_by.get(&record.tax_id).cloned().unwrap_or_default()),
        );
        let row = json!({
            "id": id,
            "raw_id": record.tax_id,
            "type": NodeType::Taxonomy,
            "rank": record.rank,
            "name": record.tax_name,
            "parent_id": taxon_id(record.parent_tax_id),
            "family": record.family,
            "genus": record.genus,
            "level": level(record, &by_id),
            "lineage": lineage,
        });
        if let Value::Object(mut row) = row {
            row.insert(RELATIONSHIP.to_string(), Value::Object(relationship));
            table.insert(id, row);
        }
    }

    tracing::debug!(taxa = table.len(), "built taxonomy table");
    Ok(table)
}
