//! Node, edge and taxonomy-rank vocabularies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl FromStr for $name {
            type Err = GraphError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| GraphError::invalid("-", stringify!($name), s.to_string()))
            }
        }

        impl From<$name> for Value {
            fn from(value: $name) -> Self {
                Value::String(value.as_str().to_string())
            }
        }
    };
}

string_enum!(
    /// Value of a node's `type` attribute.
    NodeType {
        Keyword => "Keyword",
        Article => "Article",
        Taxonomy => "Taxonomy",
        MeSHD => "MeSH Descriptor",
        MeSHC => "MeSH Supplementary Record",
        Literature => "Literature",
        ChemOnto => "ClassyFire Chemical Ontology",
        Chemical => "Chemical",
        Gene => "Gene",
        Mutation => "Mutation",
    }
);

string_enum!(
    /// Value of an edge's `type` attribute. Reversed types are `_`-prefixed
    /// strings and have no variant here (see [`crate::ids::reverse_prefix`]).
    EdgeType {
        Mentioned => "MENTIONED",
        AppearedIn => "APPEARED_IN",
        IsA => "IS_A",
        Includes => "INCLUDES",
        Contains => "CONTAINS",
        Has => "HAS",
    }
);

string_enum!(
    /// Rank used to pick root taxa for literature subgraphs.
    TaxParentType {
        Genus => "Genus",
        Family => "Family",
    }
);

impl EdgeType {
    /// `_`-prefixed name of the inverse relation.
    pub fn reversed(self) -> String {
        crate::ids::reverse_prefix(self.as_str())
    }
}

impl TaxParentType {
    /// Name of the taxonomy-table field holding this rank's name.
    pub fn field(self) -> &'static str {
        match self {
            TaxParentType::Genus => "genus",
            TaxParentType::Family => "family",
        }
    }
}

/// Top-level MeSH category of a tree number (`C14.907` -> `Diseases`).
pub fn mesh_category(tree_number: &str) -> Option<&'static str> {
    let category = match tree_number.chars().next()? {
        'A' => "Anatomy",
        'B' => "Organisms",
        'C' => "Diseases",
        'D' => "Chemicals and Drugs",
        'E' => "Analytical, Diagnostic and Therapeutic Techniques, and Equipment",
        'F' => "Psychiatry and Psychology",
        'G' => "Phenomena and Processes",
        'H' => "Disciplines and Occupations",
        'I' => "Anthropology, Education, Sociology, and Social Phenomena",
        'J' => "Technology, Industry, and Agriculture",
        'K' => "Humanities",
        'L' => "Information Science",
        'M' => "Named Groups",
        'N' => "Health Care",
        'V' => "Publication Characteristics",
        'Z' => "Geographicals",
        _ => return None,
    };
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(NodeType::MeSHD.as_str(), "MeSH Descriptor");
        assert_eq!(EdgeType::AppearedIn.to_string(), "APPEARED_IN");
        assert_eq!(EdgeType::Contains.reversed(), "_CONTAINS");
        assert_eq!(
            serde_json::to_value(NodeType::ChemOnto).unwrap(),
            Value::from("ClassyFire Chemical Ontology")
        );
        assert_eq!("Chemical".parse::<NodeType>().unwrap(), NodeType::Chemical);
        assert!("genus".parse::<NodeType>().is_err());
    }

    #[test]
    fn test_mesh_category() {
        assert_eq!(mesh_category("C14.907.137"), Some("Diseases"));
        assert_eq!(mesh_category("Z01"), Some("Geographicals"));
        assert_eq!(mesh_category("X1"), None);
        assert_eq!(mesh_category(""), None);
    }
}
