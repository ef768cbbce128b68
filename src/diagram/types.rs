//! Raw diagram types matching the editor's JSON document (GoJS GraphLinksModel).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Node key as emitted by the editor: usually an integer, sometimes a string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Int(n) => write!(f, "{}", n),
            NodeKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(n: i64) -> Self {
        NodeKey::Int(n)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey::Text(s.to_string())
    }
}

/// Column storage types offered by the class editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StorageType {
    Integer,
    BigInt,
    SmallInt,
    Decimal,
    Numeric,
    Real,
    DoublePrecision,
    Serial,
    BigSerial,
    Varchar,
    Char,
    Text,
    Date,
    Time,
    Timestamp,
    Boolean,
    Uuid,
    Json,
    Jsonb,
    Array,
}

impl StorageType {
    pub const ALL: [StorageType; 20] = [
        StorageType::Integer,
        StorageType::BigInt,
        StorageType::SmallInt,
        StorageType::Decimal,
        StorageType::Numeric,
        StorageType::Real,
        StorageType::DoublePrecision,
        StorageType::Serial,
        StorageType::BigSerial,
        StorageType::Varchar,
        StorageType::Char,
        StorageType::Text,
        StorageType::Date,
        StorageType::Time,
        StorageType::Timestamp,
        StorageType::Boolean,
        StorageType::Uuid,
        StorageType::Json,
        StorageType::Jsonb,
        StorageType::Array,
    ];

    /// Wire name, as shown in the editor's type dropdown.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageType::Integer => "INTEGER",
            StorageType::BigInt => "BIGINT",
            StorageType::SmallInt => "SMALLINT",
            StorageType::Decimal => "DECIMAL",
            StorageType::Numeric => "NUMERIC",
            StorageType::Real => "REAL",
            StorageType::DoublePrecision => "DOUBLE PRECISION",
            StorageType::Serial => "SERIAL",
            StorageType::BigSerial => "BIGSERIAL",
            StorageType::Varchar => "VARCHAR",
            StorageType::Char => "CHAR",
            StorageType::Text => "TEXT",
            StorageType::Date => "DATE",
            StorageType::Time => "TIME",
            StorageType::Timestamp => "TIMESTAMP",
            StorageType::Boolean => "BOOLEAN",
            StorageType::Uuid => "UUID",
            StorageType::Json => "JSON",
            StorageType::Jsonb => "JSONB",
            StorageType::Array => "ARRAY",
        }
    }
}

impl std::str::FromStr for StorageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        StorageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown storage type '{}' (expected one of: {})",
                    s,
                    StorageType::ALL.map(StorageType::as_str).join(", ")
                )
            })
    }
}

impl<'de> Deserialize<'de> for StorageType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Protected,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: StorageType,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_key: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: NodeKey,
    pub name: String,
    pub properties: Vec<Property>,
    /// Canvas position ("x y"); never read by generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<serde_json::Value>,
}

impl Node {
    /// The property flagged as primary key, if any.
    pub fn key_property(&self) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_key)
    }
}

/// The four relationship kinds. Accepts the English names and the editor's Spanish labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    #[serde(alias = "Herencia", alias = "Generalización", alias = "Generalization")]
    Inheritance,
    #[serde(alias = "Composición")]
    Composition,
    #[serde(alias = "Agregación")]
    Aggregation,
    #[serde(alias = "Asociación")]
    Association,
}

/// Cardinality applied when an end carries no text.
pub const DEFAULT_CARDINALITY: &str = "0..*";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub from: NodeKey,
    pub to: NodeKey,
    pub relationship: RelationshipKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_text: Option<String>,
}

impl Link {
    /// Cardinality on the "from" end, defaulted when missing or blank.
    pub fn from_cardinality(&self) -> Cardinality<'_> {
        Cardinality::of(self.from_text.as_deref())
    }

    /// Cardinality on the "to" end, defaulted when missing or blank.
    pub fn to_cardinality(&self) -> Cardinality<'_> {
        Cardinality::of(self.to_text.as_deref())
    }

    pub fn touches(&self, key: &NodeKey) -> bool {
        &self.from == key || &self.to == key
    }

    pub fn is_self_link(&self) -> bool {
        self.from == self.to
    }
}

/// Free-form multiplicity text; only a trailing `*` is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cardinality<'a>(&'a str);

impl<'a> Cardinality<'a> {
    pub fn of(text: Option<&'a str>) -> Self {
        match text.map(str::trim) {
            Some(t) if !t.is_empty() => Cardinality(t),
            _ => Cardinality(DEFAULT_CARDINALITY),
        }
    }

    pub fn is_many(&self) -> bool {
        self.0.ends_with('*')
    }
}

/// Whole diagram document. Extra model fields (`class`, `linkKeyProperty`, ...) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub node_data_array: Vec<Node>,
    #[serde(default)]
    pub link_data_array: Vec<Link>,
}

impl Diagram {
    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.node_data_array.iter().find(|n| &n.key == key)
    }

    /// Links touching `key`, in link-array order.
    pub fn links_of<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a Link> + 'a {
        self.link_data_array.iter().filter(move |l| l.touches(key))
    }
}
