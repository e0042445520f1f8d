//! Raw catalog records, straight out of JSON.
//!
//! The first phase of the two-phase load: records are kept as generic
//! key → JSON value maps. No attribute is interpreted here beyond key hygiene.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};

/// Entity name → raw attribute map.
#[derive(Debug, Clone, Default)]
pub struct RawCatalog {
    records: BTreeMap<String, BTreeMap<String, Value>>,
}

impl RawCatalog {
    /// Build from an already-parsed JSON document.
    ///
    /// A non-object top level yields an empty catalog. Names are trimmed and
    /// lower-cased; entries whose body is not an object are skipped.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(top) = value else {
            tracing::warn!("catalog top level is not an object, using an empty catalog");
            return Self::default();
        };

        let mut records = BTreeMap::new();
        for (name, body) in top {
            let Value::Object(attrs) = body else {
                tracing::debug!(word = %name, "skipping non-object catalog entry");
                continue;
            };
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            let attrs: BTreeMap<String, Value> = attrs
                .into_iter()
                .map(|(k, v)| (k.trim().to_string(), v))
                .filter(|(k, _)| !k.is_empty())
                .collect();
            records.insert(name, attrs);
        }
        Self { records }
    }

    /// Parse a JSON string.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            path: "<inline>".into(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(value))
    }

    /// Read and parse a JSON catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_value(value))
    }

    /// Every attribute key seen in any record.
    pub fn discover_keys(&self) -> BTreeSet<String> {
        self.records
            .values()
            .flat_map(|attrs| attrs.keys().cloned())
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Value>)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Coerce a raw attribute value to a float.
///
/// Booleans map to 0/1, numeric strings may use a decimal comma. Anything
/// empty, unparseable or non-finite is `None`.
pub fn coerce_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.replace(',', ".").parse::<f64>().ok()?
        }
        _ => return None,
    };
    v.is_finite().then_some(v)
}
