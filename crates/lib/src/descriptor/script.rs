//! Descriptor reader over a YAML or JSON document.
//!
//! The whole document is parsed up front into a `serde_yaml::Value` tree. An open scope
//! is the index of an entry within its parent, so the scope stack is a path resolved
//! from the root. Mapping keys may be YAML integers or strings holding an integer
//! (JSON object keys are always strings), so `42:` and `"42":` address the same table.

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use super::reader::{DescriptorReader, TableKey};

/// Failure to open a descriptor source.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing YAML {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("parsing JSON {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A parsed descriptor document with a stack of open scopes.
#[derive(Debug, Clone)]
pub struct ScriptDescriptor {
    name: String,
    root: Value,
    /// Entry index within the parent table, one per open scope.
    scopes: Vec<usize>,
}

static NULL: Value = Value::Null;

impl ScriptDescriptor {
    /// Read and parse a descriptor file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn open_file(path: &Path) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let root = if is_json {
            serde_json::from_str::<Value>(&content).map_err(|source| DescriptorError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str::<Value>(&content).map_err(|source| DescriptorError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };
        Ok(Self::from_value(path.display().to_string(), root))
    }

    /// Parse YAML text held in memory (e.g. bundled data).
    pub fn from_yaml_str(name: impl Into<String>, text: &str) -> Result<Self, serde_yaml::Error> {
        let root = serde_yaml::from_str::<Value>(text)?;
        Ok(Self::from_value(name, root))
    }

    pub fn from_value(name: impl Into<String>, root: Value) -> Self {
        Self {
            name: name.into(),
            root,
            scopes: Vec::new(),
        }
    }

    fn current(&self) -> &Value {
        self.scopes
            .iter()
            .try_fold(&self.root, |table, &index| entry(table, index))
            .unwrap_or(&NULL)
    }

    fn lookup(&self, key: TableKey<'_>) -> Option<&Value> {
        let table = self.current();
        entry_index(table, key).and_then(|index| entry(table, index))
    }
}

/// Index of the entry of `table` addressed by `key`. Sequences take 1-based ids.
fn entry_index(table: &Value, key: TableKey<'_>) -> Option<usize> {
    match (table, key) {
        (Value::Mapping(m), TableKey::Name(name)) => {
            m.keys().position(|k| k.as_str() == Some(name))
        }
        (Value::Mapping(m), TableKey::Id(id)) => m.keys().position(|k| key_as_id(k) == Some(id)),
        (Value::Mapping(m), TableKey::Entry(position)) => m
            .keys()
            .enumerate()
            .filter(|(_, k)| key_as_id(k).is_some())
            .nth(position)
            .map(|(index, _)| index),
        (Value::Sequence(seq), TableKey::Id(id)) => {
            let index = usize::try_from(id).ok()?.checked_sub(1)?;
            (index < seq.len()).then_some(index)
        }
        (Value::Sequence(seq), TableKey::Entry(position)) => {
            (position < seq.len()).then_some(position)
        }
        _ => None,
    }
}

fn entry(table: &Value, index: usize) -> Option<&Value> {
    match table {
        Value::Mapping(m) => m.values().nth(index),
        Value::Sequence(seq) => seq.get(index),
        _ => None,
    }
}

fn key_as_id(key: &Value) -> Option<u32> {
    match key {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_uint(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

fn mapping_ids(name: &str, table: TableKey<'_>, m: &Mapping) -> Vec<u32> {
    m.keys()
        .filter_map(|k| {
            let id = key_as_id(k);
            if id.is_none() {
                log::debug!("{}: skipping non-integer key {:?} in table '{}'", name, k, table);
            }
            id
        })
        .collect()
}

impl DescriptorReader for ScriptDescriptor {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn read_table_keys(&self, table: TableKey<'_>) -> Vec<u32> {
        match self.lookup(table) {
            Some(Value::Mapping(m)) => mapping_ids(&self.name, table, m),
            Some(Value::Sequence(seq)) => (1..=seq.len())
                .filter_map(|i| u32::try_from(i).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn open_table(&mut self, key: TableKey<'_>) -> bool {
        let table = self.current();
        let Some(index) = entry_index(table, key) else {
            return false;
        };
        if !matches!(entry(table, index), Some(Value::Mapping(_) | Value::Sequence(_))) {
            return false;
        }
        self.scopes.push(index);
        true
    }

    fn close_table(&mut self) {
        if self.scopes.pop().is_none() {
            log::warn!("{}: close_table called with no open scope", self.name);
        }
    }

    fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    fn read_uint(&self, key: TableKey<'_>) -> Option<u32> {
        self.lookup(key).and_then(value_as_uint)
    }

    fn read_string(&self, key: TableKey<'_>) -> Option<String> {
        match self.lookup(key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn read_uint_vector(&self, key: TableKey<'_>) -> Vec<u32> {
        match self.lookup(key) {
            Some(Value::Sequence(seq)) => seq
                .iter()
                .filter_map(|v| {
                    let n = value_as_uint(v);
                    if n.is_none() {
                        log::warn!("{}: ignoring non-integer entry {:?} in '{}'", self.name, v, key);
                    }
                    n
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
