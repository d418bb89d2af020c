use toml::{Table, Value};

use super::ConfigError;

/// A value contributed by a source, placed at a key path in the merged table.
///
/// An empty path means the value is a table merged into the root.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl ConfigEntry {
    pub fn root(table: Table) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Table(table),
        }
    }

    /// Places `value` at a dotted key such as `install.dir`.
    pub fn at_key(key: &str, value: Value) -> Result<Self, ConfigError> {
        let path: Vec<String> = key.split('.').map(str::to_string).collect();
        if path.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        Ok(Self { path, value })
    }
}

pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// Merges an entry into `table`, creating intermediate tables as needed.
///
/// Tables merge recursively; any other value replaces what was there.
pub fn merge_entry(table: &mut Table, entry: ConfigEntry) {
    let ConfigEntry { mut path, value } = entry;

    let Some(last) = path.pop() else {
        if let Value::Table(overlay) = value {
            deep_merge(table, overlay);
        }
        return;
    };

    let mut current = table;
    for segment in path {
        let slot = current
            .entry(segment)
            .or_insert_with(|| Value::Table(Table::new()));
        if !slot.is_table() {
            *slot = Value::Table(Table::new());
        }
        let Value::Table(nested) = slot else {
            return;
        };
        current = nested;
    }

    match (current.get_mut(&last), value) {
        (Some(Value::Table(base)), Value::Table(overlay)) => deep_merge(base, overlay),
        (_, value) => {
            current.insert(last, value);
        }
    }
}

fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
