//! Shard envelope and file naming.
//!
//! Every output file is a self-contained `{ "valueType": ..., "values": [...] }`
//! object named by its zero-padded shard number (`000001.json`).

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{NodeRecord, RelationPair};
use crate::errors::CoreError;

/// Digits in a shard file name, excluding the extension.
pub const SHARD_NAME_WIDTH: usize = 6;

/// Largest shard number that fits in [`SHARD_NAME_WIDTH`] digits.
pub const MAX_SHARD_NUMBER: u32 = 999_999;

/// Record category held by a shard; also the name of its folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Lists,
    Nodes,
    Relations,
}

impl ValueType {
    pub const ALL: [Self; 3] = [Self::Lists, Self::Nodes, Self::Relations];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lists => "lists",
            Self::Nodes => "nodes",
            Self::Relations => "relations",
        }
    }

    /// Folder name inside the workspace.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shard file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Shard<T> {
    pub value_type: ValueType,
    pub values: Vec<T>,
}

impl<T> Shard<T> {
    #[must_use]
    pub const fn empty(value_type: ValueType) -> Self {
        Self {
            value_type,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Shard<NodeRecord> {
    #[must_use]
    pub const fn nodes(values: Vec<NodeRecord>) -> Self {
        Self {
            value_type: ValueType::Nodes,
            values,
        }
    }
}

impl Shard<RelationPair> {
    #[must_use]
    pub const fn relations(values: Vec<RelationPair>) -> Self {
        Self {
            value_type: ValueType::Relations,
            values,
        }
    }
}

/// File name for shard `number`, zero-padded to [`SHARD_NAME_WIDTH`] digits.
///
/// # Errors
///
/// Returns [`CoreError::ShardNumberOverflow`] when `number` needs more than
/// [`SHARD_NAME_WIDTH`] digits.
pub fn shard_file_name(number: u32) -> Result<String, CoreError> {
    if number > MAX_SHARD_NUMBER {
        return Err(CoreError::ShardNumberOverflow {
            number,
            max: MAX_SHARD_NUMBER,
        });
    }
    Ok(format!("{number:0width$}.json", width = SHARD_NAME_WIDTH))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(1, "000001.json")]
    #[case(42, "000042.json")]
    #[case(100, "000100.json")]
    #[case(2_100, "002100.json")]
    #[case(99_999, "099999.json")]
    #[case(MAX_SHARD_NUMBER, "999999.json")]
    fn shard_names_are_zero_padded(#[case] number: u32, #[case] expected: &str) {
        assert_eq!(shard_file_name(number).unwrap(), expected);
    }

    #[test]
    fn shard_number_past_six_digits_is_rejected() {
        let err = shard_file_name(1_000_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ShardNumberOverflow {
                number: 1_000_000,
                max: MAX_SHARD_NUMBER
            }
        ));
    }

    #[test]
    fn empty_list_shard_shape() {
        let shard = Shard::<NodeRecord>::empty(ValueType::Lists);
        assert_eq!(
            serde_json::to_value(&shard).unwrap(),
            json!({ "valueType": "lists", "values": [] })
        );
    }

    #[test]
    fn value_type_names_match_folders() {
        let names: Vec<_> = ValueType::ALL.iter().map(|v| v.dir_name()).collect();
        assert_eq!(names, ["lists", "nodes", "relations"]);
    }
}
