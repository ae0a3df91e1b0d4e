//! Records written into node and relation shards.
//!
//! Field names follow the downstream import format: the type tag is
//! `_typeName` and the remaining keys are camelCase.

use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type tag carried by node records and relation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TypeName {
    Mission,
    Image,
    /// Mission side of a mission/image relation.
    MissionExecution,
}

impl TypeName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mission => "Mission",
            Self::Image => "Image",
            Self::MissionExecution => "MissionExecution",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single Mission or Image entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(rename = "_typeName")]
    pub type_name: TypeName,
    pub id: String,
    #[serde(with = "crate::timestamp")]
    #[schemars(with = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    #[schemars(with = "String")]
    pub updated_at: DateTime<Utc>,
}

impl NodeRecord {
    /// Build a record stamped with the current instant, used for both
    /// `createdAt` and `updatedAt`.
    #[must_use]
    pub fn new(type_name: TypeName, id: String) -> Self {
        let now = Utc::now();
        Self {
            type_name,
            id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One side of a relation pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelationEndpoint {
    #[serde(rename = "_typeName")]
    pub type_name: TypeName,
    pub id: String,
    pub field_name: String,
}

/// Field on the mission endpoint that holds its images.
pub const MISSION_IMAGES_FIELD: &str = "images";
/// Field on the image endpoint that points back at its mission.
pub const IMAGE_MISSION_FIELD: &str = "mission";

/// A bidirectional mission/image edge, serialized as a two-element array
/// `[mission, image]`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RelationPair(pub RelationEndpoint, pub RelationEndpoint);

impl RelationPair {
    #[must_use]
    pub fn mission_to_image(mission_id: &str, image_id: &str) -> Self {
        Self(
            RelationEndpoint {
                type_name: TypeName::MissionExecution,
                id: mission_id.to_string(),
                field_name: MISSION_IMAGES_FIELD.to_string(),
            },
            RelationEndpoint {
                type_name: TypeName::Image,
                id: image_id.to_string(),
                field_name: IMAGE_MISSION_FIELD.to_string(),
            },
        )
    }

    #[must_use]
    pub const fn mission(&self) -> &RelationEndpoint {
        &self.0
    }

    #[must_use]
    pub const fn image(&self) -> &RelationEndpoint {
        &self.1
    }
}
