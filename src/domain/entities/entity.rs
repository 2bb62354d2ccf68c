use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::entities::listing::{FilterOption, SortOption, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId(value.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Application,
    Artifact,
    Dataset,
    Program,
    Stream,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Application,
        EntityKind::Artifact,
        EntityKind::Dataset,
        EntityKind::Program,
        EntityKind::Stream,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Application => "application",
            EntityKind::Artifact => "artifact",
            EntityKind::Dataset => "dataset",
            EntityKind::Program => "program",
            EntityKind::Stream => "stream",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Application => "Applications",
            EntityKind::Artifact => "Artifacts",
            EntityKind::Dataset => "Datasets",
            EntityKind::Program => "Programs",
            EntityKind::Stream => "Streams",
        }
    }

    pub fn filter_option(self) -> FilterOption {
        FilterOption::new(self.as_str(), self.label())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| format!("unknown entity kind: {value}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Filter options offered by the list header, one per entity kind.
pub fn default_filter_options() -> Vec<FilterOption> {
    EntityKind::ALL
        .into_iter()
        .map(EntityKind::filter_option)
        .collect()
}

pub const SORT_FIELD_NAME: &str = "name";
pub const SORT_FIELD_CREATED: &str = "created";

pub fn default_sort_options() -> Vec<SortOption> {
    vec![
        SortOption::new("Name A-Z", SORT_FIELD_NAME, SortOrder::Asc),
        SortOption::new("Name Z-A", SORT_FIELD_NAME, SortOrder::Desc),
        SortOption::new("Newest", SORT_FIELD_CREATED, SortOrder::Desc),
        SortOption::new("Oldest", SORT_FIELD_CREATED, SortOrder::Asc),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySort {
    pub field: String,
    pub order: SortOrder,
}

impl From<&SortOption> for EntitySort {
    fn from(option: &SortOption) -> Self {
        EntitySort {
            field: option.sort_field.clone(),
            order: option.sort_order,
        }
    }
}

/// One page request against the catalog. `page` is 1-based; an empty
/// `kinds` list means every kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    pub search: String,
    pub kinds: Vec<EntityKind>,
    pub sort: Option<EntitySort>,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPage {
    pub entities: Vec<Entity>,
    pub total: i64,
}
