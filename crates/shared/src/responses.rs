//! Response envelopes
//!
//! List endpoints answer either with a bare array or, when paginated, with a
//! `{count, next, previous, results}` page. Both decode to [`ListResponse`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Page {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Page { results, .. } => results,
            ListResponse::Plain(items) => items,
        }
    }
}

/// Character created by `add-to-roster/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntryData {
    pub character_id: i64,
    pub character_name: String,
}
