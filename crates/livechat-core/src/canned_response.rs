//! Reusable agent replies inserted via a shortcut such as `/welcome`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CannedResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub shortcut: String,
    pub category: String,
    /// Owning agent.
    pub agent_id: String,
}

impl Record for CannedResponse {
    const COLLECTION: Collection = Collection::CannedResponses;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}
