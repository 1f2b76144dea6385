use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::IdRef;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionType {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub session_type: Option<SessionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(rename = "virtual", skip_serializing_if = "Option::is_none")]
    pub is_virtual: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_session: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_waitlist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waitlist_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_unlimited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_on_agenda: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_for_registration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_tag_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_types: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
