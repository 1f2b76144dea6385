use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::contact::Contact;
use super::IdRef;

/// Id, code and name triple used for registration paths and types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodedRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendeeGroup {
    pub leader: bool,
    pub member: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_path: Option<CodedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_type: Option<CodedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_item: Option<CodedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_list: Option<CodedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<AttendeeGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /ea/attendees`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeCreateInput {
    pub event: IdRef,
    pub contact: IdRef,
    pub admission_item: IdRef,
    pub registration_type: IdRef,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttendeeCreateInput {
    pub fn new(
        event_id: impl Into<String>,
        contact_id: impl Into<String>,
        admission_item_id: impl Into<String>,
        registration_type_id: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            event: IdRef::new(event_id),
            contact: IdRef::new(contact_id),
            admission_item: IdRef::new(admission_item_id),
            registration_type: IdRef::new(registration_type_id),
            status: status.into(),
            send_email: None,
            extra: Map::new(),
        }
    }

    pub fn send_email(mut self, send: bool) -> Self {
        self.send_email = Some(send);
        self
    }
}
