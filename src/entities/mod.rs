//! Typed payloads for the Cvent resources the client touches
//!
//! Models only name the fields callers commonly read or write. Everything
//! else the server sends lands in each model's `extra` map and is serialized
//! back unchanged.

pub mod admission_item;
pub mod attendee;
pub mod contact;
pub mod event;
pub mod session;

pub use admission_item::AdmissionItem;
pub use attendee::{Attendee, AttendeeCreateInput};
pub use contact::{Address, AddressType, Contact, ContactCreateInput, ContactUpdateInput};
pub use event::{Event, RegistrationType};
pub use session::Session;

use serde::{Deserialize, Serialize};

/// Reference to another record by id, e.g. `{"id": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdRef {
    pub id: String,
}

impl IdRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for IdRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IdRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Records that carry a server-assigned id
pub trait Identified {
    fn id(&self) -> Option<&str>;
}

macro_rules! impl_identified {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl Identified for $entity {
                fn id(&self) -> Option<&str> {
                    self.id.as_deref().filter(|id| !id.is_empty())
                }
            }
        )+
    };
}

impl_identified!(
    Event,
    RegistrationType,
    Session,
    AdmissionItem,
    Contact,
    Attendee
);

impl Identified for serde_json::Value {
    fn id(&self) -> Option<&str> {
        self.get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
    }
}
