//! Attendees and attendee lookups by contact and event

use super::{first_id, require_match};
use crate::api::client::CventClient;
use crate::api::constants::resources::ATTENDEES;
use crate::api::error::Result;
use crate::api::query::{FilterExpr, PaginatedResult, QueryInput, QueryParams};
use crate::entities::{Attendee, AttendeeCreateInput};

fn by_email_and_event(email: &str, event_id: &str) -> QueryParams {
    QueryParams::new().filter(FilterExpr::eq("contact.email", email).and(FilterExpr::eq("event.id", event_id)))
}

impl CventClient {
    /// Search attendees (`POST /ea/attendees/filter`)
    pub async fn get_attendees(&self, query: impl Into<QueryInput>) -> Result<PaginatedResult<Attendee>> {
        self.search(ATTENDEES, &query.into()).await
    }

    pub async fn get_attendees_by_email_and_event_id(
        &self,
        email: &str,
        event_id: &str,
    ) -> Result<PaginatedResult<Attendee>> {
        let attendees = self.get_attendees(by_email_and_event(email, event_id)).await?;
        require_match(attendees, || format!("attendee {}", email))
    }

    pub async fn get_attendees_by_event_id_and_contact_id(
        &self,
        event_id: &str,
        contact_id: &str,
    ) -> Result<PaginatedResult<Attendee>> {
        let filter = FilterExpr::eq("event.id", event_id).and(FilterExpr::eq("contact.id", contact_id));
        let attendees = self.get_attendees(QueryParams::new().filter(filter)).await?;
        require_match(attendees, || format!("attendee {}", contact_id))
    }

    /// Id of the contact's registration for the event, or `""` if there is none
    pub async fn find_attendee_id(&self, email: &str, event_id: &str) -> Result<String> {
        let attendees = self.get_attendees(by_email_and_event(email, event_id)).await?;
        Ok(first_id(&attendees))
    }

    /// Register a contact for an event and return the attendee id, or `""`
    pub async fn create_attendee(&self, attendee: &AttendeeCreateInput) -> Result<String> {
        self.create(ATTENDEES, attendee).await
    }
}
