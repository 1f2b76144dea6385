//! Contact search, creation and updates
//!
//! A full update is a PATCH of the standard fields followed by one PUT per
//! custom-field answer. The PUTs run concurrently once the PATCH succeeded, and
//! every one of them is awaited before the outcome is reported.

use futures::future::join_all;
use log::{info, warn};
use reqwest::Method;
use serde_json::{json, Value};

use super::{first_id, require_match};
use crate::api::client::{CventClient, RequestBody};
use crate::api::constants::{custom_field_answers_path, record_path, resources::CONTACTS};
use crate::api::error::{CustomFieldFailure, CventError, Result};
use crate::api::query::{FilterExpr, PaginatedResult, QueryInput, QueryParams};
use crate::entities::{Contact, ContactCreateInput, ContactUpdateInput};

impl CventClient {
    /// Search contacts (`POST /ea/contacts/filter`)
    pub async fn get_contacts(&self, query: impl Into<QueryInput>) -> Result<PaginatedResult<Contact>> {
        self.search(CONTACTS, &query.into()).await
    }

    /// First page of up to `limit` contacts; fails with `NotFound` when there are none
    pub async fn get_all_contacts(&self, limit: u32) -> Result<PaginatedResult<Contact>> {
        let contacts = self.get_contacts(QueryParams::new().limit(limit)).await?;
        require_match(contacts, || "contacts".to_string())
    }

    pub async fn get_contacts_by_email(&self, email: &str) -> Result<PaginatedResult<Contact>> {
        let contacts = self
            .get_contacts(QueryParams::new().filter(FilterExpr::eq("email", email)))
            .await?;
        require_match(contacts, || format!("contact with email {}", email))
    }

    pub async fn get_contacts_by_id(&self, contact_id: &str) -> Result<PaginatedResult<Contact>> {
        let contacts = self
            .get_contacts(QueryParams::new().filter(FilterExpr::eq("id", contact_id)))
            .await?;
        require_match(contacts, || format!("contact {}", contact_id))
    }

    /// Id of the first contact with this email, or `""` if there is none
    pub async fn find_contact_id(&self, email: &str) -> Result<String> {
        let contacts = self
            .get_contacts(QueryParams::new().filter(FilterExpr::eq("email", email)))
            .await?;
        Ok(first_id(&contacts))
    }

    /// Create a contact and return its id, or `""` if the server reported none
    pub async fn create_contact(&self, contact: &ContactCreateInput) -> Result<String> {
        self.create(CONTACTS, contact).await
    }

    /// PATCH the fields present on `contact` and return the updated record
    pub async fn update_contact(&self, contact: &Contact) -> Result<Contact> {
        let contact_id = contact
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CventError::InvalidInput("contact id is required for an update".to_string()))?;

        let body = serde_json::to_value(contact)
            .map_err(|e| CventError::InvalidInput(format!("failed to serialize contact: {}", e)))?;

        self.dispatch(
            Method::PATCH,
            &record_path(CONTACTS, contact_id),
            &QueryInput::default(),
            RequestBody::Json(body),
        )
        .await
    }

    /// Update standard fields, then write every custom-field answer.
    ///
    /// Returns the contact id when everything succeeded. If the PATCH fails no
    /// answers are written. If some answers fail the error is
    /// [`CventError::PartialFailure`] naming exactly those field ids.
    pub async fn update_full_contact(&self, input: &ContactUpdateInput) -> Result<String> {
        if input.id.is_empty() {
            return Err(CventError::InvalidInput(
                "contact id is required for an update".to_string(),
            ));
        }

        let body = serde_json::to_value(input)
            .map_err(|e| CventError::InvalidInput(format!("failed to serialize contact: {}", e)))?;
        let _: Value = self
            .dispatch(
                Method::PATCH,
                &record_path(CONTACTS, &input.id),
                &QueryInput::default(),
                RequestBody::Json(body),
            )
            .await?;

        let answers = input
            .custom_fields
            .iter()
            .map(|(field_id, answer)| self.put_custom_field_answer(&input.id, field_id, answer));
        let failures: Vec<CustomFieldFailure> = join_all(answers).await.into_iter().flatten().collect();

        if failures.is_empty() {
            info!(
                "Updated contact {} with {} custom field(s)",
                input.id,
                input.custom_fields.len()
            );
            return Ok(input.id.clone());
        }

        warn!(
            "Contact {} updated but {} of {} custom field(s) failed",
            input.id,
            failures.len(),
            input.custom_fields.len()
        );
        Err(CventError::PartialFailure {
            contact_id: input.id.clone(),
            failures,
        })
    }

    async fn put_custom_field_answer(
        &self,
        contact_id: &str,
        field_id: &str,
        answer: &str,
    ) -> Option<CustomFieldFailure> {
        info!("Updating custom contact field {} on {}", field_id, contact_id);

        let body = json!({"id": field_id, "value": [answer]});
        let outcome: Result<Value> = self
            .dispatch(
                Method::PUT,
                &custom_field_answers_path(contact_id, field_id),
                &QueryInput::default(),
                RequestBody::Json(body),
            )
            .await;

        outcome.err().map(|err| CustomFieldFailure {
            field_id: field_id.to_string(),
            status: err.status(),
            reason: err.to_string(),
        })
    }
}
