//! API constants and endpoint paths for the Cvent REST API

/// Base path shared by every event-management endpoint
pub const API_BASE_PATH: &str = "/ea";

/// OAuth2 token endpoint, relative to the region base URL
pub const TOKEN_PATH: &str = "/ea/oauth2/token";

/// Tokens are treated as stale this long before their reported expiry
pub const TOKEN_SAFETY_PADDING_MILLIS: i64 = 10 * 60 * 1000;

/// Standard headers for Cvent requests
pub mod headers {
    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Content type for the token exchange
    pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

    /// Correlation header attached to every outgoing request
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

/// Resource names as they appear in endpoint paths
pub mod resources {
    pub const EVENTS: &str = "events";
    pub const SESSIONS: &str = "sessions";
    pub const CONTACTS: &str = "contacts";
    pub const ATTENDEES: &str = "attendees";
    pub const ADMISSION_ITEMS: &str = "admission-items";
}

/// Collection endpoint, used for bulk creation: `/ea/{resource}`
pub fn resource_path(resource: &str) -> String {
    format!("{}/{}", API_BASE_PATH, resource)
}

/// Search endpoint: `/ea/{resource}/filter`
pub fn filter_path(resource: &str) -> String {
    format!("{}/{}/filter", API_BASE_PATH, resource)
}

/// Single record endpoint: `/ea/{resource}/{id}`
pub fn record_path(resource: &str, id: &str) -> String {
    format!("{}/{}/{}", API_BASE_PATH, resource, id)
}

/// Registration types of one event
pub fn registration_types_path(event_id: &str) -> String {
    format!("{}/{}/{}/registration-types", API_BASE_PATH, resources::EVENTS, event_id)
}

/// Answer endpoint of one contact custom field
pub fn custom_field_answers_path(contact_id: &str, field_id: &str) -> String {
    format!(
        "{}/{}/{}/custom-fields/{}/answers",
        API_BASE_PATH,
        resources::CONTACTS,
        contact_id,
        field_id
    )
}
