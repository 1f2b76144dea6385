//! Entity payloads keep unknown fields and stay partial on the wire

use cvent_client::entities::{
    Address, AddressType, Attendee, AttendeeCreateInput, ContactCreateInput, Event, Identified, Session,
};
use cvent_client::PaginatedResult;
use serde_json::json;

#[test]
fn test_event_page_roundtrip_keeps_unknown_fields() {
    let raw = json!({
        "paging": {
            "limit": 1,
            "totalCount": 2,
            "currentToken": "c1",
            "nextToken": "c2",
            "_links": {"self": {"href": "/ea/events/filter"}, "next": {"href": "/ea/events/filter?token=c2"}}
        },
        "data": [{
            "id": "ev-1",
            "title": "Summit",
            "virtual": true,
            "planners": [{"firstName": "Grace", "lastName": "Hopper", "email": "g@h.com"}],
            "_links": {"registration": {"href": "https://example.test/reg"}},
            "registrationSecurityLevel": "Public"
        }]
    });

    let page: PaginatedResult<Event> = serde_json::from_value(raw.clone()).unwrap();
    let event = page.first().unwrap();

    assert_eq!(event.id(), Some("ev-1"));
    assert_eq!(event.is_virtual, Some(true));
    assert_eq!(event.planners[0].first_name.as_deref(), Some("Grace"));
    assert_eq!(
        event.links.as_ref().unwrap().registration.as_ref().unwrap().href,
        "https://example.test/reg"
    );
    assert_eq!(event.extra["registrationSecurityLevel"], "Public");
    assert_eq!(page.next_token(), Some("c2"));

    assert_eq!(serde_json::to_value(&page).unwrap(), raw);
}

#[test]
fn test_contact_create_input_is_partial() {
    let input = ContactCreateInput {
        first_name: Some("Ada".into()),
        primary_address_type: Some(AddressType::Work),
        work_address: Some(Address {
            address1: "1 Main St".into(),
            city: "London".into(),
            region_code: "LDN".into(),
            postal_code: "N1".into(),
            country_code: "GB".into(),
            ..Address::default()
        }),
        ..ContactCreateInput::new("ada@example.com")
    };

    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        json!({
            "email": "ada@example.com",
            "firstName": "Ada",
            "primaryAddressType": "Work",
            "workAddress": {
                "address1": "1 Main St",
                "city": "London",
                "regionCode": "LDN",
                "postalCode": "N1",
                "countryCode": "GB"
            }
        })
    );
}

#[test]
fn test_attendee_create_input_shape() {
    let input = AttendeeCreateInput::new("ev-1", "c-1", "ai-1", "rt-1", "Accepted");
    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        json!({
            "event": {"id": "ev-1"},
            "contact": {"id": "c-1"},
            "admissionItem": {"id": "ai-1"},
            "registrationType": {"id": "rt-1"},
            "status": "Accepted"
        })
    );
}

#[test]
fn test_empty_id_is_not_an_id() {
    let attendee: Attendee = serde_json::from_value(json!({"id": ""})).unwrap();
    assert_eq!(attendee.id(), None);

    let session: Session = serde_json::from_value(json!({"title": "No id"})).unwrap();
    assert_eq!(session.id(), None);
}
