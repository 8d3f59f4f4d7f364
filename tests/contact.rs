use std::collections::HashMap;

use orb_backdrop::contact::NOT_PROVIDED;
use orb_backdrop::{ContactSubmission, FormError, FormKind};

fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn blank_phone_reads_not_provided() {
    let submission = ContactSubmission::from_fields(
        FormKind::Contact,
        lookup(&[
            ("name", "Jane Doe"),
            ("email", "jane@x.com"),
            ("phone", ""),
            ("message", "Hello"),
        ]),
    )
    .unwrap();
    let draft = submission.compose();

    assert_eq!(draft.subject, "New Contact Form Submission");
    assert_eq!(draft.recipient, "support@evolvemerchants.com");
    assert_eq!(
        draft.body,
        "Name: Jane Doe\nEmail: jane@x.com\nPhone: Not provided\nCompany: Not provided\n\nMessage:\nHello"
    );
    assert!(draft.body.lines().any(|l| l == format!("Phone: {NOT_PROVIDED}")));
    assert!(!draft.body.lines().any(|l| l.trim_end() == "Phone:"));
}

#[test]
fn partner_application_adds_partner_type() {
    let draft = ContactSubmission::from_fields(
        FormKind::Partner,
        lookup(&[
            ("name", "Sam Lee"),
            ("email", "sam@isv.io"),
            ("phone", "555-0100"),
            ("company", "ISV Co"),
            ("partnerType", "ISV"),
            ("message", "Interested"),
        ]),
    )
    .unwrap()
    .compose();

    assert_eq!(draft.subject, "New Referral Partner Application");
    assert_eq!(draft.recipient, "Partners@ameritechpayments.com");
    assert!(draft.body.contains("Phone: 555-0100\nCompany: ISV Co\nPartner Type: ISV\n"));
    assert!(draft.body.ends_with("Message:\nInterested"));
}

#[test]
fn missing_required_fields_are_reported() {
    let err = ContactSubmission::from_fields(
        FormKind::Contact,
        lookup(&[("name", "Jane"), ("message", "Hi")]),
    )
    .unwrap_err();
    assert_eq!(err, FormError::MissingField("email"));

    let err = ContactSubmission::from_fields(
        FormKind::Partner,
        lookup(&[("name", "Jane"), ("email", "j@x.com"), ("message", "Hi")]),
    )
    .unwrap_err();
    assert_eq!(err, FormError::MissingField("partnerType"));

    let err = ContactSubmission::from_fields(
        FormKind::Contact,
        lookup(&[("name", "  "), ("email", "j@x.com"), ("message", "Hi")]),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "required field `name` is missing");
}

#[test]
fn mailto_link_is_encoded() {
    let draft = ContactSubmission::from_fields(
        FormKind::Contact,
        lookup(&[
            ("name", "Jane Doe"),
            ("email", "jane@x.com"),
            ("message", "Rates & fees?"),
        ]),
    )
    .unwrap()
    .compose();
    let href = draft.mailto_href();

    assert!(href.starts_with(
        "mailto:support@evolvemerchants.com?subject=New%20Contact%20Form%20Submission&body="
    ));
    assert!(href.contains("Name%3A%20Jane%20Doe%0AEmail%3A%20jane%40x.com%0A"));
    assert!(href.ends_with("Message%3A%0ARates%20%26%20fees%3F"));
    assert_eq!(href.matches('&').count(), 1);
}
