//! The canonical user-repository scenario
//!
//! A nested document exercising every document-backend behavior at once:
//! per-field classification, array element addressing, null handling, and
//! visitor dispatch. Document-shaped backends mount [`user_document`] and
//! run [`assert_user_repository`] against the result.
//!
//! ```text
//! /id=10 (long)
//! /username=myuser (string)
//! /passwordHash=DEADBEAF (string)
//! /signupDate=123 (long)
//! /emailAddresses/0/address=some@one.com (string)
//! /emailAddresses/0/dateAdded=123456 (long)
//! /emailAddresses/0/verified=false (boolean)
//! /emailAddresses/1/address=some@two.com (string)
//! /emailAddresses/1/dateAdded=1234567890 (long)
//! /emailAddresses/1/dateBounced=null
//! /emailAddresses/1/verified=true (boolean)
//! ```

use repo_api::{Node, Repository, TypeKind};

use crate::properties::{self, census};

/// Source text of the canonical user document
pub const USER_DOCUMENT_JSON: &str = r#"{
    "id": 10,
    "username": "myuser",
    "passwordHash": "DEADBEAF",
    "signupDate": 123,
    "emailAddresses": [
        {
            "address": "some@one.com",
            "dateAdded": 123456,
            "verified": false
        },
        {
            "address": "some@two.com",
            "dateAdded": 1234567890,
            "dateBounced": null,
            "verified": true
        }
    ]
}"#;

/// The canonical user document, parsed
pub fn user_document() -> serde_json::Value {
    serde_json::from_str(USER_DOCUMENT_JSON).expect("canonical document must parse")
}

/// Runs the full scenario against a repository mounted over
/// [`user_document`]
pub fn assert_user_repository(repo: &dyn Repository) {
    properties::assert_root_contract(repo);

    let root = repo.root();
    assert!(root.is_object());
    assert!(!root.is_array());
    assert_eq!(root.type_of(), TypeKind::Object);
    properties::assert_absence_signal(root.as_ref());
    properties::assert_children_restartable(root.as_ref());

    // Values
    let id = root.child("id").unwrap().unwrap();
    assert_eq!(id.as_long().unwrap(), 10);
    let username = root.child("username").unwrap().unwrap();
    assert_eq!(username.as_string().unwrap().unwrap(), "myuser");
    let hash = root.child("passwordHash").unwrap().unwrap();
    assert_eq!(hash.as_string().unwrap().unwrap(), "DEADBEAF");
    let signup = root.child("signupDate").unwrap().unwrap();
    assert_eq!(signup.as_long().unwrap(), 123);

    // Classifications
    assert_eq!(id.type_of(), TypeKind::Long);
    assert_eq!(username.type_of(), TypeKind::String);
    assert_eq!(hash.type_of(), TypeKind::String);
    assert_eq!(signup.type_of(), TypeKind::Long);
    for leaf in [&id, &username, &hash, &signup] {
        properties::assert_scalar_accessor_exclusivity(leaf.as_ref());
    }

    // Paths
    assert_eq!(id.name(), "id");
    assert_eq!(id.address().to_string(), "/id");
    properties::assert_address_round_trip(root.as_ref(), &["id"]);
    properties::assert_address_round_trip(root.as_ref(), &["emailAddresses", "1", "address"]);

    // The email array
    let emails = root.child("emailAddresses").unwrap().unwrap();
    assert!(emails.is_array());
    assert_eq!(emails.type_of(), TypeKind::Array);
    assert_eq!(emails.children().count(), 2);
    assert_eq!(emails.address().to_string(), "/emailAddresses");
    properties::assert_children_restartable(emails.as_ref());

    let first = emails.child("0").unwrap().unwrap();
    assert_eq!(
        first.child("address").unwrap().unwrap().as_string().unwrap().unwrap(),
        "some@one.com"
    );
    assert!(!first.child("verified").unwrap().unwrap().as_boolean().unwrap());
    assert!(first.child("dateBounced").unwrap().is_none());

    let second = emails.child("1").unwrap().unwrap();
    assert_eq!(second.address().to_string(), "/emailAddresses/1");
    assert_eq!(
        second.child("address").unwrap().unwrap().as_string().unwrap().unwrap(),
        "some@two.com"
    );
    assert_eq!(
        second.child("dateAdded").unwrap().unwrap().as_long().unwrap(),
        1234567890
    );
    assert!(second.child("verified").unwrap().unwrap().as_boolean().unwrap());

    // Null field: present, undefined, absent string form, strict elsewhere
    let bounced = second.child("dateBounced").unwrap().unwrap();
    assert_eq!(bounced.type_of(), TypeKind::Undefined);
    assert!(bounced.as_string().unwrap().is_none());
    assert!(bounced.as_long().is_err());
    properties::assert_scalar_accessor_exclusivity(bounced.as_ref());

    // Visitor dispatch over the whole tree
    let counts = census(root.as_ref());
    assert_eq!(counts.objects, 3, "root and two email objects");
    assert_eq!(counts.arrays, 1, "the emailAddresses array");
    assert_eq!(counts.scalars, 11, "all leaf fields");
}
