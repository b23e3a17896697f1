use std::sync::Arc;

use chrono::NaiveDate;
use enrollment::{Effect, EnrollmentPage, Event, StorageKey, ValidationContext, field_ttl};
use store::{FileStore, KeyValueStore, MemoryStore};

fn ctx() -> ValidationContext {
    ValidationContext::new(NaiveDate::from_ymd_opt(2025, 12, 6).unwrap())
}

fn type_into(page: &mut EnrollmentPage, control: &str, value: &str) {
    page.handle(
        Event::InputChanged {
            control: control.into(),
            value: value.into(),
        },
        &ctx(),
    );
}

#[test]
fn returning_user_is_greeted_and_prefilled() {
    let store = Arc::new(MemoryStore::new());

    let mut first_visit = EnrollmentPage::new(store.clone());
    first_visit.handle(Event::Loaded, &ctx());
    assert!(first_visit.greeting().is_none());
    type_into(&mut first_visit, "firstName", "Paola");
    type_into(&mut first_visit, "addressLine1", "12 Main St");
    type_into(&mut first_visit, "password", "S3cure+pass");

    let mut second_visit = EnrollmentPage::new(store.clone());
    second_visit.handle(Event::Loaded, &ctx());

    let greeting = second_visit.greeting().expect("greeting");
    assert_eq!(greeting.welcome, "Welcome back, Paola!");
    assert_eq!(greeting.disclaim, "Not Paola? Click here to start a new form.");
    assert_eq!(second_visit.form().value("firstName"), Some("Paola"));
    assert_eq!(second_visit.form().value("addressLine1"), Some("12 Main St"));
    assert_eq!(second_visit.form().value("password"), Some(""));
}

#[test]
fn disclaim_forgets_every_tracked_key() {
    let store = Arc::new(MemoryStore::new());
    for key in StorageKey::ALL {
        store.set(key.as_str(), "x", field_ttl()).unwrap();
    }

    let mut page = EnrollmentPage::new(store.clone());
    page.handle(Event::Loaded, &ctx());
    assert!(page.greeting().is_some());

    assert_eq!(page.handle(Event::DisclaimIdentity, &ctx()), vec![Effect::Reload]);
    for key in StorageKey::ALL {
        assert_eq!(store.get(key.as_str()), None, "{}", key.as_str());
    }

    let mut reloaded = EnrollmentPage::new(store);
    reloaded.handle(Event::Loaded, &ctx());
    assert!(reloaded.greeting().is_none());
    assert_eq!(reloaded.form().value("firstName"), Some(""));
}

#[test]
fn identity_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.store.ron");

    {
        let store = Arc::new(FileStore::builder().with_store_file(&path).build().unwrap());
        let mut page = EnrollmentPage::new(store);
        type_into(&mut page, "firstName", "Paola");
    }

    let store = Arc::new(FileStore::builder().with_store_file(&path).build().unwrap());
    let mut page = EnrollmentPage::new(store);
    page.handle(Event::Loaded, &ctx());
    assert_eq!(page.greeting().map(|g| g.first_name.as_str()), Some("Paola"));
}
