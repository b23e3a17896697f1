//! Persistence Bridge.
//!
//! Two cooperating mechanisms over any [`KeyValueStore`]:
//!
//! - [`FieldPersistence`]: prefill tracked controls once at load, write the raw
//!   value back on every keystroke with a 30 day lifetime.
//! - [`RememberedIdentity`]: recognise a returning user by the stored first
//!   name and forget every tracked key on request.

use serde::Serialize;
use store::{KeyValueStore, StoreError, Ttl};
use tracing::{debug, info};

use crate::state::FormState;

/// Lifetime of a persisted field record.
pub fn field_ttl() -> Ttl {
    Ttl::days(30)
}

/// Storage keys of the tracked fields.
///
/// The storage name differs from the control id for the first address line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    FirstName,
    LastName,
    MiddleInitial,
    Dob,
    Ssn,
    Address1,
    City,
    Zipcode,
    EmailAddress,
    Phone,
    Username,
}

impl StorageKey {
    pub const ALL: [StorageKey; 11] = [
        StorageKey::FirstName,
        StorageKey::LastName,
        StorageKey::MiddleInitial,
        StorageKey::Dob,
        StorageKey::Ssn,
        StorageKey::Address1,
        StorageKey::City,
        StorageKey::Zipcode,
        StorageKey::EmailAddress,
        StorageKey::Phone,
        StorageKey::Username,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::FirstName => "firstName",
            StorageKey::LastName => "lastName",
            StorageKey::MiddleInitial => "middleInitial",
            StorageKey::Dob => "dob",
            StorageKey::Ssn => "ssn",
            StorageKey::Address1 => "address1",
            StorageKey::City => "city",
            StorageKey::Zipcode => "zipcode",
            StorageKey::EmailAddress => "emailAddress",
            StorageKey::Phone => "phone",
            StorageKey::Username => "username",
        }
    }

    pub fn control_id(self) -> &'static str {
        match self {
            StorageKey::Address1 => "addressLine1",
            other => other.as_str(),
        }
    }

    pub fn for_control(control_id: &str) -> Option<StorageKey> {
        Self::ALL.into_iter().find(|k| k.control_id() == control_id)
    }
}

/// Durable per-field store.
pub struct FieldPersistence<S> {
    store: S,
    ttl: Ttl,
}

impl<S: KeyValueStore> FieldPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, field_ttl())
    }

    pub fn with_ttl(store: S, ttl: Ttl) -> Self {
        Self { store, ttl }
    }

    /// Copy stored non-empty values into their controls. Absent controls are
    /// skipped. Returns how many controls were filled.
    pub fn prefill(&self, form: &mut FormState) -> usize {
        let mut filled = 0;
        for key in StorageKey::ALL {
            if form.control(key.control_id()).is_none() {
                debug!(key = key.as_str(), "prefill skipped, control absent");
                continue;
            }
            match self.store.get(key.as_str()) {
                Some(value) if !value.is_empty() => {
                    form.set_value(key.control_id(), value);
                    filled += 1;
                }
                _ => {}
            }
        }
        debug!(filled, "form prefilled from store");
        filled
    }

    /// Keystroke hook. Returns `Ok(false)` for controls that are not tracked.
    pub fn record_input(&self, control_id: &str, value: &str) -> Result<bool, StoreError> {
        let Some(key) = StorageKey::for_control(control_id) else {
            return Ok(false);
        };
        self.store.set(key.as_str(), value, self.ttl)?;
        Ok(true)
    }
}

/// Texts shown to a returning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub first_name: String,
    pub welcome: String,
    pub disclaim: String,
}

impl Greeting {
    pub fn for_name(first_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            welcome: format!("Welcome back, {first_name}!"),
            disclaim: format!("Not {first_name}? Click here to start a new form."),
        }
    }
}

/// Remembered-identity flow.
pub struct RememberedIdentity<S> {
    store: S,
}

impl<S: KeyValueStore> RememberedIdentity<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Greeting for a returning user, `None` for a fresh visit.
    pub fn greeting(&self) -> Option<Greeting> {
        self.store
            .get(StorageKey::FirstName.as_str())
            .filter(|name| !name.is_empty())
            .map(|name| Greeting::for_name(&name))
    }

    /// Expire every tracked key. The caller reloads the page afterwards.
    pub fn disclaim(&self) -> Result<(), StoreError> {
        for key in StorageKey::ALL {
            self.store.delete(key.as_str())?;
        }
        info!("remembered identity cleared");
        Ok(())
    }
}
