//! Patient enrollment form engine.
//!
//! - `validate`     : sixteen field rules, pure functions over [`FormState`]
//! - `orchestrator` : run every rule, gate the submit control
//! - `persistence`  : prefill from and write through to a [`store::KeyValueStore`]
//! - `options`      : one-shot region option loader
//! - `review`       : read-only summary table
//! - `page`         : event reducer driving all of the above

pub mod field;
pub mod format;
pub mod options;
pub mod orchestrator;
pub mod page;
pub mod persistence;
pub mod review;
pub mod state;
pub mod validate;

pub use field::{Control, ControlKind, Field, FieldId};
pub use options::{
    EmbeddedOptionSource, FileOptionSource, HttpOptionSource, LOAD_ERROR_LABEL, OptionLoadError,
    OptionRecord, OptionSource, OptionsOutcome, load_options, parse_options, render_options,
};
pub use orchestrator::{FormReport, SubmitGate, validate_all, validate_field};
pub use page::{Effect, EnrollmentPage, Event};
pub use persistence::{FieldPersistence, Greeting, RememberedIdentity, StorageKey, field_ttl};
pub use review::{ReviewRow, ReviewTable, review};
pub use state::FormState;
pub use validate::{Validation, ValidationContext, ValidationOutcome, validate};
