//! Page reducer.
//!
//! Ties the form, the submit gate and the persistence bridge together. Every
//! user or system occurrence is an [`Event`]; [`EnrollmentPage::handle`]
//! applies it synchronously and returns the [`Effect`]s the host has to carry
//! out (fetching options, reloading the page, submitting).
//!
//! The reducer never does IO beyond the key/value store. Store failures are
//! logged and do not interrupt the page.

use std::sync::Arc;

use store::{KeyValueStore, Ttl};
use tracing::{debug, warn};

use crate::field::FieldId;
use crate::options::{self, OptionSource, OptionsOutcome};
use crate::orchestrator::{self, FormReport, SubmitGate};
use crate::persistence::{FieldPersistence, Greeting, RememberedIdentity, field_ttl};
use crate::review::{self, ReviewTable};
use crate::state::FormState;
use crate::validate::{ValidationContext, ValidationOutcome};

/// Control id of the region selection.
pub const STATE_SELECT: &str = "state";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page finished loading.
    Loaded,
    /// Keystroke in a text-like control.
    InputChanged { control: String, value: String },
    /// Radio or checkbox clicked.
    Toggled { control: String, checked: bool },
    /// Focus left a field: refresh its slot.
    FieldLeft(FieldId),
    /// "Validate" button.
    ValidateRequested,
    SubmitAttempted,
    ReviewRequested,
    DismissSummary,
    /// "Not <name>?" link.
    DisclaimIdentity,
    /// Completion of the single option fetch.
    OptionsLoaded(OptionsOutcome),
}

/// Work the host performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the region options once and feed back `Event::OptionsLoaded`.
    FetchOptions,
    /// Reload the page from scratch.
    Reload,
    /// Every field passed; hand the form over.
    Submit(FormReport),
}

pub struct EnrollmentPage {
    form: FormState,
    gate: SubmitGate,
    greeting: Option<Greeting>,
    review: Option<ReviewTable>,
    last_report: Option<FormReport>,
    options_requested: bool,
    persistence: FieldPersistence<Arc<dyn KeyValueStore>>,
    identity: RememberedIdentity<Arc<dyn KeyValueStore>>,
}

impl EnrollmentPage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_form(store, FormState::enrollment(), field_ttl())
    }

    pub fn with_form(store: Arc<dyn KeyValueStore>, form: FormState, ttl: Ttl) -> Self {
        Self {
            form,
            gate: SubmitGate::initial(),
            greeting: None,
            review: None,
            last_report: None,
            options_requested: false,
            persistence: FieldPersistence::with_ttl(store.clone(), ttl),
            identity: RememberedIdentity::new(store),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn gate(&self) -> SubmitGate {
        self.gate
    }

    pub fn greeting(&self) -> Option<&Greeting> {
        self.greeting.as_ref()
    }

    pub fn review(&self) -> Option<&ReviewTable> {
        self.review.as_ref()
    }

    pub fn last_report(&self) -> Option<&FormReport> {
        self.last_report.as_ref()
    }

    pub fn handle(&mut self, event: Event, ctx: &ValidationContext) -> Vec<Effect> {
        match event {
            Event::Loaded => {
                self.gate = SubmitGate::initial();
                self.persistence.prefill(&mut self.form);
                self.greeting = self.identity.greeting();
                if self.options_requested {
                    return Vec::new();
                }
                self.options_requested = true;
                vec![Effect::FetchOptions]
            }
            Event::InputChanged { control, value } => {
                if !self.form.set_value(&control, value.as_str()) {
                    return Vec::new();
                }
                if let Err(err) = self.persistence.record_input(&control, &value) {
                    warn!(control = %control, error = %err, "failed to persist input");
                }
                Vec::new()
            }
            Event::Toggled { control, checked } => {
                self.form.set_checked(&control, checked);
                Vec::new()
            }
            Event::FieldLeft(field) => {
                orchestrator::validate_field(&mut self.form, field, ctx);
                Vec::new()
            }
            Event::ValidateRequested => {
                self.run_validation(ctx);
                Vec::new()
            }
            Event::SubmitAttempted => {
                if !self.gate.submit_enabled {
                    debug!("submit ignored, form not validated");
                    return Vec::new();
                }
                // Values may have changed since the last run.
                let report = self.run_validation(ctx);
                if report.submittable {
                    vec![Effect::Submit(report)]
                } else {
                    Vec::new()
                }
            }
            Event::ReviewRequested => {
                self.review = Some(review::review(&self.form));
                Vec::new()
            }
            Event::DismissSummary => {
                self.gate.dismiss_summary();
                Vec::new()
            }
            Event::DisclaimIdentity => {
                if self.greeting.is_none() {
                    return Vec::new();
                }
                if let Err(err) = self.identity.disclaim() {
                    warn!(error = %err, "failed to clear remembered identity");
                }
                self.greeting = None;
                vec![Effect::Reload]
            }
            Event::OptionsLoaded(outcome) => {
                self.form.set_options(STATE_SELECT, outcome.into_records());
                Vec::new()
            }
        }
    }

    /// Run `Loaded` and serve its option fetch from `source`.
    ///
    /// Returns whatever effects are left for the host.
    pub async fn load<S: OptionSource + ?Sized>(
        &mut self,
        source: &S,
        ctx: &ValidationContext,
    ) -> Vec<Effect> {
        let mut pending = Vec::new();
        for effect in self.handle(Event::Loaded, ctx) {
            match effect {
                Effect::FetchOptions => {
                    let outcome = options::load_options(source).await;
                    pending.extend(self.handle(Event::OptionsLoaded(outcome), ctx));
                }
                other => pending.push(other),
            }
        }
        pending
    }

    /// Failed outcomes of the last full validation run.
    pub fn failures(&self) -> Vec<&ValidationOutcome> {
        self.last_report
            .as_ref()
            .map(|r| r.failures().collect())
            .unwrap_or_default()
    }

    fn run_validation(&mut self, ctx: &ValidationContext) -> FormReport {
        let report = orchestrator::validate_all(&mut self.form, &mut self.gate, ctx);
        self.last_report = Some(report.clone());
        report
    }
}
