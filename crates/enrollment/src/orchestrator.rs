//! Form Validation Orchestrator.
//!
//! Runs every rule, writes each result into the form, and derives whether the
//! form may be submitted. The submit control is disabled before anything runs
//! and is only re-enabled when every rule passed.

use serde::Serialize;
use tracing::debug;

use crate::field::FieldId;
use crate::state::FormState;
use crate::validate::{self, ValidationContext, ValidationOutcome};

/// Visibility of the submit control and the error summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SubmitGate {
    pub submit_enabled: bool,
    pub summary_visible: bool,
}

impl SubmitGate {
    /// Page load: submit disabled, summary hidden.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn dismiss_summary(&mut self) {
        self.summary_visible = false;
    }
}

/// Outcomes of one full run, in validation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormReport {
    pub outcomes: Vec<ValidationOutcome>,
    pub submittable: bool,
}

impl FormReport {
    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| !o.valid)
    }
}

/// Validate one field and refresh its slot (real-time feedback).
pub fn validate_field(
    form: &mut FormState,
    field: FieldId,
    ctx: &ValidationContext,
) -> ValidationOutcome {
    let validation = validate::validate(field, form, ctx);
    form.apply(&validation);
    validation.outcome
}

/// Run all sixteen rules without short-circuiting and update the gate.
///
/// Rules run in [`FieldId::ALL`] order and each sees the values written back
/// by the rules before it.
pub fn validate_all(
    form: &mut FormState,
    gate: &mut SubmitGate,
    ctx: &ValidationContext,
) -> FormReport {
    gate.submit_enabled = false;

    let outcomes: Vec<ValidationOutcome> = FieldId::ALL
        .into_iter()
        .map(|field| validate_field(form, field, ctx))
        .collect();

    let submittable = outcomes.iter().all(|o| o.valid) && !form.has_errors();

    if submittable {
        gate.submit_enabled = true;
        gate.summary_visible = false;
    } else {
        gate.summary_visible = true;
    }

    debug!(
        submittable,
        failed = outcomes.iter().filter(|o| !o.valid).count(),
        "form validated"
    );

    FormReport {
        outcomes,
        submittable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2025, 12, 6).unwrap())
    }

    #[test]
    fn empty_form_fails_and_shows_summary() {
        let mut form = FormState::enrollment();
        let mut gate = SubmitGate::initial();

        let report = validate_all(&mut form, &mut gate, &ctx());

        assert!(!report.submittable);
        assert!(!gate.submit_enabled);
        assert!(gate.summary_visible);
        assert_eq!(report.outcomes.len(), 16);
    }

    #[test]
    fn single_field_refreshes_only_its_slot() {
        let mut form = FormState::enrollment();
        let outcome = validate_field(&mut form, FieldId::City, &ctx());

        assert!(!outcome.valid);
        assert_eq!(form.error(FieldId::City), Some("City cannot be left blank."));
        assert_eq!(form.error(FieldId::FirstName), None);
    }

    #[test]
    fn dismissing_hides_summary_only() {
        let mut gate = SubmitGate {
            submit_enabled: false,
            summary_visible: true,
        };
        gate.dismiss_summary();
        assert_eq!(gate, SubmitGate::initial());
    }
}
