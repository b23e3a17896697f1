//! Field identifiers and the control model of the enrollment form.
//!
//! - `FieldId`     : the sixteen validated logical fields
//! - `ControlKind` : input widget types as the markup declares them
//! - `Control`     : one input element (id, name, kind, current value)
//! - `Field`       : read-only snapshot of a logical field and its error slot

use serde::Serialize;

use crate::options::OptionRecord;

/// Every field that owns an error slot, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FieldId {
    FirstName,
    MiddleInitial,
    LastName,
    Dob,
    Gender,
    Ssn,
    AddressLine1,
    AddressLine2,
    City,
    State,
    Zipcode,
    Email,
    Phone,
    Username,
    Password,
    ConfirmPassword,
}

impl FieldId {
    pub const ALL: [FieldId; 16] = [
        FieldId::FirstName,
        FieldId::MiddleInitial,
        FieldId::LastName,
        FieldId::Dob,
        FieldId::Gender,
        FieldId::Ssn,
        FieldId::AddressLine1,
        FieldId::AddressLine2,
        FieldId::City,
        FieldId::State,
        FieldId::Zipcode,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Username,
        FieldId::Password,
        FieldId::ConfirmPassword,
    ];

    /// Id of the control holding the field's raw value.
    ///
    /// Gender has no single control; its value lives in the `gender` radio group.
    pub fn control_id(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::MiddleInitial => "middleInitial",
            FieldId::LastName => "lastName",
            FieldId::Dob => "dob",
            FieldId::Gender => "gender",
            FieldId::Ssn => "ssn",
            FieldId::AddressLine1 => "addressLine1",
            FieldId::AddressLine2 => "addressLine2",
            FieldId::City => "city",
            FieldId::State => "state",
            FieldId::Zipcode => "zipcode",
            FieldId::Email => "emailAddress",
            FieldId::Phone => "phone",
            FieldId::Username => "username",
            FieldId::Password => "password",
            FieldId::ConfirmPassword => "confirm-password",
        }
    }

    /// Id of the inline message slot next to the field.
    pub fn error_slot(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName-error",
            FieldId::MiddleInitial => "middleInitial-error",
            FieldId::LastName => "lastName-error",
            FieldId::Dob => "dob-error",
            FieldId::Gender => "gender-error",
            FieldId::Ssn => "ssn-error",
            FieldId::AddressLine1 => "address1-error",
            FieldId::AddressLine2 => "address2-error",
            FieldId::City => "city-error",
            FieldId::State => "state-error",
            FieldId::Zipcode => "zipcode-error",
            FieldId::Email => "email-error",
            FieldId::Phone => "phone-error",
            FieldId::Username => "username-error",
            FieldId::Password => "password-error",
            FieldId::ConfirmPassword => "password2-error",
        }
    }

    /// Field owning the given control, if any.
    pub fn for_control(control_id: &str) -> Option<FieldId> {
        match control_id {
            "male" | "female" | "other" | "specify" => Some(FieldId::Gender),
            _ => Self::ALL
                .into_iter()
                .find(|f| f.control_id() == control_id),
        }
    }
}

/// Input widget type, mirroring the markup `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControlKind {
    Text,
    Password,
    Email,
    Tel,
    Date,
    Range,
    TextArea,
    Select,
    Radio,
    Checkbox,
    Button,
    Submit,
    Reset,
}

impl ControlKind {
    /// Push buttons carry no user data.
    pub fn is_button(self) -> bool {
        matches!(
            self,
            ControlKind::Button | ControlKind::Submit | ControlKind::Reset
        )
    }

    /// Radio and checkbox controls contribute their value only while checked.
    pub fn is_checkable(self) -> bool {
        matches!(self, ControlKind::Radio | ControlKind::Checkbox)
    }
}

/// One input element of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub name: String,
    pub kind: ControlKind,
    pub value: String,
    pub checked: bool,
    /// Only populated for `ControlKind::Select`.
    pub options: Vec<OptionRecord>,
}

impl Control {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            value: String::new(),
            checked: false,
            options: Vec::new(),
        }
    }

    /// Text-like control whose id doubles as its name.
    pub fn input(id: &str, kind: ControlKind) -> Self {
        Self::new(id, id, kind)
    }

    /// Radio / checkbox with a fixed submitted value.
    pub fn choice(id: &str, name: &str, kind: ControlKind, value: &str) -> Self {
        Self::new(id, name, kind).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// Snapshot of a logical field: its raw value and its error slot.
///
/// `error_message` is `Some` exactly when the field's last outcome was invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub id: FieldId,
    pub raw_value: String,
    pub error_message: Option<String>,
}
