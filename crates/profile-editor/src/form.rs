/*
[INPUT]:  Seed profile values and field-change events
[OUTPUT]: Immutable form state snapshots with errors, touched set, validity
[POS]:    Form layer - explicit state plus pure reducer
[UPDATE]: When adding form events or fields
*/

use std::collections::BTreeSet;

use profile_adapter::{ProfileRecord, ProfileUpdate};

use crate::schema::{self, ErrorKey, FieldErrors, FieldName};

/// Candidate values edited by the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileValues {
    pub email: String,
    pub name: String,
    pub wallet_addr: String,
    pub country: String,
}

impl ProfileValues {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Country => &self.country,
            FieldName::WalletAddr => &self.wallet_addr,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        match field {
            FieldName::Name => self.name = value,
            FieldName::Email => self.email = value,
            FieldName::Country => self.country = value,
            FieldName::WalletAddr => self.wallet_addr = value,
        }
    }

    /// Partial record for the update call (email excluded)
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            wallet_addr: self.wallet_addr.clone(),
            country: self.country.clone(),
        }
    }
}

impl From<&ProfileRecord> for ProfileValues {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            email: record.email.clone(),
            name: record.name.clone(),
            wallet_addr: record.wallet_addr.clone(),
            country: record.country.clone(),
        }
    }
}

/// Field interaction events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// New value typed into a field; marks it touched
    Change(FieldName, String),
    Touch(FieldName),
    SelectCountry(String),
    /// Reset country to empty and mark it touched
    ClearCountry,
    /// Start over from a fresh seed
    Reseed(ProfileValues),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    initial: ProfileValues,
    values: ProfileValues,
    touched: BTreeSet<FieldName>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(seed: ProfileValues) -> Self {
        let errors = schema::validate_fields(&seed);
        Self {
            initial: seed.clone(),
            values: seed,
            touched: BTreeSet::new(),
            errors,
        }
    }

    pub fn initial(&self) -> &ProfileValues {
        &self.initial
    }

    pub fn values(&self) -> &ProfileValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.values != self.initial
    }

    /// Error shown next to a field: only once the user has touched it
    pub fn visible_error(&self, field: FieldName) -> Option<ErrorKey> {
        if self.is_touched(field) {
            self.errors.get(&field).copied()
        } else {
            None
        }
    }
}

/// Apply one event and return the next state with errors recomputed
pub fn reduce(state: &FormState, event: FormEvent) -> FormState {
    let mut next = state.clone();
    match event {
        FormEvent::Change(field, value) => {
            next.values.set(field, value);
            next.touched.insert(field);
        }
        FormEvent::Touch(field) => {
            next.touched.insert(field);
        }
        FormEvent::SelectCountry(code) => {
            next.values.country = code;
        }
        FormEvent::ClearCountry => {
            next.values.country.clear();
            next.touched.insert(FieldName::Country);
        }
        FormEvent::Reseed(values) => return FormState::new(values),
    }
    next.errors = schema::validate_fields(&next.values);
    next
}
