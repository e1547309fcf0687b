/*
[INPUT]:  Candidate profile values
[OUTPUT]: Per-field error keys or a valid verdict
[POS]:    Validation layer - profile field constraints
[UPDATE]: When adding fields or changing validation rules
*/

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use profile_adapter::WALLET_ADDRESS_LEN;
use regex::Regex;
use thiserror::Error;

use crate::form::ProfileValues;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern compiles")
});

/// Editable fields of the profile form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Email,
    Country,
    WalletAddr,
}

impl FieldName {
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Country,
        FieldName::WalletAddr,
    ];

    /// Wire name used by the user service
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Country => "country",
            FieldName::WalletAddr => "walletAddr",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message selectors shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    RequireUserName,
    RequireEmail,
    InvalidEmail,
    RequireCountry,
    RequireWalletAddress,
    InvalidLengthWalletAddress,
    RequireProfileDetails,
    RequireAuthToken,
}

impl ErrorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::RequireUserName => "requireUserName",
            ErrorKey::RequireEmail => "requireEmail",
            ErrorKey::InvalidEmail => "invalidEmail",
            ErrorKey::RequireCountry => "requireCountry",
            ErrorKey::RequireWalletAddress => "requireWalletAddress",
            ErrorKey::InvalidLengthWalletAddress => "invalidLengthWalletAddress",
            ErrorKey::RequireProfileDetails => "requireProfileDetails",
            ErrorKey::RequireAuthToken => "requireAuthToken",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorKey::RequireUserName => "Full name is required",
            ErrorKey::RequireEmail => "Email is required",
            ErrorKey::InvalidEmail => "Email is invalid",
            ErrorKey::RequireCountry => "Country is required",
            ErrorKey::RequireWalletAddress => "Wallet address is required",
            ErrorKey::InvalidLengthWalletAddress => "Wallet address must be 42 characters",
            ErrorKey::RequireProfileDetails => "Profile details are required",
            ErrorKey::RequireAuthToken => "Missing auth token",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// First violated rule per field
pub type FieldErrors = BTreeMap<FieldName, ErrorKey>;

/// Why a candidate record failed the schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("{}", ErrorKey::RequireProfileDetails.message())]
    MissingRecord,
    #[error("{} field(s) failed validation", .0.len())]
    Fields(FieldErrors),
}

impl ValidationFailure {
    /// Errors keyed by field; empty when the whole record is missing
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ValidationFailure::MissingRecord => FieldErrors::new(),
            ValidationFailure::Fields(errors) => errors.clone(),
        }
    }

    pub fn key_for(&self, field: FieldName) -> Option<ErrorKey> {
        match self {
            ValidationFailure::MissingRecord => Some(ErrorKey::RequireProfileDetails),
            ValidationFailure::Fields(errors) => errors.get(&field).copied(),
        }
    }
}

type Rule = fn(&str) -> Option<ErrorKey>;

const NAME_RULES: &[Rule] = &[require_name];
const EMAIL_RULES: &[Rule] = &[require_email, email_syntax];
const COUNTRY_RULES: &[Rule] = &[require_country];
const WALLET_RULES: &[Rule] = &[require_wallet, wallet_length];

fn rules_for(field: FieldName) -> &'static [Rule] {
    match field {
        FieldName::Name => NAME_RULES,
        FieldName::Email => EMAIL_RULES,
        FieldName::Country => COUNTRY_RULES,
        FieldName::WalletAddr => WALLET_RULES,
    }
}

fn require_name(value: &str) -> Option<ErrorKey> {
    value.is_empty().then_some(ErrorKey::RequireUserName)
}

fn require_email(value: &str) -> Option<ErrorKey> {
    value.is_empty().then_some(ErrorKey::RequireEmail)
}

fn email_syntax(value: &str) -> Option<ErrorKey> {
    (!EMAIL_PATTERN.is_match(value)).then_some(ErrorKey::InvalidEmail)
}

fn require_country(value: &str) -> Option<ErrorKey> {
    value.is_empty().then_some(ErrorKey::RequireCountry)
}

fn require_wallet(value: &str) -> Option<ErrorKey> {
    value.is_empty().then_some(ErrorKey::RequireWalletAddress)
}

fn wallet_length(value: &str) -> Option<ErrorKey> {
    (value.chars().count() != WALLET_ADDRESS_LEN).then_some(ErrorKey::InvalidLengthWalletAddress)
}

/// Run one field's rules in order and return the first failure
pub fn validate_field(field: FieldName, value: &str) -> Option<ErrorKey> {
    rules_for(field).iter().find_map(|rule| rule(value))
}

/// Evaluate every field independently
pub fn validate_fields(values: &ProfileValues) -> FieldErrors {
    FieldName::ALL
        .iter()
        .filter_map(|&field| validate_field(field, values.get(field)).map(|key| (field, key)))
        .collect()
}

/// Validate a candidate record, which may be absent
pub fn validate(candidate: Option<&ProfileValues>) -> Result<(), ValidationFailure> {
    let values = candidate.ok_or(ValidationFailure::MissingRecord)?;
    let errors = validate_fields(values);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::Fields(errors))
    }
}
