// 🏷️ State Rules - one DL formatting rule per state
// Five states have a rule; the other 45 get a fixed placeholder string.
//
// Rule         | Layout
// -------------|------------------------------------------------------------
// Florida      | L DDD YY DAY S    (initial, soundex digits, year, daycode, seq)
// Georgia      | SSN without dashes
// Illinois     | SDX4 YY MM DD     (month + 50 for F)
// Wisconsin    | SDX4 YY MM DD
// Washington   | L DDD YY X        (X is a mock check digit)

use crate::error::Result;
use crate::identity::{mask_ssn, Gender, IdentityInput, State};
use crate::soundex::soundex;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Returned for every state without a rule
pub const PLACEHOLDER_DL: &str = "DL format not implemented yet.";

/// Florida daycode offset for female applicants
const FLORIDA_FEMALE_OFFSET: u32 = 500;

/// Illinois month offset for female applicants
const ILLINOIS_FEMALE_OFFSET: u32 = 50;

fn two_digit_year(birthdate: NaiveDate) -> i32 {
    birthdate.year().rem_euclid(100)
}

// Callers run soundex first, so the name is known to be non-empty here
fn uppercase_initial(last_name: &str) -> String {
    last_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

// ============================================================================
// PER-STATE RULES
// ============================================================================

/// Florida: `(month-1)*40 + day` daycode, +500 for F
///
/// Max daycode for a real date is 11*40 + 31 + 500 = 971, so the field is
/// always 3 digits. `sequence` is the tie-breaker digit; the dispatcher
/// always passes 0.
pub fn florida_dl(last_name: &str, birthdate: NaiveDate, gender: Gender, sequence: u8) -> Result<String> {
    let sdx = soundex(last_name)?;
    let initial = uppercase_initial(last_name);
    let year = two_digit_year(birthdate);

    let mut daycode = (birthdate.month() - 1) * 40 + birthdate.day();
    if gender.is_female() {
        daycode += FLORIDA_FEMALE_OFFSET;
    }

    Ok(format!("{}{}{:02}{:03}{}", initial, sdx.digits(), year, daycode, sequence))
}

/// Georgia: the SSN with every dash removed
pub fn georgia_dl(ssn: &str) -> String {
    ssn.replace('-', "")
}

/// Illinois: soundex + YY + MM + DD, month +50 for F
pub fn illinois_dl(last_name: &str, birthdate: NaiveDate, gender: Gender) -> Result<String> {
    let sdx = soundex(last_name)?;
    let year = two_digit_year(birthdate);

    let month = if gender.is_female() {
        birthdate.month() + ILLINOIS_FEMALE_OFFSET
    } else {
        birthdate.month()
    };

    Ok(format!("{}{:02}{:02}{:02}", sdx, year, month, birthdate.day()))
}

pub fn wisconsin_dl(last_name: &str, birthdate: NaiveDate) -> Result<String> {
    let sdx = soundex(last_name)?;
    let year = two_digit_year(birthdate);

    Ok(format!(
        "{}{:02}{:02}{:02}",
        sdx,
        year,
        birthdate.month(),
        birthdate.day()
    ))
}

/// Washington: initial + soundex digits + YY + 'X'
///
/// The trailing 'X' is a stand-in, not a computed check digit.
pub fn washington_dl(last_name: &str, birthdate: NaiveDate) -> Result<String> {
    let sdx = soundex(last_name)?;
    let initial = uppercase_initial(last_name);
    let year = two_digit_year(birthdate);

    Ok(format!("{}{}{:02}X", initial, sdx.digits(), year))
}

pub fn placeholder_dl() -> String {
    PLACEHOLDER_DL.to_string()
}

// ============================================================================
// DISPATCH TABLE
// ============================================================================

/// StateRule - which formatting function a state maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRule {
    Florida,
    Georgia,
    Illinois,
    Wisconsin,
    Washington,
    Placeholder,
}

impl StateRule {
    pub fn for_state(state: State) -> Self {
        match state {
            State::Florida => StateRule::Florida,
            State::Georgia => StateRule::Georgia,
            State::Illinois => StateRule::Illinois,
            State::Wisconsin => StateRule::Wisconsin,
            State::Washington => StateRule::Washington,
            _ => StateRule::Placeholder,
        }
    }

    /// Look up by exact display name; unknown names get the placeholder
    pub fn for_name(name: &str) -> Self {
        State::from_name(name).map_or(StateRule::Placeholder, StateRule::for_state)
    }

    /// Rule identifier for logs
    pub fn name(&self) -> &'static str {
        match self {
            StateRule::Florida => "florida_dl",
            StateRule::Georgia => "georgia_dl",
            StateRule::Illinois => "illinois_dl",
            StateRule::Wisconsin => "wisconsin_dl",
            StateRule::Washington => "washington_dl",
            StateRule::Placeholder => "placeholder_dl",
        }
    }

    pub fn is_implemented(&self) -> bool {
        *self != StateRule::Placeholder
    }

    /// Run the rule; only the fields it needs are read
    pub fn apply(&self, last_name: &str, birthdate: NaiveDate, gender: Gender, ssn: &str) -> Result<String> {
        match self {
            StateRule::Florida => florida_dl(last_name, birthdate, gender, 0),
            StateRule::Georgia => Ok(georgia_dl(ssn)),
            StateRule::Illinois => illinois_dl(last_name, birthdate, gender),
            StateRule::Wisconsin => wisconsin_dl(last_name, birthdate),
            StateRule::Washington => washington_dl(last_name, birthdate),
            StateRule::Placeholder => Ok(placeholder_dl()),
        }
    }
}

// ============================================================================
// GENERATED DL
// ============================================================================

/// A DL number labelled with the state it was generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDl {
    pub state: String,
    pub number: String,
}

impl GeneratedDl {
    /// "Florida DL Number: S530901750"
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratedDl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DL Number: {}", self.state, self.number)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Generate a DL number for `state`
///
/// Never fails for an unknown or unimplemented state (placeholder string).
///
/// # Errors
/// * `DlError::EmptyName` - a name-based rule got an empty `last_name`
pub fn generate_dl(
    state: &str,
    last_name: &str,
    birthdate: NaiveDate,
    gender: Gender,
    ssn: &str,
) -> Result<String> {
    let rule = StateRule::for_name(state);

    debug!(
        state = %state,
        rule = rule.name(),
        ssn = %mask_ssn(ssn),
        "Generating DL number"
    );

    if !rule.is_implemented() {
        debug!(state = %state, "No DL format for state, using placeholder");
    }

    rule.apply(last_name, birthdate, gender, ssn)
}

/// Generate from a collected `IdentityInput`
pub fn generate(input: &IdentityInput) -> Result<GeneratedDl> {
    let number = generate_dl(
        &input.state,
        &input.last_name,
        input.birthdate,
        input.gender,
        &input.ssn,
    )?;

    Ok(GeneratedDl {
        state: input.state.clone(),
        number,
    })
}

// ============================================================================
// TESTS
// ============================================================================
