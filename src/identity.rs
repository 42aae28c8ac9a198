// 🪪 Identity Input - the values a caller collects before asking for a DL number
// States, gender, birthdate defaults and SSN masking for logs

use crate::error::{DlError, Result};
use crate::rules::StateRule;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// ============================================================================
// STATE
// ============================================================================

/// State - the 50 US states, alphabetical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

// (display name, USPS code) in declaration order
const STATE_TABLE: [(&str, &str); 50] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

impl State {
    pub const ALL: [State; 50] = [
        State::Alabama,
        State::Alaska,
        State::Arizona,
        State::Arkansas,
        State::California,
        State::Colorado,
        State::Connecticut,
        State::Delaware,
        State::Florida,
        State::Georgia,
        State::Hawaii,
        State::Idaho,
        State::Illinois,
        State::Indiana,
        State::Iowa,
        State::Kansas,
        State::Kentucky,
        State::Louisiana,
        State::Maine,
        State::Maryland,
        State::Massachusetts,
        State::Michigan,
        State::Minnesota,
        State::Mississippi,
        State::Missouri,
        State::Montana,
        State::Nebraska,
        State::Nevada,
        State::NewHampshire,
        State::NewJersey,
        State::NewMexico,
        State::NewYork,
        State::NorthCarolina,
        State::NorthDakota,
        State::Ohio,
        State::Oklahoma,
        State::Oregon,
        State::Pennsylvania,
        State::RhodeIsland,
        State::SouthCarolina,
        State::SouthDakota,
        State::Tennessee,
        State::Texas,
        State::Utah,
        State::Vermont,
        State::Virginia,
        State::Washington,
        State::WestVirginia,
        State::Wisconsin,
        State::Wyoming,
    ];

    /// Human-readable name for display ("New Hampshire")
    pub fn name(&self) -> &'static str {
        STATE_TABLE[*self as usize].0
    }

    /// Two-letter USPS code ("NH")
    pub fn code(&self) -> &'static str {
        STATE_TABLE[*self as usize].1
    }

    /// Exact display-name lookup, as the dispatcher compares names
    pub fn from_name(name: &str) -> Option<State> {
        State::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Whether a real formatting rule exists (vs. the placeholder)
    pub fn is_implemented(&self) -> bool {
        StateRule::for_state(*self).is_implemented()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lenient parse: case-insensitive display name or USPS code
impl FromStr for State {
    type Err = DlError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();

        State::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(wanted) || st.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DlError::UnknownState(s.to_string()))
    }
}

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(alias = "m")]
    M,
    #[serde(alias = "f")]
    F,
}

impl Gender {
    pub fn is_female(&self) -> bool {
        *self == Gender::F
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            _ => Err(DlError::InvalidGender(s.to_string())),
        }
    }
}

// ============================================================================
// BIRTHDATE
// ============================================================================

/// Birthdate used when the caller leaves it out
pub fn default_birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` birthdate
pub fn parse_birthdate(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| DlError::InvalidDate(text.to_string()))
}

// ============================================================================
// IDENTITY INPUT
// ============================================================================

/// IdentityInput - one request for a DL number
///
/// `state` stays a plain string: anything outside the 50 names is still a
/// valid request and just yields the placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInput {
    pub state: String,
    pub last_name: String,

    #[serde(default = "default_birthdate")]
    pub birthdate: NaiveDate,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default)]
    pub ssn: String,
}

impl IdentityInput {
    /// Create an input with the default birthdate, gender M and no SSN
    pub fn new(state: impl Into<String>, last_name: impl Into<String>) -> Self {
        IdentityInput {
            state: state.into(),
            last_name: last_name.into(),
            birthdate: default_birthdate(),
            gender: Gender::default(),
            ssn: String::new(),
        }
    }

    /// Builder pattern: set birthdate
    pub fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = birthdate;
        self
    }

    /// Builder pattern: set gender
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Builder pattern: set SSN
    pub fn with_ssn(mut self, ssn: impl Into<String>) -> Self {
        self.ssn = ssn.into();
        self
    }
}

// ============================================================================
// SSN MASKING
// ============================================================================

static SSN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{3})-(\d{2})-(\d{4})\b").expect("SSN pattern is a valid regex")
});

/// Mask an SSN for logs (show only last 4 digits)
///
/// Not validation: anything that doesn't look like `XXX-XX-XXXX` is fully masked.
pub fn mask_ssn(ssn: &str) -> String {
    match SSN_PATTERN.captures(ssn) {
        Some(caps) => format!("XXX-XX-{}", &caps[3]),
        None => "XXX-XX-XXXX".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
