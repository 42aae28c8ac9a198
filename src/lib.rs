// DL Simulator - Core Library
// Synthetic driver's-license numbers from per-state rules.
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod soundex;    // Soundex encoder (leaf)
pub mod identity;   // States, gender, identity input
pub mod rules;      // Per-state rules + dispatcher
pub mod batch;      // CSV batch generation
pub mod logging;    // tracing setup for the binaries

// Re-export commonly used types
pub use error::DlError;
pub use soundex::{soundex, SoundexCode};
pub use identity::{
    default_birthdate, mask_ssn, parse_birthdate,
    Gender, IdentityInput, State,
};
pub use rules::{
    generate, generate_dl,
    florida_dl, georgia_dl, illinois_dl, wisconsin_dl, washington_dl, placeholder_dl,
    GeneratedDl, StateRule, PLACEHOLDER_DL,
};
pub use batch::{generate_batch, generate_batch_file, BatchSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
