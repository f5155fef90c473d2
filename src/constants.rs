//! Application constants for the bulk user importer
//!
//! This module contains the canonical field names, the header synonym table,
//! validation messages and default limits used throughout the importer.

// =============================================================================
// Canonical Field Names
// =============================================================================

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_POPULATION_ID: &str = "populationId";
pub const FIELD_ENABLED: &str = "enabled";

/// Columns that must be present for an import to run
pub const REQUIRED_FIELDS: &[&str] = &[FIELD_USERNAME];

/// Columns whose absence is reported but does not stop the import
pub const RECOMMENDED_FIELDS: &[&str] = &[FIELD_FIRST_NAME, FIELD_LAST_NAME, FIELD_EMAIL];

// =============================================================================
// Header Synonyms
// =============================================================================

/// Lower-cased header spellings accepted for each canonical field.
///
/// This is the only place synonyms are defined; both header resolution and
/// per-row mapping go through it.
pub const HEADER_SYNONYMS: &[(&str, &[&str])] = &[
    (
        FIELD_USERNAME,
        &["username", "user_name", "userid", "user_id", "login", "user"],
    ),
    (
        FIELD_FIRST_NAME,
        &["firstname", "first_name", "givenname", "given_name", "fname"],
    ),
    (
        FIELD_LAST_NAME,
        &[
            "lastname",
            "last_name",
            "surname",
            "familyname",
            "family_name",
            "lname",
        ],
    ),
    (
        FIELD_EMAIL,
        &["email", "mail", "emailaddress", "email_address", "e-mail"],
    ),
    (
        FIELD_POPULATION_ID,
        &["populationid", "population_id", "popid"],
    ),
    (FIELD_ENABLED, &["enabled", "is_enabled", "isenabled", "active"]),
];

// =============================================================================
// Boolean Literals
// =============================================================================

/// Literals (case-insensitive) that coerce to `true` in the enabled column
pub const TRUE_LITERALS: &[&str] = &["true", "1"];

/// Literals (case-insensitive) that coerce to `false` in the enabled column
pub const FALSE_LITERALS: &[&str] = &["false", "0"];

/// Value used when the enabled column is present but empty
pub const DEFAULT_ENABLED: bool = true;

// =============================================================================
// Validation
// =============================================================================

/// Deliberately lax email pattern; changing it changes which rows are errors
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Characters allowed in a username. `@` is included so usernames defaulted
/// from an email address remain valid.
pub const USERNAME_PATTERN: &str = r"^[A-Za-z0-9._@-]+$";

pub mod messages {
    pub const USERNAME_REQUIRED: &str = "Username is required and cannot be empty";
    pub const INVALID_EMAIL: &str = "Invalid email format";
    pub const USERNAME_INVALID_CHARACTERS: &str = "Username contains invalid characters";

    pub const FIRST_NAME_MISSING: &str = "First name is recommended but missing";
    pub const LAST_NAME_MISSING: &str = "Last name is recommended but missing";
    pub const EMAIL_MISSING: &str = "Email is recommended but missing";
}

// =============================================================================
// Input Limits and Defaults
// =============================================================================

/// CSV delimiter used for ingestion
pub const CSV_DELIMITER: char = ',';

/// Default cap on input size before parsing (10 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Byte-order mark some spreadsheet tools prepend to CSV exports
pub const UTF8_BOM: char = '\u{feff}';

/// File extension picked up when a directory is given to the CLI
pub const CSV_EXTENSION: &str = "csv";

// =============================================================================
// Configuration
// =============================================================================

pub const CONFIG_DIR_NAME: &str = "bulk-user-import";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_MAX_FILE_BYTES: &str = "BULK_IMPORT_MAX_FILE_BYTES";
pub const ENV_STRICT_QUOTES: &str = "BULK_IMPORT_STRICT_QUOTES";
pub const ENV_DEFAULT_POPULATION_ID: &str = "BULK_IMPORT_DEFAULT_POPULATION_ID";
