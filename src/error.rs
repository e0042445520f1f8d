//! Rich diagnostic error types for the guesswork engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly what went wrong
//! and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the guesswork engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum GuessError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Game(#[from] GameError),
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to read catalog: {path}")]
    #[diagnostic(
        code(guesswork::catalog::read),
        help(
            "Check that the catalog file exists and is readable. \
             The default location is `data/words.json`; pass `--catalog` to override it."
        )
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {message}")]
    #[diagnostic(
        code(guesswork::catalog::parse),
        help(
            "The catalog must be a JSON object mapping each word to an object of \
             attribute values, e.g. {{\"chat\": {{\"vivant\": 5, \"animal\": 5}}}}."
        )
    )]
    Parse { path: String, message: String },

    #[error("unknown attribute: \"{key}\"")]
    #[diagnostic(
        code(guesswork::catalog::unknown_attribute),
        help("Only attributes that appear in the loaded catalog can be inspected. Run `guesswork info` to see the catalog summary.")
    )]
    UnknownAttribute { key: String },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read game config: {path}")]
    #[diagnostic(
        code(guesswork::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse game config {path}: {message}")]
    #[diagnostic(
        code(guesswork::config::parse),
        help("Check the TOML syntax. Every field is optional; unknown fields are rejected.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize game config {path}: {message}")]
    #[diagnostic(
        code(guesswork::config::serialize),
        help("The in-memory config could not be encoded as TOML.")
    )]
    Serialize { path: String, message: String },

    #[error("failed to write game config: {path}")]
    #[diagnostic(
        code(guesswork::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Game errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GameError {
    #[error("the word catalog is empty")]
    #[diagnostic(
        code(guesswork::game::empty_catalog),
        help(
            "No entity survived catalog cleaning. Every word needs at least one \
             numeric attribute value; check the catalog file."
        )
    )]
    EmptyCatalog,

    #[error("no question is available")]
    #[diagnostic(
        code(guesswork::game::no_questions),
        help("The catalog defines no attributes, so there is nothing to ask.")
    )]
    NoQuestions,
}

pub type GameResult<T> = std::result::Result<T, GameError>;

/// Convenience result alias for top-level operations.
pub type GuessResult<T> = std::result::Result<T, GuessError>;
