use claims_security::ClaimsError;

/// A configured claim set failed boundary validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`default_claims`: {0}")]
    DefaultClaims(#[source] ClaimsError),

    /// Identified by position so the token value never reaches the logs.
    #[error("`tokens[{index}].claims`: {source}")]
    TokenClaims {
        index: usize,
        #[source]
        source: ClaimsError,
    },

    #[error("`tokens[{index}]`: token must not be empty")]
    EmptyToken { index: usize },

    #[error("`tokens[{index}]` duplicates `tokens[{first}]`")]
    DuplicateToken { index: usize, first: usize },
}
