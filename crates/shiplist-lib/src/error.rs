use thiserror::Error;

/// Convenient result alias for the shiplist library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a top-level status other than "ok". The raw
    /// body is kept verbatim so a bad application ID is diagnosable.
    #[error("API request to {endpoint} failed (bad application ID or API unavailable): {body}")]
    ApiStatus { endpoint: &'static str, body: String },

    /// The clan search returned no candidate whose tag matches exactly.
    #[error("no clan found with tag {tag}")]
    ClanNotFound { tag: String },

    /// The API reported "ok" but carried no payload.
    #[error("empty payload from {endpoint}")]
    MissingData { endpoint: &'static str },

    /// The response body did not have the expected shape.
    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse {
        endpoint: &'static str,
        message: String,
    },

    /// The encyclopedia reported a ship type outside the known set.
    #[error("unknown ship type {value} for ship {name}")]
    UnknownShipType { name: String, value: String },

    /// The encyclopedia reported a tier outside the supported range.
    #[error("ship tier {tier} for {name} is outside the supported range 1-11")]
    TierOutOfRange { name: String, tier: u32 },

    /// Raised when formatting a tier label for a tier with no defined label.
    #[error("no tier label defined for tier {tier}")]
    UnsupportedTier { tier: u8 },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV serialization errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
