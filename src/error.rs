//! Unified error types for campus-partners.
//!
//! Everything fallible in the library funnels into [`CatalogError`]. The
//! variants split along one line that the UI cares about: did the backend
//! misbehave (retry might help), or was the local input wrong (retry cannot).
//! Intentional request cancellation is deliberately absent: a superseded
//! fetch is dropped silently by the coordinator and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for campus-partners operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogError {
    /// Errors talking to the partnership backend
    #[error("API request failed: {context}")]
    Api {
        context: String,
        #[source]
        source: ApiErrorKind,
    },

    /// Review submissions rejected before any network I/O
    #[error("Review rejected: {context}")]
    Review {
        context: String,
        #[source]
        source: ReviewErrorKind,
    },

    /// IO errors, with the path when one is known
    #[error("IO failure{}: {message}", at_path(.path))]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

fn at_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

/// Specific API error kinds.
///
/// Transport failures, non-2xx statuses, and malformed bodies are handled
/// identically by callers (clear the result set, reset paging); they are
/// kept distinct here for logs and tests.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiErrorKind {
    #[error("network transport: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Specific review validation kinds, all caught client-side.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReviewErrorKind {
    #[error("review text is empty")]
    EmptyText,

    #[error("review text exceeds {limit} characters")]
    TextTooLong { limit: usize },

    #[error("a receipt photo is required")]
    MissingReceipt,

    #[error("at most {limit} review photos are allowed (got {count})")]
    TooManyPhotos { count: usize, limit: usize },

    #[error("cannot read attachment {path}: {reason}")]
    UnreadableAttachment { path: PathBuf, reason: String },
}

/// Convenient Result type for campus-partners operations
pub type Result<T> = std::result::Result<T, CatalogError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl CatalogError {
    /// Create an API error with context
    pub fn api(context: impl Into<String>, source: ApiErrorKind) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }

    /// Create a transport-level API error
    pub fn transport(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::api(context, ApiErrorKind::Transport(detail.into()))
    }

    /// Create an API error for a non-2xx response
    pub fn status(context: impl Into<String>, status: u16) -> Self {
        Self::api(context, ApiErrorKind::Status(status))
    }

    /// Create an API error for a body that did not deserialize
    pub fn malformed(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::api(context, ApiErrorKind::Malformed(detail.into()))
    }

    /// Create a review validation error
    pub fn review(context: impl Into<String>, source: ReviewErrorKind) -> Self {
        Self::Review {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error carrying the offending path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True when the failure came from the backend (transport, status, or
    /// body shape) rather than from local input.
    #[must_use]
    pub fn is_api_failure(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Push an outer description onto whatever the error already carries.
    ///
    /// The message field grows leftward, so reading a chained error front
    /// to back walks from the call site down to the root cause.
    fn prepend(self, outer: &str) -> Self {
        fn layered(outer: &str, inner: &str) -> String {
            if inner.is_empty() {
                outer.to_string()
            } else {
                format!("{outer}: {inner}")
            }
        }

        match self {
            Self::Api { context, source } => Self::Api {
                context: layered(outer, &context),
                source,
            },
            Self::Review { context, source } => Self::Review {
                context: layered(outer, &context),
                source,
            },
            Self::Io {
                path,
                message,
                source,
            } => Self::Io {
                path,
                message: layered(outer, &message),
                source,
            },
            Self::Config(inner) => Self::Config(layered(outer, &inner)),
            Self::Validation(inner) => Self::Validation(layered(outer, &inner)),
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::api(
            "JSON deserialization",
            ApiErrorKind::Malformed(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension traits
// ============================================================================

/// Extension trait for layering context onto errors as they bubble up.
///
/// # Example
///
/// ```ignore
/// use campus_partners::error::ErrorContext;
///
/// fn refresh(client: &ApiClient, query: &ListQuery) -> Result<OfferPage> {
///     client
///         .list_offers(query)
///         .context("refreshing offer listing")?
/// }
/// ```
pub trait ErrorContext<T> {
    /// Prepend a fixed context string to the error, if any.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Prepend context computed only on the error path. Use this when
    /// building the string involves formatting or allocation.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<CatalogError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let context = context.into();
        self.with_context(move || context)
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().prepend(&f().into()))
    }
}

/// Extension trait turning `None` into a validation error.
pub trait OptionContext<T> {
    /// Replace `None` with a validation error carrying `context`.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Like [`OptionContext::context_none`] with the message built lazily.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| CatalogError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| CatalogError::Validation(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_name_the_endpoint() {
        let err = CatalogError::status("GET /partnership-info", 502);
        let shown = err.to_string();
        assert!(shown.contains("API request failed"), "got: {shown}");
        assert!(shown.contains("/partnership-info"), "got: {shown}");
    }

    #[test]
    fn review_errors_read_as_rejections() {
        let err = CatalogError::review("submitting review", ReviewErrorKind::MissingReceipt);
        assert!(err.to_string().starts_with("Review rejected"));
    }

    #[test]
    fn io_errors_show_the_path_when_known() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CatalogError::io("/tmp/receipt.jpg", not_found);
        assert!(err.to_string().contains("at /tmp/receipt.jpg"));

        let bare: CatalogError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(!bare.to_string().contains(" at "));
        assert!(bare.to_string().contains("pipe closed"));
    }

    #[test]
    fn api_failure_predicate_splits_backend_from_local() {
        let backend = [
            CatalogError::transport("GET /store-info/3", "connection refused"),
            CatalogError::status("GET /partnership-info", 404),
            CatalogError::malformed("GET /partnership-info", "expected object"),
        ];
        for err in backend {
            assert!(err.is_api_failure(), "{err} should count as an API failure");
        }

        assert!(!CatalogError::config("missing base URL").is_api_failure());
        assert!(!CatalogError::review("submit", ReviewErrorKind::EmptyText).is_api_failure());
        assert!(!CatalogError::validation("bad page").is_api_failure());
    }

    #[test]
    fn context_layers_read_outermost_first() {
        fn fetch() -> Result<()> {
            Err(CatalogError::status("GET /partnership-info", 404))
        }

        fn refresh() -> Result<()> {
            fetch().context("refreshing listing")
        }

        fn startup() -> Result<()> {
            refresh().context("initial load")
        }

        let err = startup().unwrap_err();
        match err {
            CatalogError::Api { context, .. } => {
                assert_eq!(context, "initial load: refreshing listing: GET /partnership-info");
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[test]
    fn context_fills_an_empty_message() {
        let err: Result<()> = Err(CatalogError::config("")).context("reading config");
        match err.unwrap_err() {
            CatalogError::Config(message) => assert_eq!(message, "reading config"),
            other => panic!("expected Config error, got {other}"),
        }
    }

    #[test]
    fn with_context_runs_only_on_the_error_path() {
        let mut builds = 0;

        let ok: Result<u32> = Ok(7);
        let _ = ok.with_context(|| {
            builds += 1;
            "never built"
        });
        assert_eq!(builds, 0, "Ok must not pay for context formatting");

        let err: Result<u32> = Err(CatalogError::validation("bad slot"));
        let _ = err.with_context(|| {
            builds += 1;
            "built once"
        });
        assert_eq!(builds, 1);
    }

    #[test]
    fn context_survives_the_source_chain() {
        use std::error::Error as _;

        let err: Result<()> =
            Err(CatalogError::status("GET /store-info/3", 500)).context("opening branches");
        let err = err.unwrap_err();
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("HTTP status 500"));
    }

    #[test]
    fn option_context_produces_validation_errors() {
        let selected: Option<u64> = Some(42);
        assert_eq!(selected.context_none("no offer selected").unwrap(), 42);

        let empty: Option<u64> = None;
        match empty.context_none("no offer selected") {
            Err(CatalogError::Validation(message)) => {
                assert_eq!(message, "no offer selected");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }

        let lazy: Option<u64> = None;
        let err = lazy
            .with_context_none(|| format!("offer {} has no store", 9))
            .unwrap_err();
        assert!(err.to_string().contains("offer 9 has no store"));
    }
}
