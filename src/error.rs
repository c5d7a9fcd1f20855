use thiserror::Error;

/// Structured error context for configuration and client-side failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key or request field that caused the error (e.g., "api_key", "base_url")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "dedup_cache")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse error category, one per variant family of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Authentication,
    Validation,
    NotFound,
    RateLimit,
    Server,
    /// Base kind: unclassified 4xx responses and client-side failures.
    Generic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Generic => "generic",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the Settler client.
///
/// Every variant carries a human readable message and the HTTP status code of
/// the response that produced it (`0` when no response was received).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {message}")]
    Network { message: String, status_code: u16 },

    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    #[error("Server error ({status_code}): {message}")]
    Server {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    /// Any other error response (>= 400) the classification table does not name.
    #[error("API error ({status_code}): {message}")]
    Api {
        message: String,
        status_code: u16,
        error_type: Option<String>,
    },

    /// An identical mutating request was already sent within the dedup window.
    #[error("Duplicate request detected: {method} {url}")]
    DuplicateRequest { method: String, url: String },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Runtime error: {message}{}", format_context(.context))]
    Runtime {
        message: String,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a network error (no usable response was received).
    pub fn network(msg: impl Into<String>, status_code: u16) -> Self {
        Error::Network {
            message: msg.into(),
            status_code,
        }
    }

    /// Create a generic API error carrying a response status.
    pub fn api(msg: impl Into<String>, status_code: u16) -> Self {
        Error::Api {
            message: msg.into(),
            status_code,
            error_type: None,
        }
    }

    /// Create a new runtime error with structured context
    pub fn runtime_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Runtime {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Network { .. } => ErrorKind::Network,
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::Server { .. } => ErrorKind::Server,
            Error::Api { .. }
            | Error::DuplicateRequest { .. }
            | Error::Configuration { .. }
            | Error::Runtime { .. } => ErrorKind::Generic,
        }
    }

    /// The message without the kind prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            Error::Network { message, .. }
            | Error::Authentication { message, .. }
            | Error::Validation { message, .. }
            | Error::NotFound { message, .. }
            | Error::RateLimit { message, .. }
            | Error::Server { message, .. }
            | Error::Api { message, .. }
            | Error::Configuration { message, .. }
            | Error::Runtime { message, .. } => message,
            Error::DuplicateRequest { .. } => "Duplicate request detected",
        }
    }

    /// HTTP status of the response behind this error, `0` if none was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Network { status_code, .. }
            | Error::Authentication { status_code, .. }
            | Error::Validation { status_code, .. }
            | Error::NotFound { status_code, .. }
            | Error::RateLimit { status_code, .. }
            | Error::Server { status_code, .. }
            | Error::Api { status_code, .. } => *status_code,
            Error::DuplicateRequest { .. } | Error::Configuration { .. } | Error::Runtime { .. } => 0,
        }
    }

    /// Error type label reported by the server (`error` field of the body), if any.
    pub fn error_type(&self) -> Option<&str> {
        match self {
            Error::Authentication { error_type, .. }
            | Error::Validation { error_type, .. }
            | Error::NotFound { error_type, .. }
            | Error::RateLimit { error_type, .. }
            | Error::Server { error_type, .. }
            | Error::Api { error_type, .. } => error_type.as_deref(),
            _ => None,
        }
    }

    /// Whether repeating the same call later could plausibly succeed.
    ///
    /// Informational only: by the time an error reaches the caller the
    /// client has already spent its retry budget.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network { .. } | Error::RateLimit { .. } => true,
            Error::Server { status_code, .. } => {
                matches!(status_code, 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Runtime { context, .. } => Some(context),
            _ => None,
        }
    }
}
