//! Error types for sitemap building and serving.

use std::io;
use thiserror::Error;

/// Errors raised while building or serving sitemap documents.
///
/// The variants fall into the classes the crate distinguishes:
///
/// - [`SitemapError::Closed`] and [`SitemapError::ForeignNamespace`] are
///   protocol violations. They indicate a programming error in the caller
///   and are not meant to be recovered from.
/// - [`SitemapError::MissingField`] is a hard validation failure: an
///   extension record was configured in a way that has no valid rendering
///   at all (as opposed to a merely incomplete record, which is skipped
///   silently and never surfaces).
/// - [`SitemapError::Write`] wraps stream failures that happen while
///   records are being serialized.
/// - [`SitemapError::Io`] carries the raw error from the final flush in
///   `close()`, where no recovery is possible and wrapping would only
///   obscure the cause.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A mutating operation was called on an already closed document.
    #[error("sitemap document already closed")]
    Closed,

    /// A namespace other than the one the writer is bound to was used.
    #[error("namespace `{given}` is not available to this extension (bound to `{bound}`)")]
    ForeignNamespace { given: String, bound: String },

    /// A required field combination is missing and the record cannot be
    /// rendered in any valid form.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An underlying stream failure while writing a record.
    #[error("failed to write sitemap XML")]
    Write(#[source] io::Error),

    /// A raw I/O failure from releasing the underlying stream on close.
    #[error(transparent)]
    Io(#[from] io::Error),
}
