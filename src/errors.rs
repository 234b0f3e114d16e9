//! Error types with diagnostics using miette
//!
//! Rendering itself degrades instead of failing; the only render-time error
//! is running out of memory for the canvas. Scene construction and the
//! strict transform parser have their own enums.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::group::GroupId;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (attribute name, filename or "<transform>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Transform list errors
// ============================================================================

/// Errors reported by [`TransformChain::try_parse`](crate::TransformChain::try_parse).
///
/// The lenient parser never produces these: it skips what it does not
/// understand.
#[derive(Error, Diagnostic, Debug)]
pub enum TransformError {
    #[error("malformed transform list")]
    #[diagnostic(code(sceneraster::transform::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("cannot parse from here")]
        span: SourceSpan,
    },

    #[error("unknown transform function: {name}")]
    #[diagnostic(
        code(sceneraster::transform::unknown_function),
        help("expected one of translate, rotate, scale, matrix")
    )]
    UnknownFunction {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown function")]
        span: SourceSpan,
    },

    #[error("{name}() takes {expected} arguments, got {found}")]
    #[diagnostic(code(sceneraster::transform::arity))]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("wrong number of arguments")]
        span: SourceSpan,
    },

    #[error("stray input in transform list")]
    #[diagnostic(code(sceneraster::transform::stray_input))]
    StrayInput {
        #[source_code]
        src: NamedSource<String>,
        #[label("not part of any transform")]
        span: SourceSpan,
    },
}

// ============================================================================
// Scene construction errors
// ============================================================================

/// Errors raised while building a [`Document`](crate::Document).
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("group {0} does not exist")]
    #[diagnostic(
        code(sceneraster::scene::unknown_group),
        help("a group can only be nested inside a group created before it")
    )]
    UnknownGroup(GroupId),

    #[error("end_group called with no open group")]
    #[diagnostic(code(sceneraster::scene::no_open_group))]
    NoOpenGroup,
}

// ============================================================================
// Render errors
// ============================================================================

/// Errors surfaced by [`render`](crate::render).
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} canvas")]
    #[diagnostic(
        code(sceneraster::render::allocation),
        help("render to a smaller target size")
    )]
    Allocation { width: u32, height: u32 },
}
