//! Compilation error handling
//!
//! The lowering engine never sees source code, so it reports [`LowerError`]s.
//! The caller that knows the originating statement turns them into a [`CompileError`]
//! with [`LowerError::at`], which can then be rendered as an annotated snippet.
use std::fmt;
use std::fmt::{Display, Formatter};

use annotate_snippets::display_list::DisplayList;
use mcc_common::{CompileContext, Span};

pub use internal_error::InternalError;
pub use lang_error::{LangError, LangErrorKind};
pub use snippet::{AnnotationOwned, SliceOwned, SnippetOwned, SourceAnnotationOwned};

mod internal_error;
mod lang_error;
mod snippet;
mod utils;

/// Used to determine whether the error messages should use console colors
/// Or be plain text
pub const COLORED: bool = cfg!(feature = "colored_errors");

/// The result type used by the compiler pipeline
pub type Result<T> = std::result::Result<T, CompileError>;

/// The result type of the lowering engine, which has no span information
pub type LowerResult<T> = std::result::Result<T, LowerError>;

/// A result type which allows quick error throwing since no span and other boileplate is needed
pub type LangResult<T> = std::result::Result<T, LangErrorKind>;

pub trait AsAnnotationSnippet<'a> {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a>;

    fn to_string(&self, ctx: &'a CompileContext) -> String {
        let snippet = self.as_annotation_snippet(ctx);
        let display_list = DisplayList::from(snippet.as_snippet());
        display_list.to_string()
    }
}

/// A Compile Error
///
/// Either an error caused by the user's program, which points at a statement,
/// or a broken invariant inside the compiler.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum CompileError {
    /// An error which is caused by a specific statement
    LangError(LangError),
    /// An error which no statement can be blamed for
    Internal(InternalError),
}

impl CompileError {
    pub fn format(&self, ctx: &CompileContext) -> String {
        <Self as AsAnnotationSnippet>::to_string(self, ctx)
    }
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::LangError(lang_error) => write!(f, "Compile error: {lang_error}"),
            CompileError::Internal(internal) => write!(f, "Internal compiler error: {internal}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LangError> for CompileError {
    fn from(lang_error: LangError) -> Self {
        CompileError::LangError(lang_error)
    }
}

impl From<InternalError> for CompileError {
    fn from(internal: InternalError) -> Self {
        CompileError::Internal(internal)
    }
}

impl<'a> AsAnnotationSnippet<'a> for CompileError {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a> {
        match self {
            CompileError::LangError(lang_error) => lang_error.as_annotation_snippet(ctx),
            CompileError::Internal(internal) => internal.as_annotation_snippet(ctx),
        }
    }
}

/// An error produced while lowering, before it is attached to a statement
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum LowerError {
    Lang(LangErrorKind),
    Internal(InternalError),
}

impl LowerError {
    /// Attaches the originating statement to this error
    ///
    /// Internal errors stay internal, since the statement is not at fault.
    #[track_caller]
    pub fn at(self, span: Span) -> CompileError {
        match self {
            LowerError::Lang(kind) => LangError::new(kind, span).into(),
            LowerError::Internal(internal) => internal.into(),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, LowerError::Internal(_))
    }
}

impl Display for LowerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::Lang(kind) => write!(f, "{kind}"),
            LowerError::Internal(internal) => write!(f, "{internal}"),
        }
    }
}

impl std::error::Error for LowerError {}

impl From<LangErrorKind> for LowerError {
    fn from(kind: LangErrorKind) -> Self {
        LowerError::Lang(kind)
    }
}

impl From<InternalError> for LowerError {
    fn from(internal: InternalError) -> Self {
        LowerError::Internal(internal)
    }
}

/// Extension for attaching a statement span to a [`LowerResult`]
pub trait WithSpan<T> {
    fn at(self, span: Span) -> Result<T>;
}

impl<T> WithSpan<T> for LowerResult<T> {
    #[track_caller]
    fn at(self, span: Span) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.at(span)),
        }
    }
}
