use std::fmt;

use annotate_snippets::snippet::AnnotationType;
use mcc_common::CompileContext;

use super::{AsAnnotationSnippet, SnippetOwned};

/// A broken invariant inside the compiler
///
/// These errors are not tied to any statement.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum InternalError {
    /// A temp register stack was released while it was already empty
    TempUnderflow { stack: String },
    /// A temp register was released while registers acquired after it were still held
    TempReleaseOrder {
        name: String,
        depth: usize,
        expected: usize,
    },
    /// A temp state was popped, but none was pushed
    EmptyTempStateStack,
    DivideByZero { value: String },
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::TempUnderflow { stack } => {
                write!(f, "Released a {stack} temp register, but none was acquired")
            }
            InternalError::TempReleaseOrder {
                name,
                depth,
                expected,
            } => write!(
                f,
                "Temp register {name} released out of order (depth {depth}, expected {expected})"
            ),
            InternalError::EmptyTempStateStack => {
                write!(f, "Popped a temp state, but no state was pushed")
            }
            InternalError::DivideByZero { value } => {
                write!(f, "Division of {value} by the literal zero")
            }
        }
    }
}

impl std::error::Error for InternalError {}

impl<'a> AsAnnotationSnippet<'a> for InternalError {
    fn as_annotation_snippet(&self, _ctx: &'a CompileContext) -> SnippetOwned<'a> {
        SnippetOwned {
            annotation_type: AnnotationType::Error,
            id: Some("Internal".into()),
            title: ToString::to_string(self).into(),
            slices: Vec::new(),
            footer: Vec::new(),
        }
    }
}
