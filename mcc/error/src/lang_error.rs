#[cfg(debug_assertions)]
use std::panic::Location;
use std::borrow::Cow;

use annotate_snippets::snippet::AnnotationType;
use itertools::Itertools;
use mcc_common::{CompileContext, Span};

use super::{
    snippet::AnnotationOwned, utils::display_expected_of_any, AsAnnotationSnippet, SliceOwned,
    SnippetOwned, SourceAnnotationOwned,
};

/// An error that is caused by a statement of the compiled program
///
/// Contains a more specific [`LangErrorKind`]
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct LangError {
    /// The specific error
    pub kind: LangErrorKind,
    /// The statement which caused the error
    pub span: Span,
    /// In debug mode stores the caller to provide additional
    /// debugging help
    #[cfg(debug_assertions)]
    caller: &'static Location<'static>,
}

impl LangError {
    #[cfg(not(debug_assertions))]
    pub fn new(kind: LangErrorKind, span: Span) -> Self {
        LangError { kind, span }
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    pub fn new(kind: LangErrorKind, span: Span) -> Self {
        LangError {
            kind,
            span,
            caller: Location::caller(),
        }
    }
}

impl std::fmt::Display for LangError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Specifies a specific error reason
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum LangErrorKind {
    /// Only equality comparisons are defined for this type
    UnsupportedComparison { comparison: String, typedef: String },
    /// The operation exists between these types, but cannot be lowered
    UnsupportedOperation {
        operation: String,
        lhs: String,
        rhs: String,
    },
    /// There is no lowering for these operand types
    IncompatibleOperands {
        operation: String,
        lhs: String,
        rhs: String,
    },
    /// The literal cannot be stored in or compared with a value of this type
    IncompatibleLiteral { literal: String, typedef: String },
    UnexpectedType {
        expected: Vec<String>,
        got: String,
        declared: Option<Span>,
    },
    /// The literal does not fit into the registers of this type
    LiteralOutOfRange { literal: String, typedef: String },
    InvalidPrecision { precision: u8, max: u8 },
    MissingValue { name: String },
    MissingStruct { name: String },
    MissingField {
        field: String,
        strukt: String,
        available: Vec<String>,
    },
    StructRedefinition { name: String },
}

impl std::error::Error for LangErrorKind {}

impl std::fmt::Display for LangErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LangErrorKind::UnsupportedComparison {
                comparison,
                typedef,
            } => write!(
                f,
                "Cannot compare a value of type {typedef} using '{comparison}'"
            ),
            LangErrorKind::UnsupportedOperation {
                operation,
                lhs,
                rhs,
            } => write!(
                f,
                "Operation '{operation}' between {lhs} and {rhs} is not supported"
            ),
            LangErrorKind::IncompatibleOperands {
                operation,
                lhs,
                rhs,
            } => write!(
                f,
                "Operator '{operation}' is not defined between type {lhs} and {rhs}"
            ),
            LangErrorKind::IncompatibleLiteral { literal, typedef } => {
                write!(f, "Cannot use literal {literal} with a value of type {typedef}")
            }
            LangErrorKind::UnexpectedType {
                expected: _,
                got,
                declared: _,
            } => write!(f, "Received unexpected type {got}"),
            LangErrorKind::LiteralOutOfRange { literal, typedef } => {
                write!(f, "Literal {literal} does not fit into type {typedef}")
            }
            LangErrorKind::InvalidPrecision { precision, max } => write!(
                f,
                "Decimal precision {precision} is too large (max: {max})"
            ),
            LangErrorKind::MissingValue { name } => write!(f, "Value {name} does not exist"),
            LangErrorKind::MissingStruct { name } => write!(f, "Struct {name} does not exist"),
            LangErrorKind::MissingField { field, strukt, .. } => {
                write!(f, "Field {field} of struct {strukt} does not exist")
            }
            LangErrorKind::StructRedefinition { name } => {
                write!(f, "Struct {name} is already defined")
            }
        }
    }
}

impl<'a> AsAnnotationSnippet<'a> for LangError {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a> {
        #[allow(unused_mut)]
        let LangErrorSnippet { slices, mut footer } = self.kind.get_snippet(self.span, ctx);

        #[cfg(debug_assertions)]
        footer.push(AnnotationOwned {
            annotation_type: AnnotationType::Info,
            id: None,
            label: Some(Cow::Owned(format!("Error thrown at {}", self.caller))),
        });

        SnippetOwned {
            annotation_type: AnnotationType::Error,
            id: Some("Lang".into()),
            title: self.kind.to_string().into(),
            slices,
            footer,
        }
    }
}

struct LangErrorSnippet<'a> {
    slices: Vec<SliceOwned<'a>>,
    footer: Vec<AnnotationOwned<'a>>,
}

impl LangErrorKind {
    fn label(&self) -> String {
        match self {
            LangErrorKind::UnsupportedComparison { comparison, .. } => {
                format!("only '==' and '!=' are allowed here, not '{comparison}'")
            }
            LangErrorKind::UnsupportedOperation { operation, .. } => {
                format!("'{operation}' is not supported for these operands")
            }
            LangErrorKind::IncompatibleOperands { lhs, rhs, .. } => {
                format!("{lhs} and {rhs} cannot be combined")
            }
            LangErrorKind::IncompatibleLiteral { typedef, .. } => {
                format!("expected a literal assignable to {typedef}")
            }
            LangErrorKind::UnexpectedType { expected, got, .. } => {
                format!("{}, but got {got}", display_expected_of_any(expected))
            }
            LangErrorKind::LiteralOutOfRange { .. } => "literal out of range".to_string(),
            LangErrorKind::InvalidPrecision { .. } => "invalid precision".to_string(),
            LangErrorKind::MissingValue { name } => format!("could not find '{name}'"),
            LangErrorKind::MissingStruct { name } => format!("could not find struct '{name}'"),
            LangErrorKind::MissingField { field, .. } => format!("unknown field '{field}'"),
            LangErrorKind::StructRedefinition { .. } => "defined again here".to_string(),
        }
    }

    fn get_snippet<'a>(&self, span: Span, ctx: &'a CompileContext) -> LangErrorSnippet<'a> {
        let Some(code) = ctx.input_files.find_span_code(span) else {
            return LangErrorSnippet {
                slices: Vec::new(),
                footer: Vec::new(),
            };
        };
        let origin = code.get_code().path.as_deref();
        let source = &*code.get_code().source;

        let mut slice = SliceOwned {
            origin,
            source,
            annotations: vec![SourceAnnotationOwned {
                annotation_type: AnnotationType::Error,
                label: self.label(),
                range: code.get_relative_span(span),
            }],
        };

        let mut footer = Vec::new();
        match self {
            LangErrorKind::UnexpectedType {
                declared: Some(declared),
                ..
            } => slice.annotations.push(SourceAnnotationOwned {
                annotation_type: AnnotationType::Info,
                label: "Type declared here".to_string(),
                range: code.get_relative_span(*declared),
            }),
            LangErrorKind::MissingField { available, .. } => footer.push(AnnotationOwned {
                annotation_type: AnnotationType::Help,
                id: None,
                label: Some(Cow::Owned(format!(
                    "Available fields: {}",
                    available.iter().join(", ")
                ))),
            }),
            LangErrorKind::UnsupportedOperation { .. } => footer.push(AnnotationOwned {
                annotation_type: AnnotationType::Note,
                id: None,
                label: Some(Cow::Borrowed(
                    "Dividing two decimals is not supported; convert one side to an integer",
                )),
            }),
            _ => {}
        }

        LangErrorSnippet {
            slices: vec![slice],
            footer,
        }
    }
}
