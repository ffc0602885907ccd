use crate::Span;

pub type CodeId = usize;

/// A single source file
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Code {
    pub source: Box<str>,
    pub path: Option<String>,
}

/// A file together with its position in the global offset space
#[derive(Debug, Clone)]
pub struct CodeRef<'a> {
    code: &'a Code,
    pub id: CodeId,
    pub offset: usize,
}

impl<'a> CodeRef<'a> {
    pub fn get_code(&self) -> &'a Code {
        self.code
    }

    /// Converts a global span into a span relative to the start of this file
    pub fn get_relative_span(&self, span: Span) -> Span {
        span.relative_to(self.offset)
    }

    /// Returns the one-based line on which `span` starts
    pub fn line_of(&self, span: Span) -> usize {
        let relative = self.get_relative_span(span).start();
        self.code.source[..relative.min(self.code.source.len())]
            .matches('\n')
            .count()
            + 1
    }
}

/// Stores every file that takes part in a compilation
///
/// Every file occupies a distinct range of offsets, so a [`Span`] alone identifies its file.
#[derive(Debug, Default)]
pub struct InputFiles {
    files: Vec<(Code, usize)>,
    total_len: usize,
}

impl InputFiles {
    pub fn add_input(&mut self, code: Code) -> CodeId {
        let offset = self.total_len;
        self.total_len += code.source.len();
        self.files.push((code, offset));
        self.files.len() - 1
    }

    pub fn get_input(&self, id: CodeId) -> &Code {
        &self.files[id].0
    }

    pub fn get_code_ref(&self, id: CodeId) -> CodeRef {
        let (code, offset) = &self.files[id];
        CodeRef {
            code,
            id,
            offset: *offset,
        }
    }

    /// Returns the file that contains this span, if any
    pub fn find_span_code(&self, span: Span) -> Option<CodeRef> {
        self.files
            .iter()
            .enumerate()
            .rev()
            .find(|(_, (_, offset))| *offset <= span.start())
            .map(|(id, (code, offset))| CodeRef {
                code,
                id,
                offset: *offset,
            })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
