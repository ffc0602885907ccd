/// A span which uniquely specifies a span of characters across all input files
///
/// The start is an offset into the concatenation of every file in [`crate::InputFiles`].
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Creates a new `Span` from the starting character and its length
    pub fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    /// Returns the start of this span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns the length of this span
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Constructs a new span which ranges from the start of this span to the end of the other span
    pub fn until(&self, other: Span) -> Self {
        assert!(
            self.start <= other.end(),
            "Span length must not be negative"
        );
        Span::new(self.start, other.end() - self.start)
    }

    /// Returns this span shifted to the left by `offset`
    pub fn relative_to(&self, offset: usize) -> Self {
        Span::new(self.start - offset, self.len)
    }

    /// Returns a tuple of the format (`start_index`, `end_index`)
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end())
    }
}
