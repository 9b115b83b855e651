//! Path segment classification

/// One segment of a path expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'p> {
    /// `#` or `#v`: every element or value
    Values,
    /// `#k`: every index or key
    Keys,
    /// `^regex`: mapping keys matching the pattern, anchor included
    Pattern(&'p str),
    /// A mapping key, or a sequence index if it parses as one
    Literal(&'p str),
}

impl<'p> Segment<'p> {
    pub fn parse(raw: &'p str) -> Self {
        match raw {
            "#" | "#v" => Segment::Values,
            "#k" => Segment::Keys,
            _ if raw.starts_with('^') => Segment::Pattern(raw),
            _ => Segment::Literal(raw),
        }
    }

    /// Sequence index named by the segment. Negative and non-numeric
    /// segments name no element.
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Literal(raw) => raw.parse::<i64>().ok().and_then(|i| usize::try_from(i).ok()),
            _ => None,
        }
    }
}
