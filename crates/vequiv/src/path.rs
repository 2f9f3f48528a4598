//! Locations of sub-values inside nested aggregates.

use std::fmt;

/// One step into an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Array element.
    Index(usize),
    /// Tuple member.
    Member(usize),
}

/// Path from the root value, printed as `$`, `$[2]`, `$.1[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut child = self.clone();
        child.push(segment);
        child
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Index(i) => write!(f, "[{i}]")?,
                PathSegment::Member(i) => write!(f, ".{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ValuePath::root().to_string(), "$");
        let path = ValuePath::root()
            .child(PathSegment::Member(1))
            .child(PathSegment::Index(0));
        assert_eq!(path.to_string(), "$.1[0]");
    }

    #[test]
    fn test_push_pop() {
        let mut path = ValuePath::root();
        path.push(PathSegment::Index(3));
        assert!(!path.is_root());
        assert_eq!(path.pop(), Some(PathSegment::Index(3)));
        assert!(path.is_root());
        assert_eq!(path.pop(), None);
    }
}
