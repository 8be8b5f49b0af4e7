use std::fmt;

use smol_str::SmolStr;

use super::constants::NAMESPACE_SEPARATOR;

/// A `::`-joined path identifying a symbol by its owning extension and,
/// optionally, behavior and member.
///
/// `MyExtension::MyBehavior::MyMethod` has three segments. Instruction type
/// identifiers use exactly this form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<SmolStr>,
}

impl QualifiedName {
    /// Build a qualified name from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `A::B::C`. Returns `None` for empty input or empty segments.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let segments: Vec<SmolStr> = text.split(NAMESPACE_SEPARATOR).map(SmolStr::new).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The leading segment (the owning extension).
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(SmolStr::as_str)
    }

    /// The trailing segment (the member name).
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(SmolStr::as_str)
    }

    /// Whether the leading segments are exactly `prefix`.
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.segments.len()
            && self.segments.iter().zip(prefix).all(|(s, p)| s == p)
    }

    /// Whether every segment equals `parts`, in order.
    pub fn is(&self, parts: &[&str]) -> bool {
        self.segments.len() == parts.len() && self.starts_with(parts)
    }

    /// A copy with the segment at `index` replaced.
    pub fn with_segment(&self, index: usize, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        if let Some(slot) = segments.get_mut(index) {
            *slot = SmolStr::new(segment);
        }
        Self { segments }
    }

    /// A copy with the trailing segment replaced.
    pub fn with_last(&self, segment: &str) -> Self {
        match self.segments.len() {
            0 => self.clone(),
            len => self.with_segment(len - 1, segment),
        }
    }

    /// The name without its trailing segment (`A::B` for `A::B::C`).
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Append a segment.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(SmolStr::new(segment));
        Self { segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(NAMESPACE_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}
