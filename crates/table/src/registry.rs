use std::collections::HashMap;
use std::fmt;

/// Name of one comparison method. Becomes one indicator column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparisonId(String);

impl ComparisonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComparisonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComparisonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Anything describing a comparison. Only the identifier is retained.
pub trait Comparison {
    fn id(&self) -> &str;
}

impl Comparison for ComparisonId {
    fn id(&self) -> &str {
        &self.0
    }
}

impl Comparison for &str {
    fn id(&self) -> &str {
        self
    }
}

impl Comparison for String {
    fn id(&self) -> &str {
        self
    }
}

/// Ordered, immutable list of comparison ids. Order defines column order.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRegistry {
    ids: Vec<ComparisonId>,
    positions: HashMap<String, usize>,
}

impl ComparisonRegistry {
    pub fn from_comparisons<C: Comparison>(comparisons: &[C]) -> Self {
        Self::from_ids(comparisons.iter().map(|c| ComparisonId::new(c.id())))
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ComparisonId>,
    {
        let ids: Vec<ComparisonId> = ids.into_iter().map(Into::into).collect();
        let mut positions = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            // Duplicate ids: first registration owns the lookup
            positions.entry(id.as_str().to_string()).or_insert(i);
        }
        Self { ids, positions }
    }

    pub fn ids(&self) -> &[ComparisonId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Column position of `id`, if registered.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }
}
