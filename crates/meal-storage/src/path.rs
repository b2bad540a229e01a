//! Dotted record paths
//!
//! Provides [`RecordPath`] for addressing a persisted record and the fields nested inside it.

use serde_json::{Map, Value};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path to a record or to a field nested inside one
///
/// The first segment names the persisted record, the remaining segments walk
/// the decoded JSON tree of that record.
///
/// # Examples
/// - `weeklyMenus` → the whole menus record
/// - `weeklyMenus.2025-W20.0.lunch` → Monday lunch of week 20
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordPath(Vec<String>);

impl RecordPath {
    /// Path addressing a whole record
    #[inline]
    #[must_use]
    pub fn record(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Name of the record this path lives in
    #[inline]
    #[must_use]
    pub fn record_name(&self) -> &str {
        &self.0[0]
    }

    /// Segments below the record name
    #[inline]
    #[must_use]
    pub fn nested(&self) -> &[String] {
        &self.0[1..]
    }

    /// Whether the path addresses the record itself
    #[inline]
    #[must_use]
    pub fn is_record(&self) -> bool {
        self.0.len() == 1
    }

    /// All segments including the record name
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Append a segment, returning new path
    ///
    /// Dots inside `segment` are kept verbatim; the segment is never re-split.
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Parent path, `None` for a record path
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_record() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Find the addressed value inside a decoded record
    ///
    /// Object fields are matched by key; array elements by decimal index.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.nested().iter().try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Write `value` at the addressed position inside a decoded record
    ///
    /// Missing intermediate objects are created. An intermediate that is not
    /// an object (or an in-range array slot) is replaced by an empty object.
    pub fn assign(&self, root: &mut Value, value: Value) {
        let Some((last, parents)) = self.nested().split_last() else {
            *root = value;
            return;
        };

        let mut current = root;
        for segment in parents {
            current = child_slot(current, segment);
        }

        let index = array_index(current, last);
        match (current, index) {
            (Value::Array(items), Some(i)) => items[i] = value,
            (current, _) => {
                ensure_object(current).insert(last.clone(), value);
            }
        }
    }
}

/// In-range array index named by `segment`, if `value` is an array
fn array_index(value: &Value, segment: &str) -> Option<usize> {
    match value {
        Value::Array(items) => segment.parse::<usize>().ok().filter(|i| *i < items.len()),
        _ => None,
    }
}

/// Descend one level, creating an object slot when needed
fn child_slot<'a>(current: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = array_index(current, segment);
    match (current, index) {
        (Value::Array(items), Some(i)) => &mut items[i],
        (current, _) => {
            let slot = ensure_object(current)
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() && !slot.is_array() {
                *slot = Value::Object(Map::new());
            }
            slot
        }
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

impl Display for RecordPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for RecordPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<String> = s
            .split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(PathError::EmptySegment(s.to_string()))
                } else {
                    Ok(seg.to_string())
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self(segments))
    }
}

/// Errors related to record paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No record name given
    #[error("record path is empty")]
    Empty,

    /// `a..b`, leading or trailing dot
    #[error("record path '{0}' contains an empty segment")]
    EmptySegment(String),
}
