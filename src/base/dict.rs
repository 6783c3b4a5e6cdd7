use std::fmt::{Display, Formatter};

use super::name::Name;
use super::object::{Object, NULL_OBJECT};

/// Dictionary objects (like `<< /Length 42 >>`).
///
/// Entries are kept in the order of appearance. If a key is repeated, [`Dict::lookup()`] returns
/// the first occurrence.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Dict(pub(crate) Vec<(Name, Object)>);

impl Dict {
    /// Looks up for a value for a given [`Name`] key. If not present, returns a static reference
    /// to a null object.
    pub fn lookup(&self, key: &[u8]) -> &Object {
        self.0.iter()
            .find(|(name, _obj)| name == &key)
            .map(|(_name, obj)| obj)
            .unwrap_or(&NULL_OBJECT)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.0.iter().any(|(name, _obj)| name == &key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Name, Object)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<(Name, Object)> {
        self.0
    }
}

impl From<Vec<(Name, Object)>> for Dict {
    fn from(entries: Vec<(Name, Object)>) -> Dict {
        Dict(entries)
    }
}

impl Display for Dict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("<< ")?;
        for (key, val) in &self.0 {
            write!(f, "{key} {val} ")?;
        }
        f.write_str(">>")
    }
}
