use std::fmt::{Display, Formatter};

use super::*;
use super::types::*;

/// The type of a cross-reference entry (last column of the table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// `n` entry
    InUse,
    /// `f` entry
    Free,
}

impl EntryType {
    pub fn as_char(&self) -> char {
        match self {
            EntryType::InUse => 'n',
            EntryType::Free => 'f',
        }
    }
}

/// One line of a classic cross-reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XRefEntry {
    /// The first (10-digit) field: the byte offset of the object for in-use entries, the number of
    /// the next free object for free entries. See [`XRefEntry::record()`].
    pub value: u64,
    /// The second (5-digit) field.
    pub gen: ObjGen,
    /// The object number this entry describes, derived from its position within the subsection.
    pub num: ObjNum,
    pub tpe: EntryType,
}

impl XRefEntry {
    /// Interprets the entry according to its type.
    pub fn record(&self) -> Record {
        match self.tpe {
            EntryType::InUse => Record::Used { gen: self.gen, offset: self.value },
            EntryType::Free => Record::Free { gen: self.gen, next: self.value },
        }
    }
}

impl Display for XRefEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:010} {:05} {}", self.value, self.gen, self.tpe.as_char())
    }
}

/// A contiguous run of object numbers introduced by one `start count` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XRefSubsection {
    pub start: ObjNum,
    /// The declared number of entries.
    pub count: u64,
    pub entries: Vec<XRefEntry>,
}

impl XRefSubsection {
    pub fn new(start: ObjNum, count: u64) -> Self {
        Self { start, count, entries: Vec::new() }
    }

    /// One past the last object number covered (saturating).
    pub fn end(&self) -> ObjNum {
        self.start.saturating_add(self.count)
    }

    pub fn contains(&self, num: ObjNum) -> bool {
        (self.start..self.end()).contains(&num)
    }

    /// Whether the object number ranges `[start, start+count)` of `self` and `other` intersect.
    pub fn overlaps(&self, other: &XRefSubsection) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Adds an entry for the next object number in this subsection. Fails with
    /// [`ErrorKind::MalformedXRefEntry`] if that number does not fit in [`ObjNum`].
    pub fn push(&mut self, value: u64, gen: ObjGen, tpe: EntryType) -> Result<(), Error> {
        let num = self.start.checked_add(self.entries.len() as u64)
            .ok_or_else(|| Error::new(ErrorKind::MalformedXRefEntry,
                format!("object number past {} in subsection {}", ObjNum::MAX, self.start)))?;
        self.entries.push(XRefEntry { value, gen, num, tpe });
        Ok(())
    }

    pub fn get(&self, num: ObjNum) -> Option<&XRefEntry> {
        let index = usize::try_from(num.checked_sub(self.start)?).ok()?;
        self.entries.get(index)
    }
}

/// A classic cross-reference table section (`xref ... trailer << ... >>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XRefTable {
    /// Position of the `xref` keyword (relative to `%PDF`).
    pub offset: Offset,
    /// Subsections in order of appearance.
    pub subsections: Vec<XRefSubsection>,
    /// The trailer dictionary following the table, if present.
    pub trailer: Option<Dict>,
}

impl XRefTable {
    /// Commits a finished subsection. Its entry count must match the declared count, and its
    /// range must not overlap any subsection already in the table.
    pub fn push_subsection(&mut self, sub: XRefSubsection) -> Result<(), Error> {
        if sub.entries.len() as u64 != sub.count {
            return Err(Error::new(ErrorKind::SubsectionCountMismatch,
                format!("subsection {} declares {} objects, found {}", sub.start, sub.count, sub.entries.len())));
        }
        self.check_overlap(&sub)?;
        log::debug!("xref subsection {} + {}", sub.start, sub.count);
        self.subsections.push(sub);
        Ok(())
    }

    /// Checks the range of `sub` against all committed subsections.
    pub fn check_overlap(&self, sub: &XRefSubsection) -> Result<(), Error> {
        match self.subsections.iter().find(|other| other.overlaps(sub)) {
            Some(other) => Err(Error::new(ErrorKind::OverlappingXRefRanges,
                format!("[{}, {}) overlaps [{}, {})", sub.start, sub.end(), other.start, other.end()))),
            None => Ok(())
        }
    }

    /// Finds the entry for an object number: subsection lookup, then position within it.
    pub fn entry(&self, num: ObjNum) -> Option<&XRefEntry> {
        self.subsections.iter()
            .find(|sub| sub.contains(num))
            .and_then(|sub| sub.get(num))
    }

    /// All entries in order of appearance.
    pub fn entries(&self) -> impl Iterator<Item = &XRefEntry> {
        self.subsections.iter().flat_map(|sub| sub.entries.iter())
    }

    /// The `/Size` entry of the trailer, if present.
    pub fn size(&self) -> Option<ObjNum> {
        self.trailer.as_ref()?.lookup(b"Size").num_value()
    }
}


/// A single record in a cross-reference table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record {
    /// An uncompressed object (`n` entry).
    Used {
        /// The generation number.
        gen: ObjGen,
        /// Location of the object in PDF file (w.r.t. `%PDF`).
        offset: Offset,
    },
    /// An object number marked as free (`f` entry).
    Free {
        /// The generation number to be used if this object number is reused for a new object.
        gen: ObjGen,
        /// The next number in the free object list, or zero if `gen` is 65535 (`u16::MAX`).
        next: ObjNum,
    },
}

impl Default for Record {
    /// Returns `Record::Free { gen: 65535, next: 0 }.`
    fn default() -> Self {
        Record::Free { gen: 65535, next: 0 }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sub(start: ObjNum, count: u64) -> XRefSubsection {
        let mut sub = XRefSubsection::new(start, count);
        for _ in 0..count {
            sub.push(0, 0, EntryType::InUse).unwrap();
        }
        sub
    }

    #[test]
    fn test_overlaps() {
        assert!(sub(0, 10).overlaps(&sub(5, 3)));
        assert!(sub(5, 3).overlaps(&sub(0, 10)));
        assert!(sub(0, 10).overlaps(&sub(9, 5)));
        assert!(!sub(0, 10).overlaps(&sub(10, 5)));
        assert!(!sub(10, 5).overlaps(&sub(0, 10)));
        assert!(!sub(3, 0).overlaps(&sub(0, 10)));
    }

    #[test]
    fn test_push_at_numbering_limit() {
        let mut sub = XRefSubsection::new(u64::MAX, 2);
        sub.push(0, 0, EntryType::InUse).unwrap();
        assert_eq!(sub.entries[0].num, u64::MAX);
        assert_eq!(sub.push(0, 0, EntryType::InUse).unwrap_err().kind(), ErrorKind::MalformedXRefEntry);
        assert_eq!(sub.entries.len(), 1);
    }

    #[test]
    fn test_push_subsection() {
        let mut table = XRefTable::default();
        table.push_subsection(sub(0, 10)).unwrap();
        table.push_subsection(sub(10, 5)).unwrap();
        assert_eq!(table.push_subsection(sub(5, 3)).unwrap_err().kind(), ErrorKind::OverlappingXRefRanges);
        let mut short = sub(20, 2);
        short.count = 3;
        assert_eq!(table.push_subsection(short).unwrap_err().kind(), ErrorKind::SubsectionCountMismatch);
        assert_eq!(table.subsections.len(), 2);
    }

    #[test]
    fn test_entry_lookup() {
        let mut table = XRefTable::default();
        let mut first = XRefSubsection::new(0, 2);
        first.push(0, 65535, EntryType::Free).unwrap();
        first.push(17930, 0, EntryType::InUse).unwrap();
        table.push_subsection(first).unwrap();
        let mut second = XRefSubsection::new(7, 1);
        second.push(512, 2, EntryType::InUse).unwrap();
        table.push_subsection(second).unwrap();

        assert_eq!(table.entry(0).unwrap().record(), Record::Free { gen: 65535, next: 0 });
        assert_eq!(table.entry(1).unwrap().record(), Record::Used { gen: 0, offset: 17930 });
        assert_eq!(table.entry(7).unwrap().num, 7);
        assert_eq!(table.entry(7).unwrap().record(), Record::Used { gen: 2, offset: 512 });
        assert!(table.entry(2).is_none());
        assert!(table.entry(8).is_none());
        assert_eq!(table.entries().count(), 3);
        assert_eq!(format!("{}", table.entry(1).unwrap()), "0000017930 00000 n");
    }
}
