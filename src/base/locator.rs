use super::*;

/// Maps object references to cross-reference [`Record`]s.
pub trait Locator {
    fn locate(&self, objref: &ObjRef) -> Option<Record>;
}

impl Locator for () {
    fn locate(&self, _objref: &ObjRef) -> Option<Record> {
        None
    }
}

impl Locator for XRefTable {
    /// Returns `None` for object numbers not covered by the table. An in-use entry whose generation
    /// differs from the requested one is reported as free.
    fn locate(&self, objref: &ObjRef) -> Option<Record> {
        match self.entry(objref.num)?.record() {
            rec @ Record::Used{gen, ..} if gen == objref.gen => Some(rec),
            rec @ Record::Free{..} => Some(rec),
            _ => Some(Record::default())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let mut table = XRefTable::default();
        let mut sub = XRefSubsection::new(0, 3);
        sub.push(0, 65535, EntryType::Free).unwrap();
        sub.push(15, 0, EntryType::InUse).unwrap();
        sub.push(0, 1, EntryType::Free).unwrap();
        table.push_subsection(sub).unwrap();

        assert_eq!(table.locate(&ObjRef { num: 1, gen: 0 }), Some(Record::Used { gen: 0, offset: 15 }));
        assert_eq!(table.locate(&ObjRef { num: 1, gen: 1 }), Some(Record::default()));
        assert_eq!(table.locate(&ObjRef { num: 2, gen: 0 }), Some(Record::Free { gen: 1, next: 0 }));
        assert_eq!(table.locate(&ObjRef { num: 3, gen: 0 }), None);
        assert_eq!(().locate(&ObjRef { num: 1, gen: 0 }), None);
    }
}
