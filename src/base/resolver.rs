use super::*;

/// This trait provides means of resolving indirect object references ([`ObjRef`]) into the
/// actual [`Object`]s.
pub trait Resolver {
    /// Resolves an [`ObjRef`] into an owned [`Object`].
    fn resolve_ref(&self, objref: &ObjRef) -> Result<Object, Error>;

    /// For a [`Value::Ref`], calls [`Self::resolve_ref()`], otherwise returns `obj` unchanged.
    fn resolve_obj(&self, obj: Object) -> Result<Object, Error> {
        match obj.value {
            Value::Ref(objref) => self.resolve_ref(&objref),
            _ => Ok(obj)
        }
    }
}

impl Resolver for () {
    fn resolve_ref(&self, _: &ObjRef) -> Result<Object, Error> {
        Err(Error::new(ErrorKind::NotReady, "no resolver provided for resolving object references"))
    }
}
