/// A detached, editable view of some fields of an entity.
///
/// Views copy the fields out with `from_entity`, let the user edit the copy,
/// and write it back with `apply_to` on save. Cancelling just drops the copy.
pub trait Editable<T>: Sized {
    fn from_entity(entity: &T) -> Self;
    fn apply_to(self, entity: &mut T);
}
