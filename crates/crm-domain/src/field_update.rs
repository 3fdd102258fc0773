/// Represents a field update operation for partial updates
///
/// Three states for an optional field:
/// - `NoChange`: Field keeps its existing value
/// - `Set(value)`: Field is updated to the provided value
/// - `Clear`: Field is cleared (set to None)
///
/// # Example
///
/// ```
/// use crm_domain::FieldUpdate;
///
/// let mut end_date = Some(3);
/// FieldUpdate::Set(5).apply_to(&mut end_date);
/// assert_eq!(end_date, Some(5));
///
/// FieldUpdate::<i32>::Clear.apply_to(&mut end_date);
/// assert_eq!(end_date, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    /// Do not modify this field (keep existing value)
    #[default]
    NoChange,
    /// Set the field to the provided value
    Set(T),
    /// Clear the field (set to None)
    Clear,
}

impl<T> FieldUpdate<T> {
    /// Apply this update to an optional field
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some(value)` becomes `Set(value)`, `None` becomes `Clear`.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
