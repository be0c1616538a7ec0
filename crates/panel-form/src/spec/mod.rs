pub mod field;
pub mod form;

pub use field::{Condition, FieldDefault, FieldKind, FieldSpec};
pub use form::{FieldGroup, FormSchema};
