pub mod grouping;
pub mod validation;

pub use grouping::{group, slot_issues};
pub use validation::{
    validate, validate_with, PhonePolicy, RowSkip, SkipReason, MIN_STRICT_PHONE_DIGITS,
};
