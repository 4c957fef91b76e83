mod date;
mod frequency;
mod reminder;
mod shared;
mod user;

pub use date::{
    format_datetime, parse_datetime, DateInput, DateParseError, DateTimeConfig, DATE_FORMATS,
};
pub use frequency::{FrequencyError, ReminderFrequency};
pub use reminder::{Reminder, ReminderAttributes, ReminderRequest, ValidationError};
pub use shared::entity::{InvalidIDError, ID};
pub use user::UserDetails;
