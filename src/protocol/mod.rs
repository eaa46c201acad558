//! The compiled codec table data model: the in-memory entities the compiler produces, and
//! that downstream encoders/decoders consume.

pub mod traits;

mod deprecated;
mod descriptions;
mod dialect;
mod enum_entry;
mod enum_group;
mod field;
mod mav_type;
mod message;
mod value;

pub use deprecated::Deprecated;
pub use descriptions::Descriptions;
pub use dialect::{Dialect, MergedDialect};
pub use enum_entry::{EnumEntry, EnumEntryBuilder};
pub use enum_group::{EnumGroup, EnumGroupBuilder};
pub use field::{MessageField, MessageFieldBuilder};
pub use mav_type::MavType;
pub use message::{Message, MessageBuilder, MessageId};
pub use value::{FieldValue, Value};
