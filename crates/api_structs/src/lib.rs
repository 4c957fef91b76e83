mod job;
mod reminder;
mod status;

pub mod dtos {
    pub use crate::job::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::job::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
