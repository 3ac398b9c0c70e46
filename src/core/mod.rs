pub mod naming;
pub mod registry;
pub mod text_format;

pub use crate::domain::model::{Client, ClientCategory, ServiceKind, ServiceRequest, Timestamp};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
