pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ClientConfig;

pub use crate::core::coerce::{num_from_string, set_value};
pub use crate::core::cookies::{clear_and_redirect, delete_all_cookies};
pub use crate::core::datetime::{datetime_input_value, local_datetime_input_value};
pub use crate::core::delete::{ClickOutcome, DeleteBinding};
pub use crate::core::form::{FormBinding, SubmitOutcome};
pub use crate::core::pending::PendingResponse;
pub use utils::error::{FormwireError, Result};
