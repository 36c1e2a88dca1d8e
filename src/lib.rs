//! Form relay: turn HTML form submissions into rendered email messages.
//!
//! Stored form definitions hold percent-placeholder templates (see [`fwdform_template`]),
//! which are rendered with the fields of each submission. Sending the resulting
//! [`Message`]s, routing requests and persisting forms are left to the caller.

pub use fwdform_template as template;

pub mod errors;
pub use errors::*;

mod forms;
pub use forms::*;

mod message;
pub use message::*;

mod params;
pub use params::*;

pub mod settings;
pub use settings::Settings;
