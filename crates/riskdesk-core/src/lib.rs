#![forbid(unsafe_code)]

//! Shared models, view-state and risk encoding for the riskdesk client.

pub mod domain;
pub mod encoding;
pub mod format;
pub mod model;
pub mod time;
pub mod view;

pub use domain::*;
pub use encoding::*;
pub use format::*;
pub use model::*;
pub use time::*;
pub use view::*;
