//! quickcalc - a quick calculator for dmenu-style launchers.
//!
//! Type an expression into rofi (or wofi, fuzzel, dmenu), get the result on
//! the clipboard, and pick earlier results from a short history to copy them
//! again.
//!
//! # Architecture
//!
//! - [`services::calculator`] - preprocessing, parsing and evaluating expressions
//! - [`services::history`] - bounded, deduplicated history persisted to a text file
//! - [`platform`] - chooser, clipboard and notification collaborators
//! - [`app`] - the interaction loop tying them together
//! - [`config`] - configuration loading and management
//!
//! # Example
//!
//! ```
//! use quickcalc::services::calculator;
//!
//! assert_eq!(calculator::calculate("7(3+2)").as_deref(), Some("35"));
//! assert_eq!(calculator::calculate("1/3").as_deref(), Some("0.3333333333"));
//! ```

pub mod app;
pub mod config;
pub mod platform;
pub mod services;

mod error;

// Re-export commonly used types for convenience
pub use app::{Action, App, Outcome};
pub use config::Config;
pub use error::{CalcError, CalcResult};
pub use platform::{Platform, Selection, Urgency};
pub use services::HistoryStore;
