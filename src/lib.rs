//! Deterministic host for the weather client's `sq-*` page controls.
//!
//! A [`Page`] parses HTML into an in-memory DOM, attaches the three control
//! bindings (navigation buttons, row adders and row removers) and lets callers
//! drive it with simulated clicks and typing:
//!
//! ```
//! use sq_controls::Page;
//!
//! let mut page = Page::from_html(
//!     r#"<div id="events"></div><button class="sq-add-button">Add</button>"#,
//! )?;
//! page.click(".sq-add-button")?;
//! assert_eq!(page.count("#events > .sq-input")?, 1);
//! # Ok::<(), sq_controls::Error>(())
//! ```

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;

mod behaviors;
mod config;
mod dom;
mod events;
mod forms;
mod html;
mod location;
mod page;
mod selector;
mod trace;

pub use config::{FaultPolicy, Markers, PageBuilder};
pub use forms::FormValues;
pub use location::LocationNavigation;
pub use page::Page;

pub(crate) use dom::*;
pub(crate) use events::*;
pub(crate) use html::*;
pub(crate) use location::*;
pub(crate) use selector::*;
pub(crate) use trace::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    Dom(String),
    Config(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    MissingDataUrl {
        button: String,
    },
    MissingContainer {
        button: String,
    },
    BrokenPairing {
        button: String,
        previous: Option<String>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::Dom(msg) => write!(f, "dom error: {msg}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::MissingDataUrl { button } => {
                write!(f, "navigation button {button} has no url data attribute")
            }
            Self::MissingContainer { button } => {
                write!(f, "add button {button} has no preceding container")
            }
            Self::BrokenPairing { button, previous } => match previous {
                Some(previous) => write!(
                    f,
                    "delete button {button} is preceded by {previous}, not a row input"
                ),
                None => write!(f, "delete button {button} has no preceding row input"),
            },
        }
    }
}

impl StdError for Error {}
