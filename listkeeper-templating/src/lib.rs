//! HTML rendering for Listkeeper
//!
//! Pages are Liquid templates compiled into the binary. Handlers build a view
//! model implementing [`View`] and hand it to [`TemplateEngine::render_page`],
//! which renders the page body and wraps it in the shared layout together with
//! any pending flash messages.
//!
//! ```
//! use listkeeper_templating::{ListsView, TemplateEngine};
//! use listkeeper_todo::{Flash, Lists};
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_page(&ListsView::new(&Lists::new()), Flash::default())?;
//! assert!(html.contains("You have no lists"));
//! # Ok::<(), listkeeper_templating::TemplatingError>(())
//! ```

mod engine;
mod error;
pub mod views;

pub use engine::{TemplateEngine, LAYOUT_TEMPLATE};
pub use error::{Result, TemplatingError};
pub use views::{
    EditListView, HeaderLink, LayoutView, ListSummary, ListView, ListsView, NewListView, TodoRow,
    View,
};
