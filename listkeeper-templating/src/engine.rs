//! Template engine holding the parsed page templates

use crate::error::{Result, TemplatingError};
use crate::views::{LayoutView, View};
use listkeeper_todo::Flash;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the template every page body is wrapped in
pub const LAYOUT_TEMPLATE: &str = "layout";

/// Built-in templates, compiled into the binary
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (LAYOUT_TEMPLATE, include_str!("../templates/layout.liquid")),
    ("lists", include_str!("../templates/lists.liquid")),
    ("new_list", include_str!("../templates/new_list.liquid")),
    ("edit_list", include_str!("../templates/edit_list.liquid")),
    ("list", include_str!("../templates/list.liquid")),
];

/// Parses templates once and renders pages from view models
pub struct TemplateEngine {
    templates: HashMap<String, liquid::Template>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.templates.keys().collect();
        names.sort();
        f.debug_struct("TemplateEngine")
            .field("templates", &names)
            .finish()
    }
}

impl TemplateEngine {
    /// Create an engine with the built-in page templates
    pub fn new() -> Result<Self> {
        Self::with_templates(BUILTIN_TEMPLATES.iter().copied())
    }

    /// Create an engine from `(name, source)` pairs
    ///
    /// A `layout` template must be among them for [`TemplateEngine::render_page`]
    /// to work.
    pub fn with_templates<'a>(sources: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplatingError::Parse {
                name: "<parser>".to_string(),
                message: e.to_string(),
            })?;

        let mut templates = HashMap::new();
        for (name, source) in sources {
            let template = parser.parse(source).map_err(|e| TemplatingError::Parse {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            tracing::trace!("Parsed template '{}'", name);
            templates.insert(name.to_string(), template);
        }

        Ok(Self { templates })
    }

    /// Whether a template is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render a single template with any serializable value as its variables
    pub fn render_template<T: Serialize>(&self, name: &str, vars: &T) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| TemplatingError::UnknownTemplate(name.to_string()))?;
        let globals =
            liquid::to_object(vars).map_err(|e| TemplatingError::Variables(e.to_string()))?;

        template
            .render(&globals)
            .map_err(|e| TemplatingError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Render a full page: the view's body inside the layout
    pub fn render_page<V: View>(&self, view: &V, flash: Flash) -> Result<String> {
        let content = self.render_template(V::TEMPLATE, view)?;
        let layout = LayoutView::new(view, flash, content);
        self.render_template(LAYOUT_TEMPLATE, &layout)
    }
}
