//! The rendering context: variable store, bulk assignment, and dispatch.

use std::panic::Location;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::engine::{TemplateEngine, TeraEngine};
use crate::error::{Error, Result};
use crate::response::HttpResponse;
use crate::vars::{VarSource, VariableStore};

/// Suffix appended to template identifiers that carry no extension.
pub const TEMPLATE_EXTENSION: &str = ".tera";

/// Binds a template engine to a named variable store and dispatches
/// rendering requests, either to a plain string or into an HTTP response
/// body.
///
/// Variables accumulate across calls: every render merges its bulk
/// argument into the store first and then hands the full store to the
/// engine. The context is single-threaded; sharing one across concurrent
/// call sites requires external synchronization.
pub struct TemplateContext<E = TeraEngine> {
    engine: E,
    vars: VariableStore,
}

impl<E: TemplateEngine> TemplateContext<E> {
    /// Create a context with an empty variable store.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            vars: VariableStore::new(),
        }
    }

    /// Fetch a variable. Reading an unset name is not an error: it returns
    /// `None` and emits a warning carrying the caller's source location.
    #[track_caller]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let value = self.vars.get(name);
        if value.is_none() {
            let caller = Location::caller();
            warn!(
                variable = name,
                caller = %caller,
                "read of undefined template variable"
            );
        }
        value
    }

    /// Set a variable, overwriting any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Whether a variable is currently set.
    pub fn has(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Remove a variable. Removing an unset name is a no-op.
    pub fn remove(&mut self, name: &str) {
        self.vars.shift_remove(name);
    }

    /// The full variable store as it stands at call time.
    pub fn vars(&self) -> &VariableStore {
        &self.vars
    }

    /// Merge a bulk-assignment source into the store: new names are added,
    /// existing names overwritten, unrelated names preserved.
    ///
    /// Normalization happens before any mutation, so a rejected source
    /// leaves the store exactly as it was.
    pub fn merge_from(&mut self, source: impl Into<VarSource>) -> Result<&mut Self> {
        let normalized = source.into().normalize()?;
        self.vars.extend(normalized);
        Ok(self)
    }

    /// Merge `vars`, then render the template to a string with the full
    /// current store. Identifiers whose final path segment has no
    /// extension get [`TEMPLATE_EXTENSION`] appended.
    pub fn render_to_string(
        &mut self,
        template_path: &str,
        vars: impl Into<VarSource>,
    ) -> Result<String> {
        self.merge_from(vars)?;
        let template_path = append_extension_if_needed(template_path);
        debug!(
            template = %template_path,
            vars = self.vars.len(),
            "rendering template"
        );
        self.engine.render_to_string(&template_path, &self.vars)
    }

    /// Render a template and append the result to `response`'s body,
    /// returning the response.
    pub fn render_to_response<R: HttpResponse>(
        &mut self,
        mut response: R,
        template_path: &str,
        vars: impl Into<VarSource>,
    ) -> Result<R> {
        let rendered = self.render_to_string(template_path, vars)?;
        response.write_body(&rendered);
        Ok(response)
    }

    /// Single entry point over both output modes. Requests carrying a
    /// response forward to [`render_to_response`](Self::render_to_response),
    /// requests carrying only a template to
    /// [`render_to_string`](Self::render_to_string), and empty requests are
    /// rejected.
    pub fn render(&mut self, args: RenderArgs) -> Result<Rendered> {
        match args {
            RenderArgs::Response {
                response,
                template_path,
                vars,
            } => self
                .render_to_response(response, &template_path, vars)
                .map(Rendered::Response),
            RenderArgs::Template {
                template_path,
                vars,
            } => self.render_to_string(&template_path, vars).map(Rendered::Text),
            RenderArgs::Empty => Err(Error::invalid_input(
                "render() expects at least 1 argument. 0 arguments provided.",
            )),
        }
    }
}

/// Arguments accepted by [`TemplateContext::render`].
pub enum RenderArgs {
    /// No arguments. Always rejected.
    Empty,
    /// Render to a string.
    Template {
        template_path: String,
        vars: VarSource,
    },
    /// Render into an HTTP response body.
    Response {
        response: http::Response<String>,
        template_path: String,
        vars: VarSource,
    },
}

impl RenderArgs {
    /// Request string output.
    pub fn template(template_path: impl Into<String>, vars: impl Into<VarSource>) -> Self {
        RenderArgs::Template {
            template_path: template_path.into(),
            vars: vars.into(),
        }
    }

    /// Request output into an HTTP response body.
    pub fn response(
        response: http::Response<String>,
        template_path: impl Into<String>,
        vars: impl Into<VarSource>,
    ) -> Self {
        RenderArgs::Response {
            response,
            template_path: template_path.into(),
            vars: vars.into(),
        }
    }
}

/// Output of [`TemplateContext::render`].
#[derive(Debug)]
pub enum Rendered {
    /// Rendered template text.
    Text(String),
    /// The response the text was written into.
    Response(http::Response<String>),
}

impl Rendered {
    /// The rendered text, if string output was requested.
    pub fn into_text(self) -> Option<String> {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::Response(_) => None,
        }
    }

    /// The response, if response output was requested.
    pub fn into_response(self) -> Option<http::Response<String>> {
        match self {
            Rendered::Text(_) => None,
            Rendered::Response(response) => Some(response),
        }
    }
}

/// Append [`TEMPLATE_EXTENSION`] when the final path segment has no
/// extension. Dots in directory names are not extensions.
fn append_extension_if_needed(template_path: &str) -> String {
    if Path::new(template_path).extension().is_some() {
        template_path.to_string()
    } else {
        format!("{template_path}{TEMPLATE_EXTENSION}")
    }
}
