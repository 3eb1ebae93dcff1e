//! Template engine seam and the Tera-backed implementation.
//!
//! The rendering context only ever hands an engine a template path and the
//! current variable mapping; template discovery, compilation, and caching
//! belong to the engine.

use std::path::Path;

use tera::Tera;

use crate::error::Result;
use crate::vars::VariableStore;

/// Compiles and renders templates given a path and a variable mapping.
pub trait TemplateEngine {
    /// Render the template at `template_path` with `vars`, returning the
    /// rendered text. Engine failures are passed through unchanged.
    fn render_to_string(&self, template_path: &str, vars: &VariableStore) -> Result<String>;
}

/// Tera-based template engine
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Load every template under `dir`. Template paths are addressed
    /// relative to the directory, e.g. `pages/home.tera`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let glob = format!("{}/**/*", dir.as_ref().display());
        let tera = Tera::new(&glob)?;
        Ok(Self { tera })
    }

    /// Wrap a prepared `Tera` instance, keeping whatever loader and
    /// configuration it was built with.
    pub fn from_tera(tera: Tera) -> Self {
        Self { tera }
    }
}

impl TemplateEngine for TeraEngine {
    fn render_to_string(&self, template_path: &str, vars: &VariableStore) -> Result<String> {
        let mut context = tera::Context::new();
        for (key, value) in vars {
            context.insert(key, value);
        }

        Ok(self.tera.render(template_path, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine_with_raw_template(name: &str, body: &str) -> TeraEngine {
        let mut tera = Tera::default();
        tera.add_raw_template(name, body).unwrap();
        TeraEngine::from_tera(tera)
    }

    #[test]
    fn test_render_with_variables() {
        let engine = engine_with_raw_template("hello.tera", "Hello {{ name }}!");

        let mut vars = VariableStore::new();
        vars.insert("name".to_string(), json!("world"));

        let rendered = engine.render_to_string("hello.tera", &vars).unwrap();
        assert_eq!(rendered, "Hello world!");
    }

    #[test]
    fn test_missing_template_error_passes_through() {
        let engine = TeraEngine::from_tera(Tera::default());

        let err = engine
            .render_to_string("no_such_template.tera", &VariableStore::new())
            .unwrap_err();
        assert!(err.to_string().contains("no_such_template.tera"));
    }
}
