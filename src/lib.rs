//! Variable-store rendering context over the Tera template engine.
//!
//! [`TemplateContext`] binds a template engine to a named variable store:
//! variables are set individually or merged in bulk from heterogeneous
//! sources (ready mappings, JSON values, [`Serializable`] or [`Mappable`]
//! objects, serde-captured plain data objects), and rendering is dispatched
//! to the engine with the full accumulated store. Output goes to a plain
//! string or into an HTTP response body.
//!
//! The engine seam is the [`TemplateEngine`] trait; [`TeraEngine`] is the
//! bundled Tera-backed implementation. Template compilation, caching, and
//! reloading are the engine's business, not this crate's.
//!
//! # Examples
//!
//! ```
//! use tera_template_renderer::{TemplateContext, TeraEngine, VarSource};
//!
//! # fn main() -> tera_template_renderer::Result<()> {
//! let mut tera = tera::Tera::default();
//! tera.add_raw_template("hello.tera", "Hello {{ name }}!")?;
//!
//! let mut context = TemplateContext::new(TeraEngine::from_tera(tera));
//! context.set("name", "world");
//!
//! let rendered = context.render_to_string("hello", VarSource::empty())?;
//! assert_eq!(rendered, "Hello world!");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod context;
pub mod engine;
pub mod error;
pub mod response;
pub mod vars;

pub use crate::{
    context::{RenderArgs, Rendered, TEMPLATE_EXTENSION, TemplateContext},
    engine::{TemplateEngine, TeraEngine},
    error::{Error, Result},
    response::HttpResponse,
    vars::{Mappable, OBJECT_SINGLE_VAR, Serializable, VarSource, VariableStore},
};
