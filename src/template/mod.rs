//! `{{ ... }}` templates rendered with [`gtmpl`], bound to an explicit field table.
//!
//! A type exposes the values a template may read through [`Namespace::FIELDS`].
//! Templates are checked against that table when parsed, so a misspelled field
//! is reported before anything is rendered.
//!
//! ## Example
//!
//! ```
//! use prometheus_script::template::{Field, Namespace, Template};
//!
//! struct Listen {
//!     host: String,
//!     port: u64,
//! }
//!
//! impl Namespace for Listen {
//!     const FIELDS: &'static [Field<Self>] = &[
//!         Field { name: "Host", get: |l| l.host.as_str().into() },
//!         Field { name: "Port", get: |l| l.port.into() },
//!     ];
//! }
//!
//! let tpl = Template::<Listen>::parse("listen", "{{.Host}}:{{.Port}}")?;
//! let out = tpl.execute(&Listen { host: "0.0.0.0".into(), port: 80 })?;
//! assert_eq!(out, b"0.0.0.0:80");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod fields;

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

use gtmpl::{Context, Value};

pub use error::{ExecError, ParseError};

/// A named accessor into a namespace type.
pub struct Field<T> {
    /// Case-exact name used after the `.` in templates.
    pub name: &'static str,
    pub get: fn(&T) -> Value,
}

/// A type whose fields can be substituted into a [`Template`].
pub trait Namespace: Sized + 'static {
    const FIELDS: &'static [Field<Self>];

    /// The root value templates see as `.`.
    fn to_value(&self) -> Value {
        let fields: HashMap<String, Value> = Self::FIELDS
            .iter()
            .map(|field| (field.name.to_string(), (field.get)(self)))
            .collect();
        Value::Object(fields)
    }
}

/// A parsed template, bound to the namespace it was checked against.
pub struct Template<N> {
    inner: gtmpl::Template,
    _namespace: PhantomData<fn(&N)>,
}

impl<N: Namespace> Template<N> {
    /// Parses `text`, rejecting malformed directives and fields `N` does not
    /// expose.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ParseError> {
        let mut inner = gtmpl::Template::with_name(name);
        inner.parse(text)?;

        let unknown = fields::root_fields(text)
            .into_iter()
            .find(|(_, name)| !N::FIELDS.iter().any(|field| field.name == name.as_str()));
        if let Some((line, name)) = unknown {
            return Err(ParseError::UnknownField { line, name });
        }

        Ok(Self {
            inner,
            _namespace: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Renders the template into a new buffer.
    pub fn execute(&self, data: &N) -> Result<Vec<u8>, ExecError> {
        let mut out = Vec::new();
        self.execute_to(data, &mut out)?;
        Ok(out)
    }

    /// Renders the template into `out`.
    ///
    /// On error, whatever was rendered before the failing action has already
    /// been written.
    pub fn execute_to<W: Write>(&self, data: &N, out: &mut W) -> Result<(), ExecError> {
        self.inner.execute(out, &Context::from(data.to_value()))?;
        Ok(())
    }
}

impl<N> fmt::Debug for Template<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}
