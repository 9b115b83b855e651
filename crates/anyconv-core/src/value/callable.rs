//! Callable references
//!
//! A `Callable` remembers how a function was named at the capture site and
//! where it was captured, so stringification can show the function's source
//! text instead of only its type. Capture with the [`callable!`] macro:
//!
//! ```
//! use anyconv_core::{callable, stringify, Value};
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! let value = Value::from(callable!(add => fn(i32, i32) -> i32));
//! assert!(!stringify(&value).is_empty());
//! ```
//!
//! [`callable!`]: crate::callable

use std::path::{Path, PathBuf};

use crate::conversion::source;

/// A reference to a function, method or closure
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callable {
    path: String,
    signature: String,
    file: Option<String>,
    manifest_dir: Option<String>,
    bound: bool,
}

impl Callable {
    /// Create a callable from the expression that named it and its type.
    /// The signature is respelled the way it reads in source.
    pub fn new(path: impl Into<String>, signature: impl AsRef<str>) -> Self {
        Self {
            path: path.into(),
            signature: source::signature_spelling(signature.as_ref()),
            file: None,
            manifest_dir: None,
            bound: false,
        }
    }

    /// Record the file the callable was captured in, relative to the
    /// workspace (as `file!()` reports it), and the capturing crate's
    /// manifest directory
    pub fn with_location(mut self, file: impl Into<String>, manifest_dir: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self.manifest_dir = Some(manifest_dir.into());
        self
    }

    /// Mark the callable as bound to a receiver. Bound callables only ever
    /// render as their signature.
    pub fn bound(mut self) -> Self {
        self.bound = true;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Source text of the declaration, when it can be found
    pub fn source(&self) -> Option<String> {
        if self.bound {
            return None;
        }
        let file = self.resolve_file()?;
        source::find_function_source(&file, &self.path)
    }

    /// Source text if available, otherwise the type signature
    pub fn render(&self) -> String {
        self.source().unwrap_or_else(|| self.signature.clone())
    }

    fn resolve_file(&self) -> Option<PathBuf> {
        let file = Path::new(self.file.as_deref()?);
        if file.is_absolute() || file.is_file() {
            return file.is_file().then(|| file.to_path_buf());
        }

        // file!() is relative to the workspace root, which is the manifest
        // directory or one of its ancestors
        let manifest_dir = Path::new(self.manifest_dir.as_deref()?);
        let found = manifest_dir
            .ancestors()
            .map(|dir| dir.join(file))
            .find(|candidate| candidate.is_file());
        if found.is_none() {
            log::trace!("No source file found for callable '{}' ({})", self.path, file.display());
        }
        found
    }
}

/// Capture a function as a [`Callable`].
///
/// `callable!(path => fn(..) -> ..)` checks that the expression coerces to
/// the given function pointer type and records where it was captured.
/// `callable!(bound expr => fn(..) -> ..)` records a bound method or
/// capturing closure, which renders as its signature only.
#[macro_export]
macro_rules! callable {
    (bound $f:expr => $sig:ty) => {{
        let _ = &$f;
        $crate::value::Callable::new(stringify!($f), stringify!($sig)).bound()
    }};
    ($f:expr => $sig:ty) => {{
        let _: $sig = $f;
        $crate::value::Callable::new(stringify!($f), stringify!($sig))
            .with_location(file!(), env!("CARGO_MANIFEST_DIR"))
    }};
}
