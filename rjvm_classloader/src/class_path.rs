//! The classpath: turns an internal class name into raw `.class` bytes,
//! searching an ordered, process-wide list of directories.

use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::{Error, Result};

/// An ordered, process-wide classpath, configured once at startup; reads
/// afterward are concurrent-safe since it never changes again.
///
/// The Java Class Library root is the final entry and is implicit: callers
/// never name it explicitly, `ClassPath::new` always appends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassPath {
    entries: Vec<PathBuf>,
}

impl ClassPath {
    /// Split `user_classpath` on the platform list separator (`:`), append
    /// `jcl_path`, normalize each entry, and retain only entries whose
    /// directory exists at configuration time. The effective classpath is
    /// the result, in order.
    pub fn new<S: AsRef<str>, P: AsRef<Path>>(jcl_path: P, user_classpath: S) -> Self {
        let mut candidates: Vec<PathBuf> = user_classpath
            .as_ref()
            .split(':')
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect();
        candidates.push(jcl_path.as_ref().to_path_buf());

        let entries = candidates
            .into_iter()
            .map(Self::normalize)
            .filter(|path| path.is_dir())
            .collect();
        Self { entries }
    }

    /// Normalize a classpath entry. `PathBuf` joins already behave as if
    /// every component ended with a path separator, so there is nothing
    /// further to append here.
    fn normalize(path: PathBuf) -> PathBuf {
        path
    }

    /// The effective, in-order classpath entries.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Read the raw bytes of a class named in internal (`L...;`) form.
    ///
    /// Strips the leading `L`/trailing `;` to recover the binary name, then
    /// tries each classpath entry in order. On the first successful read,
    /// returns those bytes without searching further. If a candidate file
    /// exists but fails to open/read for a reason *other* than "not found",
    /// the whole lookup aborts with that error — later classpath entries
    /// are never tried, even if one of them would have had the class. This
    /// is a known sharp edge (a transient I/O error masks a hit further down
    /// the classpath) kept intentionally rather than papered over with a
    /// silent fallthrough.
    #[instrument(level = "trace", skip(self))]
    pub async fn read_class(&self, internal_name: &str) -> Result<Vec<u8>> {
        let binary_name = Self::binary_name(internal_name)?;

        for entry in &self.entries {
            let candidate = entry.join(format!("{binary_name}.class"));
            match tokio::fs::read(&candidate).await {
                Ok(bytes) => return Ok(bytes),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => continue,
                Err(error) => return Err(Error::IoError(error)),
            }
        }

        Err(Error::ClassNotFound(internal_name.to_string()))
    }

    /// Strip the leading `L` and trailing `;` of an internal class name
    /// descriptor, recovering the slash-separated binary name.
    fn binary_name(internal_name: &str) -> Result<&str> {
        internal_name
            .strip_prefix('L')
            .and_then(|rest| rest.strip_suffix(';'))
            .ok_or_else(|| Error::BadDescriptor(format!("not a class descriptor: {internal_name}")))
    }
}
