//! `ClassLoader`: load/cache/parent-delegation lifecycle.
//!
//! Wraps a flat classpath search in the delegatable loader type the launch
//! driver's bootstrap loader needs. Trimmed of JPMS module-configuration
//! support, which this runtime has no use for.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use rjvm_classfile::ClassFile;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::class::Class;
use crate::class_path::ClassPath;
use crate::Result;

/// A class loader: a classpath plus a cache of classes it has resolved,
/// optionally delegating to a parent loader first. The bootstrap loader is
/// the root of this chain, with no parent.
#[derive(Debug)]
pub struct ClassLoader {
    this: Weak<ClassLoader>,
    name: String,
    class_path: ClassPath,
    parent: RwLock<Option<Arc<ClassLoader>>>,
    classes: RwLock<HashMap<String, Arc<Class>>>,
}

impl ClassLoader {
    /// Create a new, parentless class loader over `class_path`.
    #[must_use]
    pub fn new<S: Into<String>>(name: S, class_path: ClassPath) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            name: name.into(),
            class_path,
            parent: RwLock::new(None),
            classes: RwLock::new(HashMap::new()),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn class_path(&self) -> &ClassPath {
        &self.class_path
    }

    pub async fn parent(&self) -> Option<Arc<ClassLoader>> {
        self.parent.read().await.clone()
    }

    /// Wire this loader to delegate to `parent` before consulting its own
    /// classpath. A class lives as long as the loader that retains it.
    pub async fn set_parent(&self, parent: Option<Arc<ClassLoader>>) {
        *self.parent.write().await = parent;
    }

    /// Load a class by internal (slash-separated) name, checking this
    /// loader's cache, then the parent chain, then this loader's classpath.
    ///
    /// # Errors
    ///
    /// Returns `Error::ClassNotFound` if no classpath entry (of this loader
    /// or any ancestor) has the class, and propagates any I/O or
    /// class-file-format error encountered along the way.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self, class_name: &str) -> Result<Arc<Class>> {
        if let Some(class) = self.classes.read().await.get(class_name) {
            return Ok(Arc::clone(class));
        }

        if let Some(parent) = self.parent().await {
            if let Ok(class) = Box::pin(parent.load(class_name)).await {
                return Ok(class);
            }
        }

        let internal_name = format!("L{class_name};");
        let bytes = self.class_path.read_class(&internal_name).await?;
        let class_file = Arc::new(ClassFile::from_bytes(&bytes)?);
        let class = Arc::new(Class::new(self.this.clone(), class_file)?);
        class.set_owner();

        let mut classes = self.classes.write().await;
        Ok(Arc::clone(classes.entry(class_name.to_string()).or_insert(class)))
    }
}
