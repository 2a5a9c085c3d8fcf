//! Name-based kernel lookup with lazily loaded backends.
//!
//! The registry maps a procedure identifier to its [`KernelFamily`], the family to its
//! [`BackendBundle`], and the bundle to a loaded [`KernelBackend`]. Bundles are loaded the
//! first time one of their kernels is requested.
//!
//! # Loading and Caching
//!
//! Loaded backends live in a [`DashMap`]. The first load of a bundle happens while holding
//! that bundle's entry, so concurrent callers observe exactly one load; later lookups only
//! read. A failed load is not cached. Nothing is retried.
//!
//! # Examples
//!
//! ```rust
//! use fwbench::{Graph, KernelRegistry};
//!
//! let registry = KernelRegistry::new();
//! let kernel = registry.resolve::<i8>("FloydWarshallNative8")?;
//!
//! let mut graph = Graph::<i8>::unconnected(3, 99)?;
//! graph.set_edge(0, 1, 4)?;
//! graph.set_edge(1, 2, 5)?;
//! let n = graph.size();
//! kernel(graph.weights_mut(), n);
//! assert_eq!(graph.get(0, 2), 9);
//! # Ok::<(), fwbench::Error>(())
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use dashmap::DashMap;

use crate::{
    graph::Weight,
    kernels::{
        native_backend, reference_backend, AnyKernel, BackendBundle, Kernel, KernelBackend,
        KernelFamily,
    },
    Error, Result,
};

/// Produces a backend bundle on first use.
pub type BackendLoader = Arc<dyn Fn() -> Result<Arc<dyn KernelBackend>> + Send + Sync>;

/// Resolves kernel identifiers to callable kernels.
pub struct KernelRegistry {
    loaders: HashMap<BackendBundle, BackendLoader>,
    cache: DashMap<BackendBundle, Arc<dyn KernelBackend>>,
    loads: AtomicUsize,
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KernelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<BackendBundle> = self.loaders.keys().copied().collect();
        registered.sort();
        let mut loaded: Vec<BackendBundle> = self.cache.iter().map(|e| *e.key()).collect();
        loaded.sort();
        f.debug_struct("KernelRegistry")
            .field("registered", &registered)
            .field("loaded", &loaded)
            .finish()
    }
}

impl KernelRegistry {
    /// Creates a registry with the built-in `reference` and `native` bundles.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts from the built-in bundles and allows replacing or removing them.
    #[must_use]
    pub fn builder() -> KernelRegistryBuilder {
        KernelRegistryBuilder::default()
    }

    /// Resolves `name` to a kernel over `T` weights.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownKernel`] if `name` is not in the catalog
    /// - [`Error::BackendUnavailable`] if the providing bundle cannot be loaded
    /// - [`Error::ProcedureNotFound`] if the bundle does not export `name`
    /// - [`Error::WidthMismatch`] if the procedure is not a `T` kernel
    pub fn resolve<T: Weight>(&self, name: &str) -> Result<Kernel<T>> {
        let kernel = self.resolve_any(name)?;
        T::select(kernel).ok_or_else(|| Error::WidthMismatch {
            procedure: name.to_string(),
            expected: T::WIDTH,
            found: kernel.width(),
        })
    }

    /// Resolves `name` to a kernel of whatever width the backend exports.
    ///
    /// # Errors
    ///
    /// Same as [`KernelRegistry::resolve`], except for the width check.
    pub fn resolve_any(&self, name: &str) -> Result<AnyKernel> {
        let family = KernelFamily::from_name(name)?;
        let backend = self.backend(family.bundle())?;
        backend
            .procedure(name)
            .ok_or_else(|| Error::ProcedureNotFound {
                backend: backend.name().to_string(),
                procedure: name.to_string(),
            })
    }

    /// Returns `true` if `family` currently resolves.
    #[must_use]
    pub fn is_available(&self, family: KernelFamily) -> bool {
        self.resolve_any(family.name()).is_ok()
    }

    /// Number of successful backend loads so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Returns the loaded backend for `bundle`, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] if no loader is registered or the loader fails.
    pub fn backend(&self, bundle: BackendBundle) -> Result<Arc<dyn KernelBackend>> {
        if let Some(backend) = self.cache.get(&bundle) {
            return Ok(Arc::clone(backend.value()));
        }

        let loader = self
            .loaders
            .get(&bundle)
            .ok_or_else(|| Error::BackendUnavailable {
                backend: bundle.to_string(),
                reason: "no loader registered".to_string(),
            })?;

        let entry = self.cache.entry(bundle).or_try_insert_with(|| {
            log::debug!("Loading kernel backend '{bundle}'");
            let backend = loader().map_err(|e| match e {
                Error::BackendUnavailable { .. } => e,
                other => Error::BackendUnavailable {
                    backend: bundle.to_string(),
                    reason: other.to_string(),
                },
            })?;
            self.loads.fetch_add(1, Ordering::Relaxed);
            Ok::<_, Error>(backend)
        })?;

        Ok(Arc::clone(entry.value()))
    }
}

/// Builder for [`KernelRegistry`].
pub struct KernelRegistryBuilder {
    loaders: HashMap<BackendBundle, BackendLoader>,
}

impl Default for KernelRegistryBuilder {
    fn default() -> Self {
        let mut loaders: HashMap<BackendBundle, BackendLoader> = HashMap::new();
        loaders.insert(BackendBundle::Reference, Arc::new(reference_backend));
        loaders.insert(BackendBundle::Native, Arc::new(native_backend));
        Self { loaders }
    }
}

impl KernelRegistryBuilder {
    /// Replaces the loader for `bundle`.
    #[must_use]
    pub fn backend<F>(mut self, bundle: BackendBundle, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn KernelBackend>> + Send + Sync + 'static,
    {
        self.loaders.insert(bundle, Arc::new(loader));
        self
    }

    /// Removes the loader for `bundle`, making all of its kernels unavailable.
    #[must_use]
    pub fn without(mut self, bundle: BackendBundle) -> Self {
        self.loaders.remove(&bundle);
        self
    }

    /// Builds the registry. No backend is loaded yet.
    #[must_use]
    pub fn build(self) -> KernelRegistry {
        KernelRegistry {
            loaders: self.loaders,
            cache: DashMap::new(),
            loads: AtomicUsize::new(0),
        }
    }
}
