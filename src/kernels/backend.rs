//! Kernel backends: named collections of exported procedures.

use std::sync::Arc;

use crate::{
    graph::Weight,
    kernels::{floyd_warshall_reference, floyd_warshall_saturating, AnyKernel, KernelFamily},
    Result,
};

/// A loaded bundle of kernels.
///
/// This is the boundary to kernel implementations that live outside the crate's own
/// arithmetic: anything that can hand out a function pointer for a procedure name can act
/// as a backend.
pub trait KernelBackend: Send + Sync {
    /// Name of the bundle, used in diagnostics.
    fn name(&self) -> &str;

    /// Looks up an exported procedure.
    fn procedure(&self, name: &str) -> Option<AnyKernel>;

    /// Names of all exported procedures.
    fn procedures(&self) -> Vec<&str>;
}

/// A backend with a fixed symbol table.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    name: String,
    symbols: Vec<(String, AnyKernel)>,
}

impl StaticBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbols: Vec::new(),
        }
    }

    /// Adds an exported procedure, replacing an earlier one with the same name.
    #[must_use]
    pub fn export(mut self, name: impl Into<String>, kernel: AnyKernel) -> Self {
        let name = name.into();
        self.symbols.retain(|(existing, _)| *existing != name);
        self.symbols.push((name, kernel));
        self
    }
}

impl KernelBackend for StaticBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn procedure(&self, name: &str) -> Option<AnyKernel> {
        self.symbols
            .iter()
            .find(|(symbol, _)| symbol == name)
            .map(|(_, kernel)| *kernel)
    }

    fn procedures(&self) -> Vec<&str> {
        self.symbols.iter().map(|(symbol, _)| symbol.as_str()).collect()
    }
}

/// Loads the in-process reference bundle.
///
/// # Errors
///
/// Never fails; the signature matches [`crate::kernels::BackendLoader`].
pub fn reference_backend() -> Result<Arc<dyn KernelBackend>> {
    let family = KernelFamily::Reference;
    Ok(Arc::new(StaticBackend::new(family.bundle().to_string()).export(
        family.name(),
        i32::erase(floyd_warshall_reference::<i32>),
    )))
}

/// Loads the width-native bundle with its 8-, 16- and 32-bit procedures.
///
/// # Errors
///
/// Never fails; the signature matches [`crate::kernels::BackendLoader`].
pub fn native_backend() -> Result<Arc<dyn KernelBackend>> {
    let backend = StaticBackend::new(KernelFamily::Native8.bundle().to_string())
        .export(KernelFamily::Native8.name(), saturating::<i8>())
        .export(KernelFamily::Native16.name(), saturating::<i16>())
        .export(KernelFamily::Native32.name(), saturating::<i32>());
    Ok(Arc::new(backend))
}

fn saturating<T: Weight>() -> AnyKernel {
    T::erase(floyd_warshall_saturating::<T>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightWidth;

    #[test]
    fn test_reference_exports() {
        let backend = reference_backend().unwrap();
        assert_eq!(backend.name(), "reference");
        assert_eq!(backend.procedures(), vec!["FloydWarshallReference"]);
        assert_eq!(
            backend.procedure("FloydWarshallReference").unwrap().width(),
            WeightWidth::W32
        );
        assert!(backend.procedure("FloydWarshallNative8").is_none());
    }

    #[test]
    fn test_native_exports() {
        let backend = native_backend().unwrap();
        assert_eq!(backend.name(), "native");
        assert_eq!(backend.procedures().len(), 3);
        assert_eq!(
            backend.procedure("FloydWarshallNative8").unwrap().width(),
            WeightWidth::W8
        );
        assert_eq!(
            backend.procedure("FloydWarshallNative16").unwrap().width(),
            WeightWidth::W16
        );
    }

    #[test]
    fn test_exported_kernels_run() {
        let backend = native_backend().unwrap();
        let kernel = i16::select(backend.procedure("FloydWarshallNative16").unwrap()).unwrap();
        let mut graph = crate::test::chain_graph::<i16>();
        kernel(graph.weights_mut(), 4);
        assert_eq!(graph.get(0, 3), 6);

        // Erasing and selecting again yields a kernel of the same width only
        let erased = i8::erase(floyd_warshall_saturating::<i8>);
        assert!(i8::select(erased).is_some());
        assert!(i32::select(erased).is_none());
    }

    #[test]
    fn test_export_replaces() {
        let backend = StaticBackend::new("custom")
            .export("k", AnyKernel::W8(floyd_warshall_saturating::<i8>))
            .export("k", AnyKernel::W16(floyd_warshall_saturating::<i16>));
        assert_eq!(backend.procedures(), vec!["k"]);
        assert_eq!(backend.procedure("k").unwrap().width(), WeightWidth::W16);
    }
}
