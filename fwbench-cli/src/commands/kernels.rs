use fwbench::{KernelFamily, KernelRegistry};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    app::GlobalOptions,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
pub struct KernelInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub width: u32,
    pub backend: String,
    pub available: bool,
}

pub fn run(opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = KernelRegistry::new();
    let kernels: Vec<KernelInfo> = KernelFamily::iter()
        .map(|family| KernelInfo {
            name: family.name(),
            label: family.label(),
            width: family.width().bits(),
            backend: family.bundle().to_string(),
            available: registry.is_available(family),
        })
        .collect();

    print_output(&kernels, opts, |kernels| {
        let mut tw = TabWriter::new(&[
            ("Kernel", Align::Left),
            ("Bits", Align::Right),
            ("Backend", Align::Left),
            ("Available", Align::Left),
        ]);
        for k in kernels {
            tw.row(vec![
                k.name.to_string(),
                k.width.to_string(),
                k.backend.clone(),
                if k.available { "yes" } else { "no" }.to_string(),
            ]);
        }
        tw.print();
    })
}
