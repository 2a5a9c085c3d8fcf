#![no_main]

use fwbench::{Graph, WeightBounds};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(graph) = Graph::<i32>::from_text(text, WeightBounds::default()) {
        let again = Graph::<i32>::from_text(&graph.to_text(), WeightBounds::default())
            .expect("written graphs parse");
        assert_eq!(graph, again);
    }
});
