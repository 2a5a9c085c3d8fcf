//! Plain-text graph format.
//!
//! ```text
//! 4
//! 0 1 3
//! 1 2 1
//! 2 3 2
//! ```
//!
//! The first token is the vertex count. Every following triple is `<from> <to> <weight>`.
//! Pairs that are not listed get the sentinel, and the diagonal is zero no matter what the
//! input says. Tokens may be separated by any whitespace.
//!
//! The writer lists every off-diagonal entry that is not the sentinel, including zero-weight
//! edges, so reading a written graph back yields the same matrix.

use std::{
    fs,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::{
    graph::{Graph, Weight, WeightBounds},
    Result,
};

impl<T: Weight> Graph<T> {
    /// Parses a graph from its text form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the size is missing, not a number or not
    /// positive, if a triple is incomplete, refers to a vertex outside of the graph, or has
    /// a weight outside `[0, inf]`. Returns [`crate::Error::InvalidArgument`] if the
    /// sentinel of `bounds` does not fit into `T`.
    pub fn from_text(text: &str, bounds: WeightBounds) -> Result<Self> {
        let inf = bounds.inf_as::<T>()?;
        let mut tokens = text.split_whitespace();

        let size_token = tokens
            .next()
            .ok_or_else(|| malformed_error!("Graph input is empty"))?;
        let size: i64 = size_token
            .parse()
            .map_err(|_| malformed_error!("Graph size '{}' is not a number", size_token))?;
        if size <= 0 {
            return Err(malformed_error!(
                "Graph size must be positive, but it was {}",
                size
            ));
        }
        let size = usize::try_from(size)
            .map_err(|_| malformed_error!("Graph size {} is too large", size))?;

        let mut graph = Graph::unconnected(size, inf)
            .map_err(|e| malformed_error!("Cannot allocate graph: {}", e))?;
        let inf = inf.widen();

        let mut triple = 0usize;
        while let Some(from_token) = tokens.next() {
            triple += 1;
            let (Some(to_token), Some(weight_token)) = (tokens.next(), tokens.next()) else {
                return Err(malformed_error!("Edge #{} is incomplete", triple));
            };

            let from = parse_vertex(from_token, size, triple)?;
            let to = parse_vertex(to_token, size, triple)?;
            let weight: i64 = weight_token.parse().map_err(|_| {
                malformed_error!("Edge #{} has a non-numeric weight '{}'", triple, weight_token)
            })?;
            if !(0..=inf).contains(&weight) {
                return Err(malformed_error!(
                    "Edge #{} weight {} is outside of [0, {}]",
                    triple,
                    weight,
                    inf
                ));
            }

            // Checked against [0, inf] above and inf fits T
            let weight = T::narrow(weight)
                .ok_or_else(|| malformed_error!("Edge #{} weight {} overflows", triple, weight))?;
            if from != to {
                graph
                    .set_edge(from, to, weight)
                    .map_err(|e| malformed_error!("Edge #{} rejected: {}", triple, e))?;
            }
        }

        Ok(graph)
    }

    /// Reads a graph from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if reading fails, otherwise see
    /// [`Graph::from_text`].
    pub fn read_from<R: Read>(mut reader: R, bounds: WeightBounds) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text, bounds)
    }

    /// Reads a graph from a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the file cannot be opened or parsed.
    pub fn read_from_path<P: AsRef<Path>>(path: P, bounds: WeightBounds) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            malformed_error!("Could not load graph from: {} ({})", path.display(), e)
        })?;
        Self::from_text(&text, bounds)
    }

    /// Writes the graph in text form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        writeln!(writer, "{}", self.size())?;
        for (from, to, weight) in self.edges() {
            writeln!(writer, "{from} {to} {weight}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the graph in text form to a file, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be created or written.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = fs::File::create(path)?;
        self.write_to(file)
    }

    /// The text form as a string.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.size());
        for (from, to, weight) in self.edges() {
            text.push_str(&format!("{from} {to} {weight}\n"));
        }
        text
    }
}

fn parse_vertex(token: &str, size: usize, triple: usize) -> Result<usize> {
    let vertex: usize = token
        .parse()
        .map_err(|_| malformed_error!("Edge #{} has an invalid vertex '{}'", triple, token))?;
    if vertex >= size {
        return Err(malformed_error!(
            "Edge #{} refers to vertex {}, but the graph has {} vertices",
            triple,
            vertex,
            size
        ));
    }
    Ok(vertex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::chain_graph, Error, GraphGenerator};

    #[test]
    fn test_write_chain() {
        let graph = chain_graph::<i32>();
        assert_eq!(graph.to_text(), "4\n0 1 3\n1 2 1\n2 3 2\n");
    }

    #[test]
    fn test_read_defaults_and_diagonal() {
        let graph = Graph::<i8>::from_text("3\n0 1 5\n1 1 7\n", WeightBounds::default()).unwrap();
        assert_eq!(graph.get(0, 1), 5);
        assert_eq!(graph.get(1, 1), 0);
        assert_eq!(graph.get(1, 0), 99);
        assert_eq!(graph.get(2, 0), 99);
    }

    #[test]
    fn test_round_trip_random() {
        let bounds = WeightBounds::default();
        let graph = GraphGenerator::new(bounds)
            .seeded(5)
            .generate::<i16>(17, 25)
            .unwrap();
        let parsed = Graph::<i16>::from_text(&graph.to_text(), bounds).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn test_round_trip_zero_weight_edge() {
        let mut graph = Graph::<i32>::unconnected(3, 99).unwrap();
        graph.set_edge(0, 2, 0).unwrap();
        graph.set_edge(2, 1, 4).unwrap();

        let text = graph.to_text();
        assert!(text.contains("0 2 0\n"));
        let parsed = Graph::<i32>::from_text(&text, WeightBounds::default()).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn test_sentinel_weight_means_no_edge() {
        let graph = Graph::<i8>::from_text("2\n0 1 99\n", WeightBounds::default()).unwrap();
        assert!(!graph.is_finite(0, 1));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_malformed_inputs() {
        let bounds = WeightBounds::default();
        let cases = [
            "",
            "abc",
            "0",
            "-4",
            "3\n0 1",
            "3\n0 3 1",
            "3\n0 x 1",
            "3\n0 1 -1",
            "3\n0 1 100",
            "3\n0 1 one",
        ];
        for case in cases {
            match Graph::<i32>::from_text(case, bounds) {
                Err(Error::Malformed { .. }) => {}
                other => panic!("expected malformed error for {case:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_huge_declared_size() {
        for case in ["4000000000\n", "9223372036854775807"] {
            match Graph::<i32>::from_text(case, WeightBounds::default()) {
                Err(Error::Malformed { message, .. }) => {
                    assert!(message.contains("allocate"), "{message}");
                }
                other => panic!("expected malformed error for {case:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_to_text_matches_writer() {
        let mut graph = chain_graph::<i16>();
        graph.set_edge(3, 0, 0).unwrap();
        let mut buffer = Vec::new();
        graph.write_to(&mut buffer).unwrap();
        assert_eq!(graph.to_text(), String::from_utf8(buffer).unwrap());
        assert_eq!(graph.to_text(), "4\n0 1 3\n1 2 1\n2 3 2\n3 0 0\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = Graph::<i8>::read_from_path(
            "/definitely/not/here/graph.txt",
            WeightBounds::default(),
        );
        assert!(matches!(result, Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.txt");

        let graph = chain_graph::<i8>();
        graph.write_to_path(&path).unwrap();
        let loaded = Graph::<i8>::read_from_path(&path, WeightBounds::default()).unwrap();
        assert_eq!(loaded, graph);
    }
}
