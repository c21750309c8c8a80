/// Structural policy of a graph, fixed at construction.
///
/// By default, neither multi edges nor self-loops are allowed. Builder methods
/// take `self` by value so that the configuration reads as
/// `GraphConfig::undirected().allow_self_loops()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphConfig {
    directed: bool,
    allow_multi_edges: bool,
    allow_self_loops: bool,
}

impl GraphConfig {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            allow_multi_edges: false,
            allow_self_loops: false,
        }
    }

    pub fn directed() -> Self {
        Self::new(true)
    }

    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Permits more than one edge between the same pair of vertices.
    pub fn allow_multi_edges(self) -> Self {
        Self {
            allow_multi_edges: true,
            ..self
        }
    }

    /// Permits edges whose endpoints are the same vertex.
    pub fn allow_self_loops(self) -> Self {
        Self {
            allow_self_loops: true,
            ..self
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn multi_edges(&self) -> bool {
        self.allow_multi_edges
    }

    pub fn self_loops(&self) -> bool {
        self.allow_self_loops
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::undirected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = GraphConfig::directed().allow_self_loops();

        assert!(config.is_directed());
        assert!(config.self_loops());
        assert!(!config.multi_edges());

        let config = GraphConfig::default().allow_multi_edges();
        assert!(!config.is_directed());
        assert!(config.multi_edges());
    }
}
