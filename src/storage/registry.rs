use std::{iter::Enumerate, slice::Iter};

use crate::core::{
    error::{Error, Result},
    id::{EdgeId, IdType, VertexId},
    marker::Direction,
    weight, EdgeRef, EdgeSet, GraphBase, NeighborRef, Neighbors, VertexSet,
};

#[derive(Debug, Clone, PartialEq)]
struct VertexSlot<V> {
    payload: V,
    // Outgoing and incoming edge lists, in insertion order. Undirected graphs
    // use only the first one.
    adj: [Vec<EdgeId>; 2],
}

impl<V> VertexSlot<V> {
    fn new(payload: V) -> Self {
        Self {
            payload,
            adj: [Vec::new(), Vec::new()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct EdgeSlot<E> {
    endpoints: [VertexId; 2],
    weight: f64,
    data: E,
}

/// Arena of vertices and edges with insertion-ordered adjacency lists.
///
/// Removed elements leave a hole behind, so that identifiers are never reused
/// and never relocated. Every successful mutation bumps the
/// [version](Registry::version).
///
/// Vertices carry payloads of type `V`, edges carry a weight and data of type
/// `E`.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry<V, E = ()> {
    vertices: Vec<Option<VertexSlot<V>>>,
    edges: Vec<Option<EdgeSlot<E>>>,
    vertex_count: usize,
    edge_count: usize,
    directed: bool,
    multi_edges: bool,
    version: u64,
}

impl<V, E> Registry<V, E> {
    pub fn new(directed: bool, multi_edges: bool) -> Self {
        Self::with_capacity(directed, multi_edges, 0, 0)
    }

    pub fn with_capacity(
        directed: bool,
        multi_edges: bool,
        vertex_capacity: usize,
        edge_capacity: usize,
    ) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            edges: Vec::with_capacity(edge_capacity),
            vertex_count: 0,
            edge_count: 0,
            directed,
            multi_edges,
            version: 0,
        }
    }

    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(Some(VertexSlot::new(payload)));
        self.vertex_count += 1;
        self.version += 1;
        id
    }

    pub fn add_edge(
        &mut self,
        src: VertexId,
        dst: VertexId,
        weight: f64,
        data: E,
    ) -> Result<EdgeId> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;
        let weight = weight::validate(weight)?;

        if !self.multi_edges && self.edge_between(src, dst).is_some() {
            return Err(Error::DuplicateEdge { src, dst });
        }

        let id = EdgeId::from_usize(self.edges.len());
        self.edges.push(Some(EdgeSlot {
            endpoints: [src, dst],
            weight,
            data,
        }));

        if self.directed {
            self.slot_mut(src).adj[Direction::Outgoing.index()].push(id);
            self.slot_mut(dst).adj[Direction::Incoming.index()].push(id);
        } else {
            self.slot_mut(src).adj[Direction::Outgoing.index()].push(id);
            // Undirected self-loop is listed only once.
            if src != dst {
                self.slot_mut(dst).adj[Direction::Outgoing.index()].push(id);
            }
        }

        self.edge_count += 1;
        self.version += 1;
        Ok(id)
    }

    /// Removes the vertex together with all its incident edges.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<V> {
        let slot = self
            .vertices
            .get_mut(id.as_usize())
            .and_then(Option::take)
            .ok_or(Error::UnknownVertex(id))?;

        for dir in Direction::stored(self.directed) {
            for &edge in slot.adj[dir.index()].iter() {
                // A directed self-loop is present in both lists of the vertex.
                if let Some(edge_slot) = self.edges[edge.as_usize()].take() {
                    let [src, dst] = edge_slot.endpoints;
                    let other = if src == id { dst } else { src };

                    if other != id {
                        self.disconnect(other, edge);
                    }

                    self.edge_count -= 1;
                }
            }
        }

        self.vertex_count -= 1;
        self.version += 1;
        Ok(slot.payload)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<f64> {
        let slot = self
            .edges
            .get_mut(id.as_usize())
            .and_then(Option::take)
            .ok_or(Error::UnknownEdge(id))?;

        let [src, dst] = slot.endpoints;
        self.disconnect(src, id);
        if src != dst {
            self.disconnect(dst, id);
        }

        self.edge_count -= 1;
        self.version += 1;
        Ok(slot.weight)
    }

    /// Replaces the weight of an edge and returns the previous one.
    pub fn update_weight(&mut self, id: EdgeId, weight: f64) -> Result<f64> {
        let weight = weight::validate(weight)?;
        let slot = self
            .edges
            .get_mut(id.as_usize())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownEdge(id))?;

        let previous = std::mem::replace(&mut slot.weight, weight);
        self.version += 1;
        Ok(previous)
    }

    pub fn edge_data(&self, id: EdgeId) -> Option<&E> {
        self.edges
            .get(id.as_usize())
            .and_then(Option::as_ref)
            .map(|slot| &slot.data)
    }

    pub fn edge_data_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.edges
            .get_mut(id.as_usize())
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.data)
    }

    /// Turns a directed registry into an undirected one, keeping all
    /// identifiers. Each vertex lists its incident edges in insertion order.
    pub fn into_undirected(mut self) -> Self {
        if !self.directed {
            return self;
        }

        for slot in self.vertices.iter_mut().flatten() {
            let [outgoing, incoming] = &mut slot.adj;
            outgoing.append(incoming);
            // Edge ids grow with insertion, sorting restores the order.
            outgoing.sort_unstable();
            // A directed self-loop is in both lists, undirected lists it once.
            outgoing.dedup();
        }

        self.directed = false;
        self.version += 1;
        self
    }

    /// Removes all vertices and edges. Identifiers issued before stay retired.
    pub fn clear(&mut self) {
        self.vertices.iter_mut().for_each(|slot| *slot = None);
        self.edges.iter_mut().for_each(|slot| *slot = None);
        self.vertex_count = 0;
        self.edge_count = 0;
        self.version += 1;
    }

    pub fn vertex(&self, id: VertexId) -> Option<&V> {
        self.slot(id).map(|slot| &slot.payload)
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut V> {
        self.vertices
            .get_mut(id.as_usize())
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.payload)
    }

    /// Iterates over live vertices with their payloads in id order.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &V)> + '_ {
        self.vertices.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|slot| (VertexId::from_usize(index), &slot.payload))
        })
    }

    /// Returns the first edge (in insertion order) connecting `src` and `dst`.
    ///
    /// In undirected graphs the orientation does not matter.
    pub fn edge_between(&self, src: VertexId, dst: VertexId) -> Option<EdgeId> {
        let slot = self.slot(src)?;
        if !self.contains_vertex(dst) {
            return None;
        }

        slot.adj[Direction::Outgoing.index()]
            .iter()
            .copied()
            .find(|edge| match &self.edges[edge.as_usize()] {
                Some(EdgeSlot {
                    endpoints: [s, d], ..
                }) => (*s == src && *d == dst) || (!self.directed && *s == dst && *d == src),
                None => false,
            })
    }

    pub fn contains_edge_between(&self, src: VertexId, dst: VertexId) -> bool {
        self.edge_between(src, dst).is_some()
    }

    pub fn out_degree(&self, id: VertexId) -> Result<usize> {
        self.degree_directed(id, Direction::Outgoing)
            .ok_or(Error::UnknownVertex(id))
    }

    pub fn in_degree(&self, id: VertexId) -> Result<usize> {
        self.degree_directed(id, Direction::Incoming)
            .ok_or(Error::UnknownVertex(id))
    }

    pub fn allows_multi_edges(&self) -> bool {
        self.multi_edges
    }

    fn check_vertex(&self, id: VertexId) -> Result<()> {
        if self.contains_vertex(id) {
            Ok(())
        } else {
            Err(Error::UnknownVertex(id))
        }
    }

    fn slot(&self, id: VertexId) -> Option<&VertexSlot<V>> {
        self.vertices.get(id.as_usize()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: VertexId) -> &mut VertexSlot<V> {
        match self.vertices[id.as_usize()].as_mut() {
            Some(slot) => slot,
            None => unreachable!("vertex {id} checked before"),
        }
    }

    fn disconnect(&mut self, vertex: VertexId, edge: EdgeId) {
        // Retaining instead of swap-removing keeps the insertion order of the
        // remaining neighbors.
        if let Some(Some(slot)) = self.vertices.get_mut(vertex.as_usize()) {
            for list in slot.adj.iter_mut() {
                list.retain(|&e| e != edge);
            }
        }
    }

    fn adj_index(&self, dir: Direction) -> usize {
        if self.directed {
            dir.index()
        } else {
            Direction::Outgoing.index()
        }
    }
}

impl<V, E> Default for Registry<V, E> {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl<V, E> GraphBase for Registry<V, E> {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl<V, E> VertexSet for Registry<V, E> {
    type VertexIdsIter<'a> = VertexIds<'a, V>
    where
        Self: 'a;

    fn vertex_ids(&self) -> Self::VertexIdsIter<'_> {
        VertexIds {
            inner: self.vertices.iter().enumerate(),
        }
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn vertex_bound(&self) -> usize {
        self.vertices.len()
    }

    fn contains_vertex(&self, id: VertexId) -> bool {
        self.slot(id).is_some()
    }
}

impl<V, E> EdgeSet for Registry<V, E> {
    type EdgesIter<'a> = EdgesIter<'a, E>
    where
        Self: 'a;

    fn edges(&self) -> Self::EdgesIter<'_> {
        EdgesIter {
            inner: self.edges.iter().enumerate(),
        }
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn endpoints(&self, id: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges
            .get(id.as_usize())
            .and_then(Option::as_ref)
            .map(|slot| (slot.endpoints[0], slot.endpoints[1]))
    }

    fn weight(&self, id: EdgeId) -> Option<f64> {
        self.edges
            .get(id.as_usize())
            .and_then(Option::as_ref)
            .map(|slot| slot.weight)
    }
}

impl<V, E> Neighbors for Registry<V, E> {
    type NeighborsIter<'a> = NeighborsIter<'a, E>
    where
        Self: 'a;

    fn neighbors_directed(&self, src: VertexId, dir: Direction) -> Option<Self::NeighborsIter<'_>> {
        let slot = self.slot(src)?;
        let dir = if self.directed {
            dir
        } else {
            Direction::Outgoing
        };

        Some(NeighborsIter {
            src,
            dir,
            edges: slot.adj[self.adj_index(dir)].iter(),
            slots: self.edges.as_slice(),
        })
    }

    fn degree_directed(&self, id: VertexId, dir: Direction) -> Option<usize> {
        self.slot(id).map(|slot| slot.adj[self.adj_index(dir)].len())
    }
}

#[derive(Debug, Clone)]
pub struct VertexIds<'a, V> {
    inner: Enumerate<Iter<'a, Option<VertexSlot<V>>>>,
}

impl<V> Iterator for VertexIds<'_, V> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .find(|(_, slot)| slot.is_some())
            .map(|(index, _)| VertexId::from_usize(index))
    }
}

#[derive(Debug, Clone)]
pub struct EdgesIter<'a, E> {
    inner: Enumerate<Iter<'a, Option<EdgeSlot<E>>>>,
}

impl<E> Iterator for EdgesIter<'_, E> {
    type Item = EdgeRef;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|(index, slot)| {
            slot.as_ref().map(|slot| EdgeRef {
                id: EdgeId::from_usize(index),
                src: slot.endpoints[0],
                dst: slot.endpoints[1],
                weight: slot.weight,
            })
        })
    }
}

#[derive(Debug, Clone)]
pub struct NeighborsIter<'a, E> {
    src: VertexId,
    dir: Direction,
    edges: Iter<'a, EdgeId>,
    slots: &'a [Option<EdgeSlot<E>>],
}

impl<E> Iterator for NeighborsIter<'_, E> {
    type Item = NeighborRef;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = *self.edges.next()?;
        let slot = match &self.slots[edge.as_usize()] {
            Some(slot) => slot,
            None => unreachable!("adjacency lists hold only live edges"),
        };

        let [src, dst] = slot.endpoints;
        let neighbor = match self.dir {
            Direction::Outgoing if src == self.src => dst,
            _ => src,
        };

        Some(NeighborRef {
            id: neighbor,
            edge,
            src: self.src,
            weight: slot.weight,
            dir: self.dir,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::infra::testing::check_consistency;

    fn neighbor_ids<V>(registry: &Registry<V>, id: VertexId, dir: Direction) -> Vec<VertexId> {
        registry
            .neighbors_directed(id, dir)
            .unwrap()
            .map(|n| n.id)
            .collect()
    }

    #[test]
    fn basic_undirected() {
        let mut registry = Registry::new(false, false);

        let v0 = registry.add_vertex("a");
        let v1 = registry.add_vertex("b");
        let v2 = registry.add_vertex("c");

        let e0 = registry.add_edge(v0, v1, 2.0, ()).unwrap();
        let e1 = registry.add_edge(v2, v0, 3.0, ()).unwrap();

        assert_eq!(registry.vertex_count(), 3);
        assert_eq!(registry.edge_count(), 2);
        assert_eq!(registry.endpoints(e1), Some((v2, v0)));
        assert_eq!(registry.weight(e0), Some(2.0));

        assert_eq!(neighbor_ids(&registry, v0, Direction::Outgoing), vec![v1, v2]);
        assert_eq!(neighbor_ids(&registry, v0, Direction::Incoming), vec![v1, v2]);
        assert_eq!(neighbor_ids(&registry, v2, Direction::Outgoing), vec![v0]);

        assert_eq!(registry.degree(v0), Some(2));
        assert_eq!(registry.in_degree(v0), Ok(2));
        assert_eq!(registry.out_degree(v0), Ok(2));

        assert_eq!(registry.edge_between(v1, v0), Some(e0));
        assert_eq!(registry.edge_between(v1, v2), None);

        check_consistency(&registry).unwrap();
    }

    #[test]
    fn basic_directed() {
        let mut registry = Registry::new(true, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        let v2 = registry.add_vertex(());

        let e0 = registry.add_edge(v0, v1, 1.0, ()).unwrap();
        registry.add_edge(v2, v0, 1.0, ()).unwrap();

        assert_eq!(neighbor_ids(&registry, v0, Direction::Outgoing), vec![v1]);
        assert_eq!(neighbor_ids(&registry, v0, Direction::Incoming), vec![v2]);
        assert_eq!(registry.degree(v0), Some(2));
        assert_eq!(registry.out_degree(v1), Ok(0));
        assert_eq!(registry.in_degree(v1), Ok(1));

        assert_eq!(registry.edge_between(v0, v1), Some(e0));
        assert_eq!(registry.edge_between(v1, v0), None);

        check_consistency(&registry).unwrap();
    }

    #[test]
    fn add_edge_validation() {
        let mut registry = Registry::new(false, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        let absent = VertexId::from(7);

        assert_eq!(
            registry.add_edge(absent, VertexId::from(8), 1.0, ()),
            Err(Error::UnknownVertex(absent))
        );
        assert_eq!(
            registry.add_edge(v0, absent, 1.0, ()),
            Err(Error::UnknownVertex(absent))
        );
        assert_matches!(
            registry.add_edge(v0, v1, f64::NAN, ()),
            Err(Error::InvalidWeight(_))
        );

        registry.add_edge(v0, v1, 1.0, ()).unwrap();
        assert_eq!(
            registry.add_edge(v1, v0, 1.0, ()),
            Err(Error::DuplicateEdge { src: v1, dst: v0 })
        );

        assert_eq!(registry.edge_count(), 1);
        check_consistency(&registry).unwrap();
    }

    #[test]
    fn multi_edges() {
        let mut registry = Registry::new(true, true);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());

        let e0 = registry.add_edge(v0, v1, 3.0, ()).unwrap();
        let e1 = registry.add_edge(v0, v1, 1.0, ()).unwrap();

        assert_eq!(registry.edge_count(), 2);
        assert_eq!(registry.edge_between(v0, v1), Some(e0));

        registry.remove_edge(e0).unwrap();
        assert_eq!(registry.edge_between(v0, v1), Some(e1));

        check_consistency(&registry).unwrap();
    }

    #[test]
    fn remove_vertex_cascades() {
        let mut registry = Registry::new(true, false);

        let v0 = registry.add_vertex(0);
        let v1 = registry.add_vertex(1);
        let v2 = registry.add_vertex(2);
        let v3 = registry.add_vertex(3);

        registry.add_edge(v0, v1, 1.0, ()).unwrap();
        registry.add_edge(v1, v2, 1.0, ()).unwrap();
        registry.add_edge(v2, v1, 1.0, ()).unwrap();
        let kept = registry.add_edge(v0, v3, 1.0, ()).unwrap();

        let version = registry.version();
        assert_eq!(registry.remove_vertex(v1), Ok(1));
        assert!(registry.version() > version);

        assert_eq!(registry.vertex_count(), 3);
        assert_eq!(registry.edge_count(), 1);
        assert_eq!(registry.edges().map(|e| e.id).collect::<Vec<_>>(), vec![kept]);
        assert_eq!(neighbor_ids(&registry, v2, Direction::Incoming), vec![]);
        assert_eq!(neighbor_ids(&registry, v0, Direction::Outgoing), vec![v3]);

        assert_eq!(registry.remove_vertex(v1), Err(Error::UnknownVertex(v1)));
        assert!(registry.neighbors(v1).is_none());

        check_consistency(&registry).unwrap();
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = Registry::new(false, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        let e0 = registry.add_edge(v0, v1, 1.0, ()).unwrap();

        registry.remove_vertex(v1).unwrap();

        let v2 = registry.add_vertex(());
        let e1 = registry.add_edge(v0, v2, 1.0, ()).unwrap();

        assert_ne!(v1, v2);
        assert_ne!(e0, e1);
        assert_eq!(registry.vertex_ids().collect::<Vec<_>>(), vec![v0, v2]);
        assert_eq!(registry.vertex_bound(), 3);
    }

    #[test]
    fn self_loops() {
        let mut undirected = Registry::new(false, false);
        let v = undirected.add_vertex(());
        let e = undirected.add_edge(v, v, 1.0, ()).unwrap();

        assert_eq!(neighbor_ids(&undirected, v, Direction::Outgoing), vec![v]);
        assert_eq!(undirected.degree(v), Some(1));

        undirected.remove_edge(e).unwrap();
        assert_eq!(undirected.degree(v), Some(0));

        let mut directed = Registry::new(true, false);
        let v = directed.add_vertex(());
        directed.add_edge(v, v, 1.0, ()).unwrap();

        assert_eq!(neighbor_ids(&directed, v, Direction::Outgoing), vec![v]);
        assert_eq!(neighbor_ids(&directed, v, Direction::Incoming), vec![v]);

        directed.remove_vertex(v).unwrap();
        assert_eq!(directed.edge_count(), 0);
        check_consistency(&directed).unwrap();
    }

    #[test]
    fn neighbor_order_survives_removal() {
        let mut registry = Registry::new(false, false);

        let hub = registry.add_vertex(());
        let leaves = (0..4).map(|_| registry.add_vertex(())).collect::<Vec<_>>();
        let edges = leaves
            .iter()
            .map(|&leaf| registry.add_edge(hub, leaf, 1.0, ()).unwrap())
            .collect::<Vec<_>>();

        registry.remove_edge(edges[1]).unwrap();

        assert_eq!(
            neighbor_ids(&registry, hub, Direction::Outgoing),
            vec![leaves[0], leaves[2], leaves[3]]
        );
    }

    #[test]
    fn update_weight() {
        let mut registry = Registry::new(false, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        let e = registry.add_edge(v0, v1, 1.0, ()).unwrap();

        assert_eq!(registry.update_weight(e, 4.0), Ok(1.0));
        assert_eq!(registry.weight(e), Some(4.0));
        assert_matches!(
            registry.update_weight(e, f64::INFINITY),
            Err(Error::InvalidWeight(_))
        );
        assert_eq!(registry.weight(e), Some(4.0));

        registry.remove_edge(e).unwrap();
        assert_eq!(registry.update_weight(e, 2.0), Err(Error::UnknownEdge(e)));
        assert_eq!(registry.remove_edge(e), Err(Error::UnknownEdge(e)));
    }

    #[test]
    fn clear() {
        let mut registry = Registry::new(false, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        registry.add_edge(v0, v1, 1.0, ()).unwrap();

        registry.clear();

        assert_eq!(registry.vertex_count(), 0);
        assert_eq!(registry.edge_count(), 0);
        assert!(!registry.contains_vertex(v0));
        assert_eq!(registry.add_vertex(()), VertexId::from(2));
    }

    #[test]
    fn edge_data() {
        let mut registry = Registry::new(true, false);

        let v0 = registry.add_vertex(());
        let v1 = registry.add_vertex(());
        let e = registry.add_edge(v0, v1, 1.0, "road").unwrap();

        assert_eq!(registry.edge_data(e), Some(&"road"));
        *registry.edge_data_mut(e).unwrap() = "rail";
        assert_eq!(registry.edge_data(e), Some(&"rail"));

        registry.remove_edge(e).unwrap();
        assert_eq!(registry.edge_data(e), None);
        assert_eq!(registry.edge_data_mut(e), None);
    }

    #[test]
    fn into_undirected_keeps_ids_and_order() {
        let mut registry = Registry::new(true, false);

        let v0 = registry.add_vertex(0);
        let v1 = registry.add_vertex(1);
        let v2 = registry.add_vertex(2);
        let v3 = registry.add_vertex(3);

        let e0 = registry.add_edge(v1, v0, 1.0, ()).unwrap();
        registry.add_edge(v0, v2, 2.0, ()).unwrap();
        registry.add_edge(v0, v3, 3.0, ()).unwrap();
        registry.remove_vertex(v2).unwrap();

        let registry = registry.into_undirected();

        assert!(!registry.is_directed());
        assert_eq!(registry.vertex_ids().collect::<Vec<_>>(), vec![v0, v1, v3]);
        assert_eq!(neighbor_ids(&registry, v0, Direction::Outgoing), vec![v1, v3]);
        assert_eq!(neighbor_ids(&registry, v1, Direction::Outgoing), vec![v0]);
        assert_eq!(registry.edge_between(v0, v1), Some(e0));
        assert_eq!(registry.degree(v0), Some(2));

        check_consistency(&registry).unwrap();
    }
}
