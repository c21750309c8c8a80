//! Random sequences of mutations for fuzzing [`Graph`] and [`Tree`].

use std::fmt;

use arbitrary::{Arbitrary, Unstructured};

use crate::{
    core::{
        error::Result,
        id::{EdgeId, IdType, VertexId},
        EdgeSet, VertexSet,
    },
    graph::Graph,
    tree::Tree,
};

#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }

    /// Maps the index into `0..bound`, which may point to a removed element.
    fn vertex(&self, bound: usize) -> VertexId {
        VertexId::from_usize(self.get(bound).unwrap_or_default())
    }

    fn edge(&self, bound: usize) -> EdgeId {
        EdgeId::from_usize(self.get(bound).unwrap_or_default())
    }
}

/// Edge weight as generated by the fuzzer. The minimum value stands for NaN,
/// so that invalid weights are exercised too.
#[derive(Arbitrary, Clone, Copy, PartialEq, Eq)]
pub struct Weight(pub i8);

impl Weight {
    pub fn get(self) -> f64 {
        if self.0 == i8::MIN {
            f64::NAN
        } else {
            self.0 as f64
        }
    }
}

impl fmt::Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.get())
    }
}

#[derive(Debug, Arbitrary, Clone)]
pub enum MutOp {
    AddVertex(i8),
    RemoveVertex(Index),
    AddEdge(Index, Index, Weight),
    RemoveEdge(Index),
    RemoveEdgeBetween(Index, Index),
    UpdateWeight(Index, Weight),
    Clear,
}

impl MutOp {
    /// Applies the operation. Operations referring to elements that do not
    /// exist fail the same way as direct calls on the graph.
    pub fn apply(self, graph: &mut Graph<i8>) -> Result<()> {
        let n = graph.vertex_bound();
        let m = graph.edge_bound();

        match self {
            MutOp::AddVertex(payload) => {
                graph.add_vertex(payload);
            }
            MutOp::RemoveVertex(index) => {
                graph.remove_vertex(index.vertex(n))?;
            }
            MutOp::AddEdge(src, dst, weight) => {
                graph.add_edge(src.vertex(n), dst.vertex(n), weight.get())?;
            }
            MutOp::RemoveEdge(index) => {
                graph.remove_edge(index.edge(m))?;
            }
            MutOp::RemoveEdgeBetween(src, dst) => {
                graph.remove_edge_between(src.vertex(n), dst.vertex(n))?;
            }
            MutOp::UpdateWeight(index, weight) => {
                graph.update_weight(index.edge(m), weight.get())?;
            }
            MutOp::Clear => graph.clear(),
        }

        Ok(())
    }
}

pub struct MutOpsSeq(pub Vec<MutOp>);

impl IntoIterator for MutOpsSeq {
    type Item = MutOp;
    type IntoIter = std::vec::IntoIter<MutOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Debug for MutOpsSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OpKind {
    AddVertex,
    AddEdge,
    RemoveVertex,
    RemoveEdge,
    RemoveEdgeBetween,
    UpdateWeight,
    Clear,
}

impl<'a> Arbitrary<'a> for MutOpsSeq {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let n_target = u.int_in_range(10..=1000)?;
        let r = u.nice_f64()?;

        let m_target = ((n_target * (n_target - 1) / 2) as f64 * r).round() as usize;
        let total = u.len();

        let mut n = 0usize;
        let mut m = 0usize;
        let mut seq = Vec::with_capacity(n_target);

        while !u.is_empty() {
            let rv = (n as f64 / n_target as f64).min(1.0);
            let re = (m as f64 / m_target.max(1) as f64).min(1.0);
            let r = (total - u.len()) as f64 / total as f64;

            let op = match arbitrary_op(u, rv, re, r) {
                Ok(op) => op,
                Err(_) => break,
            };

            match op {
                MutOp::AddVertex(_) => n += 1,
                MutOp::RemoveVertex(_) => n = n.saturating_sub(1),
                MutOp::AddEdge(_, _, _) => m += 1,
                MutOp::RemoveEdge(_) | MutOp::RemoveEdgeBetween(_, _) => {
                    m = m.saturating_sub(1)
                }
                MutOp::UpdateWeight(_, _) => {}
                MutOp::Clear => {
                    n = 0;
                    m = 0
                }
            }

            seq.push(op);
        }

        Ok(MutOpsSeq(seq))
    }
}

fn arbitrary_op(u: &mut Unstructured<'_>, rv: f64, re: f64, r: f64) -> arbitrary::Result<MutOp> {
    // The more vertices/edges are in the graph, the less is needed to add them.
    // The ratio of added vertices/edges is artificially biased to be larger by
    // averaging with progress ratio. The weights of the average are chosen such
    // that the progress ratio less influences the edges so that we keep adding
    // edges during the process.
    let wv = non_linear_decrease(0.4 * rv + 0.6 * r);
    let we = non_linear_decrease(0.6 * re + 0.4 * r);

    u.choose_weighted(
        &[
            OpKind::AddVertex,
            OpKind::AddEdge,
            OpKind::RemoveVertex,
            OpKind::RemoveEdge,
            OpKind::RemoveEdgeBetween,
            OpKind::UpdateWeight,
            OpKind::Clear,
        ],
        // Removal weights are opposite to the adding weights, scaled down a
        // little bit (to prefer adding compared to removing). Clearing should
        // be rare operation.
        &[
            wv,
            we,
            (1.0 - wv) * 0.25,
            (1.0 - we) * 0.25,
            (1.0 - we) * 0.25,
            0.1,
            0.01,
        ],
    )
    .and_then(|kind| match kind {
        OpKind::AddVertex => Ok(MutOp::AddVertex(u.arbitrary()?)),
        OpKind::AddEdge => Ok(MutOp::AddEdge(
            u.arbitrary()?,
            u.arbitrary()?,
            u.arbitrary()?,
        )),
        OpKind::RemoveVertex => Ok(MutOp::RemoveVertex(u.arbitrary()?)),
        OpKind::RemoveEdge => Ok(MutOp::RemoveEdge(u.arbitrary()?)),
        OpKind::RemoveEdgeBetween => Ok(MutOp::RemoveEdgeBetween(u.arbitrary()?, u.arbitrary()?)),
        OpKind::UpdateWeight => Ok(MutOp::UpdateWeight(u.arbitrary()?, u.arbitrary()?)),
        OpKind::Clear => Ok(MutOp::Clear),
    })
}

#[derive(Debug, Arbitrary, Clone)]
pub enum TreeOp {
    AddChild(Index, i8, Weight),
    AddEdge(Index, Index, Weight),
    RemoveVertex(Index),
    RemoveSubtree(Index),
    MoveSubtree(Index, Index),
    SetRoot(Index),
}

impl TreeOp {
    pub fn apply(self, tree: &mut Tree<i8>) -> Result<()> {
        let n = tree.vertex_bound();

        match self {
            TreeOp::AddChild(parent, payload, weight) => {
                tree.add_child_weighted(parent.vertex(n), payload, weight.get())?;
            }
            TreeOp::AddEdge(src, dst, weight) => {
                tree.add_edge(src.vertex(n), dst.vertex(n), weight.get())?;
            }
            TreeOp::RemoveVertex(index) => {
                tree.remove_vertex(index.vertex(n))?;
            }
            TreeOp::RemoveSubtree(index) => {
                tree.remove_subtree(index.vertex(n))?;
            }
            TreeOp::MoveSubtree(index, parent) => {
                tree.move_subtree(index.vertex(n), parent.vertex(n))?;
            }
            TreeOp::SetRoot(index) => {
                tree.set_root(index.vertex(n))?;
            }
        }

        Ok(())
    }
}

trait UnstructuredExt {
    fn nice_f64(&mut self) -> arbitrary::Result<f64>;
    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T>;
}

impl<'a> UnstructuredExt for Unstructured<'a> {
    fn nice_f64(&mut self) -> arbitrary::Result<f64> {
        const RESOLUTION: u8 = 100;
        let int = self.int_in_range(0..=RESOLUTION)?;
        Ok(int as f64 / RESOLUTION as f64)
    }

    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T> {
        if choices.is_empty() || choices.len() != weights.len() {
            return Err(arbitrary::Error::EmptyChoose);
        }

        let weight_sum = weights.iter().copied().sum::<f64>();

        let random = self.nice_f64()?;
        let bound = random * weight_sum;

        let mut acc = 0.0;
        for (choice, weight) in choices.iter().zip(weights.iter().copied()) {
            acc += weight;

            if acc >= bound {
                return Ok(choice);
            }
        }

        // Rounding errors in the accumulated sum.
        choices.last().ok_or(arbitrary::Error::EmptyChoose)
    }
}

// f(0) = 1, f(1) ~= 0.152
fn non_linear_decrease(x: f64) -> f64 {
    1.0 / (x + 1.0).powf(std::f64::consts::E)
}
