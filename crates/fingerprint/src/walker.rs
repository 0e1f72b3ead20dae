//! Depth-bounded path enumeration.
//!
//! Both strategies visit sources in atom-index order and neighbors in
//! ascending atom-index order, so the emitted sequence is a pure function of
//! the graph. Traversal keeps its own stack / queue; call-stack depth does
//! not grow with ring count or path length.

use std::collections::VecDeque;

use graph::{AtomId, BondId, MolGraph};
use serde::{Deserialize, Serialize};

use crate::config::{FingerprintConfig, FingerprintError};

/// Which paths a fingerprint is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Enumeration {
    /// Every simple path of `0..=max_depth` bonds from every atom.
    #[default]
    AllSimplePaths,
    /// Every shortest path from every atom to each atom it reaches within
    /// `max_depth` bonds.
    ShortestPaths,
}

/// A path handed to visitors: `atoms.len() == bonds.len() + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRef<'p> {
    pub atoms: &'p [AtomId],
    pub bonds: &'p [BondId],
}

impl PathRef<'_> {
    /// Length in bonds.
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    /// True for the zero-length path of a single atom.
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    atom: AtomId,
    next: usize,
}

/// Enumerates paths of a graph under a depth bound and a per-source budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathWalker {
    max_depth: usize,
    path_limit: usize,
    include_pseudo: bool,
}

impl PathWalker {
    pub fn new(max_depth: usize, path_limit: usize) -> Self {
        Self {
            max_depth,
            path_limit,
            include_pseudo: false,
        }
    }

    pub fn from_config(cfg: &FingerprintConfig) -> Self {
        Self::new(cfg.max_depth, cfg.path_limit).with_pseudo_atoms(cfg.hash_pseudo_atoms)
    }

    /// Walk through pseudo atoms instead of skipping them.
    pub fn with_pseudo_atoms(mut self, include: bool) -> Self {
        self.include_pseudo = include;
        self
    }

    /// Same walker with a different depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run `enumeration`, returning the number of emitted paths.
    pub fn walk<F>(
        &self,
        graph: &MolGraph,
        enumeration: Enumeration,
        visit: F,
    ) -> Result<usize, FingerprintError>
    where
        F: FnMut(PathRef<'_>),
    {
        match enumeration {
            Enumeration::AllSimplePaths => self.all_simple_paths(graph, visit),
            Enumeration::ShortestPaths => self.shortest_paths(graph, visit),
        }
    }

    /// Emit every simple path of `0..=max_depth` bonds from every source atom.
    ///
    /// Fails with [`FingerprintError::PathLimitExceeded`] as soon as one
    /// source emits more than `path_limit` paths.
    pub fn all_simple_paths<F>(&self, graph: &MolGraph, mut visit: F) -> Result<usize, FingerprintError>
    where
        F: FnMut(PathRef<'_>),
    {
        let adjacency = self.adjacency(graph);
        let mut on_path = vec![false; graph.atom_count()];
        let depth_cap = self.max_depth.min(graph.atom_count());
        let mut atoms: Vec<AtomId> = Vec::with_capacity(depth_cap + 1);
        let mut bonds: Vec<BondId> = Vec::with_capacity(depth_cap);
        let mut stack: Vec<Frame> = Vec::with_capacity(depth_cap + 1);
        let mut total = 0usize;

        for source in graph.atom_ids() {
            if self.skips(graph, source) {
                continue;
            }
            atoms.clear();
            bonds.clear();
            stack.clear();

            atoms.push(source);
            on_path[source.index()] = true;
            let mut emitted = 1usize;
            visit(PathRef {
                atoms: &atoms,
                bonds: &bonds,
            });
            if self.max_depth > 0 {
                stack.push(Frame {
                    atom: source,
                    next: 0,
                });
            }

            while let Some(frame) = stack.last_mut() {
                let Some(&(next, bond)) = adjacency[frame.atom.index()].get(frame.next) else {
                    // Frame exhausted: backtrack out of its atom (the source stays).
                    stack.pop();
                    if atoms.len() > 1 {
                        if let Some(done) = atoms.pop() {
                            on_path[done.index()] = false;
                        }
                        bonds.pop();
                    }
                    continue;
                };
                frame.next += 1;
                if on_path[next.index()] {
                    continue;
                }

                atoms.push(next);
                bonds.push(bond);
                on_path[next.index()] = true;

                emitted += 1;
                if emitted > self.path_limit {
                    return Err(FingerprintError::PathLimitExceeded {
                        atom: source.index(),
                        limit: self.path_limit,
                        depth: bonds.len(),
                    });
                }
                visit(PathRef {
                    atoms: &atoms,
                    bonds: &bonds,
                });

                if bonds.len() < self.max_depth {
                    stack.push(Frame { atom: next, next: 0 });
                } else {
                    atoms.pop();
                    bonds.pop();
                    on_path[next.index()] = false;
                }
            }

            on_path[source.index()] = false;
            total += emitted;
        }
        Ok(total)
    }

    /// Emit every shortest path from every source to every atom it reaches
    /// within `max_depth` bonds, the zero-length path included.
    ///
    /// Equally short paths are all emitted, so the set of paths does not
    /// depend on atom numbering. Each emitted path counts against
    /// `path_limit`.
    pub fn shortest_paths<F>(&self, graph: &MolGraph, mut visit: F) -> Result<usize, FingerprintError>
    where
        F: FnMut(PathRef<'_>),
    {
        let adjacency = self.adjacency(graph);
        let n = graph.atom_count();
        let depth_cap = self.max_depth.min(n);
        let mut depth = vec![usize::MAX; n];
        let mut preds: Vec<Vec<(AtomId, BondId)>> = vec![Vec::new(); n];
        let mut reached: Vec<AtomId> = Vec::new();
        let mut queue: VecDeque<AtomId> = VecDeque::new();
        // Sink-to-source walk over predecessors, and the same path forwards.
        let mut back_atoms: Vec<AtomId> = Vec::with_capacity(depth_cap + 1);
        let mut back_bonds: Vec<BondId> = Vec::with_capacity(depth_cap);
        let mut stack: Vec<Frame> = Vec::with_capacity(depth_cap + 1);
        let mut atoms: Vec<AtomId> = Vec::with_capacity(depth_cap + 1);
        let mut bonds: Vec<BondId> = Vec::with_capacity(depth_cap);
        let mut total = 0usize;

        for source in graph.atom_ids() {
            if self.skips(graph, source) {
                continue;
            }
            for a in reached.drain(..) {
                depth[a.index()] = usize::MAX;
                preds[a.index()].clear();
            }

            depth[source.index()] = 0;
            queue.push_back(source);
            while let Some(a) = queue.pop_front() {
                reached.push(a);
                let d = depth[a.index()];
                if d >= self.max_depth {
                    continue;
                }
                for &(b, bond) in &adjacency[a.index()] {
                    if depth[b.index()] == usize::MAX {
                        depth[b.index()] = d + 1;
                        queue.push_back(b);
                    }
                    if depth[b.index()] == d + 1 {
                        preds[b.index()].push((a, bond));
                    }
                }
            }

            let mut emitted = 0usize;
            for &sink in &reached {
                back_atoms.clear();
                back_bonds.clear();
                stack.clear();
                back_atoms.push(sink);
                stack.push(Frame { atom: sink, next: 0 });

                while let Some(frame) = stack.last_mut() {
                    let at = frame.atom;
                    if at == source {
                        emitted += 1;
                        if emitted > self.path_limit {
                            return Err(FingerprintError::PathLimitExceeded {
                                atom: source.index(),
                                limit: self.path_limit,
                                depth: depth[sink.index()],
                            });
                        }
                        atoms.clear();
                        atoms.extend(back_atoms.iter().rev());
                        bonds.clear();
                        bonds.extend(back_bonds.iter().rev());
                        visit(PathRef {
                            atoms: &atoms,
                            bonds: &bonds,
                        });
                        stack.pop();
                        back_atoms.pop();
                        back_bonds.pop();
                        continue;
                    }
                    let Some(&(prev, bond)) = preds[at.index()].get(frame.next) else {
                        stack.pop();
                        back_atoms.pop();
                        back_bonds.pop();
                        continue;
                    };
                    frame.next += 1;
                    back_atoms.push(prev);
                    back_bonds.push(bond);
                    stack.push(Frame { atom: prev, next: 0 });
                }
            }
            total += emitted;
        }
        Ok(total)
    }

    fn skips(&self, graph: &MolGraph, atom: AtomId) -> bool {
        !self.include_pseudo && graph.atom(atom).is_some_and(|a| a.pseudo)
    }

    /// Neighbor lists sorted by atom index, pseudo atoms removed when skipped.
    fn adjacency(&self, graph: &MolGraph) -> Vec<Vec<(AtomId, BondId)>> {
        graph
            .atom_ids()
            .map(|a| {
                let mut row: Vec<(AtomId, BondId)> = graph
                    .neighbors(a)
                    .filter(|(b, _)| !self.skips(graph, *b))
                    .collect();
                row.sort_unstable_by_key(|(b, _)| b.index());
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph::{Atom, Bond};

    fn chain(symbols: &[&str]) -> MolGraph {
        let mut g = MolGraph::new();
        let ids: Vec<_> = symbols.iter().map(|s| g.add_atom(Atom::new(*s))).collect();
        for pair in ids.windows(2) {
            g.add_bond(pair[0], pair[1], Bond::single()).unwrap();
        }
        g
    }

    fn cycle(n: usize) -> MolGraph {
        let mut g = MolGraph::new();
        let ids: Vec<_> = (0..n).map(|_| g.add_atom(Atom::new("C"))).collect();
        for i in 0..n {
            g.add_bond(ids[i], ids[(i + 1) % n], Bond::single()).unwrap();
        }
        g
    }

    fn collect(walker: PathWalker, g: &MolGraph, e: Enumeration) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        walker
            .walk(g, e, |p| out.push(p.atoms.iter().map(|a| a.index()).collect()))
            .unwrap();
        out
    }

    // ==================== Simple Path Tests ====================

    #[test]
    fn chain_paths_from_every_source() {
        let g = chain(&["C", "C", "O"]);
        let paths = collect(PathWalker::new(2, 100), &g, Enumeration::AllSimplePaths);
        assert_eq!(
            paths,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![1],
                vec![1, 0],
                vec![1, 2],
                vec![2],
                vec![2, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn depth_zero_emits_single_atoms() {
        let g = chain(&["C", "N", "O"]);
        let count = PathWalker::new(0, 10).all_simple_paths(&g, |_| {}).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn triangle_has_no_three_bond_path() {
        let g = cycle(3);
        let d2 = PathWalker::new(2, 100).all_simple_paths(&g, |_| {}).unwrap();
        let d3 = PathWalker::new(3, 100).all_simple_paths(&g, |_| {}).unwrap();
        assert_eq!(d2, 15);
        assert_eq!(d3, 15);
    }

    #[test]
    fn paths_never_revisit_an_atom() {
        let g = cycle(4);
        let walker = PathWalker::new(8, 1000);
        walker
            .all_simple_paths(&g, |p| {
                let mut seen: Vec<usize> = p.atoms.iter().map(|a| a.index()).collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), p.atoms.len());
                assert_eq!(p.atoms.len(), p.bonds.len() + 1);
            })
            .unwrap();
    }

    #[test]
    fn path_limit_is_per_source() {
        let g = cycle(3);
        // Each source emits exactly 5 paths at depth 2.
        assert!(PathWalker::new(2, 5).all_simple_paths(&g, |_| {}).is_ok());
        assert_eq!(
            PathWalker::new(2, 4).all_simple_paths(&g, |_| {}),
            Err(FingerprintError::PathLimitExceeded {
                atom: 0,
                limit: 4,
                depth: 2
            })
        );
    }

    #[test]
    fn pseudo_atoms_are_skipped_unless_requested() {
        let g = chain(&["C", "*", "C"]);
        let skipped = collect(PathWalker::new(2, 100), &g, Enumeration::AllSimplePaths);
        assert_eq!(skipped, vec![vec![0], vec![2]]);

        let walked = PathWalker::new(2, 100)
            .with_pseudo_atoms(true)
            .all_simple_paths(&g, |_| {})
            .unwrap();
        assert_eq!(walked, 9);
    }

    // ==================== Shortest Path Tests ====================

    #[test]
    fn shortest_paths_in_ring_keep_both_directions_on_ties() {
        let g = cycle(6);
        let paths = collect(PathWalker::new(6, 100), &g, Enumeration::ShortestPaths);
        // Per source: itself, 2 + 2 neighbours, and two routes to the far atom.
        assert_eq!(paths.len(), 6 * 7);
        assert!(paths.contains(&vec![0, 1, 2, 3]));
        assert!(paths.contains(&vec![0, 5, 4, 3]));
        assert!(paths.iter().all(|p| p.len() <= 4));
    }

    #[test]
    fn shortest_paths_start_at_the_source() {
        let g = chain(&["C", "N", "O"]);
        let paths = collect(PathWalker::new(2, 100), &g, Enumeration::ShortestPaths);
        assert!(paths.contains(&vec![0, 1, 2]));
        assert!(paths.contains(&vec![2, 1, 0]));
        assert_eq!(paths.len(), 9);
    }

    #[test]
    fn shortest_paths_respect_depth_and_components() {
        let mut g = cycle(6);
        g.add_atom(Atom::new("Na"));
        let walker = PathWalker::new(1, 100);
        let count = walker.shortest_paths(&g, |_| {}).unwrap();
        // Ring atoms reach themselves and two neighbours; the ion only itself.
        assert_eq!(count, 6 * 3 + 1);
    }

    #[test]
    fn huge_depth_bound_is_clamped_to_the_graph() {
        let g = chain(&["C", "C", "O"]);
        let walker = PathWalker::new(usize::MAX, 100);
        assert_eq!(walker.all_simple_paths(&g, |_| {}).unwrap(), 9);
        assert_eq!(walker.shortest_paths(&g, |_| {}).unwrap(), 9);
    }

    #[test]
    fn shortest_paths_check_limit() {
        let g = cycle(6);
        let err = PathWalker::new(6, 5).shortest_paths(&g, |_| {}).unwrap_err();
        assert!(matches!(
            err,
            FingerprintError::PathLimitExceeded { atom: 0, limit: 5, depth: 3 }
        ));
    }
}
