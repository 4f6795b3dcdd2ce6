//! The deduplicating, depth-bounded exploration tree.
//!
//! Built depth-first from a root state: each expansion materializes every
//! joint transition, applies it to an independent copy of the parent, and
//! merges children that land on the same canonical statistics, summing
//! their probabilities. Canonicalization is what keeps the tree bounded by
//! the number of *distinct reachable count-vectors* rather than the number
//! of transition sequences.

use crate::*;
use petgraph::graph::DiGraph;
use petgraph::graph::EdgeIndex;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::sync::Arc;

/// The immutable problem configuration shared by every state of one
/// exploration: arm means and per-player decision rules. Held behind an
/// [`Arc`] and never copied into states.
#[derive(Debug, Clone)]
pub struct Config<S>
where
    S: Scalar,
{
    pub mus: Vec<S>,
    pub players: Vec<Policy>,
}

/// An explicit tree over reachable [`State`]s.
///
/// Wraps a petgraph `DiGraph`: vertices carry states, edges carry exact
/// one-step transition probabilities. Node 0 is the root. Within one
/// expansion step the children of a node are deduplicated by [`StateKey`];
/// distinct paths meeting at the same counts deeper in the tree are merged
/// later, by [`distribution`](Self::distribution).
#[derive(Debug)]
pub struct Tree<S>
where
    S: Scalar,
{
    graph: DiGraph<State, S>,
    config: Arc<Config<S>>,
}

impl<S> Tree<S>
where
    S: Scalar,
{
    /// Seed a tree with its root state and shared configuration.
    pub fn seed(root: State, config: Arc<Config<S>>) -> Self {
        assert!(config.players.len() == root.players(), "one rule per player");
        assert!(config.mus.len() == root.arms(), "one mean per arm");
        let mut graph = DiGraph::default();
        graph.add_node(root);
        Self { graph, config }
    }
    /// The root node.
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }
    /// Number of nodes in the tree.
    pub fn n(&self) -> usize {
        self.graph.node_count()
    }
    /// The state at a node.
    pub fn at(&self, node: NodeIndex) -> &State {
        &self.graph[node]
    }
    /// The shared problem configuration.
    pub fn config(&self) -> &Config<S> {
        &self.config
    }
    /// Outgoing (probability, child) pairs of a node, children in
    /// first-encounter order of the delta enumeration.
    pub fn children(&self, node: NodeIndex) -> Vec<(S, NodeIndex)> {
        // petgraph iterates outgoing edges most-recent first
        let mut out = self
            .graph
            .edges(node)
            .map(|edge| (edge.weight().clone(), edge.target()))
            .collect::<Vec<_>>();
        out.reverse();
        out
    }

    /// Compute one layer of children below `node`.
    ///
    /// Applies every transition to an independent copy of the node's
    /// state, dedups the results by canonical key, and sums the
    /// probabilities of merged branches. Returns the distinct children.
    /// Panics if the outgoing probabilities fail to sum to 1.
    pub fn expand(&mut self, node: NodeIndex) -> Vec<NodeIndex> {
        let parent = self.graph[node].clone();
        let all = deltas(&parent, &self.config.players, &self.config.mus);
        let transitions = all.len();
        let mut merged: HashMap<StateKey, EdgeIndex> = HashMap::new();
        let mut children = Vec::new();
        for (delta, proba) in all {
            let child = delta.apply(&parent);
            debug_assert!(child.depth() == parent.depth() - 1);
            let key = StateKey::from(&child);
            match merged.get(&key) {
                Some(&edge) => {
                    let weight = self.graph.edge_weight_mut(edge).expect("merged edge");
                    *weight = weight.add(&proba);
                }
                None => {
                    let tail = self.graph.add_node(child);
                    let edge = self.graph.add_edge(node, tail, proba);
                    merged.insert(key, edge);
                    children.push(tail);
                }
            }
        }
        let total = self
            .children(node)
            .into_iter()
            .fold(S::zero(), |sum, (p, _)| sum.add(&p));
        assert!(
            total.is_one(),
            "transition probabilities must sum to 1, got {}",
            total
        );
        log::debug!(
            "expanded node {:?}: {} transitions collapsed into {} distinct states",
            node,
            transitions,
            children.len()
        );
        children
    }

    /// Recursively expand `node` down to depth 0, depth-first.
    pub fn explore_from(&mut self, node: NodeIndex) {
        if self.graph[node].depth() == 0 {
            return;
        }
        for child in self.expand(node) {
            self.explore_from(child);
        }
    }
    /// Expand the whole tree from the root.
    pub fn explore(&mut self) {
        self.explore_from(self.root())
    }

    /// All leaves with their root-to-leaf path probabilities. A state
    /// reached along distinct paths appears once per path.
    pub fn leaves(&self) -> Vec<(S, NodeIndex)> {
        let mut out = Vec::new();
        self.gather(self.root(), S::one(), &mut out);
        out
    }
    fn gather(&self, node: NodeIndex, mass: S, out: &mut Vec<(S, NodeIndex)>) {
        let below = self.children(node);
        if below.is_empty() {
            out.push((mass, node));
        } else {
            for (proba, child) in below {
                self.gather(child, mass.mul(&proba), out);
            }
        }
    }

    /// The deduplicated distribution over leaves: merges leaves that carry
    /// the same canonical statistics across different paths, summing their
    /// path probabilities. The returned masses sum to 1.
    pub fn distribution(&self) -> Vec<(State, S)> {
        let mut index: HashMap<StateKey, usize> = HashMap::new();
        let mut unique: Vec<(State, S)> = Vec::new();
        for (mass, node) in self.leaves() {
            let state = &self.graph[node];
            match index.get(&StateKey::from(state)) {
                Some(&i) => {
                    let merged = unique[i].1.add(&mass);
                    unique[i].1 = merged;
                }
                None => {
                    index.insert(StateKey::from(state), unique.len());
                    unique.push((state.clone(), mass));
                }
            }
        }
        let total = unique
            .iter()
            .fold(S::zero(), |sum, (_, mass)| sum.add(mass));
        assert!(
            total.is_one(),
            "leaf probabilities must sum to 1, got {}",
            total
        );
        unique
    }

    /// display one subtree in a human-readable format
    /// be careful because it's really big and recursive
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        if x == self.root() {
            writeln!(f, "\nROOT   {}", self.at(x))?;
        }
        let children = self.children(x);
        let n = children.len();
        for (i, (proba, child)) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            writeln!(f, "{}{}──[p = {}]", prefix, stem, proba)?;
            for line in self.at(child).to_string().lines() {
                writeln!(f, "{}{}  {}", prefix, gaps, line)?;
            }
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl<S> std::fmt::Display for Tree<S>
where
    S: Scalar,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.show(f, self.root(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree<S: Scalar>(players: usize, arms: usize, depth: u32, mus: Vec<S>) -> Tree<S> {
        let config = Arc::new(Config {
            mus,
            players: vec![Policy::default(); players],
        });
        Tree::seed(State::root(players, arms, depth), config)
    }

    #[test]
    fn single_player_single_arm_symbolic() {
        // one step from the all-zero root: success with p, failure with 1-p
        let mut tree = tree(1, 1, 1, vec![Poly::var(0)]);
        tree.explore();
        let leaves = tree.distribution();
        assert_eq!(leaves.len(), 2);
        let p = Poly::var(0);
        for (state, mass) in &leaves {
            assert_eq!(state.sensing_trials().at(0, 0), 1);
            match state.sensing_successes().at(0, 0) {
                1 => assert_eq!(*mass, p),
                0 => assert_eq!(*mass, p.complement()),
                _ => unreachable!("one trial yields zero or one success"),
            }
        }
    }

    #[test]
    fn cold_start_two_by_two() {
        // both players tie on both arms: 4 decision profiles x 4 outcome
        // profiles collapse into few distinct count-vectors summing to 1
        let mut tree = tree(2, 2, 1, vec![0.8, 0.2]);
        tree.explore();
        let leaves = tree.distribution();
        assert!(leaves.len() <= 16);
        assert!(leaves.len() > 1);
        let total = leaves
            .iter()
            .fold(0., |sum, (_, mass)| Scalar::add(&sum, mass));
        assert!(total.is_one());
    }

    #[test]
    fn dedup_never_exceeds_transition_count() {
        let mut tree = tree(2, 2, 1, vec![Rational::new(4, 5), Rational::new(1, 5)]);
        let children = tree.expand(tree.root());
        assert!(children.len() <= 4 * 4);
        assert!(children.len() < 4 * 4, "symmetric ties must collapse");
    }

    #[test]
    fn every_leaf_sits_at_depth_zero() {
        let mut tree = tree(2, 2, 2, vec![0.8, 0.2]);
        tree.explore();
        for (_, node) in tree.leaves() {
            assert_eq!(tree.at(node).depth(), 0);
        }
    }

    #[test]
    fn child_depth_decrements_by_one() {
        let mut tree = tree(2, 2, 2, vec![0.8, 0.2]);
        let children = tree.expand(tree.root());
        for child in children {
            assert_eq!(tree.at(child).depth(), 1);
            assert_eq!(tree.at(child).t(), 1);
        }
    }

    #[test]
    fn determinism_across_runs() {
        let run = || {
            let mut tree = tree(2, 2, 2, vec![Rational::new(4, 5), Rational::new(1, 5)]);
            tree.explore();
            tree.distribution()
                .into_iter()
                .map(|(state, mass)| (StateKey::from(&state), mass))
                .collect::<std::collections::HashMap<_, _>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn conservation_holds_at_depth_two_exactly() {
        let mut tree = tree(2, 2, 2, vec![Rational::new(4, 5), Rational::new(1, 5)]);
        tree.explore();
        let total = tree
            .distribution()
            .into_iter()
            .fold(Rational::zero(), |sum, (_, mass)| sum.add(&mass));
        assert!(total.is_one());
    }

    #[test]
    fn symbolic_conservation_is_structural() {
        let mut tree = tree(2, 2, 1, vec![Poly::var(0), Poly::var(1)]);
        tree.explore();
        let total = tree
            .distribution()
            .into_iter()
            .fold(Poly::zero(), |sum, (_, mass)| sum.add(&mass));
        assert!(total.is_one(), "must expand to the constant 1: {}", total);
    }

    // Conservation across the full rule x feedback matrix
    macro_rules! conserve {
        ($R:ident, $F:ident) => {
            paste::paste! {
                #[test]
                fn [<conservation_ $R:lower _ $F:lower>]() {
                    let config = Arc::new(Config {
                        mus: vec![0.8, 0.2],
                        players: vec![Policy::$R(Feedback::$F); 2],
                    });
                    let mut tree = Tree::seed(State::root(2, 2, 2), config);
                    tree.explore();
                    let total = tree
                        .distribution()
                        .into_iter()
                        .fold(0., |sum, (_, mass)| Scalar::add(&sum, &mass));
                    assert!(total.is_one(), "leaf mass drifted: {}", total);
                }
            }
        };
    }

    #[rustfmt::skip] conserve!(Greedy, Sensing);
    #[rustfmt::skip] conserve!(Greedy, Transmission);
    #[rustfmt::skip] conserve!(Greedy, Weighted);
    #[rustfmt::skip] conserve!(Ucb,    Sensing);
    #[rustfmt::skip] conserve!(Ucb,    Transmission);
    #[rustfmt::skip] conserve!(Ucb,    Weighted);
    #[rustfmt::skip] conserve!(KlUcb,  Sensing);
    #[rustfmt::skip] conserve!(KlUcb,  Transmission);
    #[rustfmt::skip] conserve!(KlUcb,  Weighted);

    #[test]
    fn absorption_survives_identical_transitions() {
        // a settled symmetric state stays absorbing through further steps
        // in which both players target the same arm
        let s = Counts::from_rows(&[vec![2, 1, 0], vec![2, 1, 0]]);
        let n = Counts::from_rows(&[vec![4, 3, 1], vec![4, 3, 1]]);
        let root = State::new(s.clone(), s, n.clone(), n, 1);
        assert!(root.is_absorbing());
        let config = Arc::new(Config {
            mus: vec![Rational::new(4, 5), Rational::new(2, 5), Rational::new(1, 5)],
            players: vec![Policy::FixedArm(0); 2],
        });
        let mut tree = Tree::seed(root, config);
        tree.explore();
        for (_, node) in tree.leaves() {
            assert!(tree.at(node).is_absorbing());
        }
    }
}
