use std::borrow::Cow;
use std::io::{self, Write};

use dot::{self, Edges, GraphWalk, Id, LabelText, Labeller, Nodes, Style};
use fnv::FnvHashMap;

use crate::state::PuzzleState;

type Nd = usize;
type Ed = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Type {
    Queued,
    Duplicate,
    Visited,
    Goal,
}

/// The search tree - every created state with an edge from its parent.
///
/// States are identified by address, the same grid reached twice is two nodes.
#[derive(Debug)]
pub(crate) struct Graph<'a> {
    node_to_index: FnvHashMap<*const PuzzleState<'a>, usize>,
    nodes: Vec<(&'a PuzzleState<'a>, Type)>,
    edges: Vec<Ed>,
}

impl<'a> Graph<'a> {
    pub(crate) fn new() -> Self {
        Self {
            node_to_index: FnvHashMap::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, node: &'a PuzzleState<'a>) {
        let key = node as *const PuzzleState<'a>;
        assert!(!self.node_to_index.contains_key(&key));

        let node_index = self.nodes.len();
        self.node_to_index.insert(key, node_index);
        self.nodes.push((node, Type::Queued));

        if let Some(parent) = node.parent() {
            let parent_index = self.node_to_index[&(parent as *const PuzzleState<'a>)];
            self.edges.push((parent_index, node_index));
        }
    }

    pub(crate) fn mark_duplicate(&mut self, node: &'a PuzzleState<'a>) {
        self.mark(node, Type::Duplicate);
    }

    pub(crate) fn mark_visited(&mut self, node: &'a PuzzleState<'a>) {
        self.mark(node, Type::Visited);
    }

    pub(crate) fn mark_goal(&mut self, node: &'a PuzzleState<'a>) {
        self.mark(node, Type::Goal);
    }

    fn mark(&mut self, node: &'a PuzzleState<'a>, node_type: Type) {
        let index = self.node_to_index[&(node as *const PuzzleState<'a>)];
        self.nodes[index].1 = node_type;
    }

    pub(crate) fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }
}

impl<'a> GraphWalk<'a, Nd, Ed> for Graph<'a> {
    fn nodes(&'a self) -> Nodes<'a, Nd> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&'a self) -> Edges<'a, Ed> {
        Cow::from(&self.edges)
    }

    fn source(&'a self, e: &Ed) -> Nd {
        e.0
    }

    fn target(&'a self, e: &Ed) -> Nd {
        e.1
    }
}

impl<'a> Labeller<'a, Nd, Ed> for Graph<'a> {
    fn graph_id(&'a self) -> Id<'a> {
        Id::new("G").unwrap()
    }

    fn node_id(&'a self, n: &Nd) -> Id<'a> {
        Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&'a self, n: &Nd) -> LabelText<'a> {
        let node = self.nodes[*n].0;
        let mov = match node.mov() {
            Some(mov) => mov.to_string(),
            None => "start".to_string(),
        };
        // \l left-justifies each line of the grid
        let grid = node.grid().to_string().replace('\n', "\\l");
        LabelText::EscStr(format!("d: {}, {}\\l{}", node.depth(), mov, grid).into())
    }

    fn node_style(&'a self, n: &Nd) -> Style {
        if self.nodes[*n].1 == Type::Queued {
            Style::Solid
        } else {
            Style::Filled
        }
    }

    fn node_color(&'a self, n: &Nd) -> Option<LabelText<'a>> {
        Some(LabelText::LabelStr(
            match self.nodes[*n].1 {
                Type::Goal => "green",
                Type::Visited => "red",
                Type::Duplicate => "gray",
                Type::Queued => return None,
            }
            .into(),
        ))
    }
}
