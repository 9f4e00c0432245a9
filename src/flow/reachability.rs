// Per-member control-flow reachability.
//
// Builds a digraph whose nodes are the body's statements (keyed by node
// address, which is stable for the lifetime of the borrowed body) and walks
// it from the entry. Throw sites inside unreachable statements are dropped by
// the flow walker. This is trivial reachability, not dataflow: conditions are
// never evaluated.

use crate::model::body::Stmt;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct Reachability {
    reachable: HashSet<usize>,
}

impl Reachability {
    pub fn is_reachable(&self, stmt: &Stmt) -> bool {
        self.reachable.contains(&stmt_key(stmt))
    }
}

fn stmt_key(stmt: &Stmt) -> usize {
    stmt as *const Stmt as usize
}

pub fn analyze(statements: &[Stmt]) -> Reachability {
    let mut b = CfgBuilder {
        graph: DiGraph::new(),
        break_frames: Vec::new(),
        continue_heads: Vec::new(),
    };
    let entry = b.graph.add_node(0);
    b.build_block(statements, vec![entry]);

    let mut reachable = HashSet::new();
    let mut dfs = Dfs::new(&b.graph, entry);
    while let Some(n) = dfs.next(&b.graph) {
        let key = b.graph[n];
        if key != 0 {
            reachable.insert(key);
        }
    }
    Reachability { reachable }
}

struct CfgBuilder {
    graph: DiGraph<usize, ()>,
    /// `break` exits collect into the innermost frame: a loop or a switch.
    break_frames: Vec<Vec<NodeIndex>>,
    /// `continue` targets skip switches and go to the innermost loop head.
    continue_heads: Vec<NodeIndex>,
}

impl CfgBuilder {
    fn build_block(&mut self, stmts: &[Stmt], mut preds: Vec<NodeIndex>) -> Vec<NodeIndex> {
        for stmt in stmts {
            preds = self.build_stmt(stmt, preds);
        }
        preds
    }

    /// Add a statement node fed by `preds`; return its normal exits.
    fn build_stmt(&mut self, stmt: &Stmt, preds: Vec<NodeIndex>) -> Vec<NodeIndex> {
        let node = self.graph.add_node(stmt_key(stmt));
        for p in &preds {
            self.graph.add_edge(*p, node, ());
        }

        match stmt {
            Stmt::Expr(_)
            | Stmt::Local(_)
            | Stmt::LocalFunction(_)
            | Stmt::Empty => vec![node],

            Stmt::Block(stmts) => self.build_block(stmts, vec![node]),

            Stmt::Throw(_) | Stmt::Return(_) => Vec::new(),

            Stmt::Break(_) => {
                if let Some(frame) = self.break_frames.last_mut() {
                    frame.push(node);
                }
                Vec::new()
            }
            Stmt::Continue(_) => {
                if let Some(head) = self.continue_heads.last().copied() {
                    self.graph.add_edge(node, head, ());
                }
                Vec::new()
            }

            Stmt::If(s) => {
                let mut exits = self.build_stmt(&s.then_branch, vec![node]);
                match &s.else_branch {
                    Some(e) => exits.extend(self.build_stmt(e, vec![node])),
                    // Without an else the condition may fall through
                    None => exits.push(node),
                }
                exits
            }

            Stmt::While(s) => self.build_loop(&s.body, node),
            Stmt::DoWhile(s) => {
                self.continue_heads.push(node);
                self.break_frames.push(Vec::new());
                let body_exits = self.build_stmt(&s.body, vec![node]);
                for e in &body_exits {
                    self.graph.add_edge(*e, node, ());
                }
                self.continue_heads.pop();
                let breaks = self.break_frames.pop().expect("break frame pushed above");
                // The body runs at least once: only its normal exits (the
                // condition check) and breaks leave the loop
                let mut exits = body_exits;
                exits.extend(breaks);
                exits
            }
            Stmt::Switch(s) => {
                self.break_frames.push(Vec::new());
                // No section may match; the switch itself can fall through
                let mut exits = vec![node];
                for section in &s.sections {
                    exits.extend(self.build_block(&section.statements, vec![node]));
                }
                let breaks = self.break_frames.pop().expect("break frame pushed above");
                exits.extend(breaks);
                exits
            }
            Stmt::For(s) => {
                let head = match &s.init {
                    Some(init) => {
                        let init_exits = self.build_stmt(init, vec![node]);
                        // An abrupt initializer never reaches the loop
                        if init_exits.is_empty() {
                            return Vec::new();
                        }
                        let head = self.graph.add_node(0);
                        for p in init_exits {
                            self.graph.add_edge(p, head, ());
                        }
                        head
                    }
                    None => node,
                };
                self.build_loop(&s.body, head)
            }
            Stmt::ForEach(s) => self.build_loop(&s.body, node),
            Stmt::Using(s) => self.build_block(&s.body, vec![node]),

            Stmt::Try(t) => {
                let body_exits = self.build_block(&t.body, vec![node]);
                // Any point in the try body may transfer to a clause
                let mut normal_exits = body_exits;
                for clause in &t.catches {
                    normal_exits.extend(self.build_block(&clause.body, vec![node]));
                }
                match &t.finally {
                    Some(fin) => {
                        // The finally runs on every path through the try
                        let fin_exits = self.build_block(fin, vec![node]);
                        if normal_exits.is_empty() {
                            // Every protected path is abrupt: nothing follows
                            Vec::new()
                        } else {
                            fin_exits
                        }
                    }
                    None => normal_exits,
                }
            }
        }
    }

    fn build_loop(&mut self, body: &Stmt, head: NodeIndex) -> Vec<NodeIndex> {
        self.continue_heads.push(head);
        self.break_frames.push(Vec::new());
        let body_exits = self.build_stmt(body, vec![head]);
        for e in body_exits {
            self.graph.add_edge(e, head, ());
        }
        self.continue_heads.pop();
        let breaks = self.break_frames.pop().expect("break frame pushed above");
        // The condition may be false on entry, so the loop head always exits
        let mut exits = vec![head];
        exits.extend(breaks);
        exits
    }
}
