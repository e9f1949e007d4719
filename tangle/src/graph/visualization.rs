//! Rendering a compiled graph as Graphviz DOT or plain text.

use std::fmt::Debug;

use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::NextEntry;
use crate::graph::state_graph::END;

fn sorted<'a, I: Iterator<Item = &'a String>>(iter: I) -> Vec<&'a String> {
    let mut items: Vec<&String> = iter.collect();
    items.sort();
    items
}

/// Renders the graph in Graphviz DOT format.
///
/// Conditional edges are dashed and labeled with their routing key.
pub fn generate_dot<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: Clone + Send + Sync + Debug + 'static,
{
    let mut out = String::from("digraph {\n  rankdir=LR;\n");
    out.push_str("  __start__ [shape=circle, label=\"START\"];\n");
    out.push_str("  __end__ [shape=doublecircle, label=\"END\"];\n");
    for id in sorted(graph.nodes.keys()) {
        out.push_str(&format!("  \"{}\" [shape=box];\n", id));
    }
    out.push_str(&format!("  __start__ -> \"{}\";\n", graph.first_node_id));
    for from in sorted(graph.next_map.keys()) {
        match &graph.next_map[from] {
            NextEntry::Unconditional(to) => {
                if to == END {
                    out.push_str(&format!("  \"{}\" -> __end__;\n", from));
                } else {
                    out.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to));
                }
            }
            NextEntry::Conditional(router) => match &router.path_map {
                Some(map) => {
                    for key in sorted(map.keys()) {
                        let target = &map[key];
                        let target = if target == END {
                            "__end__".to_string()
                        } else {
                            format!("\"{}\"", target)
                        };
                        out.push_str(&format!(
                            "  \"{}\" -> {} [style=dashed, label=\"{}\"];\n",
                            from, target, key
                        ));
                    }
                }
                None => {
                    out.push_str(&format!("  \"{}\" [peripheries=2];\n", from));
                }
            },
        }
    }
    out.push_str("}\n");
    out
}

/// Renders the graph as indented text, one edge per line.
pub fn generate_text<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: Clone + Send + Sync + Debug + 'static,
{
    let mut lines = vec![format!("START -> {}", graph.first_node_id)];
    for from in sorted(graph.next_map.keys()) {
        match &graph.next_map[from] {
            NextEntry::Unconditional(to) => {
                let to = if to == END { "END" } else { to };
                lines.push(format!("{} -> {}", from, to));
            }
            NextEntry::Conditional(router) => match &router.path_map {
                Some(map) => {
                    for key in sorted(map.keys()) {
                        let target = &map[key];
                        let target = if target == END { "END" } else { target };
                        lines.push(format!("{} -({})-> {}", from, key, target));
                    }
                }
                None => lines.push(format!("{} -(dynamic)-> ?", from)),
            },
        }
    }
    lines.join("\n")
}
