use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node slot in a [`DependencyGraph`](crate::graph::DependencyGraph).
    pub struct NodeId;

    /// Identifies an edge slot in a [`DependencyGraph`](crate::graph::DependencyGraph).
    pub struct EdgeId;
}

#[cfg(test)]
mod tests {
    use crate::graph::DependencyGraph;

    #[test]
    fn node_slot_is_stable_for_a_label() {
        let mut g: DependencyGraph<String> = DependencyGraph::new();
        let a = g.add_node("a".into());
        let b = g.add_node("b".into());
        assert_ne!(a, b);
        assert_eq!(g.add_node("a".into()), a);
        assert_eq!(g.node_id(&"a".to_string()), Some(a));
        assert_eq!(g.label(b).map(String::as_str), Some("b"));
    }

    #[test]
    fn removed_node_slot_is_stale() {
        let mut g: DependencyGraph<String> = DependencyGraph::new();
        let a = g.add_node("a".into());
        g.remove_node(&"a".to_string());
        let reused = g.add_node("z".into());
        assert_ne!(a, reused);
        assert_eq!(g.label(a), None);
        assert_eq!(g.node_id(&"a".to_string()), None);
    }

    #[test]
    fn duplicate_edge_reuses_slot() {
        let mut g: DependencyGraph<String> = DependencyGraph::new();
        let first = g.add_edge("a".into(), "b".into());
        assert_eq!(g.add_edge("a".into(), "b".into()), first);
        assert_eq!(g.edge_count(), 1);
    }
}
