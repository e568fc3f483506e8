use crate::core::ScopeItem;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DependencyError {
    #[error("Dependency cycle detected: {}", cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

/// A `depends_on` reference to an item that is not part of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingDependency {
    pub item_id: String,
    pub missing_id: String,
}

/// Longest-duration chain of dependent items, dependencies first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalChain {
    pub items: Vec<String>,
    pub total_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub cycles: Vec<Vec<String>>,
    pub dangling: Vec<DanglingDependency>,
    pub critical_chain: Option<CriticalChain>,
}

impl DependencyReport {
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty() && self.dangling.is_empty()
    }
}

/// Dependency graph over scope items. Edges point from an item to the items
/// it depends on.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    adjacency: HashMap<String, Vec<String>>,
    items: Vec<String>,
    durations: HashMap<String, u32>,
    dangling: Vec<DanglingDependency>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the included items. References to ids outside that set are
    /// recorded as dangling and never followed.
    pub fn from_items(items: &[ScopeItem]) -> Self {
        let included: Vec<&ScopeItem> = items.iter().filter(|item| item.included).collect();
        let mut graph = included.iter().fold(Self::new(), |mut graph, item| {
            graph.add_item(item.id.clone(), item.days_required);
            graph
        });

        for item in &included {
            for dep in &item.depends_on {
                if graph.has_item(dep) {
                    graph.add_dependency(&item.id, dep);
                } else {
                    graph.dangling.push(DanglingDependency {
                        item_id: item.id.clone(),
                        missing_id: dep.clone(),
                    });
                }
            }
        }
        graph
    }

    pub fn add_item(&mut self, id: String, days: u32) {
        if !self.adjacency.contains_key(&id) {
            self.adjacency.insert(id.clone(), Vec::new());
            self.items.push(id.clone());
        }
        self.durations.insert(id, days);
    }

    /// Add an edge between two known items; unknown endpoints are ignored.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        if !self.has_item(to) {
            return;
        }
        if let Some(deps) = self.adjacency.get_mut(from) {
            if !deps.iter().any(|d| d == to) {
                deps.push(to.to_string());
            }
        }
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.adjacency.values().map(|deps| deps.len()).sum()
    }

    pub fn dependencies_of(&self, id: &str) -> Vec<String> {
        self.adjacency.get(id).cloned().unwrap_or_default()
    }

    pub fn dependents_of(&self, id: &str) -> Vec<String> {
        self.items
            .iter()
            .filter(|other| {
                other.as_str() != id
                    && self
                        .adjacency
                        .get(other.as_str())
                        .is_some_and(|deps| deps.iter().any(|d| d == id))
            })
            .cloned()
            .collect()
    }

    pub fn dangling(&self) -> &[DanglingDependency] {
        &self.dangling
    }

    /// Detect cycles using DFS. Each cycle is listed in traversal order.
    ///
    /// The walk keeps its own stack so long dependency chains cannot exhaust
    /// the thread stack.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut on_stack: HashSet<String> = HashSet::new();
        let mut cycles = Vec::new();

        for root in &self.items {
            if visited.contains(root.as_str()) {
                continue;
            }
            visited.insert(root.clone());
            on_stack.insert(root.clone());
            // (item, index of the next dependency to visit)
            let mut path: Vec<(String, usize)> = vec![(root.clone(), 0)];

            while let Some(top) = path.last_mut() {
                let next = self
                    .adjacency
                    .get(top.0.as_str())
                    .and_then(|deps| deps.get(top.1))
                    .cloned();
                top.1 += 1;

                match next {
                    Some(dep) if !visited.contains(dep.as_str()) => {
                        visited.insert(dep.clone());
                        on_stack.insert(dep.clone());
                        path.push((dep, 0));
                    }
                    Some(dep) => {
                        if on_stack.contains(dep.as_str()) {
                            if let Some(start) = path.iter().position(|(id, _)| *id == dep) {
                                let cycle = path[start..].iter().map(|(id, _)| id.clone());
                                cycles.push(cycle.collect());
                            }
                        }
                    }
                    None => {
                        if let Some((done, _)) = path.pop() {
                            on_stack.remove(&done);
                        }
                    }
                }
            }
        }
        cycles
    }

    /// Longest path by summed duration through the dependency DAG.
    pub fn critical_chain(&self) -> Result<Option<CriticalChain>, DependencyError> {
        if let Some(cycle) = self.detect_cycles().into_iter().next() {
            return Err(DependencyError::Cycle { cycle });
        }

        let mut finish: HashMap<String, (u32, Option<String>)> = HashMap::new();
        for item in &self.items {
            self.finish_time(item, &mut finish);
        }

        // First item in insertion order wins ties.
        let end = self
            .items
            .iter()
            .filter_map(|id| finish.get(id).map(|(days, _)| (id, *days)))
            .fold(None::<(&String, u32)>, |best, (id, days)| match best {
                Some((_, best_days)) if best_days >= days => best,
                _ => Some((id, days)),
            });

        let Some((end, total_days)) = end else {
            return Ok(None);
        };

        let mut chain = vec![end.clone()];
        let mut cursor = finish.get(end).and_then(|(_, prev)| prev.clone());
        while let Some(prev) = cursor {
            cursor = finish.get(&prev).and_then(|(_, p)| p.clone());
            chain.push(prev);
        }
        chain.reverse();

        Ok(Some(CriticalChain {
            items: chain,
            total_days,
        }))
    }

    /// Earliest finish of `root` and everything it depends on, assuming
    /// dependencies run first. The graph must be acyclic. Durations saturate
    /// at `u32::MAX`.
    fn finish_time(&self, root: &str, memo: &mut HashMap<String, (u32, Option<String>)>) {
        // (item, dependencies already scheduled)
        let mut stack = vec![(root.to_string(), false)];

        while let Some((item, expanded)) = stack.pop() {
            if memo.contains_key(&item) {
                continue;
            }
            let deps = self.adjacency.get(&item).map(Vec::as_slice).unwrap_or(&[]);

            if !expanded {
                stack.push((item.clone(), true));
                stack.extend(
                    deps.iter()
                        .filter(|dep| !memo.contains_key(dep.as_str()))
                        .map(|dep| (dep.clone(), false)),
                );
                continue;
            }

            let mut longest: Option<(u32, &String)> = None;
            for dep in deps {
                let dep_finish = memo.get(dep).map_or(0, |(days, _)| *days);
                if longest.is_none_or(|(best, _)| dep_finish > best) {
                    longest = Some((dep_finish, dep));
                }
            }

            let own = self.durations.get(&item).copied().unwrap_or(0);
            let (before, prev) = match longest {
                Some((days, dep)) => (days, Some(dep.clone())),
                None => (0, None),
            };
            memo.insert(item, (before.saturating_add(own), prev));
        }
    }

    pub fn report(&self) -> DependencyReport {
        DependencyReport {
            cycles: self.detect_cycles(),
            dangling: self.dangling.clone(),
            critical_chain: self.critical_chain().ok().flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScopeItemDraft;

    fn item(id: &str, days: u32, deps: &[&str]) -> ScopeItem {
        let mut item = ScopeItemDraft::custom("General", id, 100.0, 100.0, days).into_item(id, "");
        item.depends_on = deps.iter().map(|d| d.to_string()).collect();
        item
    }

    #[test]
    fn test_cycle_detection() {
        let graph = DependencyGraph::from_items(&[
            item("a", 1, &["b"]),
            item("b", 1, &["c"]),
            item("c", 1, &["a"]),
        ]);
        let cycles = graph.detect_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cyclic_graph_rejects_critical_chain() {
        let graph = DependencyGraph::from_items(&[item("a", 1, &["b"]), item("b", 1, &["a"])]);
        match graph.critical_chain() {
            Err(DependencyError::Cycle { cycle }) => assert_eq!(cycle, vec!["a", "b"]),
            other => panic!("expected cycle, got {:?}", other),
        }
        assert!(graph.report().critical_chain.is_none());
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let graph = DependencyGraph::from_items(&[item("a", 1, &["a"])]);
        assert_eq!(graph.detect_cycles(), vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_dangling_dependencies_are_recorded_not_followed() {
        let graph = DependencyGraph::from_items(&[item("a", 2, &["deleted"])]);
        assert_eq!(graph.dependency_count(), 0);
        assert_eq!(
            graph.dangling(),
            &[DanglingDependency {
                item_id: "a".into(),
                missing_id: "deleted".into()
            }]
        );
        let chain = graph.critical_chain().unwrap().unwrap();
        assert_eq!(chain.items, vec!["a"]);
        assert_eq!(chain.total_days, 2);
    }

    #[test]
    fn test_excluded_items_are_dangling() {
        let mut b = item("b", 3, &[]);
        b.included = false;
        let graph = DependencyGraph::from_items(&[item("a", 1, &["b"]), b]);
        assert!(!graph.has_item("b"));
        assert_eq!(graph.dangling().len(), 1);
    }

    #[test]
    fn test_critical_chain_longest_duration() {
        // demo(2) <- framing(5) <- drywall(3); paint(4) independent
        let graph = DependencyGraph::from_items(&[
            item("demo", 2, &[]),
            item("framing", 5, &["demo"]),
            item("drywall", 3, &["framing"]),
            item("paint", 4, &[]),
        ]);
        let chain = graph.critical_chain().unwrap().unwrap();
        assert_eq!(chain.items, vec!["demo", "framing", "drywall"]);
        assert_eq!(chain.total_days, 10);
    }

    #[test]
    fn test_empty_graph_has_no_chain() {
        let graph = DependencyGraph::from_items(&[]);
        assert_eq!(graph.critical_chain().unwrap(), None);
        assert!(graph.report().is_clean());
    }

    #[test]
    fn test_dependents_of() {
        let graph = DependencyGraph::from_items(&[
            item("a", 1, &[]),
            item("b", 1, &["a"]),
            item("c", 1, &["a"]),
        ]);
        assert_eq!(graph.dependents_of("a"), vec!["b", "c"]);
        assert_eq!(graph.dependencies_of("b"), vec!["a"]);
    }

    #[test]
    fn test_chain_total_saturates() {
        let graph = DependencyGraph::from_items(&[
            item("a", u32::MAX, &[]),
            item("b", u32::MAX, &["a"]),
            item("c", 1, &["b"]),
        ]);
        let chain = graph.critical_chain().unwrap().unwrap();
        // Every finish saturates, so the first item wins the tie.
        assert_eq!(chain.items, vec!["a"]);
        assert_eq!(chain.total_days, u32::MAX);
    }

    #[test]
    fn test_long_chain_is_walked_without_recursion() {
        // Each item depends on the one before it.
        let items: Vec<ScopeItem> = (0..100_000)
            .map(|i| {
                let prev = (i > 0).then(|| format!("n{}", i - 1));
                item(&format!("n{}", i), 1, &prev.iter().map(String::as_str).collect::<Vec<_>>())
            })
            .collect();
        let graph = DependencyGraph::from_items(&items);

        assert!(graph.detect_cycles().is_empty());
        let chain = graph.critical_chain().unwrap().unwrap();
        assert_eq!(chain.items.len(), 100_000);
        assert_eq!(chain.items.first().map(String::as_str), Some("n0"));
        assert_eq!(chain.total_days, 100_000);
    }

    #[test]
    fn test_long_cycle_is_found() {
        let n = 50_000;
        let items: Vec<ScopeItem> = (0..n)
            .map(|i| {
                let next = format!("n{}", (i + 1) % n);
                item(&format!("n{}", i), 1, &[next.as_str()])
            })
            .collect();
        let cycles = DependencyGraph::from_items(&items).detect_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n);
        assert_eq!(cycles[0][0], "n0");
    }

    #[test]
    fn test_diamond_reports_one_cycle_free_chain() {
        let graph = DependencyGraph::from_items(&[
            item("base", 1, &[]),
            item("left", 4, &["base"]),
            item("right", 2, &["base"]),
            item("top", 1, &["right", "left"]),
        ]);
        assert!(graph.detect_cycles().is_empty());
        let chain = graph.critical_chain().unwrap().unwrap();
        assert_eq!(chain.items, vec!["base", "left", "top"]);
        assert_eq!(chain.total_days, 6);
    }
}
