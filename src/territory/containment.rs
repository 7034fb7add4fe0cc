//! Territory containment forest.
//!
//! The table stores two views of the same hierarchy: `containment` maps each
//! group to the codes it contains (groups and territories mixed), and `flat`
//! maps each code to its single nearest parent. Grouping codes such as `EU`
//! appear in `containment` without a `flat` entry, so a territory can have
//! more parents in the first view than in the second.
//!
//! The data carries no acyclicity guarantee. Every walk tracks the nodes it
//! has already expanded and never expands a node twice.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct RawContainment {
    #[serde(default)]
    containment: BTreeMap<String, RawGroup>,
    #[serde(default)]
    flat: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGroup {
    #[serde(default)]
    contains: Vec<String>,
}

/// Containment hierarchy with a reverse index for root-ward walks.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(from = "RawContainment")]
pub struct ContainmentGraph {
    children: BTreeMap<String, Vec<String>>,
    parents: BTreeMap<String, Vec<String>>,
    flat: BTreeMap<String, String>,
}

impl From<RawContainment> for ContainmentGraph {
    fn from(raw: RawContainment) -> Self {
        let children: BTreeMap<String, Vec<String>> = raw
            .containment
            .into_iter()
            .map(|(group, entry)| (group, entry.contains))
            .collect();

        let mut parents: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (group, members) in &children {
            for member in members {
                let entry = parents.entry(member.clone()).or_default();
                if !entry.contains(group) {
                    entry.push(group.clone());
                }
            }
        }

        Self {
            children,
            parents,
            flat: raw.flat,
        }
    }
}

impl ContainmentGraph {
    /// Whether `code` has members of its own.
    #[must_use]
    pub fn is_group(&self, code: &str) -> bool {
        self.children
            .get(code)
            .is_some_and(|members| !members.is_empty())
    }

    /// The nearest parent from the flat map, as a zero- or one-element list.
    #[must_use]
    pub fn nearest_parents(&self, code: &str) -> Vec<String> {
        self.flat.get(code).cloned().into_iter().collect()
    }

    /// Every ancestor of `code`, nearest first, without duplicates.
    ///
    /// The walk visits each group containing `code` in turn and follows it to
    /// the root before moving to the next group. When an ancestor is reached
    /// along several paths only its last occurrence in that walk is kept, so
    /// every group comes after the groups it is a member of. A group already
    /// on the current path is not followed again, which ends cycles.
    #[must_use]
    pub fn ancestors(&self, code: &str) -> Vec<String> {
        let mut rootward = Vec::new();
        let mut on_path = HashSet::new();
        self.collect_ancestors(code, &mut rootward, &mut on_path);

        rootward.reverse();
        let mut seen = HashSet::new();
        rootward.retain(|ancestor| ancestor != code && seen.insert(ancestor.clone()));
        rootward.reverse();
        rootward
    }

    fn collect_ancestors<'a>(
        &'a self,
        code: &'a str,
        rootward: &mut Vec<String>,
        on_path: &mut HashSet<&'a str>,
    ) {
        if !on_path.insert(code) {
            return;
        }

        for parent in self.parents_of(code) {
            rootward.push(parent.to_owned());
            self.collect_ancestors(parent, rootward, on_path);
        }
        on_path.remove(code);
    }

    /// Groups directly containing `code`, falling back to the flat map.
    fn parents_of<'a>(&'a self, code: &str) -> Vec<&'a str> {
        let mut parents: Vec<&str> = self
            .parents
            .get(code)
            .map(|groups| groups.iter().map(String::as_str).collect())
            .unwrap_or_default();

        if let Some(flat) = self
            .flat
            .get(code)
            .filter(|flat| !parents.contains(&flat.as_str()))
        {
            parents.push(flat);
        }
        parents
    }

    /// The direct members of `code`, in table order.
    #[must_use]
    pub fn direct_children(&self, code: &str) -> Vec<String> {
        self.children.get(code).cloned().unwrap_or_default()
    }

    /// Every leaf territory below `code`, sorted and deduplicated.
    #[must_use]
    pub fn leaves(&self, code: &str) -> Vec<String> {
        let mut leaves = BTreeSet::new();
        let mut expanded = HashSet::from([code]);
        let mut pending: Vec<&str> = self.members(code).collect();

        while let Some(member) = pending.pop() {
            if !self.is_group(member) {
                leaves.insert(member.to_owned());
            } else if expanded.insert(member) {
                pending.extend(self.members(member));
            }
        }

        leaves.into_iter().collect()
    }

    fn members<'a>(&'a self, code: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        self.children
            .get(code)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn graph() -> ContainmentGraph {
        serde_json::from_str(
            r#"{
                "containment": {
                    "001": {"contains": ["019", "150", "EU"]},
                    "019": {"contains": ["003", "419", "013"]},
                    "003": {"contains": ["013"]},
                    "419": {"contains": ["013"]},
                    "013": {"contains": ["MX"]},
                    "150": {"contains": ["155"]},
                    "155": {"contains": ["DE", "FR"]},
                    "EU": {"contains": ["FR", "DE"]}
                },
                "flat": {
                    "019": "001", "150": "001", "003": "019", "419": "019",
                    "013": "019", "155": "150", "MX": "013", "DE": "155", "FR": "155"
                }
            }"#,
        )
        .expect("fixture graph parses")
    }

    #[rstest]
    fn nearest_parent_comes_from_the_flat_map(graph: ContainmentGraph) {
        assert_eq!(graph.nearest_parents("DE"), vec!["155"]);
        assert!(graph.nearest_parents("001").is_empty());
    }

    #[rstest]
    fn ancestors_keep_the_last_occurrence_of_shared_groups(graph: ContainmentGraph) {
        assert_eq!(graph.ancestors("DE"), vec!["155", "150", "EU", "001"]);
    }

    #[rstest]
    fn ancestors_through_several_paths_are_deduplicated(graph: ContainmentGraph) {
        assert_eq!(graph.ancestors("MX"), vec!["013", "003", "419", "019", "001"]);
    }

    #[rstest]
    fn direct_children_include_groups_in_table_order(graph: ContainmentGraph) {
        assert_eq!(graph.direct_children("001"), vec!["019", "150", "EU"]);
        assert_eq!(graph.direct_children("EU"), vec!["FR", "DE"]);
    }

    #[rstest]
    fn leaves_are_sorted_and_unique(graph: ContainmentGraph) {
        assert_eq!(graph.leaves("001"), vec!["DE", "FR", "MX"]);
        assert_eq!(graph.leaves("EU"), vec!["DE", "FR"]);
        assert!(graph.leaves("DE").is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let graph: ContainmentGraph = serde_json::from_str(
            r#"{
                "containment": {
                    "A1": {"contains": ["B1", "XX"]},
                    "B1": {"contains": ["A1", "YY"]}
                },
                "flat": {"B1": "A1", "A1": "B1"}
            }"#,
        )
        .expect("cyclic graph parses");

        assert_eq!(graph.leaves("A1"), vec!["XX", "YY"]);
        assert_eq!(graph.ancestors("A1"), vec!["B1"]);
    }

    #[test]
    fn groups_reached_twice_are_walked_twice() {
        let graph: ContainmentGraph = serde_json::from_str(
            r#"{
                "containment": {
                    "R1": {"contains": ["M1"]},
                    "M1": {"contains": ["G1", "G2"]},
                    "G1": {"contains": ["L1"]},
                    "G2": {"contains": ["L1"]}
                },
                "flat": {"M1": "R1", "G1": "M1", "G2": "M1", "L1": "G1"}
            }"#,
        )
        .expect("diamond graph parses");

        assert_eq!(graph.ancestors("L1"), vec!["G1", "G2", "M1", "R1"]);
    }

    #[test]
    fn groups_require_members() {
        let graph: ContainmentGraph =
            serde_json::from_str(r#"{"containment": {"QO": {"contains": []}}}"#)
                .expect("graph parses");

        assert!(!graph.is_group("QO"));
        assert!(graph.direct_children("QO").is_empty());
    }
}
