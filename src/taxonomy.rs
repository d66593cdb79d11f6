use std::fmt;

use indexmap::IndexMap;

pub const KNOWN_ROOTS: &[&str] = &["d__Bacteria", "d__Archaea"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Domain,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.chars().next()? {
            'd' => Some(Rank::Domain),
            'p' => Some(Rank::Phylum),
            'c' => Some(Rank::Class),
            'o' => Some(Rank::Order),
            'f' => Some(Rank::Family),
            'g' => Some(Rank::Genus),
            's' => Some(Rank::Species),
            _ => None,
        }
    }

    pub fn term(&self) -> &'static str {
        match self {
            Rank::Domain => ":Domain",
            Rank::Phylum => ":Phyla",
            Rank::Class => ":Class",
            Rank::Order => ":Order",
            Rank::Family => ":Family",
            Rank::Genus => ":Genus",
            Rank::Species => ":Species",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.term()[1..])
    }
}

pub fn encode_spaces(label: &str) -> String {
    label.replace(' ', "%20")
}

pub fn decode_label(label: &str) -> String {
    urlencoding::decode(label)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| label.to_string())
}

pub fn strip_rank_code(label: &str) -> &str {
    label
        .char_indices()
        .nth(3)
        .map(|(idx, _)| &label[idx..])
        .unwrap_or("")
}

// Trailing empty labels are dropped, so `d__Bacteria;p__X;` has two labels.
pub fn lineage_labels(lineage: &str) -> Vec<&str> {
    let mut labels = lineage.split(';').collect::<Vec<_>>();
    while labels.last().is_some_and(|label| label.is_empty()) {
        labels.pop();
    }
    labels
}

pub fn lineage_leaf(lineage: &str) -> &str {
    lineage_labels(lineage).last().copied().unwrap_or("")
}

#[derive(Debug, Default, Clone)]
pub struct TaxonomyAccumulator {
    lineages: IndexMap<String, usize>,
}

impl TaxonomyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, lineage: &str) {
        *self.lineages.entry(lineage.to_string()).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.lineages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }

    pub fn lineages(&self) -> impl Iterator<Item = &str> {
        self.lineages.keys().map(String::as_str)
    }

    pub fn build_tree(&self) -> TaxonomyTree {
        let mut tree = TaxonomyTree::default();
        for lineage in self.lineages() {
            tree.insert_lineage(lineage);
        }
        tree
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubclassEdge {
    pub child: String,
    pub parent: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaxonomyTree {
    children: IndexMap<String, TaxonomyTree>,
}

impl TaxonomyTree {
    pub fn insert_lineage(&mut self, lineage: &str) {
        let mut node = self;
        for label in lineage_labels(lineage) {
            node = node.children.entry(label.to_string()).or_default();
        }
    }

    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn known_root(&self) -> Option<&str> {
        let mut roots = self.children.keys();
        match (roots.next(), roots.next()) {
            (Some(root), None) if KNOWN_ROOTS.contains(&root.as_str()) => Some(root.as_str()),
            _ => None,
        }
    }

    // Pre-order, siblings in insertion order. Roots produce no edge.
    pub fn subclass_edges(&self) -> Vec<SubclassEdge> {
        let mut edges = Vec::new();
        for (root, subtree) in &self.children {
            let mut stack = vec![(root.as_str(), subtree.children.iter())];
            while let Some(frame) = stack.last_mut() {
                let parent = frame.0;
                match frame.1.next() {
                    Some((label, node)) => {
                        edges.push(SubclassEdge {
                            child: label.clone(),
                            parent: parent.to_string(),
                        });
                        if !node.is_empty() {
                            stack.push((label.as_str(), node.children.iter()));
                        }
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lineage_builds_single_path() {
        let mut acc = TaxonomyAccumulator::new();
        acc.record("d__Bacteria;p__X;c__Y");
        acc.record("d__Bacteria;p__X;c__Y");
        assert_eq!(acc.len(), 1);

        let tree = acc.build_tree();
        assert_eq!(tree.len(), 1);
        let edges = tree.subclass_edges();
        assert_eq!(
            edges,
            vec![
                SubclassEdge {
                    child: "p__X".to_string(),
                    parent: "d__Bacteria".to_string(),
                },
                SubclassEdge {
                    child: "c__Y".to_string(),
                    parent: "p__X".to_string(),
                },
            ]
        );
    }

    #[test]
    fn trailing_semicolon_adds_no_empty_taxon() {
        assert_eq!(lineage_labels("d__Bacteria;p__X;"), vec!["d__Bacteria", "p__X"]);
        assert_eq!(lineage_leaf("d__Bacteria;p__X;"), "p__X");
        assert_eq!(lineage_leaf(""), "");

        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("d__Bacteria;p__X;");
        tree.insert_lineage("d__Bacteria;p__X");
        let edges = tree.subclass_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].child, "p__X");
    }

    #[test]
    fn edges_are_preorder() {
        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("d__Bacteria;p__A;c__A1");
        tree.insert_lineage("d__Bacteria;p__B;c__B1");
        tree.insert_lineage("d__Bacteria;p__A;c__A2");
        let edges = tree
            .subclass_edges()
            .into_iter()
            .map(|edge| (edge.child, edge.parent))
            .collect::<Vec<_>>();
        let expected = [
            ("p__A", "d__Bacteria"),
            ("c__A1", "p__A"),
            ("c__A2", "p__A"),
            ("p__B", "d__Bacteria"),
            ("c__B1", "p__B"),
        ];
        assert_eq!(edges.len(), expected.len());
        for (edge, (child, parent)) in edges.iter().zip(expected) {
            assert_eq!(edge.0, child);
            assert_eq!(edge.1, parent);
        }
    }

    #[test]
    fn root_detection() {
        let mut tree = TaxonomyTree::default();
        assert_eq!(tree.known_root(), None);
        tree.insert_lineage("d__Archaea;p__Y");
        assert_eq!(tree.known_root(), Some("d__Archaea"));
        tree.insert_lineage("d__Bacteria;p__X");
        assert_eq!(tree.known_root(), None);
    }

    #[test]
    fn rank_codes() {
        assert_eq!(Rank::from_label("s__Escherichia coli"), Some(Rank::Species));
        assert_eq!(Rank::from_label("p__X").map(|r| r.term()), Some(":Phyla"));
        assert_eq!(Rank::from_label("k__Fungi"), None);
        assert_eq!(Rank::from_label(""), None);
    }

    #[test]
    fn labels_round_trip() {
        let label = "s__Escherichia coli";
        let encoded = encode_spaces(label);
        assert_eq!(encoded, "s__Escherichia%20coli");
        assert_eq!(decode_label(&encoded), label);
        assert_eq!(decode_label(strip_rank_code(&encoded)), "Escherichia coli");
        assert_eq!(strip_rank_code("d_"), "");
        assert_eq!(lineage_leaf("d__Bacteria;p__X;s__X y"), "s__X y");
    }

    #[test]
    fn plus_sign_stays_literal_when_decoding() {
        assert_eq!(decode_label("s__Foo+bar"), "s__Foo+bar");
        assert_eq!(decode_label("s__Foo%2Bbar"), "s__Foo+bar");
    }
}
