use std::io::Write;

use crate::error::{ConversionWarning, GtdbError};
use crate::taxonomy::{
    Rank, SubclassEdge, TaxonomyTree, decode_label, encode_spaces, strip_rank_code,
};
use crate::turtle::{Literal, TurtleWriter};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HierarchyReport {
    pub taxa: usize,
    pub warnings: Vec<ConversionWarning>,
}

pub fn write_hierarchy<W: Write, D: Write>(
    tree: &TaxonomyTree,
    out: &mut TurtleWriter<W>,
    diagnostics: &mut D,
) -> Result<HierarchyReport, GtdbError> {
    let mut report = HierarchyReport::default();

    match tree.known_root() {
        Some(root) => write_root(root, out)?,
        None => {
            let warning = ConversionWarning::UnknownRoot {
                roots: tree.roots().map(str::to_string).collect(),
            };
            report_warning(diagnostics, warning, &mut report)?;
        }
    }

    for edge in tree.subclass_edges() {
        write_edge(&edge, out, diagnostics, &mut report)?;
        report.taxa += 1;
    }
    Ok(report)
}

fn write_root<W: Write>(root: &str, out: &mut TurtleWriter<W>) -> Result<(), GtdbError> {
    let subject = format!(":{root}");
    out.triple(&subject, "a", ":Taxon")?;
    out.triple(&subject, "dct:identifier", &Literal::Plain(root.to_string()))?;
    out.triple(&subject, "rdfs:label", &Literal::Plain(root.to_string()))?;
    out.triple(
        &subject,
        "skos:altLabel",
        &Literal::Plain(strip_rank_code(root).to_string()),
    )?;
    out.triple(&subject, "ddbjtax:rank", Rank::Domain.term())
}

fn write_edge<W: Write, D: Write>(
    edge: &SubclassEdge,
    out: &mut TurtleWriter<W>,
    diagnostics: &mut D,
    report: &mut HierarchyReport,
) -> Result<(), GtdbError> {
    let label = encode_spaces(&edge.child);
    let subject = format!(":{label}");
    let parent = format!(":{}", encode_spaces(&edge.parent));

    out.triple(&subject, "rdfs:subClassOf", &parent)?;
    out.triple(&subject, "a", ":Taxon")?;
    out.triple(&subject, "dct:identifier", &Literal::Plain(label.clone()))?;
    out.triple(&subject, "rdfs:label", &Literal::Plain(decode_label(&label)))?;
    out.triple(
        &subject,
        "skos:altLabel",
        &Literal::Plain(decode_label(strip_rank_code(&label))),
    )?;
    match Rank::from_label(&label) {
        Some(rank) => out.triple(&subject, "ddbjtax:rank", rank.term()),
        None => report_warning(
            diagnostics,
            ConversionWarning::UnknownRank {
                label: edge.child.clone(),
            },
            report,
        ),
    }
}

fn report_warning<D: Write>(
    diagnostics: &mut D,
    warning: ConversionWarning,
    report: &mut HierarchyReport,
) -> Result<(), GtdbError> {
    writeln!(diagnostics, "Error: {warning}").map_err(|err| GtdbError::Output(err.to_string()))?;
    report.warnings.push(warning);
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn render(tree: &TaxonomyTree) -> (String, String, HierarchyReport) {
        let mut out = TurtleWriter::new(Vec::new());
        let mut diag = Vec::new();
        let report = write_hierarchy(tree, &mut out, &mut diag).unwrap();
        (
            String::from_utf8(out.into_inner()).unwrap(),
            String::from_utf8(diag).unwrap(),
            report,
        )
    }

    #[test]
    fn bacteria_root_lines_come_first() {
        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("d__Bacteria;p__Proteobacteria");
        let (out, diag, report) = render(&tree);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], ":d__Bacteria\ta\t:Taxon .");
        assert_eq!(lines[3], ":d__Bacteria\tskos:altLabel\t\"Bacteria\" .");
        assert_eq!(lines[4], ":d__Bacteria\tddbjtax:rank\t:Domain .");
        assert_eq!(
            lines[5],
            ":p__Proteobacteria\trdfs:subClassOf\t:d__Bacteria ."
        );
        assert_eq!(lines.len(), 11);
        assert!(diag.is_empty());
        assert_eq!(report.taxa, 1);
    }

    #[test]
    fn unknown_root_still_emits_hierarchy() {
        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("k__Fungi;p__Ascomycota");
        let (out, diag, report) = render(&tree);
        assert_eq!(diag, "Error: Unknown root! found [k__Fungi]\n");
        assert!(out.starts_with(":p__Ascomycota\trdfs:subClassOf\t:k__Fungi ."));
        assert_matches!(
            report.warnings.as_slice(),
            [ConversionWarning::UnknownRoot { .. }]
        );
    }

    #[test]
    fn species_labels_are_encoded_and_decoded() {
        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("d__Bacteria;g__Escherichia;s__Escherichia coli");
        let (out, _, _) = render(&tree);
        assert!(out.contains(":s__Escherichia%20coli\trdfs:subClassOf\t:g__Escherichia .\n"));
        assert!(out.contains(
            ":s__Escherichia%20coli\tdct:identifier\t\"s__Escherichia%20coli\" .\n"
        ));
        assert!(out.contains(":s__Escherichia%20coli\trdfs:label\t\"s__Escherichia coli\" .\n"));
        assert!(out.contains(":s__Escherichia%20coli\tskos:altLabel\t\"Escherichia coli\" .\n"));
        assert!(out.contains(":s__Escherichia%20coli\tddbjtax:rank\t:Species .\n"));
    }

    #[test]
    fn unknown_rank_is_reported() {
        let mut tree = TaxonomyTree::default();
        tree.insert_lineage("d__Archaea;x__Odd");
        let (out, diag, report) = render(&tree);
        assert_eq!(diag, "Error: Unknown rank! x__Odd\n");
        assert!(!out.contains(":x__Odd\tddbjtax:rank"));
        assert_eq!(report.taxa, 1);
    }
}
