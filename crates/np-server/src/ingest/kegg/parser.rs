// KEGG htext and gene pathway list parsers

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::ingest::{numbered_lines, IngestError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeggPathway {
    /// `path:` followed by the map number, e.g. `path:00010`
    pub native_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeggSubcategory {
    pub name: String,
    pub pathways: Vec<KeggPathway>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeggCategory {
    pub name: String,
    pub subcategories: Vec<KeggSubcategory>,
}

impl KeggCategory {
    pub fn pathway_count(&self) -> usize {
        self.subcategories.iter().map(|s| s.pathways.len()).sum()
    }
}

pub struct KeggHtextParser {
    category_re: Regex,
    subcategory_re: Regex,
    pathway_re: Regex,
}

impl KeggHtextParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            category_re: Regex::new(r"^A\s*<b>(.*)</b>\s*$")?,
            subcategory_re: Regex::new(r"^B\s*<b>(.*)</b>\s*$")?,
            pathway_re: Regex::new(r"^C\s*(\d+)\s+(.*?)(?:\s+\[(\w+:\w+\d+)\])?\s*$")?,
        })
    }

    /// Parse the A/B/C levels of the htext file. D and deeper levels are ignored.
    pub fn parse(&self, content: &str) -> Result<Vec<KeggCategory>> {
        let mut categories: Vec<KeggCategory> = Vec::new();

        for (line_no, line) in numbered_lines(content) {
            if line.starts_with('#') || line.starts_with('!') || line.starts_with('+') {
                continue;
            }
            if line.trim().len() <= 1 {
                continue;
            }

            if line.starts_with('A') {
                let caps = self
                    .category_re
                    .captures(line)
                    .ok_or_else(|| IngestError::parse(line_no, line, "Can't parse category"))?;
                categories.push(KeggCategory {
                    name: strip_commas(&caps[1]),
                    subcategories: Vec::new(),
                });
            } else if line.starts_with('B') {
                let caps = self
                    .subcategory_re
                    .captures(line)
                    .ok_or_else(|| IngestError::parse(line_no, line, "Can't parse subcategory"))?;
                let category = categories.last_mut().ok_or_else(|| {
                    IngestError::parse(line_no, line, "Subcategory before any category")
                })?;
                category.subcategories.push(KeggSubcategory {
                    name: strip_commas(&caps[1]),
                    pathways: Vec::new(),
                });
            } else if line.starts_with('C') {
                let caps = self
                    .pathway_re
                    .captures(line)
                    .ok_or_else(|| IngestError::parse(line_no, line, "Can't parse pathway"))?;
                let subcategory = categories
                    .last_mut()
                    .and_then(|c| c.subcategories.last_mut())
                    .ok_or_else(|| {
                        IngestError::parse(line_no, line, "Pathway before any subcategory")
                    })?;
                subcategory.pathways.push(KeggPathway {
                    native_id: format!("path:{}", &caps[1]),
                    name: strip_commas(&caps[2]),
                });
            }
        }

        let pathways: usize = categories.iter().map(KeggCategory::pathway_count).sum();
        info!("Read {} KEGG pathways in {} categories", pathways, categories.len());

        Ok(categories)
    }
}

/// Pathway names elsewhere in the data are written without commas
fn strip_commas(name: &str) -> String {
    name.replace(',', "")
}

/// The overview maps listed on the KEGG pathway page but missing from the htext file
pub fn global_pathways() -> Vec<KeggCategory> {
    let pathway = |id: &str, name: &str| KeggPathway {
        native_id: format!("path:{}", id),
        name: name.to_string(),
    };

    vec![KeggCategory {
        name: "Global".to_string(),
        subcategories: vec![KeggSubcategory {
            name: "Metabolism".to_string(),
            pathways: vec![
                pathway("01100", "Metabolic pathways"),
                pathway("01110", "Biosynthesis of secondary metabolites"),
                pathway("01120", "Microbial metabolism in diverse environments"),
            ],
        }],
    }]
}

/// Gene name to `path:NNNNN` ids, genes in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GenePathways {
    entries: Vec<(String, Vec<String>)>,
}

impl GenePathways {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(gene, pathways)| (gene.as_str(), pathways.as_slice()))
    }

    pub fn pathways_for(&self, gene: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == gene)
            .map(|(_, pathways)| pathways.as_slice())
    }
}

/// Parse a two column `xxx:GENE<TAB>path:xxxNNNNN` list
pub fn parse_gene_pathways(content: &str) -> Result<GenePathways> {
    let pathway_re = Regex::new(r"^path:[A-Za-z]{3,4}(\d+)$")?;

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut result = GenePathways::default();

    for (line_no, line) in numbered_lines(content) {
        if line.trim().is_empty() {
            continue;
        }

        let (gene_field, pathway_field) = line
            .split_once('\t')
            .ok_or_else(|| IngestError::parse(line_no, line, "Expected two tab separated columns"))?;

        let gene = gene_field
            .trim()
            .split_once(':')
            .map(|(_, gene)| gene)
            .filter(|gene| !gene.is_empty())
            .ok_or_else(|| IngestError::parse(line_no, line, "Expected organism:gene"))?;

        let caps = pathway_re
            .captures(pathway_field.trim())
            .ok_or_else(|| IngestError::parse(line_no, line, "Expected path:<organism><number>"))?;
        let pathway = format!("path:{}", &caps[1]);

        let slot = *index.entry(gene.to_string()).or_insert_with(|| {
            result.entries.push((gene.to_string(), Vec::new()));
            result.entries.len() - 1
        });
        result.entries[slot].1.push(pathway);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTEXT: &str = "+D\tKO
#<h2>KEGG Orthology (KO)</h2>
!
A<b>Metabolism</b>
B
B  <b>Carbohydrate metabolism</b>
C    00010 Glycolysis / Gluconeogenesis [PATH:ko00010]
D      K00844  HK; hexokinase [EC:2.7.1.1]
C    00290 Valine, leucine and isoleucine biosynthesis [PATH:ko00290]
B  <b>Energy metabolism</b>
C    00190 Oxidative phosphorylation
A<b>Genetic Information Processing</b>
B  <b>Translation</b>
C    03010 Ribosome [PATH:ko03010]
!
";

    #[test]
    fn test_parse_htext_hierarchy() {
        let categories = KeggHtextParser::new().unwrap().parse(HTEXT).unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Metabolism");
        assert_eq!(categories[0].subcategories.len(), 2);

        let carbohydrate = &categories[0].subcategories[0];
        assert_eq!(carbohydrate.name, "Carbohydrate metabolism");
        assert_eq!(
            carbohydrate.pathways,
            vec![
                KeggPathway {
                    native_id: "path:00010".to_string(),
                    name: "Glycolysis / Gluconeogenesis".to_string(),
                },
                KeggPathway {
                    native_id: "path:00290".to_string(),
                    name: "Valine leucine and isoleucine biosynthesis".to_string(),
                },
            ]
        );

        let energy = &categories[0].subcategories[1];
        assert_eq!(energy.pathways[0].name, "Oxidative phosphorylation");
        assert_eq!(categories[1].pathway_count(), 1);
    }

    #[test]
    fn test_pathway_before_subcategory_is_an_error() {
        let err = KeggHtextParser::new()
            .unwrap()
            .parse("A<b>Metabolism</b>\nC    00010 Glycolysis\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_malformed_category_is_an_error() {
        let err = KeggHtextParser::new().unwrap().parse("A Metabolism\n").unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_global_pathways() {
        let global = global_pathways();
        assert_eq!(global[0].name, "Global");
        assert_eq!(global[0].subcategories[0].name, "Metabolism");
        let ids: Vec<_> = global[0].subcategories[0]
            .pathways
            .iter()
            .map(|p| p.native_id.as_str())
            .collect();
        assert_eq!(ids, vec!["path:01100", "path:01110", "path:01120"]);
    }

    #[test]
    fn test_parse_gene_pathways() {
        let content = "hal:VNG0001G\tpath:hal00010\n\
                       hal:VNG0002G\tpath:hal00020\n\
                       hal:VNG0001G\tpath:hal01100\n";
        let genes = parse_gene_pathways(content).unwrap();

        assert_eq!(genes.len(), 2);
        assert_eq!(
            genes.pathways_for("VNG0001G").unwrap(),
            &["path:00010".to_string(), "path:01100".to_string()]
        );
        let order: Vec<_> = genes.iter().map(|(gene, _)| gene).collect();
        assert_eq!(order, vec!["VNG0001G", "VNG0002G"]);
    }

    #[test]
    fn test_gene_names_keep_punctuation() {
        let genes = parse_gene_pathways("dvu:DVU_tRNA-SeC_p_-1\tpath:dvu00970\n").unwrap();
        assert!(genes.pathways_for("DVU_tRNA-SeC_p_-1").is_some());
    }

    #[test]
    fn test_bad_pathway_column() {
        let err = parse_gene_pathways("mmp:MMP0001\tmap00010\n").unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 1, .. }));
    }
}
