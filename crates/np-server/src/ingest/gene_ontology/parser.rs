// OBO 1.2 [Term] stanza parser

use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::ingest::{numbered_lines, IngestError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoTerm {
    pub id: String,
    pub name: String,
    pub namespace: Option<String>,
    pub def: Option<String>,
    pub is_obsolete: bool,
    pub alt_ids: Vec<String>,
    /// Parent term ids
    pub is_a: Vec<String>,
    /// `(relation, target id)`, e.g. `("part_of", "GO:0008150")`
    pub relationships: Vec<(String, String)>,
    pub synonyms: Vec<String>,
}

/// Stanza being read, with the line it started on for error reporting
struct PartialTerm {
    start_line: usize,
    term: GoTerm,
    has_id: bool,
    has_name: bool,
}

impl PartialTerm {
    fn finish(self) -> Result<GoTerm> {
        if !self.has_id || !self.has_name {
            return Err(IngestError::parse(
                self.start_line,
                "[Term]",
                "Term stanza needs both id and name",
            ));
        }
        Ok(self.term)
    }
}

pub struct OboParser {
    quoted_re: Regex,
}

impl OboParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            quoted_re: Regex::new(r#"^"((?:[^"\\]|\\.)*)"(?:\s+(.*?))?$"#)?,
        })
    }

    /// Parse every `[Term]` stanza. Other stanza types and the header are skipped.
    pub fn parse(&self, content: &str) -> Result<Vec<GoTerm>> {
        let mut terms = Vec::new();
        let mut current: Option<PartialTerm> = None;

        for (line_no, line) in numbered_lines(content) {
            match current.as_mut() {
                Some(_) if line.is_empty() => {
                    if let Some(partial) = current.take() {
                        terms.push(partial.finish()?);
                    }
                },
                Some(partial) => self.apply_tag(partial, line_no, line)?,
                None if line == "[Term]" => {
                    current = Some(PartialTerm {
                        start_line: line_no,
                        term: GoTerm::default(),
                        has_id: false,
                        has_name: false,
                    });
                },
                None => {},
            }
        }

        // A file may end without a trailing blank line
        if let Some(partial) = current.take() {
            terms.push(partial.finish()?);
        }

        info!("Read {} GO terms", terms.len());
        Ok(terms)
    }

    fn apply_tag(&self, partial: &mut PartialTerm, line_no: usize, line: &str) -> Result<()> {
        let (key, rest) = line
            .split_once(": ")
            .ok_or_else(|| IngestError::parse(line_no, line, "Expected 'tag: value'"))?;

        let value = match rest.rfind(" ! ") {
            Some(index) => &rest[..index],
            None => rest,
        };
        // Quoted values drop trailing scope and dbxref lists
        let value = match self.quoted_re.captures(value) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            None => value,
        }
        .trim();

        let term = &mut partial.term;
        match key {
            "id" => {
                term.id = value.to_string();
                partial.has_id = true;
            },
            "name" => {
                term.name = value.to_string();
                partial.has_name = true;
            },
            "namespace" => term.namespace = Some(value.to_string()),
            "def" => term.def = Some(value.to_string()),
            "is_obsolete" => term.is_obsolete = value == "true",
            "alt_id" => term.alt_ids.push(value.to_string()),
            "is_a" => term.is_a.push(value.to_string()),
            "synonym" => term.synonyms.push(value.to_string()),
            "relationship" => {
                let (relation, target) = value.split_once(' ').ok_or_else(|| {
                    IngestError::parse(line_no, line, "Expected 'relationship: <relation> <id>'")
                })?;
                term.relationships
                    .push((relation.to_string(), target.trim().to_string()));
            },
            _ => {},
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBO: &str = r#"format-version: 1.2
date: 27:10:2011 14:45

[Term]
id: GO:0000001
name: mitochondrion inheritance
namespace: biological_process
def: "The distribution of mitochondria, including the mitochondrial genome, into daughter cells after mitosis or meiosis." [GOC:mcc, PMID:10873824]
synonym: "mitochondrial inheritance" EXACT []
is_a: GO:0048308 ! organelle inheritance
is_a: GO:0048311 ! mitochondrion distribution

[Term]
id: GO:0000022
name: mitotic spindle elongation
namespace: biological_process
alt_id: GO:0000023
relationship: part_of GO:0000070 ! mitotic sister chromatid segregation

[Term]
id: GO:0000005
name: ribosomal chaperone activity
namespace: molecular_function
is_obsolete: true

[Typedef]
id: part_of
name: part of
"#;

    #[test]
    fn test_parse_terms() {
        let terms = OboParser::new().unwrap().parse(OBO).unwrap();
        assert_eq!(terms.len(), 3);

        let inheritance = &terms[0];
        assert_eq!(inheritance.id, "GO:0000001");
        assert_eq!(inheritance.namespace.as_deref(), Some("biological_process"));
        assert_eq!(
            inheritance.def.as_deref(),
            Some("The distribution of mitochondria, including the mitochondrial genome, into daughter cells after mitosis or meiosis.")
        );
        assert_eq!(inheritance.synonyms, vec!["mitochondrial inheritance"]);
        assert_eq!(inheritance.is_a, vec!["GO:0048308", "GO:0048311"]);

        let elongation = &terms[1];
        assert_eq!(elongation.alt_ids, vec!["GO:0000023"]);
        assert_eq!(
            elongation.relationships,
            vec![("part_of".to_string(), "GO:0000070".to_string())]
        );

        assert!(terms[2].is_obsolete);
        assert!(!terms[0].is_obsolete);
    }

    #[test]
    fn test_last_stanza_without_blank_line() {
        let terms = OboParser::new()
            .unwrap()
            .parse("[Term]\nid: GO:0008150\nname: biological_process")
            .unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].name, "biological_process");
    }

    #[test]
    fn test_comment_uses_last_separator() {
        let terms = OboParser::new()
            .unwrap()
            .parse("[Term]\nid: GO:1\nname: a ! b ! c\n")
            .unwrap();
        assert_eq!(terms[0].name, "a ! b");
    }

    #[test]
    fn test_escaped_quotes_in_definition() {
        let terms = OboParser::new()
            .unwrap()
            .parse("[Term]\nid: GO:1\nname: x\ndef: \"the \\\"best\\\" term\" [GOC:x]\n")
            .unwrap();
        assert_eq!(terms[0].def.as_deref(), Some("the \\\"best\\\" term"));
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let err = OboParser::new()
            .unwrap()
            .parse("\n[Term]\nid: GO:1\n\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_line_without_separator_is_an_error() {
        let err = OboParser::new()
            .unwrap()
            .parse("[Term]\nid GO:1\n")
            .unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 2, .. }));
    }
}
