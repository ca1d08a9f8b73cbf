// NCBI protein table and gene coordinate list parsers

use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use crate::domain::KnownSpecies;
use crate::ingest::{numbered_lines, IngestError, Result};

/// One gene ready to insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneRecord {
    pub name: String,
    pub common_name: Option<String>,
    pub gi: Option<i64>,
    pub geneid: Option<i32>,
    pub gene_type: String,
    pub start: i32,
    pub end: i32,
    pub strand: String,
    pub description: Option<String>,
    /// Chromosome name, resolved to an id on load
    pub chromosome: String,
}

/// Gene type for RNA tables, from the product description
pub fn guess_rna_gene_type(description: Option<&str>) -> &'static str {
    let Some(description) = description else {
        return "rna";
    };
    let description = description.to_lowercase();
    if description.contains("ribosomal rna") {
        "rrna"
    } else if description.contains("trna") {
        "trna"
    } else if description.contains("rrna") {
        "rrna"
    } else {
        "rna"
    }
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn index(&self, line_no: usize, line: &str, name: &str) -> Result<usize> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| IngestError::parse(line_no, line, format!("Missing column {:?}", name)))
    }
}

fn field<'a>(fields: &[&'a str], index: usize, line_no: usize, line: &str) -> Result<&'a str> {
    fields
        .get(index)
        .map(|s| s.trim())
        .ok_or_else(|| IngestError::parse(line_no, line, format!("Row has no field {}", index + 1)))
}

fn number<T: std::str::FromStr>(value: &str, what: &str, line_no: usize, line: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| IngestError::parse(line_no, line, format!("{} is not a number", what)))
}

fn unless_dash(value: &str) -> Option<String> {
    (value != "-").then(|| value.to_string())
}

/// Parse an NCBI protein table. Line 1 is a title naming the replicon,
/// line 2 the column header. `rna` tables get a type guessed from the
/// product name instead of `CDS`.
pub fn parse_protein_table(content: &str, species: &KnownSpecies, rna: bool) -> Result<Vec<GeneRecord>> {
    let mut lines = numbered_lines(content);

    let (title_no, title) = lines
        .next()
        .ok_or_else(|| IngestError::Validation("Protein table is empty".to_string()))?;
    let chromosome = species
        .chromosome_for_title(title)
        .ok_or_else(|| IngestError::parse(title_no, title, "No chromosome of this species in title"))?;

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| IngestError::Validation("Protein table has no header".to_string()))?;
    let columns = Columns(
        header
            .trim()
            .split('\t')
            .enumerate()
            .map(|(i, name)| (name.to_string(), i))
            .collect(),
    );
    let locus_tag = columns.index(header_no, header, "Locus_tag")?;
    let locus = columns.index(header_no, header, "Locus")?;
    let gi = columns.0.get("Gi").copied();
    let geneid = columns.index(header_no, header, "GeneID")?;
    let strand = columns.index(header_no, header, "Strand")?;
    let start = columns.index(header_no, header, "Start")?;
    let end = columns.index(header_no, header, "End")?;
    let product = columns.index(header_no, header, "Product Name")?;

    let mut genes = Vec::new();
    for (line_no, raw) in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();

        let description = unless_dash(field(&fields, product, line_no, line)?);
        let gene_type = if rna {
            guess_rna_gene_type(description.as_deref())
        } else {
            "CDS"
        };

        genes.push(GeneRecord {
            name: field(&fields, locus_tag, line_no, line)?.to_string(),
            common_name: unless_dash(field(&fields, locus, line_no, line)?),
            gi: gi
                .map(|index| number(field(&fields, index, line_no, line)?, "Gi", line_no, line))
                .transpose()?,
            geneid: Some(number(field(&fields, geneid, line_no, line)?, "GeneID", line_no, line)?),
            gene_type: gene_type.to_string(),
            start: number(field(&fields, start, line_no, line)?, "Start", line_no, line)?,
            end: number(field(&fields, end, line_no, line)?, "End", line_no, line)?,
            strand: field(&fields, strand, line_no, line)?.to_string(),
            description,
            chromosome: chromosome.to_string(),
        });
    }

    info!(chromosome, genes = genes.len(), "Read protein table");
    Ok(genes)
}

/// Whitespace separated `NAME start end strand [geneid]` lines. `DVUA` genes
/// sit on the `pDV` plasmid, everything else on `chromosome`.
pub fn parse_coordinates(content: &str, gene_type: &str) -> Result<Vec<GeneRecord>> {
    let mut genes = Vec::new();

    for (line_no, line) in numbered_lines(content) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 4 {
            return Err(IngestError::parse(
                line_no,
                line,
                "Expected 'name start end strand [geneid]'",
            ));
        }

        let name = fields[0];
        genes.push(GeneRecord {
            name: name.to_string(),
            common_name: None,
            gi: None,
            geneid: fields
                .get(4)
                .map(|value| number(value, "GeneID", line_no, line))
                .transpose()?,
            gene_type: gene_type.to_string(),
            start: number(fields[1], "Start", line_no, line)?,
            end: number(fields[2], "End", line_no, line)?,
            strand: fields[3].to_string(),
            description: None,
            chromosome: if name.starts_with("DVUA") { "pDV" } else { "chromosome" }.to_string(),
        });
    }

    Ok(genes)
}
