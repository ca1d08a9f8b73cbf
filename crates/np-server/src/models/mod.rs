//! Row types shared by the feature queries
//!
//! Each struct mirrors one table (genes carry their chromosome name through a
//! join). Feature-specific projections live next to the query that needs them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Columns selected for [`Gene`]; the query must alias `genes` as `g`
/// and left join `chromosomes` as `c`.
pub const GENE_COLUMNS: &str = r#"g.id, g.species_id, g.chromosome_id, c.name AS chromosome,
       g.name, g.common_name, g.geneid, g.type, g."start", g."end", g.strand,
       g.description, g.transcription_factor"#;

/// `FROM` clause matching [`GENE_COLUMNS`]
pub const GENE_FROM: &str = "FROM genes g LEFT JOIN chromosomes c ON c.id = g.chromosome_id";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Species {
    pub id: i32,
    pub name: String,
    pub short_name: String,
    pub ncbi_taxonomy_id: Option<i32>,
    pub ucsc_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Chromosome {
    pub id: i32,
    pub species_id: i32,
    pub name: String,
    pub length: i32,
    pub topology: String,
    pub refseq: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Network {
    pub id: i32,
    pub species_id: i32,
    pub name: String,
    pub data_source: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Condition {
    pub id: i32,
    pub network_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Gene {
    pub id: i32,
    pub species_id: i32,
    pub chromosome_id: Option<i32>,
    pub chromosome: Option<String>,
    pub name: String,
    pub common_name: Option<String>,
    pub geneid: Option<i32>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub gene_type: Option<String>,
    pub start: Option<i32>,
    pub end: Option<i32>,
    pub strand: Option<String>,
    pub description: Option<String>,
    pub transcription_factor: bool,
}

impl Gene {
    /// Common name when there is one, otherwise the locus tag
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.name)
    }

    /// `chromosome:start-end(strand)`, leaving out whatever is unknown
    pub fn location(&self) -> Option<String> {
        let coordinates = match (self.start, self.end) {
            (Some(start), Some(end)) => Some(format!("{}-{}", start, end)),
            (Some(pos), None) | (None, Some(pos)) => Some(pos.to_string()),
            (None, None) => None,
        };

        let mut location = match (&self.chromosome, coordinates) {
            (Some(chromosome), Some(coordinates)) => format!("{}:{}", chromosome, coordinates),
            (Some(chromosome), None) => chromosome.clone(),
            (None, Some(coordinates)) => coordinates,
            (None, None) => return None,
        };

        if let Some(strand) = &self.strand {
            location.push_str(&format!("({})", strand));
        }
        Some(location)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Influence {
    pub id: i32,
    pub name: String,
    pub gene_id: Option<i32>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub influence_type: Option<String>,
}

impl Influence {
    /// Combiners are AND gates over two or more other influences
    pub fn is_combiner(&self) -> bool {
        self.influence_type.as_deref() == Some("combiner")
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Bicluster {
    pub id: i32,
    pub network_id: i32,
    pub k: i32,
    pub residual: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Motif {
    pub id: i32,
    pub bicluster_id: i32,
    pub position: Option<i32>,
    pub sites: Option<i32>,
    pub e_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Function {
    pub id: i32,
    pub native_id: Option<String>,
    pub name: String,
    pub namespace: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub function_type: Option<String>,
    pub description: Option<String>,
    pub obsolete: bool,
}

#[cfg(test)]
pub(crate) fn sample_gene(name: &str) -> Gene {
    Gene {
        id: 1,
        species_id: 1,
        chromosome_id: Some(1),
        chromosome: Some("chromosome".to_string()),
        name: name.to_string(),
        common_name: None,
        geneid: Some(1447477),
        gene_type: Some("CDS".to_string()),
        start: Some(100),
        end: Some(900),
        strand: Some("+".to_string()),
        description: Some("hypothetical protein".to_string()),
        transcription_factor: false,
    }
}
