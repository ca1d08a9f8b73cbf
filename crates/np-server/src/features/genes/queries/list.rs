//! Genes of one species, as JSON or as a tab separated export

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::find_species;
use crate::models::{Gene, Species, GENE_COLUMNS, GENE_FROM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneFilter {
    /// Transcription factors only
    Tf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneFormat {
    #[default]
    Json,
    Tsv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListGenesQuery {
    pub species: String,
    pub filter: Option<GeneFilter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListGenesResponse {
    pub species: Species,
    pub genes: Vec<Gene>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListGenesError {
    #[error("Species is required")]
    SpeciesRequired,
    #[error("Couldn't find species: {0}")]
    SpeciesNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to write TSV: {0}")]
    Export(#[from] csv::Error),
}

impl ListGenesQuery {
    pub fn validate(&self) -> Result<(), ListGenesError> {
        if self.species.trim().is_empty() {
            return Err(ListGenesError::SpeciesRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: ListGenesQuery) -> Result<ListGenesResponse, ListGenesError> {
    query.validate()?;

    let species = find_species(&pool, &query.species)
        .await?
        .ok_or_else(|| ListGenesError::SpeciesNotFound(query.species.clone()))?;

    let tf_clause = match query.filter {
        Some(GeneFilter::Tf) => " AND g.transcription_factor",
        None => "",
    };
    let sql = format!(
        "SELECT {} {} WHERE g.species_id = $1{} ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM, tf_clause
    );
    let genes = sqlx::query_as::<_, Gene>(&sql)
        .bind(species.id)
        .fetch_all(&pool)
        .await?;

    Ok(ListGenesResponse { species, genes })
}

/// One row per gene: name, common name, geneid, type, description, location.
/// Missing values are written as empty fields and nothing is quoted.
pub fn to_tsv(genes: &[Gene]) -> Result<String, ListGenesError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    for gene in genes {
        writer.write_record([
            gene.name.clone(),
            gene.common_name.clone().unwrap_or_default(),
            gene.geneid.map(|id| id.to_string()).unwrap_or_default(),
            gene.gene_type.clone().unwrap_or_default(),
            gene.description.clone().unwrap_or_default(),
            gene.location().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ListGenesError::Export(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;
    use crate::models::sample_gene;

    #[test]
    fn test_tsv_rows() {
        let mut first = sample_gene("VNG0001G");
        first.common_name = Some("trh3".to_string());
        let mut second = sample_gene("VNG0002C");
        second.geneid = None;
        second.description = None;
        second.chromosome = None;
        second.start = None;
        second.end = None;
        second.strand = None;

        let tsv = to_tsv(&[first, second]).unwrap();
        assert_eq!(
            tsv,
            "VNG0001G\ttrh3\t1447477\tCDS\thypothetical protein\tchromosome:100-900(+)\n\
             VNG0002C\t\t\tCDS\t\t\n"
        );
    }

    #[test]
    fn test_filter_and_format_parse() {
        let filter: GeneFilter = serde_json::from_str("\"tf\"").unwrap();
        assert_eq!(filter, GeneFilter::Tf);
        let format: GeneFormat = serde_json::from_str("\"tsv\"").unwrap();
        assert_eq!(format, GeneFormat::Tsv);
        assert_eq!(GeneFormat::default(), GeneFormat::Json);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_tf_filter(pool: PgPool) -> sqlx::Result<()> {
        let species = TestSpecies::new("Halobacterium salinarum NRC-1", "hal")
            .insert(&pool)
            .await?;
        TestGene::new(species.id, "VNG0002C").insert(&pool).await?;
        TestGene::new(species.id, "VNG0001G").transcription_factor().insert(&pool).await?;

        let all = handle(
            pool.clone(),
            ListGenesQuery {
                species: "hal".to_string(),
                filter: None,
            },
        )
        .await
        .unwrap();
        let names: Vec<_> = all.genes.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["VNG0001G", "VNG0002C"]);

        let tfs = handle(
            pool,
            ListGenesQuery {
                species: species.id.to_string(),
                filter: Some(GeneFilter::Tf),
            },
        )
        .await
        .unwrap();
        assert_eq!(tfs.genes.len(), 1);
        Ok(())
    }
}
