use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::find_species;
use crate::models::{Chromosome, Gene, Network, Species, GENE_COLUMNS, GENE_FROM};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSpeciesQuery {
    /// Id, full name or short name
    pub species: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetSpeciesResponse {
    pub species: Species,
    pub gene_count: i64,
    pub transcription_factors: Vec<Gene>,
    pub chromosomes: Vec<Chromosome>,
    pub networks: Vec<Network>,
    /// Static page describing the organism
    pub organism_info: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetSpeciesError {
    #[error("Species is required")]
    SpeciesRequired,
    #[error("Couldn't find species: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetSpeciesQuery {
    pub fn validate(&self) -> Result<(), GetSpeciesError> {
        if self.species.trim().is_empty() {
            return Err(GetSpeciesError::SpeciesRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetSpeciesQuery,
) -> Result<GetSpeciesResponse, GetSpeciesError> {
    query.validate()?;

    let species = find_species(&pool, &query.species)
        .await?
        .ok_or_else(|| GetSpeciesError::NotFound(query.species.clone()))?;

    let gene_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genes WHERE species_id = $1")
        .bind(species.id)
        .fetch_one(&pool);

    let sql = format!(
        "SELECT {} {} WHERE g.species_id = $1 AND g.transcription_factor ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM
    );
    let transcription_factors = sqlx::query_as::<_, Gene>(&sql)
        .bind(species.id)
        .fetch_all(&pool);

    let chromosomes = sqlx::query_as::<_, Chromosome>(
        "SELECT id, species_id, name, length, topology, refseq
         FROM chromosomes WHERE species_id = $1 ORDER BY name",
    )
    .bind(species.id)
    .fetch_all(&pool);

    let networks = sqlx::query_as::<_, Network>(
        "SELECT id, species_id, name, data_source, description, created_at
         FROM networks WHERE species_id = $1 ORDER BY id",
    )
    .bind(species.id)
    .fetch_all(&pool);

    let (gene_count, transcription_factors, chromosomes, networks) =
        futures::try_join!(gene_count, transcription_factors, chromosomes, networks)?;

    let organism_info = format!("organism_info/{}.html", species.short_name);

    Ok(GetSpeciesResponse {
        species,
        gene_count,
        transcription_factors,
        chromosomes,
        networks,
        organism_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[test]
    fn test_validation_rejects_blank() {
        let query = GetSpeciesQuery {
            species: "  ".to_string(),
        };
        assert!(matches!(query.validate(), Err(GetSpeciesError::SpeciesRequired)));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_get_by_short_name(pool: PgPool) -> sqlx::Result<()> {
        let species = TestSpecies::new("Desulfovibrio vulgaris Hildenborough", "dvu")
            .insert(&pool)
            .await?;
        TestChromosome::new(species.id, "pDV").insert(&pool).await?;
        TestNetwork::new(species.id, "DvH network").insert(&pool).await?;
        TestGene::new(species.id, "DVU0001").insert(&pool).await?;
        TestGene::new(species.id, "DVU0002").transcription_factor().insert(&pool).await?;

        let response = handle(
            pool,
            GetSpeciesQuery {
                species: "dvu".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.gene_count, 2);
        assert_eq!(response.transcription_factors.len(), 1);
        assert_eq!(response.chromosomes[0].name, "pDV");
        assert_eq!(response.networks.len(), 1);
        assert_eq!(response.organism_info, "organism_info/dvu.html");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_unknown_species(pool: PgPool) {
        let result = handle(
            pool,
            GetSpeciesQuery {
                species: "9999".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(GetSpeciesError::NotFound(_))));
    }
}
