// KEGG storage: pathway hierarchy and gene to pathway links

use sqlx::PgPool;
use tracing::info;

use super::{
    GenePathways, KeggCategory, CATEGORY_NAMESPACE, KEGG_TYPE, PATHWAY_NAMESPACE,
    SUBCATEGORY_NAMESPACE,
};
use crate::domain::KnownSpecies;
use crate::ingest::lookup::{self, NewFunction};
use crate::ingest::{IngestError, LoadStats, Result};

/// Source recorded on gene_functions rows created from KEGG lists
pub const GENE_FUNCTION_SOURCE: &str = "kegg";

/// Insert categories, subcategories and pathways with `parent` edges pointing up the tree
#[tracing::instrument(skip(pool, categories), fields(categories = categories.len()))]
pub async fn load_kegg_pathways(pool: &PgPool, categories: &[KeggCategory]) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let mut stats = LoadStats::default();
    let mut edges: Vec<(i32, i32, &str)> = Vec::new();

    for category in categories {
        let category_id = lookup::insert_function(
            &mut tx,
            &NewFunction::new(KEGG_TYPE, CATEGORY_NAMESPACE, &category.name),
        )
        .await?;
        stats.functions += 1;

        for subcategory in &category.subcategories {
            let subcategory_id = lookup::insert_function(
                &mut tx,
                &NewFunction::new(KEGG_TYPE, SUBCATEGORY_NAMESPACE, &subcategory.name),
            )
            .await?;
            stats.functions += 1;
            edges.push((subcategory_id, category_id, "parent"));

            let pathways: Vec<NewFunction<'_>> = subcategory
                .pathways
                .iter()
                .map(|p| NewFunction::new(KEGG_TYPE, PATHWAY_NAMESPACE, &p.name).with_native_id(&p.native_id))
                .collect();
            let inserted = lookup::insert_functions(&mut tx, &pathways).await?;
            stats.functions += inserted.len();
            edges.extend(inserted.iter().map(|(id, _)| (*id, subcategory_id, "parent")));
        }
    }

    stats.relationships = lookup::insert_relationships(&mut tx, &edges).await?;
    tx.commit().await?;

    info!(
        functions = stats.functions,
        relationships = stats.relationships,
        "Stored KEGG pathway hierarchy"
    );
    Ok(stats)
}

/// Link a species' genes to the pathways already in the database
#[tracing::instrument(skip(pool, gene_pathways), fields(species = species.name, genes = gene_pathways.len()))]
pub async fn load_gene_pathways(
    pool: &PgPool,
    species: &KnownSpecies,
    gene_pathways: &GenePathways,
) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;

    let species_id = lookup::species_id(&mut tx, species.name).await?;
    let functions = lookup::function_ids(&mut tx, KEGG_TYPE, Some(PATHWAY_NAMESPACE)).await?;
    let genes = lookup::gene_ids(&mut tx, species_id).await?;

    let mut links = Vec::new();
    for (gene, pathways) in gene_pathways.iter() {
        let name = species.translate_gene_name(gene);
        let gene_id = *genes
            .get(name)
            .ok_or_else(|| IngestError::UnknownGene(name.to_string()))?;

        for pathway in pathways {
            let function_id = *functions
                .get(pathway)
                .ok_or_else(|| IngestError::unknown_function(KEGG_TYPE, pathway.as_str()))?;
            links.push((gene_id, function_id));
        }
    }

    let stats = LoadStats {
        gene_functions: lookup::insert_gene_functions(&mut tx, &links, GENE_FUNCTION_SOURCE)
            .await?,
        ..LoadStats::default()
    };
    tx.commit().await?;

    info!(
        "Added {} genes to {} pathway links",
        gene_pathways.len(),
        stats.gene_functions
    );
    Ok(stats)
}
