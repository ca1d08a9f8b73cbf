// COG storage: categories, subcategories, COGs and their parent edges

use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;

use super::{Cog, CogCategory, CATEGORY_NAMESPACE, COG_NAMESPACE, COG_TYPE, SUBCATEGORY_NAMESPACE};
use crate::ingest::lookup::{self, NewFunction};
use crate::ingest::{IngestError, LoadStats, Result};

/// Insert categories, then subcategories, then COGs. Every COG parent letter
/// must name a subcategory from `categories`.
#[tracing::instrument(skip(pool, categories, cogs), fields(categories = categories.len(), cogs = cogs.len()))]
pub async fn load_cogs(pool: &PgPool, categories: &[CogCategory], cogs: &[Cog]) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let mut stats = LoadStats::default();
    let mut edges: Vec<(i32, i32, &str)> = Vec::new();

    let mut category_ids = Vec::with_capacity(categories.len());
    for category in categories {
        let id = lookup::insert_function(
            &mut tx,
            &NewFunction::new(COG_TYPE, CATEGORY_NAMESPACE, &category.name),
        )
        .await?;
        category_ids.push(id);
    }
    stats.functions += category_ids.len();

    let mut subcategory_ids: HashMap<&str, i32> = HashMap::new();
    for (category, category_id) in categories.iter().zip(&category_ids) {
        for subcategory in &category.subcategories {
            let id = lookup::insert_function(
                &mut tx,
                &NewFunction::new(COG_TYPE, SUBCATEGORY_NAMESPACE, &subcategory.name)
                    .with_native_id(&subcategory.id),
            )
            .await?;
            stats.functions += 1;
            subcategory_ids.insert(subcategory.id.as_str(), id);
            edges.push((id, *category_id, "parent"));
        }
    }

    let rows: Vec<NewFunction<'_>> = cogs
        .iter()
        .map(|cog| NewFunction::new(COG_TYPE, COG_NAMESPACE, &cog.name).with_native_id(&cog.id))
        .collect();
    let inserted: HashMap<String, i32> = lookup::insert_functions(&mut tx, &rows)
        .await?
        .into_iter()
        .filter_map(|(id, native_id)| native_id.map(|native_id| (native_id, id)))
        .collect();
    stats.functions += rows.len();

    for cog in cogs {
        let cog_id = inserted
            .get(&cog.id)
            .ok_or_else(|| IngestError::unknown_function(COG_TYPE, cog.id.as_str()))?;
        for parent in &cog.parents {
            let parent_id = subcategory_ids
                .get(parent.as_str())
                .ok_or_else(|| IngestError::unknown_function(COG_TYPE, parent.as_str()))?;
            edges.push((*cog_id, *parent_id, "parent"));
        }
    }

    stats.relationships = lookup::insert_relationships(&mut tx, &edges).await?;
    tx.commit().await?;

    info!(
        functions = stats.functions,
        relationships = stats.relationships,
        "Stored COG functions"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::cog::{parse_cog_categories, parse_whog};

    const CATEGORIES: &str = "METABOLISM\nC\t \t \tEnergy production and conversion\nE\t \t \tAmino acid transport and metabolism\n";

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_load_cogs_with_multiple_parents(pool: PgPool) -> Result<()> {
        let categories = parse_cog_categories(CATEGORIES)?;
        let cogs = parse_whog("[CE] COG0001 Glutamate-1-semialdehyde aminotransferase\n")?;

        let stats = load_cogs(&pool, &categories, &cogs).await?;
        assert_eq!(stats.functions, 4);
        assert_eq!(stats.relationships, 4);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_unknown_parent_letter(pool: PgPool) -> Result<()> {
        let categories = parse_cog_categories(CATEGORIES)?;
        let cogs = parse_whog("[X] COG0002 Unknown family\n")?;

        let err = load_cogs(&pool, &categories, &cogs).await.unwrap_err();
        assert!(matches!(err, IngestError::UnknownFunction { system: "cog", .. }));
        Ok(())
    }
}
