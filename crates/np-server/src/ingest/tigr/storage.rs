// TIGR storage: TIGRFAMs, role tree and TIGRFAM role edges

use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;

use super::{Tigrfam, TigrRoles, MAINROLE_NAMESPACE, SUB1ROLE_NAMESPACE, TIGRFAM_NAMESPACE, TIGR_TYPE};
use crate::ingest::lookup::{self, NewFunction};
use crate::ingest::{IngestError, LoadStats, Result};

/// Insert TIGRFAMs whose native id is not already stored
#[tracing::instrument(skip(pool, tigrfams), fields(tigrfams = tigrfams.len()))]
pub async fn load_tigrfams(pool: &PgPool, tigrfams: &[Tigrfam]) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let existing = lookup::function_ids(&mut tx, TIGR_TYPE, None).await?;

    let rows: Vec<NewFunction<'_>> = tigrfams
        .iter()
        .filter(|t| !existing.contains_key(&t.id))
        .map(|t| {
            NewFunction::new(TIGR_TYPE, TIGRFAM_NAMESPACE, &t.name)
                .with_native_id(&t.id)
                .with_description(Some(t.description.as_str()))
        })
        .collect();

    let stats = LoadStats {
        functions: lookup::insert_functions(&mut tx, &rows).await?.len(),
        skipped: tigrfams.len() - rows.len(),
        ..LoadStats::default()
    };
    tx.commit().await?;

    info!(added = stats.functions, existing = stats.skipped, "Stored TIGRFAMs");
    Ok(stats)
}

/// Insert the role tree, then a `parent` edge from each linked TIGRFAM to its sub role.
/// TIGRFAMs must already be loaded.
#[tracing::instrument(skip(pool, roles, links), fields(links = links.len()))]
pub async fn load_tigr_roles(
    pool: &PgPool,
    roles: &TigrRoles,
    links: &[(String, i32)],
) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let mut stats = LoadStats::default();
    let mut edges: Vec<(i32, i32, &str)> = Vec::new();
    let mut role_functions: HashMap<i32, i32> = HashMap::new();

    for mainrole in &roles.mainroles {
        let mainrole_id = lookup::insert_function(
            &mut tx,
            &NewFunction::new(TIGR_TYPE, MAINROLE_NAMESPACE, &mainrole.name),
        )
        .await?;
        stats.functions += 1;

        for sub1role in &mainrole.children {
            let sub1role_id = lookup::insert_function(
                &mut tx,
                &NewFunction::new(TIGR_TYPE, SUB1ROLE_NAMESPACE, &sub1role.name),
            )
            .await?;
            stats.functions += 1;
            edges.push((sub1role_id, mainrole_id, "parent"));
            role_functions.insert(sub1role.role_id, sub1role_id);
        }
    }

    let tigrfams = lookup::function_ids(&mut tx, TIGR_TYPE, Some(TIGRFAM_NAMESPACE)).await?;
    for (tigrfam, role) in links {
        let role_function = role_functions
            .get(role)
            .ok_or_else(|| IngestError::unknown_function(TIGR_TYPE, format!("role {}", role)))?;
        let tigrfam_function = tigrfams
            .get(tigrfam)
            .ok_or_else(|| IngestError::unknown_function(TIGR_TYPE, tigrfam.as_str()))?;
        edges.push((*tigrfam_function, *role_function, "parent"));
    }

    stats.relationships = lookup::insert_relationships(&mut tx, &edges).await?;
    tx.commit().await?;

    info!(
        roles = stats.functions,
        relationships = stats.relationships,
        "Stored TIGR roles"
    );
    Ok(stats)
}
