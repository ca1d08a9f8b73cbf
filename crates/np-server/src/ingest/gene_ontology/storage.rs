// GO storage: terms, term relationships and alt id synonyms

use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, info};

use super::{GoTerm, ALT_ID_SYNONYM_TYPE, GO_TYPE};
use crate::ingest::lookup::{self, NewFunction, Tx};
use crate::ingest::{IngestError, LoadStats, Result, DEFAULT_CHUNK_SIZE};

/// Namespace for terms without a `namespace` tag
const UNKNOWN_NAMESPACE: &str = "unknown";

/// Store terms, then `is_a` and `relationship` edges between them, then alt ids.
/// An edge pointing at a term missing from `terms` fails the whole load.
#[tracing::instrument(skip(pool, terms), fields(terms = terms.len()))]
pub async fn load_go_terms(pool: &PgPool, terms: &[GoTerm]) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let mut stats = LoadStats::default();

    let rows: Vec<NewFunction<'_>> = terms
        .iter()
        .map(|term| {
            let mut function = NewFunction::new(
                GO_TYPE,
                term.namespace.as_deref().unwrap_or(UNKNOWN_NAMESPACE),
                &term.name,
            )
            .with_native_id(&term.id)
            .with_description(term.def.as_deref());
            function.obsolete = term.is_obsolete;
            function
        })
        .collect();

    let ids: HashMap<String, i32> = lookup::insert_functions(&mut tx, &rows)
        .await?
        .into_iter()
        .filter_map(|(id, native_id)| native_id.map(|native_id| (native_id, id)))
        .collect();
    stats.functions = ids.len();
    debug!(functions = stats.functions, "Inserted GO terms");

    let mut edges: Vec<(i32, i32, &str)> = Vec::new();
    for term in terms {
        let source = resolve(&ids, &term.id)?;
        for parent in &term.is_a {
            edges.push((source, resolve(&ids, parent)?, "is_a"));
        }
        for (relation, target) in &term.relationships {
            edges.push((source, resolve(&ids, target)?, relation.as_str()));
        }
    }
    stats.relationships = lookup::insert_relationships(&mut tx, &edges).await?;

    let mut alt_ids: Vec<(i32, &str)> = Vec::new();
    for term in terms {
        let function_id = resolve(&ids, &term.id)?;
        alt_ids.extend(term.alt_ids.iter().map(|alt| (function_id, alt.as_str())));
    }
    stats.synonyms = insert_alt_ids(&mut tx, &alt_ids).await?;

    tx.commit().await?;

    info!(
        functions = stats.functions,
        relationships = stats.relationships,
        synonyms = stats.synonyms,
        "Stored GO terms"
    );
    Ok(stats)
}

fn resolve(ids: &HashMap<String, i32>, go_id: &str) -> Result<i32> {
    ids.get(go_id)
        .copied()
        .ok_or_else(|| IngestError::unknown_function(GO_TYPE, go_id))
}

async fn insert_alt_ids(tx: &mut Tx<'_>, alt_ids: &[(i32, &str)]) -> Result<usize> {
    for chunk in alt_ids.chunks(DEFAULT_CHUNK_SIZE) {
        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO synonyms (target_id, target_type, name, type) ");
        query_builder.push_values(chunk, |mut b, (function_id, alt_id)| {
            b.push_bind(*function_id)
                .push_bind("function")
                .push_bind(*alt_id)
                .push_bind(ALT_ID_SYNONYM_TYPE);
        });
        query_builder.build().execute(&mut **tx).await?;
    }
    Ok(alt_ids.len())
}
