//! Id lookups and shared inserts used inside loader transactions

use sqlx::{Postgres, QueryBuilder, Transaction};
use std::collections::HashMap;
use tracing::warn;

use super::{IngestError, Result, DEFAULT_CHUNK_SIZE};

pub type Tx<'c> = Transaction<'c, Postgres>;

/// A row for the `functions` table
#[derive(Debug, Clone, PartialEq)]
pub struct NewFunction<'a> {
    pub native_id: Option<&'a str>,
    pub name: &'a str,
    pub function_type: &'a str,
    pub namespace: &'a str,
    pub description: Option<&'a str>,
    pub obsolete: bool,
}

impl<'a> NewFunction<'a> {
    pub fn new(function_type: &'a str, namespace: &'a str, name: &'a str) -> Self {
        Self {
            native_id: None,
            name,
            function_type,
            namespace,
            description: None,
            obsolete: false,
        }
    }

    pub fn with_native_id(mut self, native_id: &'a str) -> Self {
        self.native_id = Some(native_id);
        self
    }

    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }
}

pub async fn species_id(tx: &mut Tx<'_>, name: &str) -> Result<i32> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM species WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| IngestError::SpeciesNotLoaded(name.to_string()))
}

/// Gene name to id for one species
pub async fn gene_ids(tx: &mut Tx<'_>, species_id: i32) -> Result<HashMap<String, i32>> {
    let rows = sqlx::query_as::<_, (i32, String)>("SELECT id, name FROM genes WHERE species_id = $1")
        .bind(species_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
}

pub async fn chromosome_ids(tx: &mut Tx<'_>, species_id: i32) -> Result<HashMap<String, i32>> {
    let rows =
        sqlx::query_as::<_, (i32, String)>("SELECT id, name FROM chromosomes WHERE species_id = $1")
            .bind(species_id)
            .fetch_all(&mut **tx)
            .await?;
    Ok(rows.into_iter().map(|(id, name)| (name, id)).collect())
}

/// Native id to function id for one naming system, optionally one namespace
pub async fn function_ids(
    tx: &mut Tx<'_>,
    function_type: &str,
    namespace: Option<&str>,
) -> Result<HashMap<String, i32>> {
    let rows = sqlx::query_as::<_, (i32, String)>(
        "SELECT id, native_id FROM functions
         WHERE type = $1 AND native_id IS NOT NULL
           AND ($2::VARCHAR IS NULL OR namespace = $2)",
    )
    .bind(function_type)
    .bind(namespace)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows.into_iter().map(|(id, native_id)| (native_id, id)).collect())
}

/// GO function ids keyed by native id and by alt id
pub async fn go_function_ids(tx: &mut Tx<'_>) -> Result<HashMap<String, i32>> {
    let mut ids = function_ids(tx, "go", None).await?;

    let alt_ids = sqlx::query_as::<_, (i32, String)>(
        "SELECT target_id, name FROM synonyms
         WHERE target_type = 'function' AND type = 'go:alt_id'",
    )
    .fetch_all(&mut **tx)
    .await?;

    for (function_id, alt_id) in alt_ids {
        if ids.contains_key(&alt_id) {
            warn!(alt_id = %alt_id, "GO alt id duplicates a primary id");
        } else {
            ids.insert(alt_id, function_id);
        }
    }
    Ok(ids)
}

pub async fn insert_function(tx: &mut Tx<'_>, function: &NewFunction<'_>) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO functions (native_id, name, type, namespace, description, obsolete)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id",
    )
    .bind(function.native_id)
    .bind(function.name)
    .bind(function.function_type)
    .bind(function.namespace)
    .bind(function.description)
    .bind(function.obsolete)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Multi-row insert; returns `(id, native_id)` for every inserted row
pub async fn insert_functions(
    tx: &mut Tx<'_>,
    functions: &[NewFunction<'_>],
) -> Result<Vec<(i32, Option<String>)>> {
    let mut inserted = Vec::with_capacity(functions.len());

    for chunk in functions.chunks(DEFAULT_CHUNK_SIZE) {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO functions (native_id, name, type, namespace, description, obsolete) ",
        );
        query_builder.push_values(chunk, |mut b, function| {
            b.push_bind(function.native_id)
                .push_bind(function.name)
                .push_bind(function.function_type)
                .push_bind(function.namespace)
                .push_bind(function.description)
                .push_bind(function.obsolete);
        });
        query_builder.push(" RETURNING id, native_id");

        let rows = query_builder
            .build_query_as::<(i32, Option<String>)>()
            .fetch_all(&mut **tx)
            .await?;
        inserted.extend(rows);
    }

    Ok(inserted)
}

/// `(function_id, target_id, type)` edges
pub async fn insert_relationships(
    tx: &mut Tx<'_>,
    relationships: &[(i32, i32, &str)],
) -> Result<usize> {
    for chunk in relationships.chunks(DEFAULT_CHUNK_SIZE) {
        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO function_relationships (function_id, target_id, type) ");
        query_builder.push_values(chunk, |mut b, (function_id, target_id, relation)| {
            b.push_bind(*function_id)
                .push_bind(*target_id)
                .push_bind(*relation);
        });
        query_builder.build().execute(&mut **tx).await?;
    }
    Ok(relationships.len())
}

/// `(gene_id, function_id)` pairs, all with the same source
pub async fn insert_gene_functions(
    tx: &mut Tx<'_>,
    links: &[(i32, i32)],
    source: &str,
) -> Result<usize> {
    for chunk in links.chunks(DEFAULT_CHUNK_SIZE) {
        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO gene_functions (gene_id, function_id, source) ");
        query_builder.push_values(chunk, |mut b, (gene_id, function_id)| {
            b.push_bind(*gene_id).push_bind(*function_id).push_bind(source);
        });
        query_builder.build().execute(&mut **tx).await?;
    }
    Ok(links.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_go_ids_include_alt_ids(pool: PgPool) -> Result<()> {
        let mut tx = pool.begin().await?;
        let id = insert_function(
            &mut tx,
            &NewFunction::new("go", "biological_process", "translation").with_native_id("GO:0006412"),
        )
        .await?;
        sqlx::query(
            "INSERT INTO synonyms (target_id, target_type, name, type)
             VALUES ($1, 'function', 'GO:0006416', 'go:alt_id')",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let ids = go_function_ids(&mut tx).await?;
        assert_eq!(ids.get("GO:0006412"), Some(&id));
        assert_eq!(ids.get("GO:0006416"), Some(&id));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_missing_species_is_reported(pool: PgPool) -> Result<()> {
        let mut tx = pool.begin().await?;
        let err = species_id(&mut tx, "Escherichia coli").await.unwrap_err();
        assert!(matches!(err, IngestError::SpeciesNotLoaded(_)));
        Ok(())
    }
}
