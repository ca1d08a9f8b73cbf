//! API integration tests for the portal server
//!
//! The full router (middleware included) runs against a migrated test
//! database seeded with one small network. Solr and the sequence viewer
//! point at unroutable addresses; no test here reaches them.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use np_server::api::{build_state, create_router};
use np_server::config::Config;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

struct Seeded {
    gene_id: i32,
    network_id: i32,
    bicluster_id: i32,
}

async fn seed(pool: &PgPool) -> sqlx::Result<Seeded> {
    let species_id: i32 = sqlx::query_scalar(
        "INSERT INTO species (name, short_name) VALUES ('Halobacterium salinarum NRC-1', 'hal')
         RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    let chromosome_id: i32 = sqlx::query_scalar(
        "INSERT INTO chromosomes (species_id, name, length, topology)
         VALUES ($1, 'chromosome', 2014239, 'circular') RETURNING id",
    )
    .bind(species_id)
    .fetch_one(pool)
    .await?;

    let gene_id: i32 = sqlx::query_scalar(
        r#"INSERT INTO genes (species_id, chromosome_id, name, common_name, type,
                              "start", "end", strand, transcription_factor)
           VALUES ($1, $2, 'VNG1179C', 'trh3', 'CDS', 885262, 885885, '+', TRUE)
           RETURNING id"#,
    )
    .bind(species_id)
    .bind(chromosome_id)
    .fetch_one(pool)
    .await?;

    let network_id: i32 = sqlx::query_scalar(
        "INSERT INTO networks (species_id, name, data_source) VALUES ($1, 'EGRIN', 'cMonkey')
         RETURNING id",
    )
    .bind(species_id)
    .fetch_one(pool)
    .await?;

    let bicluster_id: i32 = sqlx::query_scalar(
        "INSERT INTO biclusters (network_id, k, residual) VALUES ($1, 1, 0.42) RETURNING id",
    )
    .bind(network_id)
    .fetch_one(pool)
    .await?;

    sqlx::query("INSERT INTO bicluster_genes (bicluster_id, gene_id) VALUES ($1, $2)")
        .bind(bicluster_id)
        .bind(gene_id)
        .execute(pool)
        .await?;

    Ok(Seeded {
        gene_id,
        network_id,
        bicluster_id,
    })
}

fn app(pool: PgPool) -> Router {
    let mut config = Config::default();
    config.upstream.solr_url = "http://127.0.0.1:9/solr/select".to_string();
    config.upstream.sviewer_base_url = "http://127.0.0.1:9/sviewer".to_string();
    let state = build_state(pool, &config).unwrap();
    create_router(state, &config)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_health_and_home(pool: PgPool) -> sqlx::Result<()> {
    seed(&pool).await?;
    let app = app(pool);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["species"], 1);
    assert_eq!(body["data"]["biclusters"], 1);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_species_detail_by_short_name(pool: PgPool) -> sqlx::Result<()> {
    let seeded = seed(&pool).await?;
    let app = app(pool);

    let (status, body) = get_json(&app, "/api/v1/species/hal").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["gene_count"], 1);
    assert_eq!(body["data"]["transcription_factors"][0]["name"], "VNG1179C");
    assert_eq!(body["data"]["networks"][0]["id"], seeded.network_id);

    let (status, body) = get_json(&app, "/api/v1/species/eco").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_gene_list_as_tsv(pool: PgPool) -> sqlx::Result<()> {
    seed(&pool).await?;
    let app = app(pool);

    let (status, content_type, body) = get(&app, "/api/v1/genes/hal?format=tsv&filter=tf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/tsv"));
    let tsv = String::from_utf8(body).unwrap();
    assert!(tsv.lines().any(|line| line.starts_with("VNG1179C\t")));
    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore] // Requires database
async fn test_gene_detail_lists_biclusters(pool: PgPool) -> sqlx::Result<()> {
    let seeded = seed(&pool).await?;
    let app = app(pool);

    let (status, body) = get_json(&app, &format!("/api/v1/gene/{}", seeded.gene_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["gene"]["name"], "VNG1179C");

    let (status, body) = get_json(&app, &format!("/api/v1/bicluster/{}", seeded.bicluster_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bicluster"]["k"], 1);
    Ok(())
}
