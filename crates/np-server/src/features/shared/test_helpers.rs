//! Test fixtures for database tests
//!
//! ```rust,ignore
//! use np_server::features::shared::test_helpers::*;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let species = TestSpecies::new("Methanococcus maripaludis S2", "mmp")
//!         .insert(&pool)
//!         .await?;
//!     let gene = TestGene::new(species.id, "MMP0001")
//!         .with_common_name("mcrA")
//!         .insert(&pool)
//!         .await?;
//!     Ok(())
//! }
//! ```

use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct TestSpecies {
    pub id: i32,
    pub name: String,
    pub short_name: String,
}

impl TestSpecies {
    pub fn new(name: &str, short_name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            short_name: short_name.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO species (name, short_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(&self.name)
        .bind(&self.short_name)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestChromosome {
    pub id: i32,
    pub species_id: i32,
    pub name: String,
}

impl TestChromosome {
    pub fn new(species_id: i32, name: &str) -> Self {
        Self {
            id: 0,
            species_id,
            name: name.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO chromosomes (species_id, name, length, topology)
             VALUES ($1, $2, 2014239, 'circular') RETURNING id",
        )
        .bind(self.species_id)
        .bind(&self.name)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestNetwork {
    pub id: i32,
    pub species_id: i32,
    pub name: String,
}

impl TestNetwork {
    pub fn new(species_id: i32, name: &str) -> Self {
        Self {
            id: 0,
            species_id,
            name: name.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO networks (species_id, name, data_source)
             VALUES ($1, $2, 'cMonkey/Inferelator') RETURNING id",
        )
        .bind(self.species_id)
        .bind(&self.name)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestGene {
    pub id: i32,
    pub species_id: i32,
    pub chromosome_id: Option<i32>,
    pub name: String,
    pub common_name: Option<String>,
    pub start: Option<i32>,
    pub end: Option<i32>,
    pub strand: Option<String>,
    pub description: Option<String>,
    pub transcription_factor: bool,
}

impl TestGene {
    pub fn new(species_id: i32, name: &str) -> Self {
        Self {
            id: 0,
            species_id,
            chromosome_id: None,
            name: name.to_string(),
            common_name: None,
            start: None,
            end: None,
            strand: None,
            description: None,
            transcription_factor: false,
        }
    }

    pub fn with_common_name(mut self, common_name: &str) -> Self {
        self.common_name = Some(common_name.to_string());
        self
    }

    pub fn with_location(mut self, chromosome_id: i32, start: i32, end: i32, strand: &str) -> Self {
        self.chromosome_id = Some(chromosome_id);
        self.start = Some(start);
        self.end = Some(end);
        self.strand = Some(strand.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn transcription_factor(mut self) -> Self {
        self.transcription_factor = true;
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"INSERT INTO genes (species_id, chromosome_id, name, common_name, type,
                                  "start", "end", strand, description, transcription_factor)
               VALUES ($1, $2, $3, $4, 'CDS', $5, $6, $7, $8, $9)
               RETURNING id"#,
        )
        .bind(self.species_id)
        .bind(self.chromosome_id)
        .bind(&self.name)
        .bind(&self.common_name)
        .bind(self.start)
        .bind(self.end)
        .bind(&self.strand)
        .bind(&self.description)
        .bind(self.transcription_factor)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestBicluster {
    pub id: i32,
    pub network_id: i32,
    pub k: i32,
}

impl TestBicluster {
    pub fn new(network_id: i32, k: i32) -> Self {
        Self { id: 0, network_id, k }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO biclusters (network_id, k, residual) VALUES ($1, $2, 0.42) RETURNING id",
        )
        .bind(self.network_id)
        .bind(self.k)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestInfluence {
    pub id: i32,
    pub name: String,
    pub gene_id: Option<i32>,
    pub influence_type: Option<String>,
}

impl TestInfluence {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            gene_id: None,
            influence_type: Some("tf".to_string()),
        }
    }

    pub fn with_gene(mut self, gene_id: i32) -> Self {
        self.gene_id = Some(gene_id);
        self
    }

    pub fn with_type(mut self, influence_type: &str) -> Self {
        self.influence_type = Some(influence_type.to_string());
        self
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO influences (name, gene_id, type) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&self.name)
        .bind(self.gene_id)
        .bind(&self.influence_type)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

#[derive(Debug, Clone)]
pub struct TestFunction {
    pub id: i32,
    pub native_id: String,
    pub name: String,
    pub namespace: String,
    pub function_type: String,
}

impl TestFunction {
    pub fn new(function_type: &str, namespace: &str, native_id: &str, name: &str) -> Self {
        Self {
            id: 0,
            native_id: native_id.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            function_type: function_type.to_string(),
        }
    }

    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO functions (native_id, name, namespace, type)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&self.native_id)
        .bind(&self.name)
        .bind(&self.namespace)
        .bind(&self.function_type)
        .fetch_one(pool)
        .await?;
        Ok(Self { id, ..self })
    }
}

/// Insert a motif with the given PSSM rows `(a, c, g, t)`
pub async fn insert_motif(
    pool: &PgPool,
    bicluster_id: i32,
    e_value: f64,
    rows: &[(f64, f64, f64, f64)],
) -> sqlx::Result<i32> {
    let motif_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO motifs (bicluster_id, position, sites, e_value)
         VALUES ($1, 1, 12, $2) RETURNING id",
    )
    .bind(bicluster_id)
    .bind(e_value)
    .fetch_one(pool)
    .await?;

    for (position, (a, c, g, t)) in rows.iter().enumerate() {
        sqlx::query("INSERT INTO pssms (motif_id, position, a, c, g, t) VALUES ($1, $2, $3, $4, $5, $6)")
            .bind(motif_id)
            .bind(position as i32 + 1)
            .bind(a)
            .bind(c)
            .bind(g)
            .bind(t)
            .execute(pool)
            .await?;
    }
    Ok(motif_id)
}

pub async fn link_bicluster_gene(pool: &PgPool, bicluster_id: i32, gene_id: i32) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO bicluster_genes (bicluster_id, gene_id) VALUES ($1, $2)")
        .bind(bicluster_id)
        .bind(gene_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn link_bicluster_influence(
    pool: &PgPool,
    bicluster_id: i32,
    influence_id: i32,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO bicluster_influences (bicluster_id, influence_id) VALUES ($1, $2)")
        .bind(bicluster_id)
        .bind(influence_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn link_influence_part(pool: &PgPool, influence_id: i32, part_id: i32) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO influence_parts (influence_id, part_id) VALUES ($1, $2)")
        .bind(influence_id)
        .bind(part_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn link_gene_function(pool: &PgPool, gene_id: i32, function_id: i32) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO gene_functions (gene_id, function_id, source) VALUES ($1, $2, 'test')")
        .bind(gene_id)
        .bind(function_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn link_bicluster_function(
    pool: &PgPool,
    bicluster_id: i32,
    function_id: i32,
    gene_count: i32,
    p_b: f64,
) -> sqlx::Result<()> {
    sqlx::query(
        "INSERT INTO bicluster_functions (bicluster_id, function_id, gene_count, m, n, k, p, p_bh, p_b)
         VALUES ($1, $2, $3, 10, 20, 5, 0.0001, 0.001, $4)",
    )
    .bind(bicluster_id)
    .bind(function_id)
    .bind(gene_count)
    .bind(p_b)
    .execute(pool)
    .await?;
    Ok(())
}
