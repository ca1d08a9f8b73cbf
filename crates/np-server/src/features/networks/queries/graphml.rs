//! Export a set of biclusters and everything attached to them as GraphML

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};

use super::super::graphml::{AttrValue, GraphmlError, NetworkGraph};
use crate::domain::parse_id_list;
use crate::features::shared::lookup::pssms_for_motifs;
use crate::models::{Bicluster, Gene, Influence, Motif, GENE_COLUMNS, GENE_FROM};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkGraphmlQuery {
    /// Bicluster ids separated by whitespace, commas or semicolons
    pub biclusters: Option<String>,
    /// Select the biclusters containing this gene instead
    pub gene: Option<String>,
    /// Link combiners to the influences they combine. Only `true` and
    /// `false` parse; other values reject the request with 400.
    #[serde(default)]
    pub expand: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkGraphmlError {
    #[error("Either biclusters or gene is required")]
    SelectionRequired,
    #[error("Invalid bicluster id: {0}")]
    InvalidBiclusterId(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Graphml(#[from] GraphmlError),
}

enum Selection {
    Ids(Vec<i32>),
    Gene(String),
}

impl NetworkGraphmlQuery {
    fn selection(&self) -> Result<Selection, NetworkGraphmlError> {
        if let Some(ids) = &self.biclusters {
            let ids = parse_id_list(ids).map_err(NetworkGraphmlError::InvalidBiclusterId)?;
            if ids.is_empty() {
                return Err(NetworkGraphmlError::SelectionRequired);
            }
            return Ok(Selection::Ids(ids));
        }
        match &self.gene {
            Some(gene) if !gene.trim().is_empty() => Ok(Selection::Gene(gene.clone())),
            _ => Err(NetworkGraphmlError::SelectionRequired),
        }
    }

    pub fn validate(&self) -> Result<(), NetworkGraphmlError> {
        self.selection().map(|_| ())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberGene {
    bicluster_id: i32,
    #[sqlx(flatten)]
    gene: Gene,
}

#[derive(Debug, sqlx::FromRow)]
struct MemberInfluence {
    owner_id: i32,
    #[sqlx(flatten)]
    influence: Influence,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: NetworkGraphmlQuery) -> Result<String, NetworkGraphmlError> {
    let biclusters = match query.selection()? {
        Selection::Ids(ids) => {
            sqlx::query_as::<_, Bicluster>(
                "SELECT id, network_id, k, residual FROM biclusters WHERE id = ANY($1) ORDER BY id",
            )
            .bind(&ids)
            .fetch_all(&pool)
            .await?
        },
        Selection::Gene(name) => {
            sqlx::query_as::<_, Bicluster>(
                "SELECT b.id, b.network_id, b.k, b.residual
                 FROM biclusters b
                 JOIN bicluster_genes bg ON bg.bicluster_id = b.id
                 JOIN genes g ON g.id = bg.gene_id
                 WHERE g.name = $1
                 ORDER BY b.id",
            )
            .bind(&name)
            .fetch_all(&pool)
            .await?
        },
    };
    let bicluster_ids: Vec<i32> = biclusters.iter().map(|b| b.id).collect();

    let sql = format!(
        "SELECT bg.bicluster_id, {} {} JOIN bicluster_genes bg ON bg.gene_id = g.id
         WHERE bg.bicluster_id = ANY($1) ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM
    );
    let genes = sqlx::query_as::<_, MemberGene>(&sql)
        .bind(&bicluster_ids)
        .fetch_all(&pool)
        .await?;

    let influences = sqlx::query_as::<_, MemberInfluence>(
        "SELECT bi.bicluster_id AS owner_id, i.id, i.name, i.gene_id, i.type
         FROM bicluster_influences bi
         JOIN influences i ON i.id = bi.influence_id
         WHERE bi.bicluster_id = ANY($1)
         ORDER BY i.name",
    )
    .bind(&bicluster_ids)
    .fetch_all(&pool)
    .await?;

    let motifs = sqlx::query_as::<_, Motif>(
        "SELECT id, bicluster_id, position, sites, e_value FROM motifs
         WHERE bicluster_id = ANY($1) ORDER BY id",
    )
    .bind(&bicluster_ids)
    .fetch_all(&pool)
    .await?;
    let motif_ids: Vec<i32> = motifs.iter().map(|m| m.id).collect();
    let pssms = pssms_for_motifs(&pool, &motif_ids).await?;

    let parts = if query.expand {
        let combiner_ids: Vec<i32> = influences
            .iter()
            .filter(|m| m.influence.is_combiner())
            .map(|m| m.influence.id)
            .collect();
        sqlx::query_as::<_, MemberInfluence>(
            "SELECT ip.influence_id AS owner_id, i.id, i.name, i.gene_id, i.type
             FROM influence_parts ip
             JOIN influences i ON i.id = ip.part_id
             WHERE ip.influence_id = ANY($1)
             ORDER BY i.name",
        )
        .bind(&combiner_ids)
        .fetch_all(&pool)
        .await?
    } else {
        Vec::new()
    };

    let consensus: HashMap<i32, String> = pssms
        .iter()
        .map(|(motif_id, pssm)| (*motif_id, pssm.consensus()))
        .collect();

    let graph = build_graph(&biclusters, &genes, &influences, &parts, &motifs, &consensus);
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Network graph built"
    );
    Ok(graph.to_graphml()?)
}

fn text(value: impl Into<String>) -> AttrValue {
    AttrValue::Text(value.into())
}

fn influence_node(id: i32) -> String {
    format!("inf:{}", id)
}

fn build_graph(
    biclusters: &[Bicluster],
    genes: &[MemberGene],
    influences: &[MemberInfluence],
    parts: &[MemberInfluence],
    motifs: &[Motif],
    consensus: &HashMap<i32, String>,
) -> NetworkGraph {
    let mut graph = NetworkGraph::new();

    for member in genes {
        graph.add_node(
            member.gene.name.clone(),
            vec![("type", text("gene")), ("name", text(member.gene.display_name()))],
        );
    }

    let selected: HashSet<i32> = influences.iter().map(|m| m.influence.id).collect();
    for member in influences {
        graph.add_node(
            influence_node(member.influence.id),
            vec![("type", text("regulator")), ("name", text(member.influence.name.clone()))],
        );
    }
    for part in parts {
        if !selected.contains(&part.influence.id) {
            graph.add_node(
                influence_node(part.influence.id),
                vec![
                    ("type", text("regulator")),
                    ("name", text(part.influence.name.clone())),
                    ("expanded", AttrValue::Flag(true)),
                ],
            );
        }
        graph.add_edge(influence_node(part.owner_id), influence_node(part.influence.id), true);
    }

    for bicluster in biclusters {
        let node = format!("bicluster:{}", bicluster.id);
        graph.add_node(
            node.clone(),
            vec![("type", text("bicluster")), ("name", text(format!("Bicluster {}", bicluster.k)))],
        );

        for member in genes.iter().filter(|m| m.bicluster_id == bicluster.id) {
            graph.add_edge(node.clone(), member.gene.name.clone(), false);
        }
        for member in influences.iter().filter(|m| m.owner_id == bicluster.id) {
            graph.add_edge(node.clone(), influence_node(member.influence.id), false);
        }
        for motif in motifs.iter().filter(|m| m.bicluster_id == bicluster.id) {
            let motif_node = format!("motif:{}", motif.id);
            let mut attrs = vec![
                ("type", text("motif")),
                ("name", text(motif_node.clone())),
                ("consensus", text(consensus.get(&motif.id).cloned().unwrap_or_default())),
            ];
            if let Some(e_value) = motif.e_value {
                attrs.push(("e_value", AttrValue::Number(e_value)));
            }
            graph.add_node(motif_node.clone(), attrs);
            graph.add_edge(node.clone(), motif_node, false);
        }
    }

    graph
}
