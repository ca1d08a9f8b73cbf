//! Function hierarchy imports

use std::path::Path;
use tracing::info;

use np_server::ingest::{cog, gene_ontology, kegg, read_input, tigr};

use super::{print_records, print_stats, Context};
use crate::error::Result;

pub async fn kegg_pathways(ctx: &Context, file: &Path) -> Result<()> {
    let content = read_input(file).await?;
    let mut categories = kegg::KeggHtextParser::new()?.parse(&content)?;
    categories.extend(kegg::global_pathways());

    let pathways: usize = categories.iter().map(|c| c.pathway_count()).sum();
    info!(categories = categories.len(), pathways, "Parsed KEGG hierarchy");

    if ctx.dry_run {
        return print_records(&categories);
    }

    let pool = ctx.pool().await?;
    let stats = kegg::load_kegg_pathways(&pool, &categories).await?;
    print_stats("KEGG pathways", &stats);
    Ok(())
}

pub async fn go_terms(ctx: &Context, file: &Path) -> Result<()> {
    let content = read_input(file).await?;
    let terms = gene_ontology::OboParser::new()?.parse(&content)?;

    if ctx.dry_run {
        return print_records(&terms);
    }

    let pool = ctx.pool().await?;
    let stats = gene_ontology::load_go_terms(&pool, &terms).await?;
    print_stats("GO terms", &stats);
    Ok(())
}

pub async fn tigrfams(ctx: &Context, file: &Path) -> Result<()> {
    let tigrfams = tigr::parse_tigrfams(&read_input(file).await?)?;

    if ctx.dry_run {
        return print_records(&tigrfams);
    }

    let pool = ctx.pool().await?;
    let stats = tigr::load_tigrfams(&pool, &tigrfams).await?;
    print_stats("TIGRFAMs", &stats);
    Ok(())
}

pub async fn tigr_roles(ctx: &Context, roles: &Path, links: &Path) -> Result<()> {
    let roles = tigr::parse_tigr_roles(&read_input(roles).await?)?;
    let links = tigr::parse_role_links(&read_input(links).await?)?;

    if ctx.dry_run {
        roles.check_links(&links)?;
        print_records(&roles.mainroles)?;
        return print_records(&links);
    }

    let pool = ctx.pool().await?;
    let stats = tigr::load_tigr_roles(&pool, &roles, &links).await?;
    print_stats("TIGR roles", &stats);
    Ok(())
}

pub async fn cogs(ctx: &Context, categories: &Path, whog: &Path) -> Result<()> {
    let categories = cog::parse_cog_categories(&read_input(categories).await?)?;
    let cogs = cog::parse_whog(&read_input(whog).await?)?;

    if ctx.dry_run {
        print_records(&categories)?;
        return print_records(&cogs);
    }

    let pool = ctx.pool().await?;
    let stats = cog::load_cogs(&pool, &categories, &cogs).await?;
    print_stats("COGs", &stats);
    Ok(())
}
