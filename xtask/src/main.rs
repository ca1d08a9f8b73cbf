//! Build automation tasks for the Network Portal
//!
//! - Generating the importer command reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for the Network Portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the np-import command reference in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating importer documentation...");

    let markdown = clap_markdown::help_markdown::<np_import::Cli>();

    let content = format!(
        r#"# np-import Reference

Generated from the CLI source on {}.

## Load order

Function hierarchies must exist before genes are linked to them:

```bash
np-import kegg-pathways data/ko00001.keg
np-import go-terms data/gene_ontology.obo
np-import cogs --categories data/cog_categories.txt --whog data/COG_whog
np-import tigrfams data/tigrfam_table.txt
np-import tigr-roles --roles data/TIGR_ROLE_NAMES --links data/TIGRFAMS_ROLE_LINK

np-import genes --species hal data/hal/*.ptt
np-import genes --species hal --rna data/hal/*.rnt
np-import kegg-gene-pathways --species hal data/hal/hal_pathway.list
np-import genome-info --species hal data/hal/genomeInfo.txt
```

Add `--dry-run` to any import to print the parsed records as JSON lines
without connecting to the database.

## Environment Variables

- `DATABASE_URL` - PostgreSQL connection string (same as `--database-url`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_FILTER` - logging overrides

## Commands

{}
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("np-import.md");
    fs::write(&file_path, content)?;

    println!("Generated importer documentation at: {}", file_path.display());

    Ok(())
}
