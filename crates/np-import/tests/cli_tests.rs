//! End-to-end tests for the np-import binary
//!
//! Everything here runs without a database: `--dry-run` imports, listings
//! that read the built-in registry, and error reporting.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn np_import() -> Command {
    let mut cmd = Command::cargo_bin("np-import").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT");
    cmd
}

#[test]
fn test_list_species() {
    np_import()
        .arg("list-species")
        .assert()
        .success()
        .stdout(predicate::str::contains("hal, halo => Halobacterium salinarum NRC-1"))
        .stdout(predicate::str::contains("dvu, dvh => Desulfovibrio vulgaris Hildenborough (pDV, chromosome)"))
        .stdout(predicate::str::contains("mmp => Methanococcus maripaludis S2"));
}

#[test]
fn test_subcommand_required() {
    np_import()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("A subcommand is required"));
}

#[test]
fn test_kegg_pathways_dry_run_includes_global_maps() {
    np_import()
        .arg("kegg-pathways")
        .arg(fixture("ko00001_sample.keg"))
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""native_id":"path:00010""#))
        .stdout(predicate::str::contains(r#""name":"Citrate cycle (TCA cycle)""#))
        .stdout(predicate::str::contains(r#""native_id":"path:01100""#));
}

#[test]
fn test_kegg_parse_error_reports_line() {
    np_import()
        .arg("--dry-run")
        .arg("kegg-pathways")
        .arg(fixture("ko_pathway_before_subcategory.keg"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Line 2: Pathway before any subcategory"));
}

#[test]
fn test_go_terms_dry_run() {
    let output = np_import()
        .args(["--dry-run", "go-terms"])
        .arg(fixture("gene_ontology_sample.obo"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let terms: Vec<serde_json::Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(terms.len(), 3);
    assert_eq!(terms[2]["alt_ids"], serde_json::json!(["GO:0000023"]));
    assert_eq!(
        terms[2]["relationships"],
        serde_json::json!([["part_of", "GO:0000070"]])
    );
}

#[test]
fn test_cogs_dry_run_needs_both_files() {
    np_import()
        .args(["--dry-run", "cogs", "--categories"])
        .arg(fixture("cog_categories.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--whog"));

    np_import()
        .args(["--dry-run", "cogs", "--categories"])
        .arg(fixture("cog_categories.txt"))
        .arg("--whog")
        .arg(fixture("whog_sample"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""parents":["J","K"]"#));
}

#[test]
fn test_tigr_roles_dry_run_prints_roles_and_links() {
    np_import()
        .args(["--dry-run", "tigr-roles", "--roles"])
        .arg(fixture("TIGR_ROLE_NAMES"))
        .arg("--links")
        .arg(fixture("TIGRFAMS_ROLE_LINK"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Protein synthesis\""))
        .stdout(predicate::str::contains("[\"TIGR00001\",158]"))
        .stdout(predicate::str::contains("[\"TIGR00004\",70]"));
}

#[test]
fn test_tigr_roles_dry_run_rejects_unknown_role() {
    let dir = tempfile::tempdir().unwrap();
    let links = dir.path().join("TIGRFAMS_ROLE_LINK");
    std::fs::write(&links, "TIGR00001\t158\nTIGR00009\t999\n").unwrap();

    np_import()
        .args(["--dry-run", "tigr-roles", "--roles"])
        .arg(fixture("TIGR_ROLE_NAMES"))
        .arg("--links")
        .arg(&links)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown tigr function: role 999"));
}

#[test]
fn test_tigrfams_dry_run_skips_header() {
    np_import()
        .args(["--dry-run", "tigrfams"])
        .arg(fixture("tigrfams_sample.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id":"TIGR00002""#))
        .stdout(predicate::str::contains("accession").not());
}

#[test]
fn test_genes_dry_run_resolves_chromosome() {
    np_import()
        .args(["--dry-run", "genes", "--species", "hal"])
        .arg(fixture("hal_chromosome.ptt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"VNG0002G""#))
        .stdout(predicate::str::contains(r#""chromosome":"chromosome""#));
}

#[test]
fn test_gene_coordinates_dry_run() {
    np_import()
        .args(["--dry-run", "gene-coordinates", "--species", "dvu", "--gene-type", "pseudo"])
        .arg(fixture("dvu_discontinued.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""chromosome":"pDV""#))
        .stdout(predicate::str::contains(r#""gene_type":"pseudo""#));
}

#[test]
fn test_unknown_species() {
    np_import()
        .args(["--dry-run", "genes", "--species", "eco"])
        .arg(fixture("hal_chromosome.ptt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown species: eco"));
}

#[test]
fn test_import_without_database_url() {
    let workdir = tempfile::tempdir().unwrap();
    np_import()
        .arg("tigrfams")
        .arg(fixture("tigrfams_sample.txt"))
        .current_dir(workdir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No database configured"));
}

#[test]
fn test_missing_input_file_is_named() {
    np_import()
        .args(["--dry-run", "go-terms", "/nonexistent/gene_ontology.obo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gene_ontology.obo"));
}

#[test]
fn test_malformed_obo_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let obo = dir.path().join("broken.obo");
    std::fs::write(&obo, "format-version: 1.2\n\n[Term]\nid GO:0000001\n").unwrap();

    np_import()
        .arg("--dry-run")
        .arg("go-terms")
        .arg(&obo)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Line 4"));
}
