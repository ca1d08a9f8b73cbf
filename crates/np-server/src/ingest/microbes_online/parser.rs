// genomeInfo tab table parser

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ingest::Result;

/// The genomeInfo columns used for function links. Other columns
/// (locusId, scaffoldId, EC, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenomeInfoRow {
    #[serde(rename = "sysName")]
    pub sys_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "COG", default)]
    pub cog: String,
    #[serde(rename = "TIGRFam", default)]
    pub tigrfam: String,
    #[serde(rename = "GO", default)]
    pub go: String,
}

impl GenomeInfoRow {
    /// Comma separated GO ids
    pub fn go_ids(&self) -> Vec<&str> {
        split_list(&self.go)
    }

    pub fn cog_ids(&self) -> Vec<&str> {
        split_list(&self.cog)
    }

    /// First token of the TIGRFam column, e.g. `TIGR00001` from `TIGR00001 rpmI_bact`
    pub fn tigrfam_id(&self) -> Option<&str> {
        self.tigrfam.split_whitespace().next()
    }
}

fn split_list(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Zero-pad the number of a COG id to four digits (`COG42` -> `COG0042`).
/// Returns `None` for anything that does not start with `COG` and a number.
pub fn normalize_cog_id(id: &str) -> Option<String> {
    let digits: String = id
        .trim()
        .strip_prefix("COG")?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let number: u32 = digits.parse().ok()?;
    Some(format!("COG{:04}", number))
}

/// Tab separated, header row first, no quoting
pub fn parse_genome_info(content: &str) -> Result<Vec<GenomeInfoRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let rows = reader
        .deserialize::<GenomeInfoRow>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    info!("Read {} genomeInfo rows", rows.len());
    Ok(rows)
}
