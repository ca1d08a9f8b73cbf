// COG category listing and `whog` parsers

use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::ingest::{numbered_lines, IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CogSubcategory {
    /// One-letter code
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CogCategory {
    pub name: String,
    pub subcategories: Vec<CogSubcategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cog {
    pub id: String,
    pub name: String,
    /// Subcategory letters
    pub parents: Vec<String>,
}

/// Category lines hold a bare name; subcategory lines are
/// `letter \t ... \t ... \t name` and belong to the latest category.
pub fn parse_cog_categories(content: &str) -> Result<Vec<CogCategory>> {
    let subcategory_re = Regex::new(r"^[A-Z]\t")?;
    let mut categories: Vec<CogCategory> = Vec::new();

    for (line_no, line) in numbered_lines(content) {
        if line.trim().is_empty() {
            continue;
        }

        if subcategory_re.is_match(line) {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 4 {
                return Err(IngestError::parse(
                    line_no,
                    line,
                    "Subcategory line needs 4 tab-separated fields",
                ));
            }
            let category = categories.last_mut().ok_or_else(|| {
                IngestError::parse(line_no, line, "Subcategory before any category")
            })?;
            category.subcategories.push(CogSubcategory {
                id: fields[0].to_string(),
                name: fields[3].trim().to_string(),
            });
        } else {
            categories.push(CogCategory {
                name: line.trim().to_string(),
                subcategories: Vec::new(),
            });
        }
    }

    info!("Read {} COG categories", categories.len());
    Ok(categories)
}

/// `[LETTERS] COGnnnn name` lines; everything else (gene lists, `_______`
/// separators) is ignored.
pub fn parse_whog(content: &str) -> Result<Vec<Cog>> {
    let cog_re = Regex::new(r"^\[(\w+)\]\s+(COG\d+)\s+(.*)$")?;

    let cogs: Vec<Cog> = numbered_lines(content)
        .filter_map(|(_, line)| cog_re.captures(line))
        .map(|caps| Cog {
            id: caps[2].to_string(),
            name: caps[3].trim().to_string(),
            parents: caps[1].chars().map(String::from).collect(),
        })
        .collect();

    info!("Read {} COGs", cogs.len());
    Ok(cogs)
}
