// TIGRFAMs table, role names and role link parsers

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::info;

use super::TIGR_TYPE;
use crate::ingest::{numbered_lines, IngestError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tigrfam {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubRole {
    pub role_id: i32,
    pub name: String,
}

/// A main role; one name may appear under several role ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MainRole {
    pub name: String,
    pub children: Vec<SubRole>,
}

/// Role tree in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TigrRoles {
    pub mainroles: Vec<MainRole>,
}

impl TigrRoles {
    pub fn sub1role_count(&self) -> usize {
        self.mainroles.iter().map(|m| m.children.len()).sum()
    }

    /// Every linked role id must name a sub role of this tree
    pub fn check_links(&self, links: &[(String, i32)]) -> Result<()> {
        let known: HashSet<i32> = self
            .mainroles
            .iter()
            .flat_map(|m| m.children.iter().map(|s| s.role_id))
            .collect();
        match links.iter().find(|(_, role)| !known.contains(role)) {
            Some((_, role)) => Err(IngestError::unknown_function(TIGR_TYPE, format!("role {}", role))),
            None => Ok(()),
        }
    }
}

fn tab_fields<'a>(line_no: usize, line: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < expected {
        return Err(IngestError::parse(
            line_no,
            line,
            format!("Expected {} tab-separated fields, found {}", expected, fields.len()),
        ));
    }
    Ok(fields)
}

fn role_id(line_no: usize, line: &str, field: &str) -> Result<i32> {
    field
        .trim()
        .parse()
        .map_err(|_| IngestError::parse(line_no, line, "Role id is not an integer"))
}

/// `id  name  description` rows after a header line
pub fn parse_tigrfams(content: &str) -> Result<Vec<Tigrfam>> {
    let mut tigrfams = Vec::new();

    for (line_no, line) in numbered_lines(content).skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = tab_fields(line_no, line, 3)?;
        tigrfams.push(Tigrfam {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            description: fields[2].to_string(),
        });
    }

    info!("Read {} TIGRFAMs", tigrfams.len());
    Ok(tigrfams)
}

/// `_  role_id  mainrole:|sub1role:  name` rows.
///
/// A main role row and a sub role row share a role id; the sub role is filed
/// under that main role. Main roles with the same name are merged. A repeated
/// sub role id keeps the last row.
pub fn parse_tigr_roles(content: &str) -> Result<TigrRoles> {
    let mut mainroles: Vec<MainRole> = Vec::new();
    let mut mainrole_by_name: HashMap<String, usize> = HashMap::new();
    let mut mainrole_by_id: HashMap<i32, usize> = HashMap::new();
    let mut sub1roles: Vec<SubRole> = Vec::new();
    let mut sub1role_by_id: HashMap<i32, usize> = HashMap::new();

    for (line_no, line) in numbered_lines(content) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = tab_fields(line_no, line, 4)?;
        let id = role_id(line_no, line, fields[1])?;
        let name = fields[3].to_string();

        match fields[2].trim_end_matches(':') {
            "mainrole" => {
                let index = *mainrole_by_name.entry(name.clone()).or_insert_with(|| {
                    mainroles.push(MainRole {
                        name,
                        children: Vec::new(),
                    });
                    mainroles.len() - 1
                });
                mainrole_by_id.insert(id, index);
            },
            "sub1role" => {
                let sub1role = SubRole { role_id: id, name };
                match sub1role_by_id.get(&id) {
                    Some(&index) => sub1roles[index] = sub1role,
                    None => {
                        sub1role_by_id.insert(id, sub1roles.len());
                        sub1roles.push(sub1role);
                    },
                }
            },
            other => {
                return Err(IngestError::parse(
                    line_no,
                    line,
                    format!("Unknown role type {:?}", other),
                ))
            },
        }
    }

    for sub1role in sub1roles {
        let index = *mainrole_by_id.get(&sub1role.role_id).ok_or_else(|| {
            IngestError::Validation(format!(
                "Sub role {} ({}) has no main role",
                sub1role.role_id, sub1role.name
            ))
        })?;
        mainroles[index].children.push(sub1role);
    }

    let roles = TigrRoles { mainroles };
    info!(
        mainroles = roles.mainroles.len(),
        sub1roles = roles.sub1role_count(),
        "Read TIGR roles"
    );
    Ok(roles)
}

/// `TIGRFAM id  role id` rows
pub fn parse_role_links(content: &str) -> Result<Vec<(String, i32)>> {
    let mut links = Vec::new();

    for (line_no, line) in numbered_lines(content) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = tab_fields(line_no, line, 2)?;
        links.push((fields[0].to_string(), role_id(line_no, line, fields[1])?));
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: &str = "_\t70\tmainrole:\tAmino acid biosynthesis
_\t70\tsub1role:\tAromatic amino acid family
_\t71\tmainrole:\tAmino acid biosynthesis
_\t71\tsub1role:\tAspartate family
_\t80\tmainrole:\tCell envelope
_\t80\tsub1role:\tOther
";

    #[test]
    fn test_parse_tigrfams_skips_header() {
        let content = "id\tname\tdescription\nTIGR00001\trpmI_bact\tribosomal protein L35\n\n";
        let tigrfams = parse_tigrfams(content).unwrap();
        assert_eq!(
            tigrfams,
            vec![Tigrfam {
                id: "TIGR00001".to_string(),
                name: "rpmI_bact".to_string(),
                description: "ribosomal protein L35".to_string(),
            }]
        );
    }

    #[test]
    fn test_mainroles_are_merged_by_name() {
        let roles = parse_tigr_roles(ROLES).unwrap();
        assert_eq!(roles.mainroles.len(), 2);
        assert_eq!(roles.sub1role_count(), 3);

        let amino = &roles.mainroles[0];
        assert_eq!(amino.name, "Amino acid biosynthesis");
        let ids: Vec<i32> = amino.children.iter().map(|r| r.role_id).collect();
        assert_eq!(ids, vec![70, 71]);
        assert_eq!(roles.mainroles[1].children[0].name, "Other");
    }

    #[test]
    fn test_repeated_sub_role_keeps_last_row() {
        let content = "_\t70\tmainrole:\tAmino acid biosynthesis
_\t70\tsub1role:\tAromatic family
_\t70\tsub1role:\tAromatic amino acid family
";
        let roles = parse_tigr_roles(content).unwrap();
        assert_eq!(roles.sub1role_count(), 1);
        assert_eq!(roles.mainroles[0].children[0].name, "Aromatic amino acid family");
    }

    #[test]
    fn test_check_links() {
        let roles = parse_tigr_roles(ROLES).unwrap();
        assert!(roles.check_links(&[("TIGR00001".to_string(), 71)]).is_ok());

        let err = roles
            .check_links(&[("TIGR00001".to_string(), 71), ("TIGR00002".to_string(), 158)])
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnknownFunction { system: "tigr", ref native_id } if native_id == "role 158"
        ));
    }

    #[test]
    fn test_unknown_role_type() {
        let err = parse_tigr_roles("_\t70\tsub2role:\tX\n").unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_sub_role_without_main_role() {
        let err = parse_tigr_roles("_\t99\tsub1role:\tOrphan\n").unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
    }

    #[test]
    fn test_parse_role_links() {
        let links = parse_role_links("TIGR00001\t158\nTIGR00002\t 70\n").unwrap();
        assert_eq!(
            links,
            vec![("TIGR00001".to_string(), 158), ("TIGR00002".to_string(), 70)]
        );

        let err = parse_role_links("TIGR00001\tabc\n").unwrap_err();
        assert!(matches!(err, IngestError::Parse { line: 1, .. }));
    }
}
