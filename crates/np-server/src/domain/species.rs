//! Built-in registry of the organisms the importers know about

use np_common::{NpError, Result};
use serde::Serialize;

/// A species the importers can load genes and annotations for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownSpecies {
    /// Short names accepted on the command line
    pub short_names: &'static [&'static str],
    /// Full name, as stored in `species.name`
    pub name: &'static str,
    /// `(title fragment, chromosome name)` pairs. Replicon-specific
    /// fragments come before the generic `chromosome` entry.
    pub chromosome_map: &'static [(&'static str, &'static str)],
    /// Gene names that differ between KEGG and the gene tables
    #[serde(skip)]
    gene_name_translations: &'static [(&'static str, &'static str)],
}

pub const KNOWN_SPECIES: [KnownSpecies; 3] = [
    KnownSpecies {
        short_names: &["hal", "halo"],
        name: "Halobacterium salinarum NRC-1",
        chromosome_map: &[
            ("pNRC100", "pNRC100"),
            ("pNRC200", "pNRC200"),
            ("chromosome", "chromosome"),
        ],
        gene_name_translations: &[],
    },
    KnownSpecies {
        short_names: &["dvu", "dvh"],
        name: "Desulfovibrio vulgaris Hildenborough",
        chromosome_map: &[("pDV", "pDV"), ("chromosome", "chromosome")],
        gene_name_translations: &[("DVU_tRNA-SeC_p_-1", "DVU_tRNA-SeC(p)-1")],
    },
    KnownSpecies {
        short_names: &["mmp"],
        name: "Methanococcus maripaludis S2",
        chromosome_map: &[("chromosome", "chromosome")],
        gene_name_translations: &[],
    },
];

impl KnownSpecies {
    /// Find a species by one of its short names
    pub fn lookup(short_name: &str) -> Result<&'static KnownSpecies> {
        KNOWN_SPECIES
            .iter()
            .find(|species| species.short_names.contains(&short_name))
            .ok_or_else(|| NpError::UnknownSpecies(short_name.to_string()))
    }

    /// Chromosome named by a table title, using the first map key it contains
    pub fn chromosome_for_title(&self, title: &str) -> Option<&'static str> {
        self.chromosome_map
            .iter()
            .find(|(fragment, _)| title.contains(fragment))
            .map(|(_, chromosome)| *chromosome)
    }

    /// Map a gene name from KEGG spelling to the name stored for this species.
    /// Names without a translation pass through unchanged.
    pub fn translate_gene_name<'a>(&self, name: &'a str) -> &'a str {
        self.gene_name_translations
            .iter()
            .find(|(from, _)| *from == name)
            .map(|(_, to)| *to)
            .unwrap_or(name)
    }
}
