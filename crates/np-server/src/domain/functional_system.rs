//! The four naming systems for gene function: KEGG, GO, COG and TIGRFAMs
//!
//! Functions of every system share the `functions` table. `type` names the
//! system and `namespace` the level inside it (category, pathway, role, ...).

use serde::Serialize;

/// Which functions are shown at the top of a system's browse page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevel {
    /// All functions of the system in one namespace
    Namespace(&'static str),
    /// A fixed set of root terms
    NativeIds(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionalSystem {
    /// Value of `functions.type`
    pub name: &'static str,
    pub display_name: &'static str,
    pub link_to_home: &'static str,
    pub description: &'static str,
    pub show_subcategories: bool,
    #[serde(skip)]
    link_phrase: &'static str,
    #[serde(skip)]
    top_level: TopLevel,
    #[serde(skip)]
    term_url: fn(&str) -> Option<String>,
}

pub const GO_ROOT_TERMS: [&str; 3] = ["GO:0003674", "GO:0005575", "GO:0008150"];

pub const KEGG: FunctionalSystem = FunctionalSystem {
    name: "kegg",
    display_name: "KEGG Pathways",
    link_to_home: "http://www.genome.jp/kegg/pathway.html",
    description: "KEGG Pathways is a collection of manually drawn pathway maps \
                  representing knowledge on molecular interaction and reaction networks.",
    show_subcategories: true,
    link_phrase: "KEGG Pathways",
    top_level: TopLevel::Namespace("kegg category"),
    term_url: kegg_term_url,
};

pub const GO: FunctionalSystem = FunctionalSystem {
    name: "go",
    display_name: "GO Gene Ontology",
    link_to_home: "http://www.geneontology.org/",
    description: "The Gene Ontology project is a a controlled vocabulary of terms with \
                  the aim of standardizing the representation of gene and gene product \
                  attributes across species and databases.",
    show_subcategories: false,
    link_phrase: "Gene Ontology",
    top_level: TopLevel::NativeIds(&GO_ROOT_TERMS),
    term_url: go_term_url,
};

pub const COG: FunctionalSystem = FunctionalSystem {
    name: "cog",
    display_name: "COG Clusters of Orthologous Groups",
    link_to_home: "http://www.ncbi.nlm.nih.gov/COG/",
    description: "Clusters of Orthologous Groups (COG) is a phylogenetic \
                  classification of proteins encoded in complete genomes.",
    show_subcategories: true,
    link_phrase: "Clusters of Orthologous Groups",
    top_level: TopLevel::Namespace("cog category"),
    term_url: cog_term_url,
};

pub const TIGR: FunctionalSystem = FunctionalSystem {
    name: "tigr",
    display_name: "TIGRFAMs",
    link_to_home: "http://www.jcvi.org/cgi-bin/tigrfams/index.cgi",
    description: "TIGRFAMs is a system for protein sequence classification designed to \
                  support automated annotation of (mostly prokaryotic) proteins.",
    show_subcategories: true,
    link_phrase: "TIGRFAMs",
    top_level: TopLevel::Namespace("tigr mainrole"),
    term_url: tigr_term_url,
};

pub const ALL: [FunctionalSystem; 4] = [KEGG, GO, COG, TIGR];

impl FunctionalSystem {
    pub fn by_name(name: &str) -> Option<&'static FunctionalSystem> {
        ALL.iter().find(|system| system.name == name)
    }

    pub fn top_level(&self) -> TopLevel {
        self.top_level
    }

    /// Description with the system's name phrase turned into a link to its home page
    pub fn linked_description(&self) -> String {
        self.description.replace(
            self.link_phrase,
            &format!("<a href=\"{}\">{}</a>", self.link_to_home, self.link_phrase),
        )
    }

    /// External page for a term of this system, if the native id has a usable form
    pub fn link_to_term(&self, native_id: &str) -> Option<String> {
        (self.term_url)(native_id)
    }
}

fn kegg_term_url(native_id: &str) -> Option<String> {
    let digits: String = native_id.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!(
        "http://www.genome.jp/kegg-bin/show_pathway?map{}",
        digits
    ))
}

fn go_term_url(native_id: &str) -> Option<String> {
    native_id.starts_with("GO:").then(|| {
        format!(
            "http://amigo.geneontology.org/cgi-bin/amigo/term_details?term={}",
            native_id
        )
    })
}

fn cog_term_url(native_id: &str) -> Option<String> {
    native_id
        .starts_with("COG")
        .then(|| format!("http://www.ncbi.nlm.nih.gov/COG/grace/wiew.cgi?{}", native_id))
}

fn tigr_term_url(native_id: &str) -> Option<String> {
    native_id.starts_with("TIGR").then(|| {
        format!(
            "http://www.jcvi.org/cgi-bin/tigrfams/HmmReportPage.cgi?acc={}",
            native_id
        )
    })
}
