//! Domain rules that don't depend on storage

pub mod cmonkey;
pub mod functional_system;
pub mod pssm;
pub mod species;

pub use cmonkey::cluster_image_url;
pub use functional_system::FunctionalSystem;
pub use pssm::{Pssm, PssmPosition};
pub use species::{KnownSpecies, KNOWN_SPECIES};

/// Split a user supplied id list on runs of whitespace, commas or semicolons.
///
/// Empty fragments (leading or trailing separators) are dropped.
pub fn split_id_list(text: &str) -> Vec<&str> {
    text.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse every entry of an id list, reporting the first one that is not a number.
pub fn parse_id_list(text: &str) -> Result<Vec<i32>, String> {
    split_id_list(text)
        .into_iter()
        .map(|s| s.parse::<i32>().map_err(|_| s.to_string()))
        .collect()
}
