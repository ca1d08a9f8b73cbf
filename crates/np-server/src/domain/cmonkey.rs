//! Naming of the cMonkey run artifacts published for each species

const DVU_RUN: &str =
    "http://baliga.systemsbiology.net/cmonkey/enigma/cmonkey_4.8.2_dvu_3491x739_11_Mar_02_17:37:51/svgs/";
const MMP_RUN: &str =
    "http://baliga.systemsbiology.net/cmonkey/enigma/mmp/cmonkey_4.8.8_mmp_1661x58_11_Oct_11_16:14:07/svgs/";
const HAL_RUN: &str = "http://baliga.systemsbiology.net/cmonkey/enigma/hal/cmonkey_4.5.4_hal_2072x268_10_Jul_13_11:04:39_EGRIN1_ORIGINAL_CLUSTERS/svgs/";

/// `cluster` followed by `k` padded with zeros to at least four characters
pub fn cluster_id(k: i32) -> String {
    let digits = k.to_string();
    let padding = match digits.len() {
        0..=1 => "000",
        2 => "00",
        _ => "0",
    };
    format!("cluster{}{}", padding, digits)
}

/// Plot of bicluster `k` in the run published for the species
pub fn cluster_image_url(species_short_name: &str, k: i32) -> String {
    let prefix = match species_short_name {
        "dvu" => DVU_RUN,
        "mmp" => MMP_RUN,
        _ => HAL_RUN,
    };
    format!("{}{}.svgz", prefix, cluster_id(k))
}
