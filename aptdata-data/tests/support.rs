use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub const AIRPORTS: &str = "\"id\",\"ident\",\"type\",\"name\",\"latitude_deg\",\"longitude_deg\",\
\"elevation_ft\",\"continent\",\"iso_country\",\"iso_region\",\"municipality\",\
\"scheduled_service\",\"gps_code\",\"iata_code\",\"local_code\",\"home_link\",\
\"wikipedia_link\",\"keywords\"\n\
3875,\"KSEA\",\"large_airport\",\"Seattle Tacoma International Airport\",47.449001,-122.308998,\
433,\"NA\",\"US\",\"US-WA\",\"Seattle\",\"yes\",\"KSEA\",\"SEA\",\"SEA\",,,\n\
7001,\"WA00\",\"heliport\",\"Harborview Heliport\",47.6,-122.32,300,\"NA\",\"US\",\"US-WA\",\
\"Seattle\",\"no\",\"WA00\",,\"WA00\",,,\n";

pub const RUNWAYS: &str = "\"id\",\"airport_ref\",\"airport_ident\",\"length_ft\",\"width_ft\",\
\"surface\",\"lighted\",\"closed\",\"le_ident\",\"le_latitude_deg\",\"le_longitude_deg\",\
\"le_elevation_ft\",\"le_heading_degT\",\"le_displaced_threshold_ft\",\"he_ident\",\
\"he_latitude_deg\",\"he_longitude_deg\",\"he_elevation_ft\",\"he_heading_degT\",\
\"he_displaced_threshold_ft\"\n\
1,3875,\"KSEA\",11901,150,\"CON\",1,0,\"16L\",47.4638,-122.308,363,180,,\"34R\",47.4312,-122.308,347,360,\n\
2,3875,\"KSEA\",9426,150,\"CON\",1,0,\"16C\",47.4638,-122.311,363,180,,\"34C\",47.4379,-122.311,347,360,\n";

pub const COUNTRIES: &str = "\"id\",\"code\",\"name\",\"continent\",\"wikipedia_link\",\"keywords\"\n\
302755,\"US\",\"United States\",\"NA\",\"https://en.wikipedia.org/wiki/United_States\",\"America\"\n";

pub const REGIONS: &str = "\"id\",\"code\",\"local_code\",\"name\",\"continent\",\"iso_country\",\
\"wikipedia_link\",\"keywords\"\n\
306084,\"US-WA\",\"WA\",\"Washington\",\"NA\",\"US\",\"https://en.wikipedia.org/wiki/Washington_(state)\",\n";

/// Airports export containing a single airport unknown to [`AIRPORTS`].
pub const REPLACEMENT_AIRPORTS: &str = "\"id\",\"ident\",\"type\",\"name\",\"latitude_deg\",\
\"longitude_deg\",\"elevation_ft\",\"continent\",\"iso_country\",\"iso_region\",\
\"municipality\",\"scheduled_service\",\"gps_code\",\"iata_code\",\"local_code\",\
\"home_link\",\"wikipedia_link\",\"keywords\"\n\
3422,\"KBFI\",\"medium_airport\",\"Boeing Field King County International Airport\",47.529999,\
-122.302002,21,\"NA\",\"US\",\"US-WA\",\"Seattle\",\"yes\",\"KBFI\",\"BFI\",\"BFI\",,,\n";

/// UTF-8 view of a temporary directory.
pub fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temporary directory {path:?} is not UTF-8"))
}

/// Write one source file into `dir`, creating the directory when needed.
pub fn write_source(dir: &Utf8Path, name: &str, contents: &str) {
    fs::create_dir_all(dir).unwrap_or_else(|err| {
        panic!("failed to create source directory {dir}: {err}");
    });
    let path = dir.join(name);
    fs::write(&path, contents).unwrap_or_else(|err| {
        panic!("failed to write source file {path}: {err}");
    });
}

/// Write the complete four-file source set into `dir`.
pub fn write_source_set(dir: &Utf8Path) {
    for (name, contents) in [
        ("airports.csv", AIRPORTS),
        ("runways.csv", RUNWAYS),
        ("countries.csv", COUNTRIES),
        ("regions.csv", REGIONS),
    ] {
        write_source(dir, name, contents);
    }
}
