//! Test helpers for composing CSV datasets and catalogs on disk.

use std::fs;

use aptdata_data::{AptDb, LoadOptions};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use crate::load::LoadConfig;

const AIRPORTS: &str = "id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,\
continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,\
local_code,home_link,wikipedia_link,keywords\n\
3875,KSEA,large_airport,Seattle Tacoma International Airport,47.449001,-122.308998,433,\
NA,US,US-WA,Seattle,yes,KSEA,SEA,SEA,,,\n\
6502,CYVR,large_airport,Vancouver International Airport,49.193901,-123.183998,14,\
NA,CA,CA-BC,Vancouver,yes,CYVR,YVR,,,,\n";

const RUNWAYS: &str = "id,airport_ref,airport_ident,length_ft,width_ft,surface,lighted,\
closed,le_ident,le_latitude_deg,le_longitude_deg,le_elevation_ft,le_heading_degT,\
le_displaced_threshold_ft,he_ident,he_latitude_deg,he_longitude_deg,he_elevation_ft,\
he_heading_degT,he_displaced_threshold_ft\n\
1,3875,KSEA,11901,150,CON,1,0,16L,47.4638,-122.308,363,180,,34R,47.4312,-122.308,347,360,\n\
2,3875,KSEA,9426,150,CON,1,0,16C,47.4638,-122.311,363,180,,34C,47.4379,-122.311,347,360,\n";

const COUNTRIES: &str = "id,code,name,continent,wikipedia_link,keywords\n\
302755,US,United States,NA,,\n";

const REGIONS: &str = "id,code,local_code,name,continent,iso_country,wikipedia_link,keywords\n\
306084,US-WA,WA,Washington,NA,US,,\n";

/// Scratch workspace holding a CSV data directory and a catalog path.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn data_dir(&self) -> Utf8PathBuf {
        self.root.join("data")
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("catalog/aptdata.db")
    }

    /// Write the sample exports into [`Workspace::data_dir`].
    pub(super) fn with_sources(self) -> Self {
        let data_dir = self.data_dir();
        fs::create_dir_all(&data_dir).expect("create data dir");
        for (name, contents) in [
            ("airports.csv", AIRPORTS),
            ("runways.csv", RUNWAYS),
            ("countries.csv", COUNTRIES),
            ("regions.csv", REGIONS),
        ] {
            fs::write(data_dir.join(name), contents).expect("write source file");
        }
        self
    }

    /// Write the sample exports and load them into [`Workspace::database`].
    pub(super) fn populated() -> Self {
        let workspace = Self::new().with_sources();
        let mut db = AptDb::open(&workspace.database()).expect("open catalog");
        db.load(&workspace.data_dir()).expect("load catalog");
        db.close().expect("close catalog");
        workspace
    }

    pub(super) fn load_config(&self) -> LoadConfig {
        LoadConfig {
            database: self.database(),
            data_dir: self.data_dir(),
            options: LoadOptions::default(),
            reload: false,
        }
    }
}

/// Parse command output as JSON.
pub(super) fn parse_output(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("command output should be JSON")
}
