use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

/// Suffix appended to the full media file name (extension included)
pub const SIDECAR_SUFFIX: &str = ".json";

/// Parsed sidecar record. Unknown fields are ignored; every field we care
/// about is optional so absence stays a typed condition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarRecord {
    #[serde(default, rename = "photoTakenTime")]
    pub photo_taken_time: Option<PhotoTakenTime>,
    #[serde(default, rename = "geoDataExif")]
    pub geo_data_exif: Option<GeoDataExif>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoTakenTime {
    /// Epoch seconds. Takeout encodes this as a JSON string ("1609459200"),
    /// but older exports use a bare number; accept both.
    #[serde(default, deserialize_with = "epoch_seconds")]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoDataExif {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
}

impl SidecarRecord {
    pub fn timestamp(&self) -> Option<i64> {
        self.photo_taken_time.as_ref().and_then(|t| t.timestamp)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.geo_data_exif.as_ref().and_then(|g| g.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.geo_data_exif.as_ref().and_then(|g| g.longitude)
    }

    pub fn altitude(&self) -> Option<f64> {
        self.geo_data_exif.as_ref().and_then(|g| g.altitude)
    }
}

fn epoch_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid epoch timestamp {s:?}: {e}"))),
    }
}

/// Result of looking up a media file's sidecar
#[derive(Debug)]
pub enum SidecarLookup {
    Found(SidecarRecord),
    Missing {
        sidecar_path: PathBuf,
    },
    Malformed {
        sidecar_path: PathBuf,
        error: String,
    },
}

/// Derive the sidecar path for a media file: the full file name with the
/// suffix appended (IMG_0001.mov -> IMG_0001.mov.json)
pub fn sidecar_path(media_path: &Path) -> PathBuf {
    let mut name = media_path.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Locate, read, and parse the sidecar for a media file. Never fails the
/// batch: every error is classified into a lookup variant.
pub fn resolve(media_path: &Path) -> SidecarLookup {
    let sidecar_path = sidecar_path(media_path);

    let contents = match fs::read_to_string(&sidecar_path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return SidecarLookup::Missing { sidecar_path };
        }
        Err(e) => {
            return SidecarLookup::Malformed {
                sidecar_path,
                error: e.to_string(),
            };
        }
    };

    match serde_json::from_str::<SidecarRecord>(&contents) {
        Ok(record) => SidecarLookup::Found(record),
        Err(e) => SidecarLookup::Malformed {
            sidecar_path,
            error: e.to_string(),
        },
    }
}
