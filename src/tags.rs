use chrono::DateTime;

use crate::sidecar::SidecarRecord;

/// Time tags all receive the same formatted capture date, in this order
const TIME_TAGS: &[&str] = &[
    "Time:ModifyDate",
    "Time:DateTimeOriginal",
    "Time:CreateDate",
    "Time:GPSTimeStamp",
    "Time:GPSDateStamp",
    "Time:SubSecCreateDate",
    "Time:SubSecDateTimeOriginal",
    "Time:GPSDateTime",
];

const LATITUDE_TAG: &str = "Location:GPSLatitude";
const LONGITUDE_TAG: &str = "Location:GPSLongitude";
const ALTITUDE_TAG: &str = "Location:GPSAltitude";

pub const TIMESTAMP_FIELD: &str = "photoTakenTime.timestamp";
pub const LATITUDE_FIELD: &str = "geoDataExif.latitude";
pub const LONGITUDE_FIELD: &str = "geoDataExif.longitude";
pub const ALTITUDE_FIELD: &str = "geoDataExif.altitude";

/// Ordered tag-name -> formatted-value mapping. Insertion order is the fixed
/// declaration order (time tags, then location tags) so identical records
/// always produce identical commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMapping {
    entries: Vec<(&'static str, String)>,
}

impl TagMapping {
    pub fn entries(&self) -> &[(&'static str, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Map a sidecar record into the tag mapping plus the list of source fields
/// that were absent. A field counts as present when it is defined in the
/// record, so zero timestamps and zero altitudes are still written.
pub fn map_record(record: &SidecarRecord) -> (TagMapping, Vec<&'static str>) {
    let mut entries = Vec::new();
    let mut missing = Vec::new();

    match record.timestamp().and_then(format_timestamp) {
        Some(date) => {
            for tag in TIME_TAGS {
                entries.push((*tag, date.clone()));
            }
        }
        None => missing.push(TIMESTAMP_FIELD),
    }

    let coordinates = [
        (record.latitude(), LATITUDE_TAG, LATITUDE_FIELD),
        (record.longitude(), LONGITUDE_TAG, LONGITUDE_FIELD),
        (record.altitude(), ALTITUDE_TAG, ALTITUDE_FIELD),
    ];
    for (value, tag, field) in coordinates {
        match value {
            Some(v) => entries.push((tag, format_coordinate(v))),
            None => missing.push(field),
        }
    }

    (TagMapping { entries }, missing)
}

/// Format epoch seconds as exiftool's "yyyy:MM:dd HH:mm:ss", always UTC.
/// Returns None only for timestamps outside chrono's representable range.
pub fn format_timestamp(epoch_seconds: i64) -> Option<String> {
    let date = DateTime::from_timestamp(epoch_seconds, 0)?;
    Some(date.format("%Y:%m:%d %H:%M:%S").to_string())
}

/// Format a coordinate (degrees or meters) to exactly 3 decimal places
pub fn format_coordinate(value: f64) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidecar::{GeoDataExif, PhotoTakenTime};

    fn record(
        timestamp: Option<i64>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        altitude: Option<f64>,
    ) -> SidecarRecord {
        SidecarRecord {
            photo_taken_time: Some(PhotoTakenTime { timestamp }),
            geo_data_exif: Some(GeoDataExif {
                latitude,
                longitude,
                altitude,
            }),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1609459200).as_deref(),
            Some("2021:01:01 00:00:00")
        );
        assert_eq!(
            format_timestamp(1734472696).as_deref(),
            Some("2024:12:17 21:58:16")
        );
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(37.4219999), "37.422");
        assert_eq!(format_coordinate(-122.084), "-122.084");
        assert_eq!(format_coordinate(0.0), "0.000");
    }

    #[test]
    fn test_full_record_tag_order() {
        let (mapping, missing) = map_record(&record(
            Some(1609459200),
            Some(37.4219999),
            Some(-122.084),
            Some(5.2),
        ));

        assert!(missing.is_empty());
        let names: Vec<&str> = mapping.entries().iter().map(|(tag, _)| *tag).collect();
        assert_eq!(
            names,
            vec![
                "Time:ModifyDate",
                "Time:DateTimeOriginal",
                "Time:CreateDate",
                "Time:GPSTimeStamp",
                "Time:GPSDateStamp",
                "Time:SubSecCreateDate",
                "Time:SubSecDateTimeOriginal",
                "Time:GPSDateTime",
                "Location:GPSLatitude",
                "Location:GPSLongitude",
                "Location:GPSAltitude",
            ]
        );
        assert_eq!(mapping.entries()[0].1, "2021:01:01 00:00:00");
        assert_eq!(mapping.entries()[8].1, "37.422");
        assert_eq!(mapping.entries()[9].1, "-122.084");
        assert_eq!(mapping.entries()[10].1, "5.200");
    }

    #[test]
    fn test_missing_timestamp_omits_all_time_tags() {
        let (mapping, missing) = map_record(&record(None, Some(1.0), Some(2.0), Some(3.0)));

        assert_eq!(missing, vec![TIMESTAMP_FIELD]);
        assert_eq!(mapping.len(), 3);
        assert!(mapping
            .entries()
            .iter()
            .all(|(tag, _)| tag.starts_with("Location:")));
    }

    #[test]
    fn test_missing_coordinates_reported_distinctly() {
        let (mapping, missing) = map_record(&record(Some(1609459200), None, None, None));

        assert_eq!(missing, vec![LATITUDE_FIELD, LONGITUDE_FIELD, ALTITUDE_FIELD]);
        assert_eq!(mapping.len(), TIME_TAGS.len());
    }

    #[test]
    fn test_zero_values_are_present() {
        let (mapping, missing) = map_record(&record(Some(0), Some(0.0), Some(0.0), Some(0.0)));

        assert!(missing.is_empty());
        assert_eq!(mapping.entries()[0].1, "1970:01:01 00:00:00");
        assert_eq!(mapping.entries()[10], ("Location:GPSAltitude", "0.000".to_string()));
    }

    #[test]
    fn test_empty_record_reports_everything() {
        let (mapping, missing) = map_record(&SidecarRecord::default());

        assert!(mapping.is_empty());
        assert_eq!(
            missing,
            vec![TIMESTAMP_FIELD, LATITUDE_FIELD, LONGITUDE_FIELD, ALTITUDE_FIELD]
        );
    }
}
