use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info, warn};
use walkdir::WalkDir;

use crate::exiftool::Invocation;
use crate::sidecar::{self, SidecarLookup};
use crate::tags;

/// Extensions recognized as movie files, matched case-insensitively
const MOVIE_EXTENSIONS: &[&str] = &["mov", "mp4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NoSidecar,
    MalformedSidecar,
    InvocationFailed,
}

/// Classified result of one candidate file
#[derive(Debug)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: Outcome,
    pub missing_fields: Vec<&'static str>,
    pub detail: Option<String>,
}

/// Ordered per-file reports for a whole run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
}

impl RunSummary {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.reports.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn print(&self) {
        println!();
        println!("=== PROCESSING COMPLETE ===");
        println!("Candidate files: {}", self.reports.len());
        println!("Tags applied: {}", self.count(Outcome::Applied));
        println!("Skipped (no sidecar): {}", self.count(Outcome::NoSidecar));
        println!(
            "Skipped (malformed sidecar): {}",
            self.count(Outcome::MalformedSidecar)
        );
        println!("Failed (exiftool): {}", self.count(Outcome::InvocationFailed));
    }
}

pub struct Processor {
    media_dir: PathBuf,
    exiftool: String,
}

impl Processor {
    pub fn new(media_dir: PathBuf, exiftool: String) -> Self {
        Processor { media_dir, exiftool }
    }

    /// Process every candidate movie file in the directory, strictly
    /// sequentially. An unreadable directory is fatal; everything after that
    /// is classified per file and the batch always runs to the end.
    pub fn process_directory(&self) -> Result<RunSummary> {
        let candidates = self.collect_candidates()?;
        info!(
            "found {} candidate files in {}",
            candidates.len(),
            self.media_dir.display()
        );

        let mut summary = RunSummary::default();
        for file_name in candidates {
            summary.reports.push(self.process_file(&file_name));
        }

        Ok(summary)
    }

    /// Non-recursive listing, sorted by name so runs are reproducible on
    /// platforms with unordered directory iteration
    fn collect_candidates(&self) -> Result<Vec<String>> {
        let mut candidates = Vec::new();

        for entry_result in WalkDir::new(&self.media_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry_result
                .with_context(|| format!("could not read directory {}", self.media_dir.display()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                warn!("skipping non-UTF-8 file name {:?}", entry.file_name());
                continue;
            };

            if is_movie_file(file_name) {
                candidates.push(file_name.to_string());
            }
        }

        Ok(candidates)
    }

    fn process_file(&self, file_name: &str) -> FileReport {
        info!("processing {}", file_name);
        let media_path = self.media_dir.join(file_name);

        let record = match sidecar::resolve(&media_path) {
            SidecarLookup::Found(record) => record,
            SidecarLookup::Missing { sidecar_path } => {
                error!("{}: {} does not exist, skipping", file_name, sidecar_path.display());
                return FileReport {
                    file_name: file_name.to_string(),
                    outcome: Outcome::NoSidecar,
                    missing_fields: Vec::new(),
                    detail: Some(format!("{} does not exist", sidecar_path.display())),
                };
            }
            SidecarLookup::Malformed { sidecar_path, error } => {
                error!(
                    "{}: {} is malformed, skipping: {}",
                    file_name,
                    sidecar_path.display(),
                    error
                );
                return FileReport {
                    file_name: file_name.to_string(),
                    outcome: Outcome::MalformedSidecar,
                    missing_fields: Vec::new(),
                    detail: Some(error),
                };
            }
        };

        let (mapping, missing_fields) = tags::map_record(&record);
        for field in &missing_fields {
            warn!(
                "{}: {} not present in sidecar, related tags will not be written",
                file_name, field
            );
        }

        let invocation = Invocation::build(&self.exiftool, &mapping, &media_path);
        info!("running {}", invocation);

        match invocation.run() {
            Ok(()) => FileReport {
                file_name: file_name.to_string(),
                outcome: Outcome::Applied,
                missing_fields,
                detail: None,
            },
            Err(e) => {
                error!("{}: exiftool failed: {}", file_name, e);
                FileReport {
                    file_name: file_name.to_string(),
                    outcome: Outcome::InvocationFailed,
                    missing_fields,
                    detail: Some(e.to_string()),
                }
            }
        }
    }
}

fn is_movie_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map_or(false, |ext| {
            MOVIE_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m))
        })
}
