//! On-disk dataset tree: one directory per gesture class holding
//! `sample_NNN.raw` / `sample_NNN.png` pairs.
//!
//! Numbering is `max existing + 1` and is computed fresh on every save.
//! Nothing is reserved, so two writers on the same tree can pick the same
//! number and the later one overwrites the earlier pair. The collector
//! assumes a single writer.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use crate::gesture::GestureClass;
use crate::preprocess::Sample;

/// Default dataset root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "datasets/finger_count";

/// Extension of the headerless grayscale dump.
pub const RAW_EXTENSION: &str = "raw";

/// Extension of the viewable preview image.
pub const PREVIEW_EXTENSION: &str = "png";

const SAMPLE_PREFIX: &str = "sample_";

/// Errors raised while reading or writing the dataset tree.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode preview '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("sample buffer holds {actual} bytes, expected {expected}")]
    BadSample { expected: usize, actual: usize },

    #[error("no sample numbers left in '{}'", .dir.display())]
    NumbersExhausted { dir: PathBuf },
}

impl DatasetError {
    fn io(path: &Path, source: io::Error) -> Self {
        DatasetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Paths written for one captured sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSample {
    pub class: GestureClass,
    pub number: u32,
    pub raw_path: PathBuf,
    pub preview_path: PathBuf,
}

/// Handle to an initialized dataset tree.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    /// Create the class directories under `root` if they are missing.
    ///
    /// Safe to run against an existing tree; existing files are left alone.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let store = Self { root: root.into() };
        for class in GestureClass::ALL {
            let dir = store.class_dir(class);
            fs::create_dir_all(&dir).map_err(|e| DatasetError::io(&dir, e))?;
        }
        log::debug!("Dataset tree ready at {}", store.root.display());
        Ok(store)
    }

    /// Directory holding the samples of `class`.
    pub fn class_dir(&self, class: GestureClass) -> PathBuf {
        self.root.join(class.label())
    }

    /// Number the next sample of `class` would receive.
    ///
    /// Read-only. Returns 1 for a class with no parseable raw files.
    pub fn next_sample_number(&self, class: GestureClass) -> Result<u32, DatasetError> {
        let mut max = 0;
        for name in self.raw_file_names(class)? {
            match parse_sample_number(&name) {
                Some(n) => max = max.max(n),
                None => log::debug!("Skipping unrecognized file name: {}", name),
            }
        }
        max.checked_add(1).ok_or_else(|| DatasetError::NumbersExhausted {
            dir: self.class_dir(class),
        })
    }

    /// Number of raw files stored for `class`, malformed names included.
    pub fn sample_count(&self, class: GestureClass) -> Result<usize, DatasetError> {
        Ok(self.raw_file_names(class)?.len())
    }

    /// Persist `sample` under `class` as a raw dump plus a PNG preview.
    ///
    /// Failures propagate as-is; a raw file written before a failed preview
    /// is not cleaned up.
    pub fn save_sample(
        &self,
        sample: &Sample,
        class: GestureClass,
    ) -> Result<SavedSample, DatasetError> {
        let expected = sample.width as usize * sample.height as usize;
        if sample.pixels.len() != expected {
            return Err(DatasetError::BadSample {
                expected,
                actual: sample.pixels.len(),
            });
        }

        let dir = self.class_dir(class);
        let number = self.next_sample_number(class)?;
        let raw_path = dir.join(sample_file_name(number, RAW_EXTENSION));
        let preview_path = dir.join(sample_file_name(number, PREVIEW_EXTENSION));

        fs::write(&raw_path, &sample.pixels).map_err(|e| DatasetError::io(&raw_path, e))?;

        image::save_buffer_with_format(
            &preview_path,
            &sample.pixels,
            sample.width,
            sample.height,
            image::ExtendedColorType::L8,
            ImageFormat::Png,
        )
        .map_err(|source| DatasetError::Encode {
            path: preview_path.clone(),
            source,
        })?;

        log::info!("Saved: {}", raw_path.display());

        Ok(SavedSample {
            class,
            number,
            raw_path,
            preview_path,
        })
    }

    /// Re-scan every class directory and tally its raw files.
    pub fn summary(&self) -> Result<Summary, DatasetError> {
        let mut counts = [0usize; GestureClass::COUNT];
        for class in GestureClass::ALL {
            counts[class as usize] = self.sample_count(class)?;
        }
        Ok(Summary { counts })
    }

    fn raw_file_names(&self, class: GestureClass) -> Result<Vec<String>, DatasetError> {
        let dir = self.class_dir(class);
        let entries = fs::read_dir(&dir).map_err(|e| DatasetError::io(&dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DatasetError::io(&dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RAW_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// File name for sample `number`, zero-padded to three digits.
pub fn sample_file_name(number: u32, extension: &str) -> String {
    format!("{SAMPLE_PREFIX}{number:03}.{extension}")
}

/// Extract `N` from `sample_<N>.raw`.
///
/// Anything else yields `None` so callers can skip it.
pub fn parse_sample_number(file_name: &str) -> Option<u32> {
    let digits = file_name
        .strip_prefix(SAMPLE_PREFIX)?
        .strip_suffix(RAW_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Per-class sample counts at the end of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    counts: [usize; GestureClass::COUNT],
}

impl Summary {
    pub fn count(&self, class: GestureClass) -> usize {
        self.counts[class as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "Collection Summary:")?;
        writeln!(f, "{rule}")?;
        for class in GestureClass::ALL {
            writeln!(f, "{:15}: {:3} samples", class.label(), self.count(class))?;
        }
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "{:15}: {:3} samples", "Total", self.total())?;
        write!(f, "{rule}")
    }
}
