use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load boundary config from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
}

/// Object categories the boundary file knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Face,
    Body,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Face, Category::Body];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: Dimensions,
    pub max: Dimensions,
}

/// Minimum/maximum detection sizes per category.
///
/// Loaded once before the dispatcher is built and read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryConfig {
    pub face: SizeBounds,
    pub body: SizeBounds,
}

/// On-disk layout: extremes first, then categories.
#[derive(Deserialize)]
struct RawBoundaries {
    min: RawCategories,
    max: RawCategories,
}

#[derive(Deserialize)]
struct RawCategories {
    face: Dimensions,
    body: Dimensions,
}

impl BoundaryConfig {
    /// Reads the YAML boundary file at `path`.
    ///
    /// A missing file means no boundaries are configured and yields
    /// `Ok(None)`; a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            log::debug!("No boundary config at {}", path.display());
            return Ok(None);
        }

        let load_err = |source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };
        let raw: RawBoundaries = Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(load_err)?;

        Ok(Some(Self {
            face: SizeBounds {
                min: raw.min.face,
                max: raw.max.face,
            },
            body: SizeBounds {
                min: raw.min.body,
                max: raw.max.body,
            },
        }))
    }

    pub fn bounds(&self, category: Category) -> SizeBounds {
        match category {
            Category::Face => self.face,
            Category::Body => self.body,
        }
    }
}
