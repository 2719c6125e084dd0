use std::env;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::{HAAR_CASCADE_URL, LBP_CASCADE_URL};

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("model file not found: {0}")]
    NotFound(PathBuf),
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Environment variable OpenCV itself consults for sample data.
pub const SAMPLES_DATA_ENV: &str = "OPENCV_SAMPLES_DATA_PATH";

const SYSTEM_DATA_DIRS: &[&str] = &[
    "/usr/share/opencv4",
    "/usr/local/share/opencv4",
    "/usr/share/opencv",
    "/opt/homebrew/share/opencv4",
];

/// Directories searched for cascade files, in priority order.
///
/// `models_dir` (from the command line) comes first, then
/// `$OPENCV_SAMPLES_DATA_PATH`, then the usual OpenCV install locations.
pub fn default_search_dirs(models_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(dir) = models_dir {
        dirs.push(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(SAMPLES_DATA_ENV) {
        dirs.push(PathBuf::from(dir));
    }
    for base in SYSTEM_DATA_DIRS {
        let base = Path::new(base);
        dirs.push(base.join("haarcascades"));
        dirs.push(base.join("lbpcascades"));
    }
    dirs
}

/// Finds a model without touching the network.
///
/// A name that already points at a file wins; otherwise the first search
/// directory containing it.
pub fn find_local(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    search_dirs
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Upstream location of a stock OpenCV cascade.
pub fn cascade_url(name: &str) -> String {
    let base = if name.starts_with("lbpcascade") {
        LBP_CASCADE_URL
    } else {
        HAAR_CASCADE_URL
    };
    format!("{base}/{name}")
}

/// Resolve a cascade by name, checking local locations before downloading.
///
/// Resolution order:
/// 1. The name as a path, then each search directory
/// 2. User cache directory (platform-specific)
/// 3. Download from the OpenCV repository to the cache
pub fn resolve(
    name: &str,
    search_dirs: &[PathBuf],
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    resolve_in(name, search_dirs, &cache_dir, &cascade_url(name), progress)
}

/// [`resolve`] with an explicit cache directory and download URL.
pub fn resolve_in(
    name: &str,
    search_dirs: &[PathBuf],
    cache_dir: &Path,
    url: &str,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = find_local(name, search_dirs) {
        return Ok(path);
    }

    // Explicit paths are never fetched.
    if Path::new(name).components().count() > 1 {
        return Err(ModelResolveError::NotFound(PathBuf::from(name)));
    }

    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/cascade-detect/models/`
/// - Linux: `$XDG_CACHE_HOME/cascade-detect/models/` or `~/.cache/cascade-detect/models/`
/// - Windows: `%LOCALAPPDATA%/cascade-detect/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("cascade-detect").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("cascade-detect").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |source: std::io::Error| ModelResolveError::Write {
        path: temp_path.to_path_buf(),
        source,
    };

    let mut file = fs::File::create(temp_path).map_err(write_err)?;

    let mut reader = response;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREACHABLE_URL: &str = "http://invalid.nonexistent.example.com/model.xml";

    #[test]
    fn test_find_local_prefers_first_search_dir() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(first.join("m.xml"), b"first").unwrap();
        fs::write(second.join("m.xml"), b"second").unwrap();

        let found = find_local("m.xml", &[first.clone(), second]).unwrap();

        assert_eq!(found, first.join("m.xml"));
    }

    #[test]
    fn test_find_local_accepts_direct_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.xml");
        fs::write(&path, b"model").unwrap();

        let found = find_local(path.to_str().unwrap(), &[]).unwrap();

        assert_eq!(found, path);
    }

    #[test]
    fn test_find_local_missing_returns_none() {
        let tmp = TempDir::new().unwrap();
        assert!(find_local("absent.xml", &[tmp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn test_resolve_in_prefers_search_dir_over_cache() {
        let tmp = TempDir::new().unwrap();
        let models = tmp.path().join("models");
        let cache = tmp.path().join("cache");
        fs::create_dir_all(&models).unwrap();
        fs::create_dir_all(&cache).unwrap();
        fs::write(models.join("m.xml"), b"local").unwrap();
        fs::write(cache.join("m.xml"), b"cached").unwrap();

        let path = resolve_in("m.xml", &[models.clone()], &cache, UNREACHABLE_URL, None).unwrap();

        assert_eq!(path, models.join("m.xml"));
    }

    #[test]
    fn test_resolve_in_falls_back_to_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("m.xml"), b"cached").unwrap();

        let path = resolve_in("m.xml", &[], &cache, UNREACHABLE_URL, None).unwrap();

        assert_eq!(path, cache.join("m.xml"));
    }

    #[test]
    fn test_resolve_in_missing_explicit_path_is_not_downloaded() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nested").join("m.xml");

        let result = resolve_in(
            missing.to_str().unwrap(),
            &[],
            &tmp.path().join("cache"),
            UNREACHABLE_URL,
            None,
        );

        assert!(matches!(result, Err(ModelResolveError::NotFound(_))));
        assert!(!tmp.path().join("cache").exists());
    }

    #[test]
    fn test_resolve_in_failed_download_leaves_no_files() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");

        let result = resolve_in("m.xml", &[], &cache, UNREACHABLE_URL, None);

        assert!(matches!(result, Err(ModelResolveError::Download { .. })));
        assert!(!cache.join("m.xml").exists());
        assert!(!cache.join("m.part").exists());
    }

    #[test]
    fn test_cascade_url_picks_repository_dir() {
        assert_eq!(
            cascade_url("haarcascade_eye.xml"),
            format!("{HAAR_CASCADE_URL}/haarcascade_eye.xml")
        );
        assert_eq!(
            cascade_url("lbpcascade_frontalface.xml"),
            format!("{LBP_CASCADE_URL}/lbpcascade_frontalface.xml")
        );
    }

    #[test]
    fn test_default_search_dirs_starts_with_models_dir() {
        let dirs = default_search_dirs(Some(Path::new("/opt/models")));
        assert_eq!(dirs[0], PathBuf::from("/opt/models"));
        assert!(dirs
            .iter()
            .any(|d| d == Path::new("/usr/share/opencv4/haarcascades")));
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("cascade-detect"));
        assert!(path.to_string_lossy().contains("models"));
    }
}
