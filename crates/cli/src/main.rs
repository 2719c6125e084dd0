use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use cascade_detect_core::detection::domain::detector_set::DetectorSet;
use cascade_detect_core::detection::domain::object_detector::ObjectDetector;
use cascade_detect_core::detection::infrastructure::cascade_detector::CascadeDetector;
use cascade_detect_core::detection::infrastructure::model_resolver;
use cascade_detect_core::display::infrastructure::highgui_surface::HighguiSurface;
use cascade_detect_core::display::screen::Display;
use cascade_detect_core::pipeline::dispatcher::{DispatchOptions, Dispatcher, RunMode};
use cascade_detect_core::settings::boundary_config::BoundaryConfig;
use cascade_detect_core::shared::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_DISPLAY_SCALE, DEFAULT_MODEL_NAME,
};
use cascade_detect_core::shared::video_source::VideoSource;
use cascade_detect_core::video::domain::frame_source::FrameSource;
use cascade_detect_core::video::infrastructure::capture_reader::CaptureReader;
use cascade_detect_core::video::infrastructure::image_file_reader::ImageFileReader;

/// Object detection with cascade classifiers on a camera, video or image.
#[derive(Parser, Debug)]
#[command(name = "cascade-detect")]
struct Cli {
    /// Cascade model files, by path or by stock OpenCV name.
    #[arg(long, num_args = 1.., default_value = DEFAULT_MODEL_NAME)]
    models: Vec<String>,

    /// Camera index (digits only) or video file path.
    #[arg(long, default_value = "0")]
    source: String,

    /// Process a single still image instead of a stream.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Also show the preprocessed frame the detectors see.
    #[arg(long)]
    processed_frame_preview: bool,

    /// Directory searched first for model files.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// YAML file with per-category size boundaries.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Scale applied to the main window.
    #[arg(long, default_value_t = DEFAULT_DISPLAY_SCALE)]
    display_scale: f64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format_timestamp_secs()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = run(cli) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    validate(&cli)?;

    let boundaries = BoundaryConfig::load(&cli.config)?;

    let detectors = build_detectors(&cli.models, cli.models_dir.as_deref())?;
    let display = Display::new(Box::new(HighguiSurface::new()));
    let (mode, reader) = select_mode(&cli);
    let options = DispatchOptions {
        processed_frame_preview: cli.processed_frame_preview,
        display_scale: cli.display_scale,
    };

    let mut dispatcher = Dispatcher::new(detectors, display, reader, boundaries, options);
    let report = dispatcher.start(&mode)?;
    log::info!(
        "Processed {} frames, {} regions{}",
        report.frames_processed,
        report.regions_detected,
        if report.interrupted { " (interrupted)" } else { "" }
    );
    Ok(())
}

fn build_detectors(
    models: &[String],
    models_dir: Option<&Path>,
) -> Result<DetectorSet, Box<dyn std::error::Error>> {
    let search_dirs = model_resolver::default_search_dirs(models_dir);
    let mut loaded: Vec<(String, Box<dyn ObjectDetector>)> = Vec::with_capacity(models.len());
    for name in models {
        let downloading = Arc::new(AtomicBool::new(false));
        let path = model_resolver::resolve(
            name,
            &search_dirs,
            Some(download_progress(name.clone(), downloading.clone())),
        )?;
        if downloading.load(Ordering::Relaxed) {
            eprintln!();
        }
        log::info!("Loading model {name} from {}", path.display());
        let detector: Box<dyn ObjectDetector> = Box::new(CascadeDetector::load(&path)?);
        loaded.push((name.clone(), detector));
    }
    Ok(DetectorSet::with_random_colors(loaded))
}

fn select_mode(cli: &Cli) -> (RunMode, Box<dyn FrameSource>) {
    match &cli.image {
        Some(path) => (
            RunMode::Image(path.clone()),
            Box::new(ImageFileReader::new()),
        ),
        None => (
            RunMode::Stream(VideoSource::parse(&cli.source)),
            Box::new(CaptureReader::new()),
        ),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(cli.display_scale.is_finite() && cli.display_scale > 0.0) {
        return Err(format!(
            "Display scale must be a positive number, got {}",
            cli.display_scale
        )
        .into());
    }
    if cli.models.is_empty() {
        return Err("At least one model is required".into());
    }
    Ok(())
}

fn download_progress(name: String, downloading: Arc<AtomicBool>) -> model_resolver::ProgressFn {
    Box::new(move |downloaded, total| {
        downloading.store(true, Ordering::Relaxed);
        if total > 0 {
            let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
            eprint!("\rDownloading {name}... {pct}%");
        } else {
            eprint!("\rDownloading {name}... {downloaded} bytes");
        }
    })
}
