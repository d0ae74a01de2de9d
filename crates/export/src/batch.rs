//! Bulk export of selected wallpapers.
//!
//! Items are rendered and saved one at a time, in selection order, with a
//! pause between items. A failed item is recorded and the batch moves on.
//! Cancellation is checked between items (and during the pause), never in
//! the middle of a render or a save.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use hausa_scribble_core::{AspectRatio, Raster, ScribbleError, Settings, Wallpaper};
use serde::Serialize;

use crate::preview::render_at;

/// Granularity of the cancellable pause between items.
const PAUSE_SLICE: Duration = Duration::from_millis(10);

/// Destination for rendered wallpapers.
pub trait ExportSink {
    /// Persists `raster` under `file_name`, returning where it went.
    fn save(&mut self, raster: &Raster, file_name: &str) -> Result<PathBuf, ScribbleError>;
}

/// Writes PNG files into a directory.
#[cfg(feature = "png")]
pub struct DirectorySink {
    dir: PathBuf,
}

#[cfg(feature = "png")]
impl DirectorySink {
    /// Creates the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ScribbleError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(feature = "png")]
impl ExportSink for DirectorySink {
    fn save(&mut self, raster: &Raster, file_name: &str) -> Result<PathBuf, ScribbleError> {
        let path = self.dir.join(file_name);
        crate::snapshot::write_png(raster, &path)?;
        Ok(path)
    }
}

/// Cooperative cancellation flag shared between a batch and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What to render and how to pace it.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub ratio: AspectRatio,
    pub density: f64,
    pub product: String,
    pub pause: Duration,
}

impl ExportOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self, ScribbleError> {
        settings.validate()?;
        Ok(Self {
            ratio: settings.aspect_ratio()?,
            density: settings.density,
            product: settings.product.clone(),
            pause: settings.pause(),
        })
    }
}

/// Result of exporting one wallpaper.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    pub id: u32,
    pub file_name: String,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

impl ItemOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ItemOutcome>,
    /// The batch stopped early because its token was cancelled.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Serial, paced exporter over an [`ExportSink`].
pub struct BulkExporter<K> {
    sink: K,
    options: ExportOptions,
}

impl<K: ExportSink> BulkExporter<K> {
    pub fn new(sink: K, options: ExportOptions) -> Self {
        Self { sink, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Renders `wallpaper` at full ratio resolution and hands it to the sink.
    pub fn export_one(&mut self, wallpaper: Wallpaper) -> ItemOutcome {
        let file_name = wallpaper.file_name(&self.options.product, &self.options.ratio);
        let started = Instant::now();
        let result = render_at(
            wallpaper,
            self.options.ratio.width,
            self.options.ratio.height,
            self.options.density,
        )
        .and_then(|raster| self.sink.save(&raster, &file_name));

        match result {
            Ok(path) => {
                log::info!(
                    "exported #{} -> {} in {:?}",
                    wallpaper.id,
                    path.display(),
                    started.elapsed()
                );
                ItemOutcome {
                    id: wallpaper.id,
                    file_name,
                    path: Some(path),
                    error: None,
                }
            }
            Err(e) => {
                log::warn!("export of #{} ({file_name}) failed: {e}", wallpaper.id);
                ItemOutcome {
                    id: wallpaper.id,
                    file_name,
                    path: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Exports `wallpapers` in order, calling `on_item` after each one.
    pub fn run(
        &mut self,
        wallpapers: &[Wallpaper],
        cancel: &CancelToken,
        mut on_item: impl FnMut(usize, &ItemOutcome),
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, &wallpaper) in wallpapers.iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }
            if index > 0 && !self.options.pause.is_zero() {
                pause(self.options.pause, cancel);
                if cancel.is_cancelled() {
                    break;
                }
            }
            let outcome = self.export_one(wallpaper);
            on_item(index, &outcome);
            report.outcomes.push(outcome);
        }

        report.cancelled = report.outcomes.len() < wallpapers.len();
        if report.cancelled {
            log::info!(
                "export cancelled after {} of {} items",
                report.outcomes.len(),
                wallpapers.len()
            );
        }
        report
    }
}

/// Sleeps for `duration`, waking early if `cancel` fires.
fn pause(duration: Duration, cancel: &CancelToken) {
    let deadline = Instant::now() + duration;
    loop {
        let now = Instant::now();
        if now >= deadline || cancel.is_cancelled() {
            return;
        }
        std::thread::sleep(PAUSE_SLICE.min(deadline - now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hausa_scribble_core::catalog::{catalog, select};

    const TINY: AspectRatio = AspectRatio {
        id: "4:3",
        name: "Tiny",
        width: 40,
        height: 30,
    };

    fn options(pause: Duration) -> ExportOptions {
        ExportOptions {
            ratio: TINY,
            density: 1.0,
            product: "hausa-scribble".into(),
            pause,
        }
    }

    /// Records every save; fails for the listed ids; optionally cancels after
    /// a number of saves.
    #[derive(Default)]
    struct MemorySink {
        saved: Vec<(String, Vec<u8>)>,
        fail_names: Vec<String>,
        in_flight: bool,
        overlapped: bool,
        cancel_after: Option<(usize, CancelToken)>,
    }

    impl ExportSink for MemorySink {
        fn save(&mut self, raster: &Raster, file_name: &str) -> Result<PathBuf, ScribbleError> {
            if self.in_flight {
                self.overlapped = true;
            }
            self.in_flight = true;
            self.saved.push((file_name.to_string(), raster.data().to_vec()));
            if let Some((n, token)) = &self.cancel_after {
                if self.saved.len() >= *n {
                    token.cancel();
                }
            }
            self.in_flight = false;
            if self.fail_names.iter().any(|f| f == file_name) {
                return Err(ScribbleError::Encode("disk quota".into()));
            }
            Ok(PathBuf::from(file_name))
        }
    }

    #[test]
    fn exports_in_selection_order_and_continues_after_failure() {
        let selected = select(&[9, 3, 5, 1, 7], 240).unwrap();
        let sink = MemorySink {
            fail_names: vec!["hausa-scribble-5-tiny.png".into()],
            ..MemorySink::default()
        };
        let mut exporter = BulkExporter::new(sink, options(Duration::ZERO));
        let mut seen = Vec::new();
        let report = exporter.run(&selected, &CancelToken::new(), |i, o| seen.push((i, o.id)));

        assert_eq!(report.outcomes.len(), 5);
        assert!(!report.cancelled);
        assert_eq!(report.succeeded(), 4);
        assert_eq!(report.failed(), 1);
        assert_eq!(seen, [(0, 9), (1, 3), (2, 5), (3, 1), (4, 7)]);

        let failed = &report.outcomes[2];
        assert_eq!(failed.id, 5);
        assert!(failed.error.as_deref().unwrap().contains("disk quota"));
        assert!(failed.path.is_none());

        let sink = exporter.into_sink();
        let names: Vec<&str> = sink.saved.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            [
                "hausa-scribble-9-tiny.png",
                "hausa-scribble-3-tiny.png",
                "hausa-scribble-5-tiny.png",
                "hausa-scribble-1-tiny.png",
                "hausa-scribble-7-tiny.png",
            ]
        );
        assert!(!sink.overlapped);
    }

    #[test]
    fn exported_pixels_match_a_direct_render() {
        let w = Wallpaper::from_id(4);
        let mut exporter = BulkExporter::new(MemorySink::default(), options(Duration::ZERO));
        exporter.export_one(w);
        let direct = render_at(w, TINY.width, TINY.height, 1.0).unwrap();
        assert_eq!(exporter.into_sink().saved[0].1, direct.data());
    }

    #[test]
    fn cancellation_stops_between_items() {
        let token = CancelToken::new();
        let sink = MemorySink {
            cancel_after: Some((2, token.clone())),
            ..MemorySink::default()
        };
        let mut exporter = BulkExporter::new(sink, options(Duration::ZERO));
        let report = exporter.run(&catalog(5), &token, |_, _| {});
        assert!(report.cancelled);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.outcomes.iter().all(ItemOutcome::is_ok));
    }

    #[test]
    fn cancelled_before_start_exports_nothing() {
        let token = CancelToken::new();
        token.cancel();
        let mut exporter = BulkExporter::new(MemorySink::default(), options(Duration::ZERO));
        let report = exporter.run(&catalog(3), &token, |_, _| {});
        assert!(report.cancelled);
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn items_are_paced() {
        let mut exporter =
            BulkExporter::new(MemorySink::default(), options(Duration::from_millis(30)));
        let started = Instant::now();
        let report = exporter.run(&catalog(3), &CancelToken::new(), |_, _| {});
        assert_eq!(report.succeeded(), 3);
        // Two pauses: none before the first item, none after the last.
        assert!(started.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn cancel_interrupts_a_long_pause() {
        let token = CancelToken::new();
        let sink = MemorySink {
            cancel_after: Some((1, token.clone())),
            ..MemorySink::default()
        };
        let mut exporter = BulkExporter::new(sink, options(Duration::from_secs(30)));
        let started = Instant::now();
        let report = exporter.run(&catalog(2), &token, |_, _| {});
        assert_eq!(report.outcomes.len(), 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn empty_selection_is_not_cancelled() {
        let mut exporter = BulkExporter::new(MemorySink::default(), options(Duration::ZERO));
        let report = exporter.run(&[], &CancelToken::new(), |_, _| {});
        assert!(!report.cancelled);
        assert_eq!(report.outcomes.len(), 0);
    }

    #[test]
    fn options_from_settings_resolve_ratio() {
        let settings = Settings {
            ratio: "tablet".into(),
            density: 0.5,
            ..Settings::default()
        };
        let opts = ExportOptions::from_settings(&settings).unwrap();
        assert_eq!((opts.ratio.width, opts.ratio.height), (2048, 1536));
        assert_eq!(opts.pause, Duration::from_millis(200));
    }

    #[cfg(feature = "png")]
    #[test]
    fn directory_sink_writes_named_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out")).unwrap();
        let mut exporter = BulkExporter::new(sink, options(Duration::ZERO));
        let report = exporter.run(&select(&[2, 1], 240).unwrap(), &CancelToken::new(), |_, _| {});
        assert_eq!(report.succeeded(), 2);
        let out = dir.path().join("out");
        assert!(out.join("hausa-scribble-2-tiny.png").is_file());
        assert!(out.join("hausa-scribble-1-tiny.png").is_file());
        let img = image::open(out.join("hausa-scribble-1-tiny.png")).unwrap();
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[test]
    fn report_serializes_outcomes() {
        let mut exporter = BulkExporter::new(MemorySink::default(), options(Duration::ZERO));
        let report = exporter.run(&catalog(1), &CancelToken::new(), |_, _| {});
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["outcomes"][0]["id"], 1);
        assert_eq!(v["cancelled"], false);
    }
}
