use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::RgbaImage;

use crate::archive::Archive;
use crate::assets::decode::{decode_image, load_image};
use crate::compose::frames::{Frame, build_frames, select_frames};
use crate::compose::layers::{build_background, layer_file_name};
use crate::config::settings::Settings;
use crate::delivery::{Artifact, DeliveryReport, DeliverySink, deliver};
use crate::encode::gif::Animation;
use crate::encode::png::encode_png;
use crate::foundation::error::RadarResult;
use crate::geo::stations::StationTable;
use crate::marker::icon::Marker;
use crate::timestamp::codec::CaptureNote;

/// Pipeline stage, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    FetchingBackground,
    SelectingFrames,
    BuildingFrames,
    Persisting,
    Delivering,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FetchingBackground => "fetching-background",
            Self::SelectingFrames => "selecting-frames",
            Self::BuildingFrames => "building-frames",
            Self::Persisting => "persisting",
            Self::Delivering => "delivering",
        };
        f.write_str(name)
    }
}

/// What a successful cycle produced.
#[derive(Clone, Debug, Default)]
pub struct CycleReport {
    /// Selected sweep ids, oldest first.
    pub selected: Vec<String>,
    /// Frames actually composited (selected minus skipped).
    pub frames: usize,
    /// Files written to the output directory, in write order.
    pub persisted: Vec<PathBuf>,
    pub note: Option<CaptureNote>,
    /// `None` when no delivery sink is configured.
    pub delivery: Option<DeliveryReport>,
}

/// Everything a cycle needs, borrowed for its duration.
pub struct RadarPipeline<'a> {
    settings: &'a Settings,
    stations: &'a StationTable,
    archive: &'a dyn Archive,
    sink: Option<&'a mut dyn DeliverySink>,
}

impl<'a> RadarPipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        stations: &'a StationTable,
        archive: &'a dyn Archive,
        sink: Option<&'a mut dyn DeliverySink>,
    ) -> Self {
        Self {
            settings,
            stations,
            archive,
            sink,
        }
    }

    /// Run one full cycle. Errors are fatal to this cycle only.
    #[tracing::instrument(skip(self), fields(product = %self.settings.radar.product_id))]
    pub fn process_cycle(&mut self) -> RadarResult<CycleReport> {
        let mut stage = Stage::FetchingBackground;
        let result = self.run_stages(&mut stage);
        if let Err(err) = &result {
            tracing::error!(stage = %stage, error = %err, "radar processing failed");
        }
        result
    }

    fn run_stages(&mut self, stage: &mut Stage) -> RadarResult<CycleReport> {
        let settings = self.settings;
        let radar = &settings.radar;

        *stage = Stage::FetchingBackground;
        tracing::info!(stage = %stage, "starting stage");
        let legend = load_image(&settings.output.legend_file).map_err(|e| {
            tracing::error!("cannot proceed without legend image");
            e
        })?;
        tracing::info!(
            path = %settings.output.legend_file.display(),
            width = legend.width(),
            height = legend.height(),
            "loaded legend image"
        );
        let marker = settings.residential_location.target().map(|target| {
            tracing::info!(lat = target.lat, lon = target.lon, "residential location marker enabled");
            Marker::new(
                target,
                self.stations.lookup(&radar.product_id),
                settings.residential_location.icon_size,
            )
        });
        let background = build_background(legend, &settings.layers.0, |layer| {
            let name = layer_file_name(&radar.product_id, layer);
            let bytes = self.archive.fetch(&radar.transparencies_directory, &name)?;
            decode_image(&bytes)
        })?;

        *stage = Stage::SelectingFrames;
        tracing::info!(stage = %stage, "starting stage");
        let listing = self.archive.list(&radar.radar_directory)?;
        let selected = select_frames(&listing, &radar.product_id);

        *stage = Stage::BuildingFrames;
        tracing::info!(stage = %stage, count = selected.len(), "starting stage");
        let frames = build_frames(&background, &selected, |id| {
            let bytes = self.archive.fetch(&radar.radar_directory, id)?;
            decode_image(&bytes)
        })?;

        *stage = Stage::Persisting;
        tracing::info!(stage = %stage, frames = frames.len(), "starting stage");
        let out_dir = &settings.output.directory;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output directory '{}'", out_dir.display()))?;

        let mut artifacts = Vec::with_capacity(frames.len() + 1);
        for frame in &frames {
            artifacts.push(Artifact {
                name: frame.file_name(),
                bytes: encode_png(&frame.image)?,
            });
        }
        tracing::info!(count = artifacts.len(), "encoded png images");

        let animation = self.assemble_animation(&frames, marker.as_ref())?;
        artifacts.push(Artifact {
            name: settings.output.animated_gif.clone(),
            bytes: animation.encode_gif()?,
        });

        let note = selected
            .last()
            .map(|id| CaptureNote::from_identifier(id, &radar.timezone));
        let mut persisted = write_artifacts(out_dir, &artifacts)?;
        if let Some(note) = &note {
            let path = out_dir.join(&settings.output.timestamp_file);
            std::fs::write(&path, note.file_contents())
                .with_context(|| format!("write '{}'", path.display()))?;
            persisted.push(path);
        }
        tracing::info!(files = persisted.len(), dir = %out_dir.display(), "saved artifacts");

        *stage = Stage::Delivering;
        let delivery = match self.sink.as_deref_mut() {
            Some(sink) => {
                tracing::info!(stage = %stage, "starting stage");
                let text = note.as_ref().map(CaptureNote::file_contents);
                let note_file = text
                    .as_deref()
                    .map(|t| (settings.output.timestamp_file.as_str(), t));
                Some(deliver(
                    sink,
                    &settings.delivery.remote_path,
                    &artifacts,
                    note_file,
                ))
            }
            None => {
                tracing::info!("no delivery sink configured; skipping transfer");
                None
            }
        };

        Ok(CycleReport {
            selected,
            frames: frames.len(),
            persisted,
            note,
            delivery,
        })
    }

    /// GIF frames: plain frames, or marked copies when the marker is on.
    fn assemble_animation(&self, frames: &[Frame], marker: Option<&Marker>) -> RadarResult<Animation> {
        let images: Vec<RgbaImage> = match marker {
            Some(marker) => {
                tracing::info!("adding house markers to gif frames only");
                frames.iter().map(|f| marker.annotate(&f.image)).collect()
            }
            None => frames.iter().map(|f| f.image.clone()).collect(),
        };
        let gif = &self.settings.gif;
        Animation::assemble(images, gif.duration, gif.loop_count)
    }
}

fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> RadarResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        std::fs::write(&path, &artifact.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "saved");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/cycle.rs"]
mod tests;
