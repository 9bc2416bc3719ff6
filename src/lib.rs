//! radarloop builds a short looping weather-radar animation from the newest sweeps in a radar
//! archive.
//!
//! # Pipeline overview
//!
//! 1. **Background**: legend image + configured transparency layers, stacked with masked paste
//! 2. **Select**: newest five sweeps of one product, oldest first
//! 3. **Frames**: each sweep pasted onto a private copy of the background
//! 4. **Persist**: `image_<n>.png`, the animated GIF (optionally with a house marker), and a
//!    capture-time note
//! 5. **Deliver** (optional): best-effort copy of every artifact to a file share
//!
//! A [`Scheduler`] repeats the cycle on a fixed interval with a shorter retry delay after
//! failures, and stops promptly on shutdown.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Cycle-scoped state**: nothing is cached between cycles.
//! - **Seams as traits**: [`Archive`], [`DeliverySink`] and [`Clock`] all have in-memory doubles.
#![forbid(unsafe_code)]

mod archive;
mod assets;
mod compose;
mod config;
mod delivery;
mod encode;
mod foundation;
mod geo;
mod marker;
mod pipeline;
mod schedule;
mod timestamp;

pub use archive::{Archive, DirArchive, InMemoryArchive};
pub use assets::decode::{decode_image, load_image};
pub use compose::frames::{Frame, MAX_FRAMES, build_frame, build_frames, select_frames};
pub use compose::layers::{build_background, layer_file_name};
pub use compose::paste::{Rgba8, blend_masked, paste_masked};
pub use config::settings::{
    ArchiveSettings, CONFIG_PATHS, DeliverySettings, GifSettings, LayerList, LoggingSettings,
    OutputSettings, RadarSettings, ResidentialSettings, SchedulerSettings, Settings,
};
pub use delivery::{Artifact, DeliveryReport, DeliverySink, DirSink, InMemorySink, deliver};
pub use encode::gif::Animation;
pub use encode::png::encode_png;
pub use foundation::core::{GeoPoint, PixelPoint};
pub use foundation::error::{RadarError, RadarResult};
pub use foundation::logging::{init_tracing, level_directive};
pub use geo::projector::{EARTH_RADIUS_KM, offset_km, project};
pub use geo::stations::{Station, StationMeta, StationTable};
pub use marker::icon::{DEFAULT_ICON_SIZE, Marker, place, render_icon};
pub use pipeline::cycle::{CycleReport, RadarPipeline, Stage};
pub use schedule::runner::{
    Clock, Cycle, NextStep, RecordingClock, RunSummary, Scheduler, Shutdown, ShutdownTrigger,
    TokioClock, next_step, shutdown_channel,
};
pub use timestamp::codec::{CaptureNote, CaptureTime, parse_capture_time, sort_key};
