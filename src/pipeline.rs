//! Frame-to-sample pipeline.
//!
//! Loading frames, computing input features and persisting samples are left
//! to the caller through [`FrameSource`], [`FeatureGenerator`] and
//! [`SampleSink`]. Each frame owns its target grid; nothing is shared between
//! frames.

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::augment::{Augmentation, add_noise_points};
use crate::config::DatasetConfig;
use crate::features::{InputChannels, InputTensor, validate_input_shape};
use crate::geometry::OrientedBox3;
use crate::grid::LabelGrid;
use crate::raster::{RasterStats, TargetRasterizer};
use crate::types::{GridInfo, LabelGridError, Point4};

/// One annotated lidar sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Identifier of the frame in its dataset, used for logging only.
    pub token: String,
    pub points: Vec<Point4>,
    pub boxes: Vec<OrientedBox3>,
}

/// Yields frames in scene order. `None` ends the run.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Result<Frame, LabelGridError>>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = Result<Frame, LabelGridError>>,
{
    fn next_frame(&mut self) -> Option<Result<Frame, LabelGridError>> {
        self.next()
    }
}

/// Computes the dense input tensor of a cloud.
pub trait FeatureGenerator {
    fn generate(
        &mut self,
        points: &[Point4],
        info: &GridInfo,
        channels: InputChannels,
    ) -> Result<InputTensor, LabelGridError>;
}

/// A finished training pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: usize,
    pub token: String,
    pub augmentation_idx: usize,
    pub input: InputTensor,
    pub target: LabelGrid,
}

impl Sample {
    /// Zero-padded id shared by the input and target files of this sample.
    pub fn file_stem(&self) -> String {
        format!("{:05}", self.id)
    }
}

/// Receives finished samples, usually to persist them.
pub trait SampleSink {
    fn write(&mut self, sample: Sample) -> Result<(), LabelGridError>;
}

impl SampleSink for Vec<Sample> {
    fn write(&mut self, sample: Sample) -> Result<(), LabelGridError> {
        self.push(sample);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub frames: usize,
    pub frames_skipped: usize,
    pub samples: usize,
    pub raster: RasterStats,
}

impl DatasetSummary {
    fn add_raster(&mut self, stats: RasterStats) {
        self.raster.boxes += stats.boxes;
        self.raster.unclassified += stats.unclassified;
        self.raster.sparse += stats.sparse;
        self.raster.written += stats.written;
        self.raster.cells_written += stats.cells_written;
    }
}

#[derive(Debug)]
pub struct DatasetBuilder {
    config: DatasetConfig,
    info: GridInfo,
    channels: InputChannels,
    rasterizer: TargetRasterizer,
    rng: StdRng,
}

impl DatasetBuilder {
    /// Validate `config` up front; a non-square grid aborts here before any frame is read.
    pub fn new(config: DatasetConfig) -> Result<Self, LabelGridError> {
        config.validate()?;
        let raster = config.raster_config()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            info: raster.info,
            channels: config.input_channels(),
            rasterizer: TargetRasterizer::new(raster),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Process frames until the source is exhausted or `end_id` samples exist.
    ///
    /// Frames that fail to load are logged and skipped. Feature and sink
    /// errors abort the run.
    pub fn run<S, F, K>(
        &mut self,
        source: &mut S,
        features: &mut F,
        sink: &mut K,
    ) -> Result<DatasetSummary, LabelGridError>
    where
        S: FrameSource + ?Sized,
        F: FeatureGenerator + ?Sized,
        K: SampleSink + ?Sized,
    {
        let mut summary = DatasetSummary::default();

        while let Some(frame) = source.next_frame() {
            if self.reached_end(summary.samples) {
                break;
            }
            let frame = match frame {
                Ok(frame) => frame,
                Err(err) => {
                    warn!("skipping frame {}: {err}", summary.frames + summary.frames_skipped);
                    summary.frames_skipped += 1;
                    continue;
                }
            };

            info!(
                "sample:{} {} created_data={}",
                summary.frames, frame.token, summary.samples
            );

            for augmentation_idx in 0..=self.config.augmentation_num {
                if self.reached_end(summary.samples) {
                    break;
                }
                let (sample, stats) =
                    self.build_sample(&frame, augmentation_idx, summary.samples, features)?;
                summary.add_raster(stats);
                sink.write(sample)?;
                summary.samples += 1;
            }
            summary.frames += 1;
        }

        info!(
            "finished: {} frames, {} skipped, {} samples",
            summary.frames, summary.frames_skipped, summary.samples
        );
        Ok(summary)
    }

    fn reached_end(&self, samples: usize) -> bool {
        self.config.end_id.is_some_and(|end| samples >= end)
    }

    fn build_sample<F>(
        &mut self,
        frame: &Frame,
        augmentation_idx: usize,
        id: usize,
        features: &mut F,
    ) -> Result<(Sample, RasterStats), LabelGridError>
    where
        F: FeatureGenerator + ?Sized,
    {
        let mut points = frame.points.clone();
        if self.config.add_noise {
            add_noise_points(&mut points, &self.config.noise, &mut self.rng);
        }

        let augmentation = if augmentation_idx > 0 {
            Augmentation::sample(&mut self.rng, self.config.z_translation_range)
        } else {
            Augmentation::identity()
        };
        augmentation.apply_to_points(&mut points);

        let mut boxes = frame.boxes.clone();
        for object in &mut boxes {
            augmentation.apply_to_box(object);
        }

        let (target, stats) = self.rasterizer.rasterize_frame_with_stats(&points, &boxes);

        let input = features.generate(&points, &self.info, self.channels)?;
        validate_input_shape(input.shape, self.info.size, self.channels)?;

        let sample = Sample {
            id,
            token: frame.token.clone(),
            augmentation_idx,
            input,
            target,
        };
        Ok((sample, stats))
    }
}
