//! Frame augmentation: random vertical shift, rotation about the vertical axis
//! and synthetic noise returns.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};
use log::warn;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;

use crate::geometry::OrientedBox3;
use crate::types::{LabelGridError, Point4};

/// Rigid transform applied to both the cloud and the boxes of one sample.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Augmentation {
    pub z_translation: f32,
    pub yaw: f32,
}

impl Augmentation {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Random shift in `[-z_range, z_range)` and rotation in `[0, 2π)`.
    pub fn sample<R: Rng>(rng: &mut R, z_range: f32) -> Self {
        let z_translation = (rng.random::<f32>() - 0.5) * 2.0 * z_range;
        let yaw = rng.random::<f32>() * TAU;
        Self { z_translation, yaw }
    }

    pub fn is_identity(&self) -> bool {
        self.z_translation == 0.0 && self.yaw == 0.0
    }

    fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw)
    }

    /// Translate, then rotate about the origin. Intensity is preserved.
    pub fn apply_to_points(&self, points: &mut [Point4]) {
        if self.is_identity() {
            return;
        }
        let rotation = self.rotation();
        let offset = Vec3::new(0.0, 0.0, self.z_translation);
        for p in points {
            p.position = rotation * (p.position + offset);
        }
    }

    pub fn apply_to_box(&self, object: &mut OrientedBox3) {
        if self.is_identity() {
            return;
        }
        object.translate(Vec3::new(0.0, 0.0, self.z_translation));
        object.rotate(self.rotation());
    }
}

fn default_num_rand_samples() -> usize {
    5
}

fn default_min_distance() -> f32 {
    5.0
}

fn default_sigma() -> f32 {
    2.0
}

fn default_add_noise_rate() -> f32 {
    0.1
}

/// Parameters of [`add_noise_points`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoiseConfig {
    /// Distance draws per angle; the closest one is used.
    #[serde(default = "default_num_rand_samples")]
    pub num_rand_samples: usize,
    /// Closest distance of a noise return, meters.
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    /// Standard deviation of the noise height around the mean cloud height.
    #[serde(default = "default_sigma")]
    pub sigma: f32,
    /// Probability of adding a return at each of the 360 angles.
    #[serde(default = "default_add_noise_rate")]
    pub add_noise_rate: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            num_rand_samples: default_num_rand_samples(),
            min_distance: default_min_distance(),
            sigma: default_sigma(),
            add_noise_rate: default_add_noise_rate(),
        }
    }
}

impl NoiseConfig {
    pub fn validate(&self) -> Result<(), LabelGridError> {
        if self.num_rand_samples == 0 {
            return Err(LabelGridError::InvalidConfig(
                "noise.num_rand_samples must be at least 1".to_string(),
            ));
        }
        if !(self.sigma > 0.0) {
            return Err(LabelGridError::InvalidConfig(
                "noise.sigma must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.add_noise_rate) {
            return Err(LabelGridError::InvalidConfig(
                "noise.add_noise_rate must be in [0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Append spurious returns scattered around the sensor.
///
/// For each integer angle in `0..360` (interpreted in radians) a return is
/// added with probability `add_noise_rate`. Its height is drawn around the
/// mean cloud height and redrawn until it falls within the cloud's height
/// range. Intensity is copied from a random existing point.
pub fn add_noise_points<R: Rng>(
    points: &mut Vec<Point4>,
    config: &NoiseConfig,
    rng: &mut R,
) -> usize {
    if points.is_empty() {
        return 0;
    }

    let (min_z, max_z, sum_z, max_distance) = points.iter().fold(
        (f32::INFINITY, f32::NEG_INFINITY, 0.0f64, 0.0f32),
        |(lo, hi, sum, dist), p| {
            (
                lo.min(p.position.z),
                hi.max(p.position.z),
                sum + f64::from(p.position.z),
                dist.max(p.position.truncate().length()),
            )
        },
    );
    let mean_z = (sum_z / points.len() as f64) as f32;
    if !(mean_z.is_finite() && min_z.is_finite() && max_z.is_finite()) {
        warn!("cloud heights are not finite (mean {mean_z}), skipping noise injection");
        return 0;
    }
    let height = match Normal::new(mean_z, config.sigma.max(f32::MIN_POSITIVE)) {
        Ok(normal) => normal,
        Err(err) => {
            warn!("cannot sample noise heights around {mean_z}: {err}");
            return 0;
        }
    };
    let num_samples = config.num_rand_samples.max(1);
    let source_len = points.len();

    let mut added = 0;
    for theta in 0..360u32 {
        if rng.random::<f32>() > config.add_noise_rate {
            continue;
        }

        let distance = (0..num_samples)
            .map(|_| sample_distance(rng, config.min_distance, max_distance))
            .fold(f32::INFINITY, f32::min);

        let z = if min_z < max_z {
            loop {
                let z = height.sample(rng);
                if (min_z..=max_z).contains(&z) {
                    break z;
                }
            }
        } else {
            min_z
        };

        let angle = theta as f32;
        let xy = Vec2::new(angle.cos(), angle.sin()) * distance;
        let intensity = points[rng.random_range(0..source_len)].intensity;
        points.push(Point4::new(xy.x, xy.y, z, intensity));
        added += 1;
    }
    added
}

fn sample_distance<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if low < high {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn ring(count: usize, radius: f32) -> Vec<Point4> {
        (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * TAU;
                Point4::new(
                    radius * a.cos(),
                    radius * a.sin(),
                    -1.0 + (i % 3) as f32,
                    i as f32,
                )
            })
            .collect()
    }

    #[test]
    fn identity_leaves_points_untouched() {
        let mut points = ring(8, 10.0);
        let before = points.clone();
        Augmentation::identity().apply_to_points(&mut points);
        assert_eq!(points, before);
    }

    #[test]
    fn points_and_boxes_move_together() {
        let aug = Augmentation {
            z_translation: 0.3,
            yaw: 1.1,
        };
        let center = Vec3::new(12.0, -3.0, 0.5);
        let mut object = OrientedBox3::new(
            center,
            Vec3::new(2.0, 4.0, 1.5),
            Quat::from_rotation_z(0.2),
            "vehicle.car",
        );
        let mut points = vec![Point4::new(center.x, center.y, center.z, 7.0)];

        aug.apply_to_points(&mut points);
        aug.apply_to_box(&mut object);

        assert!((points[0].position - object.center()).length() < 1e-4);
        assert_eq!(points[0].intensity, 7.0);
        assert!((object.yaw() - 1.3).abs() < 1e-5);
    }

    #[test]
    fn sampled_augmentation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let aug = Augmentation::sample(&mut rng, 0.5);
            assert!((-0.5..0.5).contains(&aug.z_translation));
            assert!((0.0..TAU).contains(&aug.yaw));
        }
    }

    #[test]
    fn noise_points_respect_cloud_extent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut points = ring(64, 30.0);
        let intensities: Vec<f32> = points.iter().map(|p| p.intensity).collect();
        let config = NoiseConfig {
            add_noise_rate: 1.0,
            ..Default::default()
        };

        let added = add_noise_points(&mut points, &config, &mut rng);

        assert_eq!(added, 360);
        assert_eq!(points.len(), 64 + 360);
        for p in &points[64..] {
            let distance = p.position.truncate().length();
            assert!((4.999..=30.001).contains(&distance), "{distance}");
            assert!((-1.0..=1.0).contains(&p.position.z));
            assert!(intensities.contains(&p.intensity));
        }
    }

    #[test]
    fn zero_rate_adds_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut points = ring(16, 10.0);
        let config = NoiseConfig {
            add_noise_rate: 0.0,
            ..Default::default()
        };
        let added = add_noise_points(&mut points, &config, &mut rng);
        assert_eq!(added, 0);
        assert_eq!(points.len(), 16);
    }

    #[test]
    fn non_finite_heights_skip_noise() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut points = ring(16, 10.0);
        points[3].position.z = f32::NAN;
        let config = NoiseConfig {
            add_noise_rate: 1.0,
            ..Default::default()
        };
        assert_eq!(add_noise_points(&mut points, &config, &mut rng), 0);
        assert_eq!(points.len(), 16);
    }

    #[test]
    fn empty_cloud_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut points = Vec::new();
        assert_eq!(
            add_noise_points(&mut points, &NoiseConfig::default(), &mut rng),
            0
        );
        assert!(points.is_empty());
    }

    #[test]
    fn noise_config_validation() {
        assert!(NoiseConfig::default().validate().is_ok());
        let bad = NoiseConfig {
            add_noise_rate: 1.5,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
