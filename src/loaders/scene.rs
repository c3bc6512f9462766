use std::path::Path;

use glam::{Quat, Vec3};
use serde::Deserialize;

use crate::geometry::OrientedBox3;
use crate::pipeline::Frame;
use crate::types::{LabelGridError, Point4};

/// Scene file layout: one frame of points and boxes.
#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    token: String,
    /// `[x, y, z, intensity]` per point.
    points: Vec<[f32; 4]>,
    #[serde(default)]
    boxes: Vec<BoxRecord>,
}

#[derive(Debug, Deserialize)]
struct BoxRecord {
    category: String,
    center: [f32; 3],
    /// `[width, length, height]` in meters.
    #[serde(deserialize_with = "deserialize_size")]
    size: [f32; 3],
    /// Rotation about the vertical axis, radians.
    #[serde(default)]
    yaw: f32,
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <[f32; 3]>::deserialize(deserializer)?;
    if value.iter().all(|v| *v > 0.0 && v.is_finite()) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "box size components must be positive",
        ))
    }
}

pub fn parse_scene(yaml: &str) -> Result<Frame, LabelGridError> {
    let scene: SceneFile = serde_yaml::from_str(yaml)?;

    let points = scene
        .points
        .iter()
        .map(|[x, y, z, i]| Point4::new(*x, *y, *z, *i))
        .collect();

    let boxes = scene
        .boxes
        .into_iter()
        .map(|b| {
            OrientedBox3::new(
                Vec3::from_array(b.center),
                Vec3::from_array(b.size),
                Quat::from_rotation_z(b.yaw),
                b.category,
            )
        })
        .collect();

    Ok(Frame {
        token: scene.token,
        points,
        boxes,
    })
}

pub fn load_scene(yaml_path: impl AsRef<Path>) -> Result<Frame, LabelGridError> {
    let yaml_str = std::fs::read_to_string(yaml_path.as_ref())?;
    parse_scene(&yaml_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points_and_boxes() {
        let frame = parse_scene(
            "token: abc\n\
             points:\n  - [1.0, 2.0, 0.5, 12.0]\n\
             boxes:\n  - category: vehicle.car\n    center: [1.0, 2.0, 0.0]\n    size: [2.0, 4.0, 1.5]\n    yaw: 0.25\n",
        )
        .unwrap();
        assert_eq!(frame.token, "abc");
        assert_eq!(frame.points, vec![Point4::new(1.0, 2.0, 0.5, 12.0)]);
        assert_eq!(frame.boxes.len(), 1);
        assert_eq!(frame.boxes[0].category(), "vehicle.car");
        assert!((frame.boxes[0].yaw() - 0.25).abs() < 1e-6);
        assert!((frame.boxes[0].height() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_size() {
        let err = parse_scene(
            "points: []\n\
             boxes:\n  - category: vehicle.car\n    center: [0.0, 0.0, 0.0]\n    size: [2.0, 0.0, 1.5]\n",
        )
        .unwrap_err();
        assert!(matches!(err, LabelGridError::Yaml(_)));
    }
}
