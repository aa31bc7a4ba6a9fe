//! Body landmarks as reported by the upstream pose detector.
//!
//! A detection is an ordered sequence of 33 landmarks whose indices follow
//! the detector's fixed convention. Lookups are fallible: a short or
//! malformed sequence is a per-frame detection problem, never a panic.

use serde::{Deserialize, Serialize};

/// Index of each landmark in the 33-point body model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub const ALL: [LandmarkIndex; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single detected keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// Normalized X coordinate (0.0..1.0).
    pub x: f64,
    /// Normalized Y coordinate (0.0..1.0).
    pub y: f64,
    /// Detector confidence that the point is visible (0.0..1.0).
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// A 2D normalized point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to pixel coordinates for the given frame.
    pub fn to_pixel(&self, dims: FrameDimensions) -> (i64, i64) {
        let px = (self.x * dims.width as f64).round() as i64;
        let py = (self.y * dims.height as f64).round() as i64;
        (px, py)
    }
}

/// Frame size in pixels, passed through from the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub height: u32,
    pub width: u32,
}

impl FrameDimensions {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

/// Why a landmark could not be read from a detection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("landmark {index:?} is missing from the detection")]
    Missing { index: LandmarkIndex },

    #[error("landmark {index:?} has non-finite coordinates")]
    NonFinite { index: LandmarkIndex },
}

/// One frame's worth of landmarks, in detector order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Build a complete 33-point set where only the given points are
    /// visible; every other landmark sits at the origin with zero visibility.
    pub fn with_points(points: &[(LandmarkIndex, Point2D)]) -> Self {
        let mut landmarks = vec![Landmark::default(); LandmarkIndex::COUNT];
        for (index, p) in points {
            landmarks[index.index()] = Landmark::new(p.x, p.y, 1.0);
        }
        Self { landmarks }
    }

    /// True when the detector reported no body at all.
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn get(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.landmarks.get(index.index())
    }

    /// Planar position of a landmark, validated.
    pub fn point(&self, index: LandmarkIndex) -> Result<Point2D, LandmarkError> {
        let landmark = self.get(index).ok_or(LandmarkError::Missing { index })?;
        if !landmark.x.is_finite() || !landmark.y.is_finite() {
            return Err(LandmarkError::NonFinite { index });
        }
        Ok(landmark.point())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.landmarks.iter()
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}
