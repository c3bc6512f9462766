//! Mapping from hierarchical annotation categories to class ids.

/// Recognized object classes. The discriminant is the id written to the class channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectClass {
    Car = 1,
    LargeVehicle = 2,
    Cycle = 3,
    Human = 4,
}

impl ObjectClass {
    /// Classify a dotted category such as `vehicle.car` or `human.pedestrian.adult`.
    ///
    /// Returns `None` for anything outside the known taxonomy.
    pub fn from_category(category: &str) -> Option<Self> {
        let mut tokens = category.split('.');
        match (tokens.next(), tokens.next()) {
            (Some("vehicle"), Some(kind)) => match kind {
                "car" => Some(Self::Car),
                "bus" | "truck" | "construction" | "emergency" | "trailer" => {
                    Some(Self::LargeVehicle)
                }
                "bicycle" | "motorcycle" => Some(Self::Cycle),
                _ => None,
            },
            (Some("human"), _) => Some(Self::Human),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Class id of a category, `0` when it is not recognized.
pub fn classify(category: &str) -> u8 {
    ObjectClass::from_category(category).map_or(0, ObjectClass::id)
}
