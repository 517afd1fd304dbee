use crate::error::{FloorplanError, Result};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Room types known to the layout engine.
///
/// Names parse case-insensitively from their snake_case form
/// (`"living_room"`, `"master_bedroom"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RoomType {
    // bedrooms
    Bedroom,
    MasterBedroom,
    GuestBedroom,
    KidsBedroom,
    // bathrooms
    Bathroom,
    EnSuite,
    PowderRoom,
    // living spaces
    LivingRoom,
    Lounge,
    DrawingRoom,
    FamilyRoom,
    SunRoom,
    // kitchen & dining
    Kitchen,
    DiningRoom,
    KitchenDining,
    Pantry,
    // work & utility
    Study,
    HomeOffice,
    Library,
    Laundry,
    Utility,
    // circulation & storage
    Hallway,
    Corridor,
    Foyer,
    Storage,
    WalkInCloset,
    // special
    Garage,
    DoubleGarage,
    Basement,
    Attic,
    Gym,
    MediaRoom,
    PoolRoom,
}

/// Functional zone of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    Public,
    Private,
    Service,
    Circulation,
}

impl RoomType {
    /// Default (width, height) in meters
    pub fn default_dimensions(self) -> (f64, f64) {
        use RoomType::*;
        match self {
            Bedroom => (3.5, 3.0),
            MasterBedroom => (4.0, 3.5),
            GuestBedroom => (3.5, 3.0),
            KidsBedroom => (3.0, 3.0),
            Bathroom => (2.0, 2.5),
            EnSuite => (2.5, 2.5),
            PowderRoom => (1.5, 2.0),
            LivingRoom => (5.0, 4.5),
            Lounge => (5.0, 4.0),
            DrawingRoom => (4.5, 4.0),
            FamilyRoom => (5.0, 4.5),
            SunRoom => (4.0, 3.5),
            Kitchen => (3.0, 4.0),
            DiningRoom => (3.5, 3.0),
            KitchenDining => (6.0, 4.0),
            Pantry => (2.0, 2.0),
            Study => (2.5, 3.0),
            HomeOffice => (3.5, 3.5),
            Library => (4.0, 3.5),
            Laundry => (2.5, 2.0),
            Utility => (2.5, 2.5),
            Hallway => (1.5, 3.5),
            Corridor => (1.2, 4.0),
            Foyer => (3.0, 2.5),
            Storage => (2.0, 2.0),
            WalkInCloset => (2.5, 2.5),
            Garage => (6.0, 3.0),
            DoubleGarage => (6.0, 6.0),
            Basement => (8.0, 6.0),
            Attic => (6.0, 4.0),
            Gym => (4.0, 4.0),
            MediaRoom => (5.0, 4.0),
            PoolRoom => (5.0, 4.0),
        }
    }

    /// Placement priority (higher = placed earlier, becomes an anchor for later rooms)
    pub fn default_priority(self) -> i32 {
        use RoomType::*;
        match self {
            LivingRoom => 20,
            FamilyRoom => 19,
            Lounge => 18,
            DrawingRoom => 17,
            Kitchen | KitchenDining => 16,
            DiningRoom => 15,
            MasterBedroom => 14,
            EnSuite => 13,
            WalkInCloset => 12,
            Bedroom => 11,
            Pantry | GuestBedroom => 10,
            KidsBedroom => 9,
            Bathroom => 8,
            PowderRoom => 7,
            Study | HomeOffice => 6,
            Library => 5,
            Laundry | Utility => 4,
            Foyer | Hallway => 3,
            Corridor => 2,
            Storage | Garage | DoubleGarage | Basement | Attic | Gym | MediaRoom | PoolRoom
            | SunRoom => 1,
        }
    }

    pub fn zone(self) -> Zone {
        use RoomType::*;
        match self {
            LivingRoom | Lounge | DrawingRoom | FamilyRoom | SunRoom | Kitchen | DiningRoom
            | KitchenDining => Zone::Public,
            Bedroom | MasterBedroom | GuestBedroom | KidsBedroom | Study | HomeOffice
            | Library | WalkInCloset => Zone::Private,
            Bathroom | EnSuite | PowderRoom | Pantry | Laundry | Utility | Storage | Garage
            | DoubleGarage | Basement | Attic | Gym | MediaRoom | PoolRoom => Zone::Service,
            Hallway | Corridor | Foyer => Zone::Circulation,
        }
    }

    pub fn is_bedroom(self) -> bool {
        matches!(
            self,
            RoomType::Bedroom
                | RoomType::MasterBedroom
                | RoomType::GuestBedroom
                | RoomType::KidsBedroom
        )
    }
}

/// A room to be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequest {
    pub name: String,
    pub room_type: RoomType,
    pub width: f64,
    pub height: f64,
    pub priority: i32,
}

impl RoomRequest {
    /// Request with catalog defaults for `room_type`
    pub fn new(room_type: RoomType) -> Self {
        let (width, height) = room_type.default_dimensions();
        Self {
            name: room_type.to_string(),
            room_type,
            width,
            height,
            priority: room_type.default_priority(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(FloorplanError::InvalidDimension {
                room: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Per-type overrides layered over the built-in catalog
#[derive(Debug, Clone, Default)]
pub struct RoomDefaults {
    dimensions: HashMap<RoomType, (f64, f64)>,
    priorities: HashMap<RoomType, i32>,
}

impl RoomDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self, room_type: RoomType, width: f64, height: f64) -> Self {
        self.dimensions.insert(room_type, (width, height));
        self
    }

    pub fn with_priority(mut self, room_type: RoomType, priority: i32) -> Self {
        self.priorities.insert(room_type, priority);
        self
    }

    pub fn dimensions(&self, room_type: RoomType) -> (f64, f64) {
        self.dimensions
            .get(&room_type)
            .copied()
            .unwrap_or_else(|| room_type.default_dimensions())
    }

    pub fn priority(&self, room_type: RoomType) -> i32 {
        self.priorities
            .get(&room_type)
            .copied()
            .unwrap_or_else(|| room_type.default_priority())
    }

    pub fn request(&self, room_type: RoomType) -> RoomRequest {
        let (width, height) = self.dimensions(room_type);
        RoomRequest::new(room_type)
            .with_size(width, height)
            .with_priority(self.priority(room_type))
    }
}

/// One entry of a room specification as read from a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    #[serde(alias = "type")]
    pub room_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub priority: Option<i32>,
}

impl RoomSpec {
    pub fn new(room_type: impl Into<String>) -> Self {
        Self {
            room_type: room_type.into(),
            name: None,
            width: None,
            height: None,
            priority: None,
        }
    }

    /// Resolves the entry into a request.
    ///
    /// # Arguments
    /// * `row` - position reported in errors (1-based)
    /// * `defaults` - dimension/priority fallbacks for missing fields
    ///
    /// # Errors
    /// Returns `UnknownRoomType` if `room_type` is not in the catalog
    pub fn resolve(&self, row: usize, defaults: &RoomDefaults) -> Result<RoomRequest> {
        let room_type: RoomType =
            self.room_type
                .trim()
                .parse()
                .map_err(|_| FloorplanError::UnknownRoomType {
                    row,
                    name: self.room_type.clone(),
                })?;

        let mut request = defaults.request(room_type);
        let (width, height) = (request.width, request.height);
        request = request.with_size(self.width.unwrap_or(width), self.height.unwrap_or(height));
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            request = request.with_name(name);
        }
        Ok(request)
    }
}

/// Room counts for a whole building (quick mode)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingSpec {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub kitchen: bool,
    pub living_room: bool,
    pub dining_room: bool,
    pub study: bool,
}

impl Default for BuildingSpec {
    fn default() -> Self {
        Self {
            bedrooms: 0,
            bathrooms: 0,
            kitchen: true,
            living_room: true,
            dining_room: false,
            study: false,
        }
    }
}

impl BuildingSpec {
    /// Expands the counts into named requests.
    /// The first bedroom becomes the master bedroom.
    pub fn to_requests(&self, defaults: &RoomDefaults) -> Vec<RoomRequest> {
        let mut requests = Vec::new();

        if self.living_room {
            requests.push(defaults.request(RoomType::LivingRoom));
        }
        if self.kitchen {
            requests.push(defaults.request(RoomType::Kitchen));
        }
        if self.bedrooms > 0 {
            requests.push(defaults.request(RoomType::MasterBedroom));
        }
        for i in 2..=self.bedrooms {
            requests.push(defaults.request(RoomType::Bedroom).with_name(format!("bedroom_{i}")));
        }
        for i in 1..=self.bathrooms {
            requests.push(defaults.request(RoomType::Bathroom).with_name(format!("bathroom_{i}")));
        }
        if self.dining_room {
            requests.push(defaults.request(RoomType::DiningRoom));
        }
        if self.study {
            requests.push(defaults.request(RoomType::Study));
        }

        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_room_type_parse_and_display() {
        assert_eq!("living_room".parse::<RoomType>().unwrap(), RoomType::LivingRoom);
        assert_eq!("Master_Bedroom".parse::<RoomType>().unwrap(), RoomType::MasterBedroom);
        assert_eq!(RoomType::WalkInCloset.to_string(), "walk_in_closet");
        assert!("ballroom".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_catalog_is_complete() {
        for room_type in RoomType::iter() {
            let (w, h) = room_type.default_dimensions();
            assert!(w > 0.0 && h > 0.0, "{room_type} has no usable size");
            assert!(room_type.default_priority() >= 1);
            // round-trip through the parser
            assert_eq!(room_type.to_string().parse::<RoomType>().unwrap(), room_type);
        }
        assert_eq!(RoomType::iter().count(), 33);
    }

    #[test]
    fn test_default_request() {
        let req = RoomRequest::new(RoomType::Kitchen);
        assert_eq!(req.name, "kitchen");
        assert_eq!((req.width, req.height), (3.0, 4.0));
        assert_eq!(req.priority, 16);
        assert_eq!(req.area(), 12.0);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(RoomRequest::new(RoomType::Study).validate().is_ok());
        for (w, h) in [(0.0, 3.0), (3.0, -1.0), (f64::NAN, 3.0), (3.0, f64::INFINITY)] {
            let req = RoomRequest::new(RoomType::Study).with_size(w, h);
            assert!(matches!(
                req.validate(),
                Err(FloorplanError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_room_spec_resolve() {
        let defaults = RoomDefaults::new().with_dimensions(RoomType::Bedroom, 4.0, 4.0);

        let spec = RoomSpec {
            width: Some(3.2),
            ..RoomSpec::new("bedroom")
        };
        let req = spec.resolve(1, &defaults).unwrap();
        assert_eq!((req.width, req.height), (3.2, 4.0));
        assert_eq!(req.priority, 11);

        let named = RoomSpec {
            name: Some("nursery".to_string()),
            priority: Some(30),
            ..RoomSpec::new(" kids_bedroom ")
        };
        let req = named.resolve(2, &defaults).unwrap();
        assert_eq!(req.name, "nursery");
        assert_eq!(req.room_type, RoomType::KidsBedroom);
        assert_eq!(req.priority, 30);

        let err = RoomSpec::new("ballroom").resolve(7, &defaults).unwrap_err();
        assert!(matches!(err, FloorplanError::UnknownRoomType { row: 7, .. }));
    }

    #[test]
    fn test_building_spec_expansion() {
        let spec = BuildingSpec {
            bedrooms: 3,
            bathrooms: 2,
            dining_room: true,
            ..BuildingSpec::default()
        };
        let names: Vec<String> = spec
            .to_requests(&RoomDefaults::new())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "living_room",
                "kitchen",
                "master_bedroom",
                "bedroom_2",
                "bedroom_3",
                "bathroom_1",
                "bathroom_2",
                "dining_room",
            ]
        );
    }

    #[test]
    fn test_zones() {
        assert_eq!(RoomType::Kitchen.zone(), Zone::Public);
        assert_eq!(RoomType::MasterBedroom.zone(), Zone::Private);
        assert_eq!(RoomType::Bathroom.zone(), Zone::Service);
        assert_eq!(RoomType::Hallway.zone(), Zone::Circulation);
        assert!(RoomType::KidsBedroom.is_bedroom());
        assert!(!RoomType::Study.is_bedroom());
    }
}
