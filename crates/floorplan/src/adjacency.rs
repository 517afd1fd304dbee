use crate::rooms::RoomType;

use log::warn;
use std::collections::HashMap;

/// Preferred-neighbour table.
///
/// Built once and passed into the placement engine. A room type declared
/// more than once keeps its first list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyTable {
    preferences: HashMap<RoomType, Vec<RoomType>>,
}

impl AdjacencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(room, neighbours)` declarations in order
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RoomType, Vec<RoomType>)>,
    {
        let mut preferences = HashMap::new();
        for (room, neighbors) in entries {
            if preferences.contains_key(&room) {
                warn!("Duplicate adjacency entry for {room}, keeping the first declaration");
                continue;
            }
            preferences.insert(room, neighbors);
        }
        Self { preferences }
    }

    /// Architectural defaults
    pub fn standard() -> Self {
        use RoomType::*;
        Self::from_entries([
            // kitchen
            (Kitchen, vec![DiningRoom, LivingRoom, Pantry, Utility]),
            (KitchenDining, vec![LivingRoom, Pantry]),
            (Pantry, vec![Kitchen]),
            // living spaces
            (LivingRoom, vec![Kitchen, DiningRoom, Hallway, Foyer, SunRoom]),
            (Lounge, vec![LivingRoom, DiningRoom, Hallway]),
            (DrawingRoom, vec![Foyer, LivingRoom, Hallway]),
            (FamilyRoom, vec![Kitchen, LivingRoom]),
            (SunRoom, vec![LivingRoom, DiningRoom]),
            (DiningRoom, vec![Kitchen, LivingRoom]),
            // bedrooms
            (MasterBedroom, vec![EnSuite, WalkInCloset, Bathroom]),
            (Bedroom, vec![Bathroom, Hallway]),
            (GuestBedroom, vec![Bathroom, Hallway]),
            (KidsBedroom, vec![Bathroom, Hallway]),
            // bathrooms
            (Bathroom, vec![Bedroom, Hallway, MasterBedroom]),
            (EnSuite, vec![MasterBedroom]),
            (PowderRoom, vec![Foyer, Hallway]),
            // work
            (Study, vec![LivingRoom, Hallway, Library]),
            (HomeOffice, vec![Study, Library, Hallway]),
            (Library, vec![Study, LivingRoom]),
            // utility
            (Laundry, vec![Kitchen, Utility, Garage]),
            (Utility, vec![Kitchen, Laundry, Garage]),
            // circulation
            (Hallway, vec![LivingRoom, Bedroom, Bathroom, Foyer]),
            (Corridor, vec![Bedroom, Bathroom]),
            (Foyer, vec![LivingRoom, Hallway, DrawingRoom]),
            // storage
            (Storage, vec![Hallway, Utility]),
            (WalkInCloset, vec![MasterBedroom]),
            // special
            (Garage, vec![Utility, Laundry, Foyer]),
            (Gym, vec![Bathroom, Utility]),
            (MediaRoom, vec![LivingRoom, FamilyRoom]),
            (PoolRoom, vec![LivingRoom, FamilyRoom]),
        ])
    }

    /// Declared neighbours of `room`, in declaration order
    pub fn preferred(&self, room: RoomType) -> &[RoomType] {
        self.preferences
            .get(&room)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Symmetric preference: either side lists the other
    pub fn prefers(&self, a: RoomType, b: RoomType) -> bool {
        self.preferred(a).contains(&b) || self.preferred(b).contains(&a)
    }

    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }
}
