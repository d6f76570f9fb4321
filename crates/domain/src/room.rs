//! Room: a named space of a house, placed on a floor with fixed dimensions.

use crate::error::{SmartHomeError, ValidationError};
use crate::id::{HouseId, RoomId};

/// Width, length and height of a room, each strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    width: f64,
    length: f64,
    height: f64,
}

impl Dimensions {
    /// # Errors
    ///
    /// Returns [`ValidationError::NotPositive`] for the first dimension that
    /// is zero, negative or not a number.
    pub fn new(width: f64, length: f64, height: f64) -> Result<Self, ValidationError> {
        positive("width", width)?;
        positive("length", length)?;
        positive("height", height)?;
        Ok(Self {
            width,
            length,
            height,
        })
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.length
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field, value))
    }
}

/// A room belonging to a house.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub house_id: HouseId,
    pub floor: i32,
    pub dimensions: Dimensions,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Blank("room name").into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    house_id: Option<HouseId>,
    floor: i32,
    dimensions: Option<Dimensions>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn house_id(mut self, house_id: HouseId) -> Self {
        self.house_id = Some(house_id);
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the name is blank or the
    /// house or dimensions are missing.
    pub fn build(self) -> Result<Room, SmartHomeError> {
        let house_id = self
            .house_id
            .ok_or(ValidationError::Blank("house id"))?;
        let dimensions = self
            .dimensions
            .ok_or(ValidationError::Blank("dimensions"))?;
        let room = Room {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            house_id,
            floor: self.floor,
            dimensions,
        };
        room.validate()?;
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> HouseId {
        HouseId::parse("Casa").unwrap()
    }

    #[test]
    fn should_build_room_when_all_fields_are_valid() {
        let room = Room::builder()
            .name("Kitchen")
            .house_id(house())
            .floor(-1)
            .dimensions(Dimensions::new(3.0, 4.5, 2.6).unwrap())
            .build()
            .unwrap();

        assert_eq!(room.name, "Kitchen");
        assert_eq!(room.floor, -1);
        assert!((room.dimensions.length() - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_room_with_blank_name() {
        let result = Room::builder()
            .name("  ")
            .house_id(house())
            .dimensions(Dimensions::new(1.0, 1.0, 1.0).unwrap())
            .build();

        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(ValidationError::Blank("room name")))
        ));
    }

    #[test]
    fn should_reject_room_without_house() {
        let result = Room::builder()
            .name("Office")
            .dimensions(Dimensions::new(1.0, 1.0, 1.0).unwrap())
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn should_reject_zero_or_negative_dimensions() {
        assert_eq!(
            Dimensions::new(0.0, 1.0, 1.0),
            Err(ValidationError::NotPositive("width", 0.0))
        );
        assert_eq!(
            Dimensions::new(1.0, 1.0, -2.0),
            Err(ValidationError::NotPositive("height", -2.0))
        );
    }

    #[test]
    fn should_reject_nan_dimension() {
        assert!(Dimensions::new(1.0, f64::NAN, 1.0).is_err());
    }
}
