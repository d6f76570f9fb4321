//! House: the root aggregate, identified by its name and placed by a location.

use std::fmt;

use crate::error::ValidationError;
use crate::id::HouseId;

/// Latitude in degrees, within `[-90, 90]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latitude(f64);

impl Latitude {
    /// # Errors
    ///
    /// Returns [`ValidationError::LatitudeOutOfRange`] outside `[-90, 90]`.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&value) {
            return Err(ValidationError::LatitudeOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Longitude in degrees, within `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Longitude(f64);

impl Longitude {
    /// # Errors
    ///
    /// Returns [`ValidationError::LongitudeOutOfRange`] outside `[-180, 180]`.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !(-180.0..=180.0).contains(&value) {
            return Err(ValidationError::LongitudeOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// GPS coordinates of a house.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gps {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Gps {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when either coordinate is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }
}

/// Countries a house can be registered in, each with its zip code format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Country {
    UnitedStates,
    France,
    Portugal,
    Spain,
}

impl Country {
    pub const ALL: [Self; 4] = [Self::UnitedStates, Self::France, Self::Portugal, Self::Spain];

    /// Display name, as accepted by [`Country::parse`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States of America",
            Self::France => "France",
            Self::Portugal => "Portugal",
            Self::Spain => "Spain",
        }
    }

    /// Zip code pattern where `#` stands for an ASCII digit.
    fn zip_code_pattern(self) -> &'static str {
        match self {
            Self::Portugal => "####-###",
            Self::UnitedStates | Self::France | Self::Spain => "#####",
        }
    }

    /// Look up a country by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCountry`] for unsupported names.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|country| country.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::UnknownCountry(name.to_owned()))
    }

    /// Whether `zip_code` follows this country's format.
    #[must_use]
    pub fn accepts_zip_code(self, zip_code: &str) -> bool {
        let pattern = self.zip_code_pattern();
        zip_code.len() == pattern.len()
            && zip_code
                .chars()
                .zip(pattern.chars())
                .all(|(c, p)| if p == '#' { c.is_ascii_digit() } else { c == p })
    }

    /// Names of every supported country.
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        Self::ALL.into_iter().map(Self::name).collect()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Postal address of a house.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    street_name: String,
    street_number: String,
    zip_code: String,
    city: String,
    country: Country,
}

impl Address {
    /// Build an address, checking that every part is present and that the
    /// zip code matches the country.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] for empty parts,
    /// [`ValidationError::UnknownCountry`] or [`ValidationError::InvalidZipCode`].
    pub fn new(
        street_name: impl Into<String>,
        street_number: impl Into<String>,
        zip_code: impl Into<String>,
        city: impl Into<String>,
        country: &str,
    ) -> Result<Self, ValidationError> {
        let street_name = non_blank(street_name.into(), "street name")?;
        let street_number = non_blank(street_number.into(), "street number")?;
        let zip_code = non_blank(zip_code.into(), "zip code")?.trim().to_owned();
        let city = non_blank(city.into(), "city")?;
        let country = Country::parse(country)?;

        if !country.accepts_zip_code(&zip_code) {
            return Err(ValidationError::InvalidZipCode {
                zip_code,
                country: country.name().to_owned(),
            });
        }

        Ok(Self {
            street_name,
            street_number,
            zip_code,
            city,
            country,
        })
    }

    #[must_use]
    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    #[must_use]
    pub fn street_number(&self) -> &str {
        &self.street_number
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn country(&self) -> Country {
        self.country
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(value)
}

/// Where a house is: postal address plus coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub address: Address,
    pub gps: Gps,
}

/// A house, identified by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    pub id: HouseId,
    pub location: Location,
}

impl House {
    #[must_use]
    pub fn new(id: HouseId, location: Location) -> Self {
        Self { id, location }
    }

    /// Replace the location of the house.
    pub fn configure_location(&mut self, location: Location) {
        self.location = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn porto() -> Location {
        Location {
            address: Address::new("Rua Dr. Roberto Frias", "400", "4200-465", "Porto", "Portugal")
                .unwrap(),
            gps: Gps::new(41.178, -8.608).unwrap(),
        }
    }

    #[test]
    fn should_accept_latitude_bounds_inclusive() {
        assert!(Latitude::new(90.0).is_ok());
        assert!(Latitude::new(-90.0).is_ok());
    }

    #[test]
    fn should_reject_latitude_out_of_range() {
        assert_eq!(
            Latitude::new(90.1),
            Err(ValidationError::LatitudeOutOfRange(90.1))
        );
    }

    #[test]
    fn should_reject_longitude_out_of_range() {
        assert!(Longitude::new(180.0).is_ok());
        assert_eq!(
            Longitude::new(-180.5),
            Err(ValidationError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn should_parse_country_ignoring_case() {
        assert_eq!(Country::parse(" portugal ").unwrap(), Country::Portugal);
        assert_eq!(
            Country::parse("united states of america").unwrap(),
            Country::UnitedStates
        );
    }

    #[test]
    fn should_reject_unknown_country() {
        assert!(matches!(
            Country::parse("Atlantis"),
            Err(ValidationError::UnknownCountry(_))
        ));
    }

    #[test]
    fn should_check_zip_code_format_per_country() {
        assert!(Country::Portugal.accepts_zip_code("4200-465"));
        assert!(!Country::Portugal.accepts_zip_code("42004"));
        assert!(Country::France.accepts_zip_code("75001"));
        assert!(!Country::Spain.accepts_zip_code("7500A"));
    }

    #[test]
    fn should_reject_address_when_zip_code_does_not_match_country() {
        let result = Address::new("Main St", "1", "4200-465", "Springfield", "United States of America");
        assert!(matches!(result, Err(ValidationError::InvalidZipCode { .. })));
    }

    #[test]
    fn should_reject_address_with_blank_city() {
        let result = Address::new("Main St", "1", "12345", " ", "France");
        assert_eq!(result, Err(ValidationError::Blank("city")));
    }

    #[test]
    fn should_list_available_countries() {
        assert_eq!(
            Country::available(),
            vec!["United States of America", "France", "Portugal", "Spain"]
        );
    }

    #[test]
    fn should_replace_location_when_configured() {
        let mut house = House::new(HouseId::parse("Casa").unwrap(), porto());
        let paris = Location {
            address: Address::new("Rue de Rivoli", "1", "75001", "Paris", "France").unwrap(),
            gps: Gps::new(48.85, 2.35).unwrap(),
        };
        house.configure_location(paris.clone());
        assert_eq!(house.location, paris);
    }
}
