//! Request and response bodies of the JSON API.
//!
//! Domain aggregates keep their invariants behind constructors, so requests
//! are plain data converted through those constructors and responses are
//! flat views built from the aggregates.

use serde::{Deserialize, Serialize};

use smarthome_domain::actuator::{Actuator, ActuatorConfig};
use smarthome_domain::device::Device;
use smarthome_domain::error::ValidationError;
use smarthome_domain::house::{Address, Gps, House, Location};
use smarthome_domain::id::{
    ActuatorId, ActuatorModelName, DeviceId, DeviceTypeName, HouseId, ReadingId, RoomId,
    SensorId, SensorModelName,
};
use smarthome_domain::reading::Reading;
use smarthome_domain::room::{Dimensions, Room};
use smarthome_domain::sensor::Sensor;
use smarthome_domain::time::Timestamp;

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub street_name: String,
    pub street_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<LocationRequest> for Location {
    type Error = ValidationError;

    fn try_from(req: LocationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            address: Address::new(
                req.street_name,
                req.street_number,
                req.zip_code,
                req.city,
                &req.country,
            )?,
            gps: Gps::new(req.latitude, req.longitude)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHouseRequest {
    pub name: String,
    pub location: LocationRequest,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub street_name: String,
    pub street_number: String,
    pub zip_code: String,
    pub city: String,
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct HouseResponse {
    pub name: HouseId,
    pub location: LocationResponse,
}

impl From<House> for HouseResponse {
    fn from(house: House) -> Self {
        let Location { address, gps } = house.location;
        Self {
            name: house.id,
            location: LocationResponse {
                street_name: address.street_name().to_owned(),
                street_number: address.street_number().to_owned(),
                zip_code: address.zip_code().to_owned(),
                city: address.city().to_owned(),
                country: address.country().name(),
                latitude: gps.latitude.value(),
                longitude: gps.longitude.value(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub floor: i32,
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl CreateRoomRequest {
    pub fn dimensions(&self) -> Result<Dimensions, ValidationError> {
        Dimensions::new(self.width, self.length, self.height)
    }
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub house_id: HouseId,
    pub floor: i32,
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            house_id: room.house_id,
            floor: room.floor,
            width: room.dimensions.width(),
            length: room.dimensions.length(),
            height: room.dimensions.height(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub device_type: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    pub id: DeviceId,
    pub name: String,
    pub device_type: DeviceTypeName,
    pub room_id: RoomId,
    pub status: &'static str,
}

impl From<Device> for DeviceResponse {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            device_type: device.device_type,
            room_id: device.room_id,
            status: device.status.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSensorRequest {
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct SensorResponse {
    pub id: SensorId,
    pub model: SensorModelName,
    pub device_id: DeviceId,
}

impl From<Sensor> for SensorResponse {
    fn from(sensor: Sensor) -> Self {
        Self {
            id: sensor.id,
            model: sensor.model,
            device_id: sensor.device_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateActuatorRequest {
    pub model: String,
    pub config: ActuatorConfig,
}

#[derive(Debug, Serialize)]
pub struct ActuatorResponse {
    pub id: ActuatorId,
    pub model: ActuatorModelName,
    pub device_id: DeviceId,
    pub config: ActuatorConfig,
}

impl From<Actuator> for ActuatorResponse {
    fn from(actuator: Actuator) -> Self {
        Self {
            id: actuator.id,
            model: actuator.model,
            device_id: actuator.device_id,
            config: actuator.config,
        }
    }
}

/// Body of `PUT /actuators/{id}/operate-blind-roller`.
#[derive(Debug, Deserialize)]
pub struct OperateRequest {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateReadingRequest {
    pub value: f64,
    /// RFC 3339 or local ISO date-time; defaults to now.
    pub recorded_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadingResponse {
    pub id: ReadingId,
    pub value: f64,
    pub sensor_id: SensorId,
    pub recorded_at: Timestamp,
}

impl From<Reading> for ReadingResponse {
    fn from(reading: Reading) -> Self {
        Self {
            id: reading.id,
            value: reading.value,
            sensor_id: reading.sensor_id,
            recorded_at: reading.recorded_at,
        }
    }
}

/// Query string of the reading-by-period endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_period: String,
    pub end_period: String,
}

/// Query string of the peak power consumption endpoint.
#[derive(Debug, Deserialize)]
pub struct PeakQuery {
    pub start: String,
    pub end: String,
}

/// A single computed number.
#[derive(Debug, Serialize)]
pub struct ValueResponse {
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_request(zip_code: &str) -> LocationRequest {
        LocationRequest {
            street_name: "Rue de Rivoli".to_string(),
            street_number: "99".to_string(),
            zip_code: zip_code.to_string(),
            city: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.86,
            longitude: 2.34,
        }
    }

    #[test]
    fn should_build_location_when_request_is_valid() {
        let location = Location::try_from(location_request("75001")).unwrap();
        assert_eq!(location.address.city(), "Paris");
        assert!((location.gps.latitude.value() - 48.86).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_location_when_zip_code_does_not_match_country() {
        let err = Location::try_from(location_request("1100-048")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidZipCode { .. }));
    }

    #[test]
    fn should_serialize_house_with_flat_location() {
        let house = House::new(
            HouseId::parse("Maison").unwrap(),
            Location::try_from(location_request("75001")).unwrap(),
        );
        let json = serde_json::to_value(HouseResponse::from(house)).unwrap();
        assert_eq!(json["name"], "Maison");
        assert_eq!(json["location"]["country"], "France");
        assert_eq!(json["location"]["zip_code"], "75001");
    }

    #[test]
    fn should_read_period_query_in_camel_case() {
        let query: PeriodQuery = serde_json::from_str(
            r#"{"startPeriod":"2024-04-15T07:00:00","endPeriod":"2024-04-15T08:00:00"}"#,
        )
        .unwrap();
        assert_eq!(query.start_period, "2024-04-15T07:00:00");
    }

    #[test]
    fn should_tag_actuator_configuration_by_kind() {
        let req: CreateActuatorRequest = serde_json::from_str(
            r#"{"model":"BlindRollerActuator","config":{"kind":"blind_roller"}}"#,
        )
        .unwrap();
        assert_eq!(req.config, ActuatorConfig::BlindRoller);
    }
}
