//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actuators;
#[allow(clippy::missing_errors_doc)]
pub mod catalog;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod houses;
#[allow(clippy::missing_errors_doc)]
pub mod readings;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;

use axum::Router;
use axum::routing::{get, post, put};

use smarthome_app::ports::Storage;

use crate::state::AppState;

/// Build the API router.
pub fn routes<S: Storage>() -> Router<AppState<S>> {
    Router::new()
        // Houses
        .route("/houses", get(houses::list::<S>).post(houses::create::<S>))
        .route("/houses/countries", get(houses::countries))
        .route("/houses/{id}", get(houses::get::<S>))
        .route("/houses/{id}/location", put(houses::configure_location::<S>))
        // Rooms
        .route("/rooms", get(rooms::list::<S>))
        .route("/rooms/{id}", get(rooms::get::<S>))
        .route(
            "/rooms/house/{house_id}",
            get(rooms::list_of_house::<S>).post(rooms::create::<S>),
        )
        // Devices
        .route("/devices", get(devices::list::<S>))
        .route("/devices/functionality", get(devices::by_functionality::<S>))
        .route("/devices/{id}", get(devices::get::<S>))
        .route("/devices/{id}/deactivate", put(devices::deactivate::<S>))
        .route(
            "/devices/room/{room_id}",
            get(devices::list_of_room::<S>).post(devices::create::<S>),
        )
        // Sensors
        .route("/sensors/{id}", get(sensors::get::<S>))
        .route(
            "/sensors/device/{device_id}",
            get(sensors::list_of_device::<S>).post(sensors::create::<S>),
        )
        // Actuators
        .route("/actuators/{id}", get(actuators::get::<S>))
        .route(
            "/actuators/device/{device_id}",
            get(actuators::list_of_device::<S>).post(actuators::create::<S>),
        )
        .route("/actuators/{id}/operate", put(actuators::operate::<S>))
        .route(
            "/actuators/{id}/operate-blind-roller",
            put(actuators::operate_blind_roller::<S>),
        )
        .route(
            "/actuators/{id}/current-percentage-value",
            get(actuators::current_percentage::<S>),
        )
        // Readings
        .route(
            "/readings/peak-power-consumption",
            get(readings::peak_power_consumption::<S>),
        )
        .route("/readings/{id}", get(readings::get::<S>))
        .route("/readings/sensor/{sensor_id}", post(readings::create::<S>))
        .route("/readings/device/{id}", get(readings::list_of_device::<S>))
        .route(
            "/readings/device/{left}/max-temperature-difference/{right}",
            get(readings::max_temperature_difference::<S>),
        )
        // Catalog
        .route("/devicetypes", get(catalog::list_device_types::<S>))
        .route("/devicetypes/{name}", get(catalog::get_device_type::<S>))
        .route("/sensortypes", get(catalog::list_sensor_types::<S>))
        .route("/sensortypes/{id}", get(catalog::get_sensor_type::<S>))
        .route("/sensormodels/{name}", get(catalog::get_sensor_model::<S>))
        .route(
            "/sensormodels/type/{sensor_type}",
            get(catalog::sensor_models_of_type::<S>),
        )
        .route("/actuatortypes", get(catalog::list_actuator_types::<S>))
        .route("/actuatortypes/{name}", get(catalog::get_actuator_type::<S>))
        .route("/actuatormodels/{name}", get(catalog::get_actuator_model::<S>))
        .route(
            "/actuatormodels/type/{actuator_type}",
            get(catalog::actuator_models_of_type::<S>),
        )
}
