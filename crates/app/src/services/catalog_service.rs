//! Catalog service: load and browse device, sensor and actuator kinds.

use smarthome_domain::catalog::{ActuatorModel, ActuatorType, Catalog, DeviceType, SensorModel, SensorType};
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};

use crate::ports::CatalogRepository;

/// Application service for catalog queries.
pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate and store `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when a model references an
    /// unknown type, or a storage error from the repository.
    #[tracing::instrument(skip_all)]
    pub async fn load(&self, catalog: Catalog) -> Result<(), SmartHomeError> {
        catalog.validate()?;
        tracing::info!(
            device_types = catalog.device_types.len(),
            sensor_models = catalog.sensor_models.len(),
            actuator_models = catalog.actuator_models.len(),
            "loading catalog"
        );
        self.repo.save(catalog).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_device_types(&self) -> Result<Vec<DeviceType>, SmartHomeError> {
        self.repo.device_types().await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown names, or a storage
    /// error from the repository.
    pub async fn get_device_type(&self, name: DeviceTypeName) -> Result<DeviceType, SmartHomeError> {
        self.repo
            .device_types()
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| NotFoundError::new("DeviceType", name).into())
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_sensor_types(&self) -> Result<Vec<SensorType>, SmartHomeError> {
        self.repo.sensor_types().await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown ids, or a storage
    /// error from the repository.
    pub async fn get_sensor_type(&self, id: SensorTypeId) -> Result<SensorType, SmartHomeError> {
        self.repo
            .sensor_types()
            .await?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| NotFoundError::new("SensorType", id).into())
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown names, or a storage
    /// error from the repository.
    pub async fn get_sensor_model(&self, name: SensorModelName) -> Result<SensorModel, SmartHomeError> {
        self.repo
            .sensor_models()
            .await?
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| NotFoundError::new("SensorModel", name).into())
    }

    /// Sensor models measuring the given sensor type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn sensor_models_of_type(
        &self,
        sensor_type: SensorTypeId,
    ) -> Result<Vec<SensorModel>, SmartHomeError> {
        Ok(self
            .repo
            .sensor_models()
            .await?
            .into_iter()
            .filter(|m| m.sensor_type == sensor_type)
            .collect())
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_actuator_types(&self) -> Result<Vec<ActuatorType>, SmartHomeError> {
        self.repo.actuator_types().await
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown names, or a storage
    /// error from the repository.
    pub async fn get_actuator_type(
        &self,
        name: ActuatorTypeName,
    ) -> Result<ActuatorType, SmartHomeError> {
        self.repo
            .actuator_types()
            .await?
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| NotFoundError::new("ActuatorType", name).into())
    }

    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] for unknown names, or a storage
    /// error from the repository.
    pub async fn get_actuator_model(
        &self,
        name: ActuatorModelName,
    ) -> Result<ActuatorModel, SmartHomeError> {
        self.repo
            .actuator_models()
            .await?
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| NotFoundError::new("ActuatorModel", name).into())
    }

    /// Actuator models of the given actuator type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn actuator_models_of_type(
        &self,
        actuator_type: ActuatorTypeName,
    ) -> Result<Vec<ActuatorModel>, SmartHomeError> {
        Ok(self
            .repo
            .actuator_models()
            .await?
            .into_iter()
            .filter(|m| m.actuator_type == actuator_type)
            .collect())
    }
}
