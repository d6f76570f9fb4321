//! House service: use-cases for registering and locating houses.

use smarthome_domain::error::{ConstraintError, NotFoundError, SmartHomeError};
use smarthome_domain::house::{House, Location};
use smarthome_domain::id::HouseId;

use crate::ports::HouseRepository;

/// Application service for house operations.
pub struct HouseService<R> {
    repo: R,
}

impl<R: HouseRepository> HouseService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new house under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Constraint`] when a house with the same
    /// name exists, or a storage error from the repository.
    #[tracing::instrument(skip(self, location))]
    pub async fn create_house(
        &self,
        id: HouseId,
        location: Location,
    ) -> Result<House, SmartHomeError> {
        if self.repo.get_by_id(id.clone()).await?.is_some() {
            return Err(ConstraintError::AlreadyExists {
                entity: "House",
                id: id.to_string(),
            }
            .into());
        }
        let house = self.repo.create(House::new(id, location)).await?;
        tracing::info!(house_id = %house.id, "house created");
        Ok(house)
    }

    /// Look up a house by name.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no house is named `id`,
    /// or a storage error from the repository.
    pub async fn get_house(&self, id: HouseId) -> Result<House, SmartHomeError> {
        self.repo
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("House", id).into())
    }

    /// List all houses.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_houses(&self) -> Result<Vec<House>, SmartHomeError> {
        self.repo.get_all().await
    }

    /// Replace the location of an existing house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the house does not exist,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self, location))]
    pub async fn configure_location(
        &self,
        id: HouseId,
        location: Location,
    ) -> Result<House, SmartHomeError> {
        let mut house = self.get_house(id).await?;
        house.configure_location(location);
        self.repo.update(house).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use smarthome_domain::house::{Address, Gps};

    fn make_service() -> HouseService<InMemoryStore> {
        HouseService::new(InMemoryStore::default())
    }

    fn location(city: &str) -> Location {
        Location {
            address: Address::new("Main Street", "12", "75001", city, "France").unwrap(),
            gps: Gps::new(48.8, 2.3).unwrap(),
        }
    }

    fn name(value: &str) -> HouseId {
        HouseId::parse(value).unwrap()
    }

    #[tokio::test]
    async fn should_create_house_when_name_is_free() {
        let svc = make_service();

        let created = svc.create_house(name("Casa"), location("Paris")).await.unwrap();
        assert_eq!(created.id, name("Casa"));

        let fetched = svc.get_house(name("Casa")).await.unwrap();
        assert_eq!(fetched.location.address.city(), "Paris");
    }

    #[tokio::test]
    async fn should_reject_house_when_name_is_taken() {
        let svc = make_service();
        svc.create_house(name("Casa"), location("Paris")).await.unwrap();

        let result = svc.create_house(name("Casa"), location("Lyon")).await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Constraint(ConstraintError::AlreadyExists { .. }))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_house_missing() {
        let svc = make_service();
        let result = svc.get_house(name("Nowhere")).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_houses() {
        let svc = make_service();
        svc.create_house(name("A"), location("Paris")).await.unwrap();
        svc.create_house(name("B"), location("Lyon")).await.unwrap();

        assert_eq!(svc.list_houses().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_replace_location_when_configured() {
        let svc = make_service();
        svc.create_house(name("Casa"), location("Paris")).await.unwrap();

        let updated = svc
            .configure_location(name("Casa"), location("Nice"))
            .await
            .unwrap();
        assert_eq!(updated.location.address.city(), "Nice");
        assert_eq!(
            svc.get_house(name("Casa")).await.unwrap().location.address.city(),
            "Nice"
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_configuring_missing_house() {
        let svc = make_service();
        let result = svc.configure_location(name("Ghost"), location("Nice")).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }
}
