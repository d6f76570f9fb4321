//! Room service: use-cases for adding rooms to houses.

use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::{HouseId, RoomId};
use smarthome_domain::room::{Dimensions, Room};

use crate::ports::{HouseRepository, RoomRepository};

/// Application service for room operations.
pub struct RoomService<RR, HR> {
    rooms: RR,
    houses: HR,
}

impl<RR: RoomRepository, HR: HouseRepository> RoomService<RR, HR> {
    /// Create a new service backed by the given repositories.
    pub fn new(rooms: RR, houses: HR) -> Self {
        Self { rooms, houses }
    }

    /// Add a room to an existing house.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when the house does not exist,
    /// [`SmartHomeError::Validation`] for a blank name, or a storage error.
    #[tracing::instrument(skip(self, name, dimensions))]
    pub async fn add_room(
        &self,
        house_id: HouseId,
        name: String,
        floor: i32,
        dimensions: Dimensions,
    ) -> Result<Room, SmartHomeError> {
        if self.houses.get_by_id(house_id.clone()).await?.is_none() {
            return Err(NotFoundError::new("House", house_id).into());
        }
        let room = Room::builder()
            .name(name)
            .house_id(house_id)
            .floor(floor)
            .dimensions(dimensions)
            .build()?;
        let room = self.rooms.create(room).await?;
        tracing::info!(room_id = %room.id, "room added");
        Ok(room)
    }

    /// Look up a room by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no room with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_room(&self, id: RoomId) -> Result<Room, SmartHomeError> {
        self.rooms
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| NotFoundError::new("Room", id).into())
    }

    /// List all rooms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, SmartHomeError> {
        self.rooms.get_all().await
    }

    /// List the rooms of a house.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms_of_house(&self, house_id: HouseId) -> Result<Vec<Room>, SmartHomeError> {
        self.rooms.find_by_house(house_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use smarthome_domain::error::ValidationError;
    use smarthome_domain::house::{Address, Gps, House, Location};

    async fn setup() -> (RoomService<InMemoryStore, InMemoryStore>, HouseId) {
        let store = InMemoryStore::default();
        let house_id = HouseId::parse("Casa").unwrap();
        let location = Location {
            address: Address::new("Rua Direita", "5", "4000-123", "Porto", "Portugal").unwrap(),
            gps: Gps::new(41.1, -8.6).unwrap(),
        };
        HouseRepository::create(&store, House::new(house_id.clone(), location))
            .await
            .unwrap();
        (RoomService::new(store.clone(), store), house_id)
    }

    fn dimensions() -> Dimensions {
        Dimensions::new(4.0, 5.0, 2.5).unwrap()
    }

    #[tokio::test]
    async fn should_add_room_to_existing_house() {
        let (svc, house_id) = setup().await;

        let room = svc
            .add_room(house_id.clone(), "Bedroom".to_string(), 1, dimensions())
            .await
            .unwrap();

        assert_eq!(svc.get_room(room.id.clone()).await.unwrap(), room);
        assert_eq!(svc.list_rooms_of_house(house_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_return_not_found_when_house_missing() {
        let (svc, _) = setup().await;
        let result = svc
            .add_room(
                HouseId::parse("Elsewhere").unwrap(),
                "Bedroom".to_string(),
                0,
                dimensions(),
            )
            .await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_room_with_blank_name() {
        let (svc, house_id) = setup().await;
        let result = svc.add_room(house_id, String::new(), 0, dimensions()).await;
        assert!(matches!(
            result,
            Err(SmartHomeError::Validation(ValidationError::Blank(_)))
        ));
    }

    #[tokio::test]
    async fn should_return_empty_list_when_no_rooms() {
        let (svc, _) = setup().await;
        assert!(svc.list_rooms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_room_missing() {
        let (svc, _) = setup().await;
        let result = svc.get_room(RoomId::new()).await;
        assert!(matches!(result, Err(SmartHomeError::NotFound(_))));
    }
}
