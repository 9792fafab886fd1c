//! In-memory store implementing every repository port, shared by service tests.
//!
//! Clones share the same tables, so one store can back several services at
//! once the way a single database backs them in production.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use carrental_domain::additional_service::AdditionalService;
use carrental_domain::car::{Car, CarStatus, CarType, TransmissionType};
use carrental_domain::equipment::Equipment;
use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::{
    AdditionalServiceId, CarId, EquipmentId, LocationId, MemberId, ReservationId,
};
use carrental_domain::location::Location;
use carrental_domain::member::Member;
use carrental_domain::reservation::{Reservation, ReservationNumber, ReservationStatus};
use carrental_domain::time::Timestamp;

use crate::ports::{
    AdditionalServiceRepository, CarRepository, EquipmentRepository, LocationRepository,
    MemberRepository, ReservationRepository,
};

#[derive(Default)]
struct Tables {
    cars: HashMap<CarId, Car>,
    members: HashMap<MemberId, Member>,
    locations: HashMap<LocationId, Location>,
    equipment: HashMap<EquipmentId, Equipment>,
    services: HashMap<AdditionalServiceId, AdditionalService>,
    reservations: HashMap<ReservationId, Reservation>,
}

impl Tables {
    fn in_use(entity: &'static str, id: impl ToString) -> RentalError {
        ConflictError::InUse {
            entity,
            id: id.to_string(),
        }
        .into()
    }

    fn duplicate(entity: &'static str, field: &'static str, value: &str) -> RentalError {
        ConflictError::Duplicate {
            entity,
            field,
            value: value.to_string(),
        }
        .into()
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    pub(crate) fn car(&self, id: CarId) -> Option<Car> {
        self.tables.lock().unwrap().cars.get(&id).cloned()
    }

    /// Stand in for a reservation write that moved the car.
    pub(crate) fn set_car_status(&self, id: CarId, status: CarStatus) {
        if let Some(car) = self.tables.lock().unwrap().cars.get_mut(&id) {
            car.status = status;
        }
    }

    pub(crate) fn reservation_count(&self) -> usize {
        self.tables.lock().unwrap().reservations.len()
    }

    pub(crate) fn insert_reservation(&self, reservation: Reservation) {
        self.tables
            .lock()
            .unwrap()
            .reservations
            .insert(reservation.id, reservation);
    }
}

fn sorted<T>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> String) -> Vec<T> {
    let mut out: Vec<T> = values.collect();
    out.sort_by_key(key);
    out
}

impl CarRepository for InMemoryStore {
    fn create(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.cars.values().any(|c| c.barcode == car.barcode) {
            Err(Tables::duplicate("Car", "barcode", &car.barcode))
        } else {
            tables.cars.insert(car.id, car.clone());
            Ok(car)
        };
        async { result }
    }

    fn get_by_id(&self, id: CarId) -> impl Future<Output = Result<Option<Car>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().cars.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_by_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<Option<Car>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.cars.values().find(|c| c.barcode == barcode).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(tables.cars.values().cloned(), |c| c.barcode.clone());
        async { Ok(result) }
    }

    fn find_available(
        &self,
        car_type: CarType,
        transmission_type: TransmissionType,
    ) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(
            tables
                .cars
                .values()
                .filter(|c| {
                    c.car_type == car_type
                        && c.transmission_type == transmission_type
                        && c.status == CarStatus::Available
                })
                .cloned(),
            |c| c.barcode.clone(),
        );
        async { Ok(result) }
    }

    fn find_rented(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(
            tables.cars.values().filter(|c| c.status.is_rented()).cloned(),
            |c| c.barcode.clone(),
        );
        async { Ok(result) }
    }

    fn update(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables
            .cars
            .values()
            .any(|c| c.barcode == car.barcode && c.id != car.id)
        {
            Err(Tables::duplicate("Car", "barcode", &car.barcode))
        } else if let Some(stored) = tables.cars.get_mut(&car.id) {
            let status = stored.status;
            *stored = Car { status, ..car };
            Ok(stored.clone())
        } else {
            Err(RentalError::from(NotFoundError {
                entity: "Car",
                id: car.id.to_string(),
            }))
        };
        async { result }
    }

    fn delete(&self, id: CarId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.reservations.values().any(|r| r.car_id == id) {
            Err(Tables::in_use("Car", id))
        } else {
            Ok(tables.cars.remove(&id).is_some())
        };
        async { result }
    }
}

impl MemberRepository for InMemoryStore {
    fn create(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables
            .members
            .values()
            .any(|m| m.driving_license_number == member.driving_license_number)
        {
            Err(Tables::duplicate(
                "Member",
                "driving_license_number",
                &member.driving_license_number,
            ))
        } else {
            tables.members.insert(member.id, member.clone());
            Ok(member)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: MemberId,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().members.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_by_license_number(
        &self,
        license_number: &str,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables
            .members
            .values()
            .find(|m| m.driving_license_number == license_number)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Member>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(tables.members.values().cloned(), |m| m.name.clone());
        async { Ok(result) }
    }

    fn update(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.members.insert(member.id, member.clone());
        async { Ok(member) }
    }

    fn delete(&self, id: MemberId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.reservations.values().any(|r| r.member_id == id) {
            Err(Tables::in_use("Member", id))
        } else {
            Ok(tables.members.remove(&id).is_some())
        };
        async { result }
    }
}

impl LocationRepository for InMemoryStore {
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables.locations.values().any(|l| l.code == location.code) {
            Err(Tables::duplicate("Location", "code", &location.code))
        } else {
            tables.locations.insert(location.id, location.clone());
            Ok(location)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().locations.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables.locations.values().find(|l| l.code == code).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(tables.locations.values().cloned(), |l| l.code.clone());
        async { Ok(result) }
    }

    fn update(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables
            .locations
            .values()
            .any(|l| l.code == location.code && l.id != location.id)
        {
            Err(Tables::duplicate("Location", "code", &location.code))
        } else {
            tables.locations.insert(location.id, location.clone());
            Ok(location)
        };
        async { result }
    }

    fn delete(&self, id: LocationId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let referenced = tables
            .reservations
            .values()
            .any(|r| r.pick_up_location_id == id || r.drop_off_location_id == id);
        let result = if referenced {
            Err(Tables::in_use("Location", id))
        } else {
            Ok(tables.locations.remove(&id).is_some())
        };
        async { result }
    }
}

impl EquipmentRepository for InMemoryStore {
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.equipment.insert(equipment.id, equipment.clone());
        async { Ok(equipment) }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().equipment.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(tables.equipment.values().cloned(), |e| e.name.clone());
        async { Ok(result) }
    }

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.equipment.insert(equipment.id, equipment.clone());
        async { Ok(equipment) }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables
            .reservations
            .values()
            .any(|r| r.equipment_ids.contains(&id))
        {
            Err(Tables::in_use("Equipment", id))
        } else {
            Ok(tables.equipment.remove(&id).is_some())
        };
        async { result }
    }
}

impl AdditionalServiceRepository for InMemoryStore {
    fn create(
        &self,
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.services.insert(service.id, service.clone());
        async { Ok(service) }
    }

    fn get_by_id(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<Option<AdditionalService>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().services.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<AdditionalService>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = sorted(tables.services.values().cloned(), |s| s.name.clone());
        async { Ok(result) }
    }

    fn update(
        &self,
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        tables.services.insert(service.id, service.clone());
        async { Ok(service) }
    }

    fn delete(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let result = if tables
            .reservations
            .values()
            .any(|r| r.service_ids.contains(&id))
        {
            Err(Tables::in_use("AdditionalService", id))
        } else {
            Ok(tables.services.remove(&id).is_some())
        };
        async { result }
    }
}

impl ReservationRepository for InMemoryStore {
    fn create(
        &self,
        reservation: Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<Reservation, RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let stored_status = tables.cars.get(&car.id).map(|c| c.status);
        let result = if stored_status == Some(CarStatus::Available) {
            tables.cars.insert(car.id, car.clone());
            tables.reservations.insert(reservation.id, reservation.clone());
            Ok(reservation)
        } else {
            Err(ConflictError::CarUnavailable {
                barcode: car.barcode.clone(),
                status: stored_status.unwrap_or(car.status).to_string(),
            }
            .into())
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send {
        let result = self.tables.lock().unwrap().reservations.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_by_number(
        &self,
        number: &ReservationNumber,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let result = tables
            .reservations
            .values()
            .find(|r| &r.number == number)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let mut result: Vec<Reservation> = tables.reservations.values().cloned().collect();
        result.sort_by_key(|r| r.created_at);
        async { Ok(result) }
    }

    fn find_created_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send {
        let tables = self.tables.lock().unwrap();
        let mut result: Vec<Reservation> = tables
            .reservations
            .values()
            .filter(|r| r.created_at >= start && r.created_at <= end)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.created_at);
        async { Ok(result) }
    }

    fn update_status(
        &self,
        reservation: &Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        let current = tables.reservations.get(&reservation.id).map(|r| r.status);
        let result = if current == Some(ReservationStatus::Active) {
            if let Some(stored) = tables.reservations.get_mut(&reservation.id) {
                stored.status = reservation.status;
            }
            if let Some(stored) = tables.cars.get_mut(&car.id) {
                stored.status = car.status;
            }
            Ok(())
        } else {
            Err(RentalError::from(ConflictError::InvalidTransition {
                entity: "Reservation",
                from: current.map_or_else(|| "DELETED".to_string(), |s| s.to_string()),
                to: reservation.status.to_string(),
            }))
        };
        async { result }
    }

    fn attach_equipment(
        &self,
        id: ReservationId,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        if let Some(stored) = tables.reservations.get_mut(&id) {
            stored.equipment_ids.insert(equipment_id);
        }
        async { Ok(()) }
    }

    fn attach_service(
        &self,
        id: ReservationId,
        service_id: AdditionalServiceId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let mut tables = self.tables.lock().unwrap();
        if let Some(stored) = tables.reservations.get_mut(&id) {
            stored.service_ids.insert(service_id);
        }
        async { Ok(()) }
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let removed = self.tables.lock().unwrap().reservations.remove(&id).is_some();
        async move { Ok(removed) }
    }
}
