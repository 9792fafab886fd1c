//! Car: a rentable vehicle identified externally by its barcode.

mod kind;
mod status;

pub use kind::{CarType, TransmissionType};
pub use status::CarStatus;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConflictError, RentalError, ValidationError};
use crate::id::CarId;

/// A car in the rental fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub barcode: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub passenger_capacity: u32,
    pub mileage: u32,
    pub daily_price: Decimal,
    pub transmission_type: TransmissionType,
    pub car_type: CarType,
    pub status: CarStatus,
}

impl Car {
    /// Create a builder for constructing a [`Car`].
    #[must_use]
    pub fn builder() -> CarBuilder {
        CarBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when the barcode, brand or model is
    /// empty, or when the daily price is negative.
    pub fn validate(&self) -> Result<(), RentalError> {
        if self.barcode.trim().is_empty() {
            return Err(ValidationError::EmptyField("barcode").into());
        }
        if self.brand.trim().is_empty() {
            return Err(ValidationError::EmptyField("brand").into());
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyField("model").into());
        }
        if self.daily_price.is_sign_negative() {
            return Err(ValidationError::NegativePrice("daily_price").into());
        }
        Ok(())
    }

    /// Whether a new reservation may take this car.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }

    /// Hand the car to a reservation: `AVAILABLE` → `RESERVED`.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::CarUnavailable`] when the car is already held.
    pub fn reserve(&mut self) -> Result<(), RentalError> {
        if !self.is_available() {
            return Err(ConflictError::CarUnavailable {
                barcode: self.barcode.clone(),
                status: self.status.to_string(),
            }
            .into());
        }
        self.status = CarStatus::Reserved;
        Ok(())
    }

    /// Take the car back from a reservation. Releasing an available car is a no-op.
    pub fn release(&mut self) {
        self.status = CarStatus::Available;
    }
}

/// Step-by-step builder for [`Car`].
#[derive(Debug, Default)]
pub struct CarBuilder {
    id: Option<CarId>,
    barcode: Option<String>,
    license_plate: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    passenger_capacity: Option<u32>,
    mileage: Option<u32>,
    daily_price: Option<Decimal>,
    transmission_type: Option<TransmissionType>,
    car_type: Option<CarType>,
    status: Option<CarStatus>,
}

impl CarBuilder {
    #[must_use]
    pub fn id(mut self, id: CarId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    #[must_use]
    pub fn license_plate(mut self, license_plate: impl Into<String>) -> Self {
        self.license_plate = Some(license_plate.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn passenger_capacity(mut self, passenger_capacity: u32) -> Self {
        self.passenger_capacity = Some(passenger_capacity);
        self
    }

    #[must_use]
    pub fn mileage(mut self, mileage: u32) -> Self {
        self.mileage = Some(mileage);
        self
    }

    #[must_use]
    pub fn daily_price(mut self, daily_price: Decimal) -> Self {
        self.daily_price = Some(daily_price);
        self
    }

    #[must_use]
    pub fn transmission_type(mut self, transmission_type: TransmissionType) -> Self {
        self.transmission_type = Some(transmission_type);
        self
    }

    #[must_use]
    pub fn car_type(mut self, car_type: CarType) -> Self {
        self.car_type = Some(car_type);
        self
    }

    /// Only storage and tests set this; new cars start `AVAILABLE`.
    #[must_use]
    pub fn status(mut self, status: CarStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Consume the builder, validate, and return a [`Car`].
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if the transmission or car type is
    /// missing, or if [`Car::validate`] fails.
    pub fn build(self) -> Result<Car, RentalError> {
        let car = Car {
            id: self.id.unwrap_or_default(),
            barcode: self.barcode.unwrap_or_default(),
            license_plate: self.license_plate.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            passenger_capacity: self.passenger_capacity.unwrap_or_default(),
            mileage: self.mileage.unwrap_or_default(),
            daily_price: self.daily_price.unwrap_or_default(),
            transmission_type: self
                .transmission_type
                .ok_or(ValidationError::MissingField("transmission_type"))?,
            car_type: self
                .car_type
                .ok_or(ValidationError::MissingField("car_type"))?,
            status: self.status.unwrap_or_default(),
        };
        car.validate()?;
        Ok(car)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_car() -> Car {
        Car::builder()
            .barcode("CAR01")
            .license_plate("34TEST34")
            .brand("Audi")
            .model("A5")
            .passenger_capacity(4)
            .mileage(5000)
            .daily_price(Decimal::new(5000, 2))
            .transmission_type(TransmissionType::Manual)
            .car_type(CarType::Luxury)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_available_car_when_fields_provided() {
        let car = valid_car();
        assert_eq!(car.barcode, "CAR01");
        assert_eq!(car.status, CarStatus::Available);
        assert_eq!(car.daily_price.to_string(), "50.00");
    }

    #[test]
    fn should_return_validation_error_when_barcode_is_empty() {
        let result = Car::builder()
            .brand("Audi")
            .model("A5")
            .transmission_type(TransmissionType::Manual)
            .car_type(CarType::Luxury)
            .build();
        assert!(matches!(
            result,
            Err(RentalError::Validation(ValidationError::EmptyField(
                "barcode"
            )))
        ));
    }

    #[test]
    fn should_return_validation_error_when_car_type_missing() {
        let result = Car::builder()
            .barcode("CAR01")
            .brand("Audi")
            .model("A5")
            .transmission_type(TransmissionType::Manual)
            .build();
        assert!(matches!(
            result,
            Err(RentalError::Validation(ValidationError::MissingField(
                "car_type"
            )))
        ));
    }

    #[test]
    fn should_reject_negative_daily_price() {
        let mut car = valid_car();
        car.daily_price = Decimal::new(-1, 0);
        assert!(matches!(
            car.validate(),
            Err(RentalError::Validation(ValidationError::NegativePrice(_)))
        ));
    }

    #[test]
    fn should_move_to_reserved_when_reserving_available_car() {
        let mut car = valid_car();
        car.reserve().unwrap();
        assert_eq!(car.status, CarStatus::Reserved);
        assert!(!car.is_available());
    }

    #[test]
    fn should_refuse_to_reserve_car_twice() {
        let mut car = valid_car();
        car.reserve().unwrap();

        let result = car.reserve();
        assert!(matches!(
            result,
            Err(RentalError::Conflict(ConflictError::CarUnavailable { .. }))
        ));
        assert_eq!(car.status, CarStatus::Reserved);
    }

    #[test]
    fn should_become_available_when_released() {
        let mut car = valid_car();
        car.status = CarStatus::Loaned;
        car.release();
        assert!(car.is_available());
    }
}
