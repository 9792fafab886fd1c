//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, Repositories};

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api` next to a plain-text `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R: Repositories>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use carrental_app::services::additional_service_service::AdditionalServiceService;
    use carrental_app::services::car_service::CarService;
    use carrental_app::services::equipment_service::EquipmentService;
    use carrental_app::services::location_service::LocationService;
    use carrental_app::services::member_service::MemberService;
    use carrental_app::services::reservation_service::ReservationService;
    use carrental_domain::additional_service::AdditionalService;
    use carrental_domain::car::{Car, CarType, TransmissionType};
    use carrental_domain::equipment::Equipment;
    use carrental_domain::error::RentalError;
    use carrental_domain::id::{
        AdditionalServiceId, CarId, EquipmentId, LocationId, MemberId, ReservationId,
    };
    use carrental_domain::location::Location;
    use carrental_domain::member::Member;
    use carrental_domain::reservation::{Reservation, ReservationNumber};
    use carrental_domain::time::Timestamp;
    use tower::ServiceExt;

    /// Repositories that hold nothing: every lookup misses.
    struct Empty;

    impl carrental_app::ports::CarRepository for Empty {
        async fn create(&self, car: Car) -> Result<Car, RentalError> {
            Ok(car)
        }
        async fn get_by_id(&self, _id: CarId) -> Result<Option<Car>, RentalError> {
            Ok(None)
        }
        async fn get_by_barcode(&self, _barcode: &str) -> Result<Option<Car>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Car>, RentalError> {
            Ok(vec![])
        }
        async fn find_available(
            &self,
            _car_type: CarType,
            _transmission_type: TransmissionType,
        ) -> Result<Vec<Car>, RentalError> {
            Ok(vec![])
        }
        async fn find_rented(&self) -> Result<Vec<Car>, RentalError> {
            Ok(vec![])
        }
        async fn update(&self, car: Car) -> Result<Car, RentalError> {
            Ok(car)
        }
        async fn delete(&self, _id: CarId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    impl carrental_app::ports::MemberRepository for Empty {
        async fn create(&self, member: Member) -> Result<Member, RentalError> {
            Ok(member)
        }
        async fn get_by_id(&self, _id: MemberId) -> Result<Option<Member>, RentalError> {
            Ok(None)
        }
        async fn get_by_license_number(
            &self,
            _license_number: &str,
        ) -> Result<Option<Member>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Member>, RentalError> {
            Ok(vec![])
        }
        async fn update(&self, member: Member) -> Result<Member, RentalError> {
            Ok(member)
        }
        async fn delete(&self, _id: MemberId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    impl carrental_app::ports::LocationRepository for Empty {
        async fn create(&self, location: Location) -> Result<Location, RentalError> {
            Ok(location)
        }
        async fn get_by_id(&self, _id: LocationId) -> Result<Option<Location>, RentalError> {
            Ok(None)
        }
        async fn get_by_code(&self, _code: &str) -> Result<Option<Location>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Location>, RentalError> {
            Ok(vec![])
        }
        async fn update(&self, location: Location) -> Result<Location, RentalError> {
            Ok(location)
        }
        async fn delete(&self, _id: LocationId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    impl carrental_app::ports::EquipmentRepository for Empty {
        async fn create(&self, equipment: Equipment) -> Result<Equipment, RentalError> {
            Ok(equipment)
        }
        async fn get_by_id(&self, _id: EquipmentId) -> Result<Option<Equipment>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Equipment>, RentalError> {
            Ok(vec![])
        }
        async fn update(&self, equipment: Equipment) -> Result<Equipment, RentalError> {
            Ok(equipment)
        }
        async fn delete(&self, _id: EquipmentId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    impl carrental_app::ports::AdditionalServiceRepository for Empty {
        async fn create(
            &self,
            service: AdditionalService,
        ) -> Result<AdditionalService, RentalError> {
            Ok(service)
        }
        async fn get_by_id(
            &self,
            _id: AdditionalServiceId,
        ) -> Result<Option<AdditionalService>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<AdditionalService>, RentalError> {
            Ok(vec![])
        }
        async fn update(
            &self,
            service: AdditionalService,
        ) -> Result<AdditionalService, RentalError> {
            Ok(service)
        }
        async fn delete(&self, _id: AdditionalServiceId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    impl carrental_app::ports::ReservationRepository for Empty {
        async fn create(
            &self,
            reservation: Reservation,
            _car: &Car,
        ) -> Result<Reservation, RentalError> {
            Ok(reservation)
        }
        async fn get_by_id(&self, _id: ReservationId) -> Result<Option<Reservation>, RentalError> {
            Ok(None)
        }
        async fn get_by_number(
            &self,
            _number: &ReservationNumber,
        ) -> Result<Option<Reservation>, RentalError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Reservation>, RentalError> {
            Ok(vec![])
        }
        async fn find_created_between(
            &self,
            _start: Timestamp,
            _end: Timestamp,
        ) -> Result<Vec<Reservation>, RentalError> {
            Ok(vec![])
        }
        async fn update_status(
            &self,
            _reservation: &Reservation,
            _car: &Car,
        ) -> Result<(), RentalError> {
            Ok(())
        }
        async fn attach_equipment(
            &self,
            _id: ReservationId,
            _equipment_id: EquipmentId,
        ) -> Result<(), RentalError> {
            Ok(())
        }
        async fn attach_service(
            &self,
            _id: ReservationId,
            _service_id: AdditionalServiceId,
        ) -> Result<(), RentalError> {
            Ok(())
        }
        async fn delete(&self, _id: ReservationId) -> Result<bool, RentalError> {
            Ok(false)
        }
    }

    struct Stubs;

    impl Repositories for Stubs {
        type Cars = Empty;
        type Members = Empty;
        type Locations = Empty;
        type Equipment = Empty;
        type Services = Empty;
        type Reservations = Empty;
    }

    fn test_state() -> AppState<Stubs> {
        AppState::new(
            CarService::new(Empty),
            MemberService::new(Empty),
            LocationService::new(Empty),
            EquipmentService::new(Empty),
            AdditionalServiceService::new(Empty),
            ReservationService::new(Empty, Empty, Empty, Empty, Empty, Empty),
        )
    }

    async fn send(request: Request<Body>) -> StatusCode {
        build(test_state()).oneshot(request).await.unwrap().status()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        assert_eq!(send(get("/health")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_empty_collections() {
        for uri in [
            "/api/cars",
            "/api/cars/rented",
            "/api/members",
            "/api/locations",
            "/api/equipments",
            "/api/services",
            "/api/reservations",
        ] {
            assert_eq!(send(get(uri)).await, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn should_search_available_cars_by_query() {
        let status = send(get(
            "/api/cars/available?car_type=SUV&transmission_type=AUTOMATIC",
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_path_id_is_not_a_uuid() {
        assert_eq!(
            send(get("/api/cars/not-a-uuid")).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn should_return_not_found_when_reservation_is_missing() {
        assert_eq!(
            send(get("/api/reservations/RES00000000")).await,
            StatusCode::NOT_FOUND
        );

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/reservations/RES00000000")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(request).await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_date_range_is_inverted() {
        let status = send(get(
            "/api/reservations/between?start_date=2024-02-01T00:00:00&end_date=2024-01-01T00:00:00",
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_day_count_is_zero() {
        let body = serde_json::json!({
            "car_barcode": "CAR01",
            "member_id": MemberId::new().to_string(),
            "pick_up_location_code": "IST",
            "drop_off_location_code": "IST",
            "day_count": 0,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/api/reservations")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        assert_eq!(send(request).await, StatusCode::BAD_REQUEST);
    }
}
