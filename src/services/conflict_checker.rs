//! Detección de conflictos de reserva de recursos
//!
//! Dado un conjunto de recursos (conductor, camión, remolque) y una ventana
//! temporal propuesta, busca trips no cancelados que compartan algún recurso
//! y se solapen en el tiempo. Sin efectos secundarios: el caller decide qué
//! hacer con los conflictos.

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::AppError;

/// Recursos reservados por un trip
#[derive(Debug, Clone, Copy)]
pub struct ResourceIds {
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    pub trailer_id: Uuid,
}

/// Solape de ventanas semiabiertas [start, end).
///
/// Un trip que termina exactamente cuando otro empieza NO es conflicto.
pub fn windows_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Devuelve los ids de los trips en conflicto con la propuesta.
///
/// El repositorio filtra por recurso compartido y estado; el test de solape
/// semiabierto se aplica acá, donde queda cubierto por tests unitarios.
/// Acepta tanto el pool como una transacción abierta, para que create/update
/// puedan re-validar dentro de su transacción SERIALIZABLE.
pub async fn find_conflicts<'e>(
    executor: impl PgExecutor<'e>,
    resources: ResourceIds,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    exclude_trip_id: Option<Uuid>,
) -> Result<Vec<Uuid>, AppError> {
    let candidates = TripRepository::find_sharing_resources(
        executor,
        resources.driver_id,
        resources.truck_id,
        resources.trailer_id,
        exclude_trip_id,
    )
    .await?;

    Ok(candidates
        .into_iter()
        .filter(|trip| windows_overlap(trip.start_date, trip.end_date, window_start, window_end))
        .map(|trip| trip.id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_contained_window_overlaps() {
        // Trip A: 01T00:00 – 02T00:00, propuesta B: 01T12:00 – 01T18:00
        assert!(windows_overlap(dt(1, 0), dt(2, 0), dt(1, 12), dt(1, 18)));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(windows_overlap(dt(1, 0), dt(2, 0), dt(1, 20), dt(2, 12)));
        assert!(windows_overlap(dt(1, 20), dt(2, 12), dt(1, 0), dt(2, 0)));
    }

    #[test]
    fn test_touching_boundary_is_not_a_conflict() {
        // Trip A termina en 02T00:00, propuesta C empieza en 02T00:00
        assert!(!windows_overlap(dt(1, 0), dt(2, 0), dt(2, 0), dt(3, 0)));
        assert!(!windows_overlap(dt(2, 0), dt(3, 0), dt(1, 0), dt(2, 0)));
    }

    #[test]
    fn test_disjoint_windows() {
        assert!(!windows_overlap(dt(1, 0), dt(1, 6), dt(2, 0), dt(2, 6)));
    }

    #[test]
    fn test_identical_windows_overlap() {
        assert!(windows_overlap(dt(1, 0), dt(2, 0), dt(1, 0), dt(2, 0)));
    }
}
