//! Trip documents.

use reindexer_shared::{GeoPoint, TripDocument};
use reindexer_source::TripRow;

use crate::errors::PipelineError;

fn narrow(trip_id: u64, field: &str, value: u64) -> Result<u32, PipelineError> {
    u32::try_from(value).map_err(|_| {
        PipelineError::processor(format!("trip {}: {} {} out of range", trip_id, field, value))
    })
}

/// Build the searchable document of a trip row.
pub fn trip_document(row: TripRow) -> Result<TripDocument, PipelineError> {
    Ok(TripDocument {
        id: row.id,
        owner_id: row.owner_id,
        destination_id: row.destination_id,
        location: GeoPoint::new(row.latitude, row.longitude),
        arrival_date: row.arrival_date,
        departure_date: row.departure_date,
        description: row.description,
        max_travelers: narrow(row.id, "max_travelers", row.max_travelers)?,
        acl: narrow(row.id, "acl", row.acl)?,
        open: row.open,
        created: row.created_at,
        city: row.city,
        country: row.country,
        trip_days: narrow(row.id, "trip_days", row.trip_days)?,
    })
}
