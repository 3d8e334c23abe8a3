use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::models::{Booking, BookingStatus};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn booking_from_row(row: &Row) -> rusqlite::Result<Booking> {
    let status_str: String = row.get(4)?;
    let created_at_str: String = row.get(5)?;
    let updated_at_str: String = row.get(6)?;

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        vehicle: row.get(2)?,
        date: row.get(3)?,
        status: BookingStatus::from_str(&status_str),
        created_at: NaiveDateTime::parse_from_str(&created_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
        updated_at: NaiveDateTime::parse_from_str(&updated_at_str, DATETIME_FMT)
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    })
}

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format(DATETIME_FMT).to_string();
    let updated_at = booking.updated_at.format(DATETIME_FMT).to_string();

    conn.execute(
        "INSERT INTO bookings (id, name, vehicle, date, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            booking.id,
            booking.name,
            booking.vehicle,
            booking.date,
            booking.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

/// Partial update of the status column only. Updating an id that does not
/// exist affects zero rows and is not an error.
pub fn set_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<usize> {
    let updated_at = Utc::now().naive_utc().format(DATETIME_FMT).to_string();
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), updated_at, id],
    )?;
    Ok(count)
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, vehicle, date, status, created_at, updated_at
         FROM bookings WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], booking_from_row) {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_bookings(
    conn: &Connection,
    status_filter: Option<&str>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut bookings = Vec::new();

    match status_filter {
        Some(status) => {
            let mut stmt = conn.prepare(
                "SELECT id, name, vehicle, date, status, created_at, updated_at
                 FROM bookings WHERE status = ?1
                 ORDER BY created_at DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![status, limit], booking_from_row)?;
            for row in rows {
                bookings.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, name, vehicle, date, status, created_at, updated_at
                 FROM bookings
                 ORDER BY created_at DESC LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], booking_from_row)?;
            for row in rows {
                bookings.push(row?);
            }
        }
    }

    Ok(bookings)
}
