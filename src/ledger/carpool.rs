use crate::models::{CarpoolEntry, CarpoolEntryId, CarpoolKind, CarpoolStatus};

use super::LedgerError;

/// Seats a driver still offers once matched passengers are seated. Never negative.
pub fn remaining_seats(driver: &CarpoolEntry, entries: &[CarpoolEntry]) -> u32 {
    let seats_used: u32 = driver
        .matched_with
        .iter()
        .map(|passenger_id| {
            entries
                .iter()
                .find(|entry| entry.id == *passenger_id)
                .map(|passenger| passenger.seats.max(1))
                .unwrap_or(1)
        })
        .sum();

    driver.seats.max(1).saturating_sub(seats_used)
}

pub fn available_drivers(entries: &[CarpoolEntry]) -> Vec<&CarpoolEntry> {
    entries
        .iter()
        .filter(|entry| entry.kind == CarpoolKind::Driver && remaining_seats(entry, entries) > 0)
        .collect()
}

pub fn pending_requests<'a>(
    driver: &CarpoolEntryId,
    entries: &'a [CarpoolEntry],
) -> Vec<&'a CarpoolEntry> {
    entries
        .iter()
        .filter(|entry| {
            entry.kind == CarpoolKind::Passenger
                && entry.status == CarpoolStatus::Pending
                && entry.requested_driver.as_ref() == Some(driver)
        })
        .collect()
}

fn find<'a>(
    entries: &'a [CarpoolEntry],
    id: &CarpoolEntryId,
    kind: CarpoolKind,
) -> Result<&'a CarpoolEntry, LedgerError> {
    entries
        .iter()
        .find(|entry| entry.id == *id && entry.kind == kind)
        .ok_or_else(|| LedgerError::CarpoolEntryNotFound(id.clone()))
}

fn find_mut<'a>(
    entries: &'a mut [CarpoolEntry],
    id: &CarpoolEntryId,
) -> Option<&'a mut CarpoolEntry> {
    entries.iter_mut().find(|entry| entry.id == *id)
}

/// Removes an entry and unlinks everything that pointed at it.
///
/// Passengers of a removed driver become available again. A removed passenger
/// leaves its driver's list. Returns false when the entry is absent.
pub(super) fn remove(entries: &mut Vec<CarpoolEntry>, id: &CarpoolEntryId) -> bool {
    let Some(position) = entries.iter().position(|entry| entry.id == *id) else {
        return false;
    };
    let removed = entries.remove(position);

    match removed.kind {
        CarpoolKind::Driver => {
            for passenger in entries.iter_mut().filter(|entry| {
                entry.kind == CarpoolKind::Passenger && entry.requested_driver.as_ref() == Some(id)
            }) {
                passenger.status = CarpoolStatus::Available;
                passenger.requested_driver = None;
                passenger.matched_with.clear();
            }
        }

        CarpoolKind::Passenger => {
            if let Some(driver) = removed
                .requested_driver
                .as_ref()
                .and_then(|driver| find_mut(entries, driver))
            {
                driver.matched_with.retain(|passenger| passenger != id);
            }
        }
    }

    true
}

pub(super) fn request_seat(
    entries: &mut [CarpoolEntry],
    passenger: &CarpoolEntryId,
    driver: &CarpoolEntryId,
) -> Result<(), LedgerError> {
    find(entries, driver, CarpoolKind::Driver)?;
    let current = find(entries, passenger, CarpoolKind::Passenger)?;

    if current.status == CarpoolStatus::Matched && current.requested_driver.as_ref() == Some(driver)
    {
        return Ok(());
    }

    // A passenger rides with one driver at a time.
    if let Some(previous) = current.requested_driver.clone() {
        if let Some(previous) = find_mut(entries, &previous) {
            previous.matched_with.retain(|id| id != passenger);
        }
    }

    if let Some(passenger) = find_mut(entries, passenger) {
        passenger.matched_with.clear();
        passenger.status = CarpoolStatus::Pending;
        passenger.requested_driver = Some(driver.clone());
    }

    Ok(())
}

pub(super) fn accept_passenger(
    entries: &mut [CarpoolEntry],
    driver: &CarpoolEntryId,
    passenger: &CarpoolEntryId,
) -> Result<(), LedgerError> {
    let driver_entry = find(entries, driver, CarpoolKind::Driver)?;
    let passenger_entry = find(entries, passenger, CarpoolKind::Passenger)?;

    if driver_entry.matched_with.contains(passenger) {
        return Ok(());
    }

    let remaining = remaining_seats(driver_entry, entries);
    let needed = passenger_entry.seats.max(1);
    if remaining < needed {
        return Err(LedgerError::NotEnoughSeats { remaining, needed });
    }

    if let Some(driver_entry) = find_mut(entries, driver) {
        driver_entry.matched_with.push(passenger.clone());
    }
    if let Some(passenger_entry) = find_mut(entries, passenger) {
        passenger_entry.status = CarpoolStatus::Matched;
        passenger_entry.requested_driver = Some(driver.clone());
        passenger_entry.matched_with = vec![driver.clone()];
    }

    Ok(())
}

pub(super) fn reject_passenger(
    entries: &mut [CarpoolEntry],
    driver: &CarpoolEntryId,
    passenger: &CarpoolEntryId,
) -> Result<(), LedgerError> {
    find(entries, driver, CarpoolKind::Driver)?;
    find(entries, passenger, CarpoolKind::Passenger)?;

    if let Some(driver_entry) = find_mut(entries, driver) {
        driver_entry.matched_with.retain(|id| id != passenger);
    }
    reset_passenger(entries, passenger);

    Ok(())
}

pub(super) fn cancel_request(
    entries: &mut [CarpoolEntry],
    passenger: &CarpoolEntryId,
) -> Result<(), LedgerError> {
    let driver = find(entries, passenger, CarpoolKind::Passenger)?
        .requested_driver
        .clone();

    if let Some(driver_entry) = driver.as_ref().and_then(|driver| find_mut(entries, driver)) {
        driver_entry.matched_with.retain(|id| id != passenger);
    }
    reset_passenger(entries, passenger);

    Ok(())
}

fn reset_passenger(entries: &mut [CarpoolEntry], passenger: &CarpoolEntryId) {
    if let Some(passenger) = find_mut(entries, passenger) {
        passenger.status = CarpoolStatus::Available;
        passenger.requested_driver = None;
        passenger.matched_with.clear();
    }
}
