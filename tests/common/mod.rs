//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use office_energy_report::error::SinkError;
use office_energy_report::inventory::{DeviceRecord, Inventory, RoomRecord, TariffRate};
use office_energy_report::io::DocumentSink;
use office_energy_report::layout::Page;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed generation timestamp (17 May 2024, 09:30).
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap_or_default()
}

/// One room "Office" with one device (100 W, 10 h/day, qty 2), tariff 1000.
pub fn example_one() -> Inventory {
    Inventory {
        rooms: vec![RoomRecord::new(1, "Office")],
        devices: vec![DeviceRecord::new(1, 1, "PC", 100.0, 10.0, 2)],
        tariff: Some(TariffRate::new(1000.0)),
    }
}

/// A small office: four rooms, mixed load classes, one always-on server.
pub fn small_office() -> Inventory {
    Inventory {
        rooms: vec![
            RoomRecord::new(1, "Open Plan").with_description("Main work area"),
            RoomRecord::new(2, "Server Room"),
            RoomRecord::new(3, "Pantry").with_description("Kitchen"),
            RoomRecord::new(4, "Meeting Room"),
        ],
        devices: vec![
            DeviceRecord::new(1, 1, "Desktop PC", 150.0, 8.0, 10),
            DeviceRecord::new(2, 1, "LED Panel", 36.0, 10.0, 12),
            DeviceRecord::new(3, 1, "Air Conditioner", 1200.0, 9.0, 2),
            DeviceRecord::new(4, 1, "Printer", 300.0, 2.0, 1),
            DeviceRecord::new(5, 1, "Router", 12.0, 24.0, 1),
            DeviceRecord::new(6, 2, "Server Rack", 2400.0, 24.0, 1),
            DeviceRecord::new(7, 2, "Air Conditioner", 1200.0, 24.0, 1),
            DeviceRecord::new(8, 3, "Refrigerator", 150.0, 24.0, 1),
            DeviceRecord::new(9, 3, "Microwave", 1000.0, 0.5, 1),
            DeviceRecord::new(10, 4, "Projector", 250.0, 3.0, 1),
        ],
        tariff: Some(TariffRate::new(1444.70)),
    }
}

/// Random inventory with `rooms` rooms and `devices` devices.
///
/// Power is drawn from a short list so equal daily energies occur.
pub fn random_inventory(seed: u64, rooms: u64, devices: u64) -> Inventory {
    const POWERS: [f64; 8] = [5.0, 60.0, 100.0, 200.0, 800.0, 1500.0, 2000.0, 2500.0];
    let mut rng = StdRng::seed_from_u64(seed);
    let rooms_vec = (1..=rooms)
        .map(|id| RoomRecord::new(id, format!("Room {id}")))
        .collect();
    let devices_vec = (1..=devices)
        .map(|id| {
            let power = POWERS[rng.random_range(0..POWERS.len())];
            let hours = f64::from(rng.random_range(0..=24_u32));
            let quantity = rng.random_range(1..=4_i64);
            let room_id = rng.random_range(1..=rooms.max(1));
            DeviceRecord::new(id, room_id, format!("Device {id}"), power, hours, quantity)
        })
        .collect();
    Inventory {
        rooms: rooms_vec,
        devices: devices_vec,
        tariff: Some(TariffRate::new(f64::from(rng.random_range(500..=2000_u32)))),
    }
}

/// Sink that always fails with an I/O error.
pub struct FailingSink;

impl DocumentSink for FailingSink {
    fn write(&mut self, _pages: &[Page]) -> Result<String, SinkError> {
        Err(SinkError::Io(std::io::Error::other("disk full")))
    }
}
