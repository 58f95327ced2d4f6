use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bound of simulated temperatures, in degrees Celsius.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 20.0..=30.0;

/// Inclusive bound of simulated relative humidity, in percent.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 30.0..=90.0;

/// Inclusive bound of simulated people counts.
pub const PEOPLE_RANGE: RangeInclusive<u32> = 0..=50;

/// A stateless value source. Each call is independent of the previous one.
pub type Generator = fn() -> SensorValue;

/// The kinds of sensor this crate knows how to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    PeopleCounter,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::PeopleCounter,
    ];

    /// Name used in the `sensor` field of a reading and in default topics.
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::PeopleCounter => "people_counter",
        }
    }

    pub fn generator(&self) -> Generator {
        match self {
            SensorKind::Temperature => temperature_value,
            SensorKind::Humidity => humidity_value,
            SensorKind::PeopleCounter => people_counter_value,
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single numeric reading.
///
/// Serialized as a bare JSON number. When parsing, integer literals become
/// `Count` and everything else becomes `Measure`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    Count(u32),
    Measure(f64),
}

impl SensorValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            SensorValue::Count(n) => f64::from(n),
            SensorValue::Measure(v) => v,
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Count(n) => write!(f, "{n}"),
            SensorValue::Measure(v) => write!(f, "{v:.2}"),
        }
    }
}

pub fn temperature_value() -> SensorValue {
    temperature_from(&mut rand::thread_rng())
}

pub fn humidity_value() -> SensorValue {
    humidity_from(&mut rand::thread_rng())
}

pub fn people_counter_value() -> SensorValue {
    people_counter_from(&mut rand::thread_rng())
}

pub fn temperature_from<R: Rng + ?Sized>(rng: &mut R) -> SensorValue {
    SensorValue::Measure(round_to_hundredths(rng.gen_range(TEMPERATURE_RANGE)))
}

pub fn humidity_from<R: Rng + ?Sized>(rng: &mut R) -> SensorValue {
    SensorValue::Measure(round_to_hundredths(rng.gen_range(HUMIDITY_RANGE)))
}

pub fn people_counter_from<R: Rng + ?Sized>(rng: &mut R) -> SensorValue {
    SensorValue::Count(rng.gen_range(PEOPLE_RANGE))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
