use rand::Rng;
use serde::Serialize;

/// One reading from the simulated ESP8266 field sensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SensorReading {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

const TEMPERATURE_C: (f64, f64) = (25.0, 40.0);
const HUMIDITY_PERCENT: (f64, f64) = (40.0, 80.0);

/// Draw a reading: temperature uniform in 25–40 °C, humidity in 40–80 %,
/// both rounded to two decimals.
pub fn simulate_esp8266<R: Rng>(rng: &mut R) -> SensorReading {
    let temperature = rng.gen_range(TEMPERATURE_C.0..=TEMPERATURE_C.1);
    let humidity = rng.gen_range(HUMIDITY_PERCENT.0..=HUMIDITY_PERCENT.1);
    SensorReading {
        temperature_celsius: round2(temperature),
        humidity_percent: round2(humidity),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn readings_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let r = simulate_esp8266(&mut rng);
            assert!((25.0..=40.0).contains(&r.temperature_celsius));
            assert!((40.0..=80.0).contains(&r.humidity_percent));
        }
    }

    #[test]
    fn readings_have_two_decimals() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let r = simulate_esp8266(&mut rng);
            let scaled = r.temperature_celsius * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn same_seed_same_reading() {
        let a = simulate_esp8266(&mut StdRng::seed_from_u64(3));
        let b = simulate_esp8266(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
