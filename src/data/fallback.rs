//! Mock weather used whenever a live source is unavailable
//!
//! The current-weather mock is a fixed record; the forecast mock cycles a
//! fixed phrase list with bounded random temperatures and humidities.

use chrono::NaiveDate;
use rand::Rng;

use super::forecast::{
    day_labels, day_offset, forecast_icon, random_in, HUMIDITY_HIGH_RANGE, HUMIDITY_LOW_RANGE,
    TEMP_HIGH_RANGE, TEMP_LOW_RANGE,
};
use super::normalize::{is_suitable, visibility_km};
use super::{
    Condition, CurrentWeather, ForecastDay, Metric, WeatherIcon, WeatherReport, FORECAST_DAYS,
};

/// One phrase per mocked day
const MOCK_PHRASES: [&str; FORECAST_DAYS] = [
    "Partly Cloudy",
    "Cloudy",
    "Light Showers",
    "Fair",
    "Thundery Showers",
    "Partly Cloudy",
    "Fair",
];

const MOCK_WINDS: [&str; 2] = ["Light", "Moderate"];

/// Produces complete substitute weather data
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    location: String,
}

impl FallbackGenerator {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// The fixed current-weather record built from the metric defaults
    pub fn mock_current(&self) -> CurrentWeather {
        let temperature = Metric::Temperature.default_value();
        let wind_speed = Metric::WindSpeed.default_value();
        let rainfall = Metric::Rainfall.default_value();

        CurrentWeather {
            temperature: temperature as i32,
            description: Condition::PartlyCloudy.description().to_string(),
            icon: WeatherIcon::PartlyCloudy,
            humidity: Metric::Humidity.default_value() as u8,
            wind_speed,
            wind_direction: Metric::WindDirection.default_value(),
            visibility: visibility_km(rainfall),
            location: self.location.clone(),
            rainfall,
            suitable: is_suitable(temperature, wind_speed, rainfall),
        }
    }

    /// Seven mocked days starting at `today`
    pub fn mock_forecast<R: Rng>(
        &self,
        today: NaiveDate,
        rng: &mut R,
    ) -> [ForecastDay; FORECAST_DAYS] {
        std::array::from_fn(|i| {
            let date = day_offset(today, i);
            let (day_name, date_label) = day_labels(date);
            let text = MOCK_PHRASES[i];
            ForecastDay {
                date,
                day_name,
                date_label,
                forecast_text: text.to_string(),
                temp_high: random_in(rng, TEMP_HIGH_RANGE),
                temp_low: random_in(rng, TEMP_LOW_RANGE),
                humidity_high: random_in(rng, HUMIDITY_HIGH_RANGE),
                humidity_low: random_in(rng, HUMIDITY_LOW_RANGE),
                wind: MOCK_WINDS[rng.gen_range(0..MOCK_WINDS.len())].to_string(),
                icon: forecast_icon(Some(text)),
            }
        })
    }

    /// A fully mocked report
    pub fn mock_report<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> WeatherReport {
        WeatherReport {
            current: self.mock_current(),
            forecast: self.mock_forecast(today, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 29).unwrap()
    }

    #[test]
    fn test_mock_current_is_fixed_record() {
        let current = FallbackGenerator::new("Singapore").mock_current();
        assert_eq!(
            current,
            CurrentWeather {
                temperature: 28,
                description: "Partly cloudy".to_string(),
                icon: WeatherIcon::PartlyCloudy,
                humidity: 75,
                wind_speed: 2.5,
                wind_direction: 180.0,
                visibility: 10.0,
                location: "Singapore".to_string(),
                rainfall: 0.0,
                suitable: true,
            }
        );
    }

    #[test]
    fn test_mock_current_uses_configured_location() {
        let current = FallbackGenerator::new("East Coast Park").mock_current();
        assert_eq!(current.location, "East Coast Park");
    }

    #[test]
    fn test_mock_forecast_phrases_and_icons() {
        let mut rng = StdRng::seed_from_u64(11);
        let forecast = FallbackGenerator::new("Singapore").mock_forecast(today(), &mut rng);

        let texts: Vec<&str> = forecast.iter().map(|d| d.forecast_text.as_str()).collect();
        assert_eq!(texts, MOCK_PHRASES);
        assert_eq!(forecast[3].icon, WeatherIcon::Clear);
        assert_eq!(forecast[4].icon, WeatherIcon::Thunderstorm);
    }

    #[test]
    fn test_mock_forecast_dates_cross_year_boundary() {
        let mut rng = StdRng::seed_from_u64(2);
        let forecast = FallbackGenerator::new("Singapore").mock_forecast(today(), &mut rng);

        assert_eq!(forecast[0].day_name, "Sun");
        assert_eq!(forecast[0].date_label, "Dec 29");
        assert_eq!(forecast[3].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(forecast[3].day_name, "Wed");
        assert_eq!(forecast[3].date_label, "Jan 1");
    }

    #[test]
    fn test_mock_forecast_values_within_ranges() {
        let generator = FallbackGenerator::new("Singapore");
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for day in generator.mock_forecast(today(), &mut rng) {
                assert!((28.0..32.0).contains(&day.temp_high));
                assert!((24.0..26.0).contains(&day.temp_low));
                assert!((85.0..95.0).contains(&day.humidity_high));
                assert!((65.0..75.0).contains(&day.humidity_low));
                assert!(MOCK_WINDS.contains(&day.wind.as_str()));
            }
        }
    }

    #[test]
    fn test_mock_report_combines_both_mocks() {
        let generator = FallbackGenerator::new("Singapore");
        let report = generator.mock_report(today(), &mut StdRng::seed_from_u64(8));
        assert_eq!(report.current, generator.mock_current());
        assert_eq!(report.forecast.len(), FORECAST_DAYS);
        assert_eq!(report.forecast[0].date, today());
    }
}
