use crate::features::weather::dtos::WeatherReportDto;
use crate::shared::constants::{MOCK_DESCRIPTION, MOCK_TEMPERATURE};
use crate::shared::validation::clean_text;

/// Canned weather data; no external source is queried
#[derive(Debug, Default)]
pub struct WeatherService;

impl WeatherService {
    pub fn new() -> Self {
        Self
    }

    /// Report for `city`, or `None` when the name is empty after trimming
    pub fn lookup(&self, city: &str) -> Option<WeatherReportDto> {
        let city = clean_text(city);
        if city.is_empty() {
            return None;
        }

        tracing::debug!("Mock weather lookup: {}", city);

        Some(WeatherReportDto {
            city,
            temperature: MOCK_TEMPERATURE.to_string(),
            description: MOCK_DESCRIPTION.to_string(),
        })
    }
}
