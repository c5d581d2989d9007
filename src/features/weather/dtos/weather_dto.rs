use serde::{Deserialize, Serialize};

/// Weather lookup form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherFormDto {
    #[serde(default)]
    pub city: String,
}

/// Weather shown for a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReportDto {
    /// City as entered, trimmed and HTML-escaped
    pub city: String,
    pub temperature: String,
    pub description: String,
}
