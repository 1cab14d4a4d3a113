//! Current weather from OpenWeatherMap.

use super::ApiClient;
use crate::error::FetchError;
use crate::models::Weather;

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api: ApiClient,
    url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api: ApiClient, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Current conditions for `city` (ex: `paris,fr`), in metric units.
    pub async fn current(&self, city: &str) -> Result<Weather, FetchError> {
        let query = [("q", city), ("appid", self.api_key.as_str()), ("units", "metric")];
        self.api.get_json(&self.url, &query).await
    }
}
