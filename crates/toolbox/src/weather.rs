//! Weather lookup tool.

use async_trait::async_trait;
use host::{InvocationArgs, InvocationContext, ParamKind, ParamSpec, ToolDescriptor, ToolHandler};
use serde_json::Value;
use tracing::{debug, info};

/// Gets the current weather for a city from a fixed lookup table.
///
/// Unknown cities fall into the default bucket rather than failing, so
/// the tool is deterministic for every input.
pub struct WeatherTool;

impl WeatherTool {
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(
            "get_weather_for_city",
            "Gets the current weather for the specified city and specified date time.",
        )
        .with_param(ParamSpec::required("city", ParamKind::String))
        .with_param(ParamSpec::optional("date_time_in_utc", ParamKind::String))
    }
}

fn weather_for(city: &str) -> &'static str {
    match city {
        "Boston" => "61 and rainy",
        "London" => "55 and cloudy",
        "Miami" => "80 and sunny",
        "Paris" => "60 and rainy",
        "Tokyo" => "50 and sunny",
        "Sydney" => "75 and sunny",
        "Tel Aviv" => "80 and sunny",
        _ => "31 and snowing",
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    async fn call(&self, args: InvocationArgs, _cx: &InvocationContext) -> anyhow::Result<Value> {
        let city = args.str("city").unwrap_or_default();
        info!(city, "getting weather");

        let report = weather_for(city);
        debug!(city, report, "weather retrieved");
        Ok(Value::String(report.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn known_cities_are_deterministic() {
        let cx = InvocationContext::new(CancellationToken::new());
        for (city, expected) in [
            ("Boston", "61 and rainy"),
            ("London", "55 and cloudy"),
            ("Tel Aviv", "80 and sunny"),
        ] {
            let args = InvocationArgs::new().set("city", city);
            let result = WeatherTool.call(args, &cx).await.unwrap();
            assert_eq!(result, Value::String(expected.to_string()));
        }
    }

    #[tokio::test]
    async fn unknown_cities_get_the_default_bucket() {
        let cx = InvocationContext::new(CancellationToken::new());
        for city in ["Nowhere", "Atlantis", "Springfield"] {
            let args = InvocationArgs::new().set("city", city);
            let result = WeatherTool.call(args, &cx).await.unwrap();
            assert_eq!(result, Value::String("31 and snowing".to_string()));
        }
    }
}
