//! Weather Lookup Example
//!
//! Run with:
//! ```bash
//! export WEATHER_API_KEY=your_key_here
//! cargo run --example weather_lookup -- 411001
//! ```

use cropsight::WeatherClient;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pincode = env::args()
        .nth(1)
        .expect("Usage: weather_lookup <6-digit-pincode>");

    let client = WeatherClient::from_env()?;
    let report = client.forecast(&pincode).await?;

    println!("{}, {}", report.location, report.region);
    println!(
        "Now: {} {:.0}°C (feels like {:.0}°C), humidity {}%, wind {:.0} km/h",
        report.current.condition,
        report.current.temp_c,
        report.current.feels_like_c,
        report.current.humidity,
        report.current.wind_kph,
    );
    println!("Advice: {}", report.advice);
    println!();
    for day in &report.forecast {
        println!(
            "{:<9} {:>4.0}° / {:<4.0}° {}",
            day.day, day.max_temp_c, day.min_temp_c, day.condition
        );
    }

    Ok(())
}
