//! Soil & Crop Recommendation Example
//!
//! Run with:
//! ```bash
//! cargo run --example soil_advisor -- clay diseased hot_dry
//! ```
//!
//! Soil types: clay, loam, sandy, silty, chalky, peaty
//! Crop health: healthy, minor_issues, diseased
//! Weather: hot_dry, hot_humid, moderate, rainy, cold_dry, cold_wet

use cropsight::advisory::{CropHealth, SoilType, WeatherOutlook, recommendations};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let soil: SoilType = args
        .next()
        .expect("Usage: soil_advisor <soil> <health> <weather>")
        .parse()?;
    let health: CropHealth = args.next().expect("missing crop health").parse()?;
    let outlook: WeatherOutlook = args.next().expect("missing weather outlook").parse()?;

    let advisory = recommendations(soil, health, outlook);

    println!("Soil care tips for {} soil:", soil.as_str());
    for tip in &advisory.soil_tips {
        println!("\n  {}", tip.title);
        println!("    {}", tip.description);
    }

    println!("\nSuitable crops:");
    for crop in &advisory.crop_suggestions {
        println!("  {:<16} {:<20} {}", crop.name, crop.suitability.label(), crop.description);
    }

    Ok(())
}
