//! Rule-based farming advice derived from current conditions.

use crate::weather::CurrentConditions;

/// Pick a farming-advice line for the current conditions.
///
/// The rules are ordered: rain beats heat, heat beats clear skies, and
/// anything unrecognized gets the normal-operations line. Condition text
/// is matched case-insensitively, so "Light rain" and "Patchy rain
/// possible" both count as rain.
pub fn farming_advice(current: &CurrentConditions) -> &'static str {
    let condition = current.condition.to_lowercase();

    if condition.contains("rain") {
        "Rain expected - delay spraying operations and ensure proper drainage."
    } else if current.temp_c > 30.0 {
        "High temperatures - increase irrigation frequency and consider adding mulch."
    } else if condition.contains("sunny") || condition.contains("clear") {
        "Clear weather - ideal for spraying and harvesting operations."
    } else {
        "Normal weather conditions - continue regular farming activities."
    }
}
