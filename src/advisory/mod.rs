//! Soil care tips and crop suggestions from farm conditions.
//!
//! Pure, synchronous recommendation tables keyed by soil type, current
//! crop health and the weather outlook — the advisory form a farmer fills
//! in. Every combination of inputs yields a full set of tips and at least
//! three crop suggestions; there is no failure path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Soil type as selected in the advisory form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    /// Heavy, sticky when wet
    Clay,
    /// Balanced, crumbly texture
    Loam,
    /// Gritty, drains quickly
    Sandy,
    /// Smooth, holds moisture well
    Silty,
    /// Stony, drains quickly
    Chalky,
    /// Dark, high organic matter
    Peaty,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Clay,
        SoilType::Loam,
        SoilType::Sandy,
        SoilType::Silty,
        SoilType::Chalky,
        SoilType::Peaty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "clay",
            SoilType::Loam => "loam",
            SoilType::Sandy => "sandy",
            SoilType::Silty => "silty",
            SoilType::Chalky => "chalky",
            SoilType::Peaty => "peaty",
        }
    }
}

/// Current crop health as reported by the farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropHealth {
    Healthy,
    MinorIssues,
    Diseased,
}

impl CropHealth {
    pub const ALL: [CropHealth; 3] = [
        CropHealth::Healthy,
        CropHealth::MinorIssues,
        CropHealth::Diseased,
    ];
}

/// Current or expected weather, as selected in the advisory form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherOutlook {
    HotDry,
    HotHumid,
    Moderate,
    Rainy,
    ColdDry,
    ColdWet,
}

impl WeatherOutlook {
    pub const ALL: [WeatherOutlook; 6] = [
        WeatherOutlook::HotDry,
        WeatherOutlook::HotHumid,
        WeatherOutlook::Moderate,
        WeatherOutlook::Rainy,
        WeatherOutlook::ColdDry,
        WeatherOutlook::ColdWet,
    ];
}

impl FromStr for SoilType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Ok(SoilType::Clay),
            "loam" => Ok(SoilType::Loam),
            "sandy" => Ok(SoilType::Sandy),
            "silty" => Ok(SoilType::Silty),
            "chalky" => Ok(SoilType::Chalky),
            "peaty" => Ok(SoilType::Peaty),
            other => Err(format!("unknown soil type: {other}")),
        }
    }
}

impl FromStr for CropHealth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Ok(CropHealth::Healthy),
            "minor_issues" => Ok(CropHealth::MinorIssues),
            "diseased" => Ok(CropHealth::Diseased),
            other => Err(format!("unknown crop health: {other}")),
        }
    }
}

impl FromStr for WeatherOutlook {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hot_dry" => Ok(WeatherOutlook::HotDry),
            "hot_humid" => Ok(WeatherOutlook::HotHumid),
            "moderate" => Ok(WeatherOutlook::Moderate),
            "rainy" => Ok(WeatherOutlook::Rainy),
            "cold_dry" => Ok(WeatherOutlook::ColdDry),
            "cold_wet" => Ok(WeatherOutlook::ColdWet),
            other => Err(format!("unknown weather outlook: {other}")),
        }
    }
}

/// How well a crop fits the reported soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    High,
    Medium,
    Low,
}

impl Suitability {
    /// Badge text for display layers.
    pub fn label(&self) -> &'static str {
        match self {
            Suitability::High => "Highly Suitable",
            Suitability::Medium => "Moderately Suitable",
            Suitability::Low => "Less Suitable",
        }
    }
}

impl fmt::Display for Suitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One soil care tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilTip {
    pub title: String,
    pub description: String,
}

impl SoilTip {
    fn new(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
        }
    }
}

/// One crop suggestion with its suitability for the reported soil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub name: String,
    pub suitability: Suitability,
    pub description: String,
}

impl CropSuggestion {
    fn new(name: &str, suitability: Suitability, description: &str) -> Self {
        Self {
            name: name.to_string(),
            suitability,
            description: description.to_string(),
        }
    }
}

/// The full recommendation set for one form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub soil_tips: Vec<SoilTip>,
    pub crop_suggestions: Vec<CropSuggestion>,
}

/// Build recommendations for the given farm conditions.
///
/// Returns soil tips covering irrigation, nutrients, soil structure and
/// weather adaptation, plus a disease-pressure tip whenever the crop is
/// not fully healthy, and a suitability-ranked crop list for the soil
/// type.
pub fn recommendations(
    soil: SoilType,
    health: CropHealth,
    outlook: WeatherOutlook,
) -> Advisory {
    let mut soil_tips = vec![
        irrigation_tip(soil, outlook),
        nutrient_tip(soil),
        structure_tip(soil),
        weather_tip(outlook),
    ];
    if let Some(tip) = disease_tip(health) {
        soil_tips.push(tip);
    }

    Advisory {
        soil_tips,
        crop_suggestions: crop_suggestions(soil),
    }
}

fn irrigation_tip(soil: SoilType, outlook: WeatherOutlook) -> SoilTip {
    let retention = match soil {
        SoilType::Clay => "Clay soil holds water well; irrigate deeply but less frequently (once every 7-10 days) and allow it to partially dry between waterings to prevent waterlogging",
        SoilType::Loam => "Loam drains and retains in balance; a steady schedule of moderate waterings every 3-5 days suits most crops",
        SoilType::Sandy => "Sandy soil drains quickly; water lightly and often (every 1-2 days) so moisture stays within reach of the roots",
        SoilType::Silty => "Silty soil holds moisture well; water moderately every 4-6 days and avoid compacting the wet surface",
        SoilType::Chalky => "Chalky soil drains fast and dries out; water frequently in smaller amounts and build organic matter to slow the loss",
        SoilType::Peaty => "Peaty soil retains plenty of water; irrigate sparingly and make sure excess water can drain away",
    };
    let adjustment = match outlook {
        WeatherOutlook::HotDry => "In hot, dry spells shorten the interval and water early in the morning to limit evaporation.",
        WeatherOutlook::HotHumid => "In hot, humid weather water at the base of plants and keep foliage dry to discourage fungal growth.",
        WeatherOutlook::Moderate => "Under moderate conditions the regular schedule can be kept as is.",
        WeatherOutlook::Rainy => "With rain expected, pause scheduled irrigation and check that drainage channels are clear.",
        WeatherOutlook::ColdDry => "In cold, dry weather water around midday so the soil does not freeze around wet roots.",
        WeatherOutlook::ColdWet => "In cold, wet weather suspend irrigation entirely and watch for standing water.",
    };
    SoilTip::new(
        "Optimal Irrigation Schedule",
        format!("{retention}. {adjustment}"),
    )
}

fn nutrient_tip(soil: SoilType) -> SoilTip {
    let description = match soil {
        SoilType::Clay => "Clay soils often have good nutrient-holding capacity but can be low in phosphorus. Consider applying a phosphorus-rich organic fertilizer. Test soil pH and adjust if necessary.",
        SoilType::Loam => "Loam holds nutrients well; a balanced fertilizer at the start of the season plus compost top-ups is usually enough. Test soil pH every year or two.",
        SoilType::Sandy => "Nutrients leach quickly from sandy soil. Apply fertilizer in small, frequent doses and add compost to improve retention.",
        SoilType::Silty => "Silty soils are naturally fertile but benefit from potassium supplementation. Avoid over-fertilizing, which runs off easily.",
        SoilType::Chalky => "Chalky soils are alkaline and can lock up iron and manganese. Use chelated micronutrients and acidifying organic matter where crops show yellowing.",
        SoilType::Peaty => "Peaty soils are rich in organic matter but often acidic and low in copper and boron. Apply lime to raise pH toward neutral and supplement trace elements.",
    };
    SoilTip::new("Nutrient Management", description.to_string())
}

fn structure_tip(soil: SoilType) -> SoilTip {
    let description = match soil {
        SoilType::Clay => "Add organic matter like compost or well-rotted manure to improve drainage and aeration. Consider adding gypsum to help break up clay particles.",
        SoilType::Loam => "Maintain the existing structure with yearly compost additions and minimal tillage. Avoid working the soil when it is wet.",
        SoilType::Sandy => "Work in generous amounts of compost or manure to bind the loose particles and improve water holding.",
        SoilType::Silty => "Add organic matter and avoid heavy machinery on wet ground; silty soil compacts easily and forms a crust.",
        SoilType::Chalky => "Build up the shallow topsoil with bulky organic matter and mulch heavily to protect it from drying.",
        SoilType::Peaty => "Improve firmness by mixing in coarse sand or loam, and keep the water table managed so the peat does not shrink.",
    };
    SoilTip::new("Soil Structure Improvement", description.to_string())
}

fn weather_tip(outlook: WeatherOutlook) -> SoilTip {
    let description = match outlook {
        WeatherOutlook::HotDry => "With hot, dry conditions anticipated, add mulch around plants to conserve moisture and moderate soil temperature. Consider temporary shade for sensitive crops.",
        WeatherOutlook::HotHumid => "Hot, humid weather favors fungal disease. Improve air circulation between plants, avoid evening watering and inspect leaves regularly.",
        WeatherOutlook::Moderate => "Moderate weather is a good window for transplanting, pruning and soil work that stresses plants in harsher conditions.",
        WeatherOutlook::Rainy => "Before the rain arrives, clear drainage channels, stake tall plants and postpone fertilizer applications that would wash away.",
        WeatherOutlook::ColdDry => "Protect against cold, dry winds with row covers or windbreaks, and mulch to insulate the root zone.",
        WeatherOutlook::ColdWet => "Cold, wet spells invite root rot. Raise beds where possible, hold off on sowing and keep foot traffic off saturated soil.",
    };
    SoilTip::new("Weather Adaptation", description.to_string())
}

fn disease_tip(health: CropHealth) -> Option<SoilTip> {
    let description = match health {
        CropHealth::Healthy => return None,
        CropHealth::MinorIssues => "Minor symptoms can spread fast under stress. Remove affected leaves, keep tools clean and monitor the crop every few days for changes.",
        CropHealth::Diseased => "Diseased plants need prompt action: isolate or remove badly affected plants, disinfect tools between uses and have the disease identified from photos of affected leaves before choosing a treatment.",
    };
    Some(SoilTip::new("Disease Management", description.to_string()))
}

fn crop_suggestions(soil: SoilType) -> Vec<CropSuggestion> {
    match soil {
        SoilType::Clay => vec![
            CropSuggestion::new(
                "Rice",
                Suitability::High,
                "Excellent choice for clay soils with high water retention capacity.",
            ),
            CropSuggestion::new(
                "Wheat",
                Suitability::High,
                "Well-suited to clay soils, especially in regions with moderate rainfall.",
            ),
            CropSuggestion::new(
                "Corn (Maize)",
                Suitability::Medium,
                "Can perform well in clay soil if drainage is improved with organic matter.",
            ),
            CropSuggestion::new(
                "Leafy Greens",
                Suitability::Low,
                "May struggle in heavy clay unless soil is significantly amended.",
            ),
        ],
        SoilType::Loam => vec![
            CropSuggestion::new(
                "Vegetables",
                Suitability::High,
                "Most vegetables thrive in loam's balance of drainage and retention.",
            ),
            CropSuggestion::new(
                "Corn (Maize)",
                Suitability::High,
                "Deep, fertile loam supports maize's heavy feeding and rooting.",
            ),
            CropSuggestion::new(
                "Wheat",
                Suitability::High,
                "Performs reliably in loam across a wide range of climates.",
            ),
            CropSuggestion::new(
                "Pulses",
                Suitability::Medium,
                "Grow well in loam, though they tolerate poorer soils too.",
            ),
        ],
        SoilType::Sandy => vec![
            CropSuggestion::new(
                "Groundnut",
                Suitability::High,
                "Loose sandy soil lets pods develop freely and makes harvesting easy.",
            ),
            CropSuggestion::new(
                "Potato",
                Suitability::High,
                "Tubers size well in light soil that drains quickly.",
            ),
            CropSuggestion::new(
                "Carrot",
                Suitability::High,
                "Straight roots form best in stone-free sandy ground.",
            ),
            CropSuggestion::new(
                "Rice",
                Suitability::Low,
                "Cannot hold the standing water paddy rice requires.",
            ),
        ],
        SoilType::Silty => vec![
            CropSuggestion::new(
                "Wheat",
                Suitability::High,
                "Moisture-retentive silt suits wheat through dry spells.",
            ),
            CropSuggestion::new(
                "Sugarcane",
                Suitability::High,
                "Thrives on the fertility and water holding of silty soil.",
            ),
            CropSuggestion::new(
                "Vegetables",
                Suitability::Medium,
                "Do well if the surface crust is broken up and drainage watched.",
            ),
        ],
        SoilType::Chalky => vec![
            CropSuggestion::new(
                "Barley",
                Suitability::High,
                "Tolerates the alkalinity and free drainage of chalky soil.",
            ),
            CropSuggestion::new(
                "Spinach",
                Suitability::Medium,
                "Grows in alkaline soil but needs steady watering on chalk.",
            ),
            CropSuggestion::new(
                "Cabbage",
                Suitability::Medium,
                "Brassicas accept lime-rich soil; club root is rarer in it.",
            ),
            CropSuggestion::new(
                "Potato",
                Suitability::Low,
                "Prefers acidic soil; scab is common on chalky ground.",
            ),
        ],
        SoilType::Peaty => vec![
            CropSuggestion::new(
                "Root Vegetables",
                Suitability::High,
                "Carrots, onions and beets do well in loose, organic-rich peat.",
            ),
            CropSuggestion::new(
                "Leafy Greens",
                Suitability::High,
                "Lettuce and spinach benefit from peat's moisture and nutrients.",
            ),
            CropSuggestion::new(
                "Legumes",
                Suitability::Medium,
                "Grow well once acidity is corrected with lime.",
            ),
            CropSuggestion::new(
                "Wheat",
                Suitability::Low,
                "Peat is usually too acidic and soft for dependable cereal yields.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_combination_yields_full_advice() {
        for soil in SoilType::ALL {
            for health in CropHealth::ALL {
                for outlook in WeatherOutlook::ALL {
                    let advisory = recommendations(soil, health, outlook);
                    assert!(
                        advisory.soil_tips.len() >= 4,
                        "expected at least 4 tips for {soil:?}/{health:?}/{outlook:?}"
                    );
                    assert!(
                        advisory.crop_suggestions.len() >= 3,
                        "expected at least 3 crops for {soil:?}"
                    );
                    for tip in &advisory.soil_tips {
                        assert!(!tip.title.is_empty());
                        assert!(!tip.description.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn test_disease_tip_only_when_unhealthy() {
        let healthy = recommendations(SoilType::Loam, CropHealth::Healthy, WeatherOutlook::Moderate);
        assert!(!healthy.soil_tips.iter().any(|t| t.title == "Disease Management"));

        let diseased =
            recommendations(SoilType::Loam, CropHealth::Diseased, WeatherOutlook::Moderate);
        assert!(diseased.soil_tips.iter().any(|t| t.title == "Disease Management"));
    }

    #[test]
    fn test_clay_crop_table() {
        let crops = crop_suggestions(SoilType::Clay);
        assert_eq!(crops[0].name, "Rice");
        assert_eq!(crops[0].suitability, Suitability::High);
        assert_eq!(crops[3].name, "Leafy Greens");
        assert_eq!(crops[3].suitability, Suitability::Low);
    }

    #[test]
    fn test_form_values_round_trip_snake_case() {
        assert_eq!(
            serde_json::to_string(&CropHealth::MinorIssues).unwrap(),
            "\"minor_issues\""
        );
        assert_eq!(
            serde_json::to_string(&WeatherOutlook::HotDry).unwrap(),
            "\"hot_dry\""
        );
        assert_eq!("clay".parse::<SoilType>().unwrap(), SoilType::Clay);
        assert_eq!(
            "minor_issues".parse::<CropHealth>().unwrap(),
            CropHealth::MinorIssues
        );
        assert_eq!(
            "cold_wet".parse::<WeatherOutlook>().unwrap(),
            WeatherOutlook::ColdWet
        );
        assert!("volcanic".parse::<SoilType>().is_err());
    }

    #[test]
    fn test_suitability_labels() {
        assert_eq!(Suitability::High.label(), "Highly Suitable");
        assert_eq!(Suitability::Medium.to_string(), "Moderately Suitable");
    }
}
