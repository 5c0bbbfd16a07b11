//! The fixed instructional prompt and the languages it can be asked in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language the analysis should be written in.
///
/// The three languages the farmer-facing UI offers. The language name is
/// embedded verbatim in the prompt, so the model answers in that language
/// while keeping the numbered section labels in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "marathi" | "mr" => Ok(Language::Marathi),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

/// Render the fixed crop-analysis prompt.
///
/// Asks for five numbered items — health score, diseases, treatments,
/// prevention and recovery timeline — which are exactly the section labels
/// the [`diagnosis`](crate::diagnosis) extractors look for afterwards.
pub fn analysis_prompt(language: Language) -> String {
    format!(
        "Analyze this crop image and provide:\n\
         1. Health assessment (1-10 scale)\n\
         2. Identified diseases/threats\n\
         3. Recommended treatments\n\
         4. Prevention measures\n\
         5. Expected recovery timeline\n\
         \n\
         Provide detailed, farmer-friendly advice in {}.",
        language.as_str()
    )
}
