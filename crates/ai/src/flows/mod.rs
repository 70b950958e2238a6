//! The Kisan flows.
//!
//! | Flow | Input | Output |
//! |---|---|---|
//! | [`AnalyzeCropImage`] | crop photo as a data URI | health, diseases, deficiencies, assessment |
//! | [`GenerateAgriculturalAdvice`] | crop type, condition, location, details | advice |
//! | [`GenerateExpertAdvice`] | crop details, location, challenges | advice |
//! | [`PredictMarketPrice`] | crop name | summary and a 7-day trend |
//! | [`FindGovernmentSchemes`] | free-text need | matching schemes |

mod agricultural_advice;
mod crop_analysis;
mod expert_advice;
mod price_prediction;
mod schemes;

use serde::{Deserialize, Serialize};

pub use agricultural_advice::{GenerateAgriculturalAdvice, GenerateAgriculturalAdviceInput};
pub use crop_analysis::{AnalyzeCropImage, AnalyzeCropImageInput, AnalyzeCropImageOutput};
pub use expert_advice::{GenerateExpertAdvice, GenerateExpertAdviceInput};
pub use price_prediction::{
    PredictMarketPrice, PredictMarketPriceInput, PredictMarketPriceOutput, PriceTrendPoint,
    TREND_DAYS,
};
pub use schemes::{
    FindGovernmentSchemes, FindGovernmentSchemesInput, FindGovernmentSchemesOutput, Scheme,
};

/// Reply of both advice flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdviceOutput {
    pub advice: String,
}

/// Shared by both advice variants.
pub const ADVICE_FAILURE_MESSAGE: &str = "Failed to get expert advice. Please try again.";
