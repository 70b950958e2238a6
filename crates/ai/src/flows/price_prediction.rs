use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use kisan_core::schema::{FieldSpec, ObjectSchema};
use kisan_core::SchemaViolation;

use crate::flow::Flow;
use crate::prompt_template::PromptTemplate;

/// Number of daily points in a price trend.
pub const TREND_DAYS: usize = 7;

/// Seven-day mandi price forecast for one crop.
pub struct PredictMarketPrice;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictMarketPriceInput {
    pub crop_name: String,
}

/// One point on the forecast chart. Price is per quintal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTrendPoint {
    pub day: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictMarketPriceOutput {
    pub prediction_summary: String,
    pub price_trend: Vec<PriceTrendPoint>,
}

const TEMPLATE_SOURCE: &str = "You are an expert agricultural market analyst. Based on historical data, seasonality, and market trends, predict the market price for the following crop for the next 7 days.

Crop Name: {{{cropName}}}

Provide a summary of your prediction and a list of daily price points for a chart. The price should be per quintal. For the trend, provide a series of 7 data points for a graph with labels like 'Day 1', 'Day 2', etc.";

static INPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("PredictMarketPriceInput").field(
        FieldSpec::string(
            "cropName",
            "The name of the crop for which to predict the market price.",
        )
        .min_len(2, "Please enter a valid crop name."),
    )
});

static OUTPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("PredictMarketPriceOutput")
        .field(FieldSpec::string(
            "predictionSummary",
            "A summary of the price prediction, including the likely price range and reasoning.",
        ))
        .field(
            FieldSpec::array(
                "priceTrend",
                "An array of predicted price points for the next 7 days to be used in a graph.",
                ObjectSchema::new("PriceTrendDataPoint")
                    .field(FieldSpec::string(
                        "day",
                        "The day for the price point (e.g., \"Day 1\", \"Day 2\").",
                    ))
                    .field(FieldSpec::number("price", "The predicted price for that day.")),
            )
            .exact_len(TREND_DAYS),
        )
});

static TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(TEMPLATE_SOURCE).expect("Invalid price prediction template")
});

impl Flow for PredictMarketPrice {
    type Input = PredictMarketPriceInput;
    type Output = PredictMarketPriceOutput;

    const NAME: &'static str = "predictMarketPrice";
    const FAILURE_MESSAGE: &'static str = "Failed to get price prediction. Please try again.";

    fn input_schema() -> &'static ObjectSchema {
        &INPUT_SCHEMA
    }

    fn output_schema() -> &'static ObjectSchema {
        &OUTPUT_SCHEMA
    }

    fn template() -> &'static PromptTemplate {
        &TEMPLATE
    }

    /// Points must be labelled `Day 1` through `Day 7`, in order. Case and
    /// surrounding whitespace are tolerated; labels come back canonical.
    fn check_output(output: &mut PredictMarketPriceOutput) -> Result<(), SchemaViolation> {
        for (idx, point) in output.price_trend.iter_mut().enumerate() {
            let expected = format!("Day {}", idx + 1);
            if !point.day.trim().eq_ignore_ascii_case(&expected) {
                return Err(SchemaViolation::UnexpectedValue {
                    schema: OUTPUT_SCHEMA.name.to_string(),
                    path: format!("priceTrend[{}].day", idx),
                    expected,
                    found: point.day.clone(),
                });
            }
            point.day = expected;
        }
        Ok(())
    }
}
