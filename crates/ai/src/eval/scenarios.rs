//! Golden scenarios covering every flow.

use serde_json::{json, Value};

use crate::providers::FakeReply;

const LEAF_JPEG: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQAAAQABAAD/2wBDAAgGBgcGBQgHBwcJCQgKDA==";

/// Flow exercised by a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowId {
    CropAnalysis,
    AgriculturalAdvice,
    ExpertAdvice,
    PricePrediction,
    Schemes,
}

/// What a scenario must produce.
#[derive(Clone)]
pub enum Expectation {
    /// Success, with a check over the serialized output.
    Output(fn(&Value) -> Result<(), String>),
    /// Failure with this error code.
    Error(&'static str),
}

/// A golden scenario.
#[derive(Clone)]
pub struct GoldenScenario {
    pub name: &'static str,
    pub flow: FlowId,
    pub input: Value,
    pub reply: FakeReply,
    pub expect: Expectation,
    /// Exact number of provider calls.
    pub expected_calls: usize,
    /// Substrings the rendered prompt must contain.
    pub prompt_contains: Vec<&'static str>,
}

fn trend(days: usize) -> Value {
    Value::Array(
        (1..=days)
            .map(|d| json!({ "day": format!("Day {}", d), "price": 1800.0 + d as f64 * 5.0 }))
            .collect(),
    )
}

/// All golden scenarios.
pub fn all_scenarios() -> Vec<GoldenScenario> {
    vec![
        GoldenScenario {
            name: "crop_analysis_healthy_leaf",
            flow: FlowId::CropAnalysis,
            input: json!({ "photoDataUri": LEAF_JPEG }),
            reply: FakeReply::Json(json!({
                "healthAnalysis": "Healthy canopy.",
                "potentialDiseases": "Early signs of leaf rust on two leaves.",
                "nutrientDeficiencies": "None observed.",
                "generalAssessment": "Good overall; monitor the rust."
            })),
            expect: Expectation::Output(|out| {
                if out["potentialDiseases"].as_str().unwrap_or("").contains("rust") {
                    Ok(())
                } else {
                    Err("diseases should mention rust".to_string())
                }
            }),
            expected_calls: 1,
            prompt_contains: vec!["expert agricultural consultant"],
        },
        GoldenScenario {
            name: "crop_analysis_without_photo",
            flow: FlowId::CropAnalysis,
            input: json!({}),
            reply: FakeReply::Json(json!({})),
            expect: Expectation::Error("INVALID_INPUT"),
            expected_calls: 0,
            prompt_contains: vec![],
        },
        GoldenScenario {
            name: "crop_analysis_prose_reply",
            flow: FlowId::CropAnalysis,
            input: json!({ "photoDataUri": LEAF_JPEG }),
            reply: FakeReply::Text("The plant looks fine to me.".to_string()),
            expect: Expectation::Error("NO_STRUCTURED_OUTPUT"),
            expected_calls: 1,
            prompt_contains: vec![],
        },
        GoldenScenario {
            name: "agricultural_advice_paddy",
            flow: FlowId::AgriculturalAdvice,
            input: json!({
                "cropType": "Paddy",
                "cropCondition": "Diseased",
                "location": "Cuttack, Odisha",
                "specificDetails": "Brown spots with yellow halos on leaves."
            }),
            reply: FakeReply::Json(json!({ "advice": "Likely brown spot; apply mancozeb." })),
            expect: Expectation::Output(|out| match out["advice"].as_str() {
                Some(a) if !a.is_empty() => Ok(()),
                _ => Err("advice should be non-empty".to_string()),
            }),
            expected_calls: 1,
            prompt_contains: vec!["Crop Type: Paddy", "Location: Cuttack, Odisha"],
        },
        GoldenScenario {
            name: "agricultural_advice_provider_down",
            flow: FlowId::AgriculturalAdvice,
            input: json!({
                "cropType": "Paddy",
                "cropCondition": "Healthy",
                "location": "Cuttack",
                "specificDetails": "Planning the next fertilizer dose."
            }),
            reply: FakeReply::Error("503 Service Unavailable".to_string()),
            expect: Expectation::Error("PROVIDER_ERROR"),
            expected_calls: 1,
            prompt_contains: vec![],
        },
        GoldenScenario {
            name: "expert_advice_missing_challenges",
            flow: FlowId::ExpertAdvice,
            input: json!({ "cropDetails": "Tomato, flowering", "location": "Kolar" }),
            reply: FakeReply::Json(json!({ "advice": "..." })),
            expect: Expectation::Error("INVALID_INPUT"),
            expected_calls: 0,
            prompt_contains: vec![],
        },
        GoldenScenario {
            name: "expert_advice_reply_missing_advice",
            flow: FlowId::ExpertAdvice,
            input: json!({
                "cropDetails": "Tomato, flowering",
                "location": "Kolar, Karnataka",
                "currentChallenges": "Flowers dropping before fruit set."
            }),
            reply: FakeReply::Json(json!({ "recommendation": "Spray boron." })),
            expect: Expectation::Error("OUTPUT_SCHEMA_MISMATCH"),
            expected_calls: 1,
            prompt_contains: vec!["Current Challenges: Flowers dropping before fruit set."],
        },
        GoldenScenario {
            name: "price_prediction_onion",
            flow: FlowId::PricePrediction,
            input: json!({ "cropName": "Onion" }),
            reply: FakeReply::Json(json!({
                "predictionSummary": "Onion prices likely Rs 1,805-1,835 per quintal.",
                "priceTrend": trend(7)
            })),
            expect: Expectation::Output(|out| {
                let points = out["priceTrend"].as_array().map(Vec::len).unwrap_or(0);
                if points == 7 {
                    Ok(())
                } else {
                    Err(format!("expected 7 points, got {}", points))
                }
            }),
            expected_calls: 1,
            prompt_contains: vec!["Crop Name: Onion", "per quintal"],
        },
        GoldenScenario {
            name: "price_prediction_ten_days",
            flow: FlowId::PricePrediction,
            input: json!({ "cropName": "Onion" }),
            reply: FakeReply::Json(json!({
                "predictionSummary": "Ten-day view.",
                "priceTrend": trend(10)
            })),
            expect: Expectation::Error("OUTPUT_SCHEMA_MISMATCH"),
            expected_calls: 1,
            prompt_contains: vec![],
        },
        GoldenScenario {
            name: "schemes_none_found",
            flow: FlowId::Schemes,
            input: json!({ "query": "subsidies for drip irrigation" }),
            reply: FakeReply::Json(json!({ "schemes": [] })),
            expect: Expectation::Output(|out| match out["schemes"].as_array() {
                Some(s) if s.is_empty() => Ok(()),
                _ => Err("schemes should be an empty list".to_string()),
            }),
            expected_calls: 1,
            prompt_contains: vec!["User's Need: subsidies for drip irrigation"],
        },
        GoldenScenario {
            name: "schemes_fenced_reply",
            flow: FlowId::Schemes,
            input: json!({ "query": "crop insurance for kharif season" }),
            reply: FakeReply::Text(
                "```json\n{\"schemes\": [{\"schemeName\": \"PMFBY\", \"description\": \"Crop insurance.\", \"eligibility\": \"All farmers growing notified crops.\", \"applicationLink\": \"https://pmfby.gov.in/\"}]}\n```"
                    .to_string(),
            ),
            expect: Expectation::Output(|out| {
                if out["schemes"][0]["schemeName"] == "PMFBY" {
                    Ok(())
                } else {
                    Err("expected PMFBY".to_string())
                }
            }),
            expected_calls: 1,
            prompt_contains: vec![],
        },
    ]
}
