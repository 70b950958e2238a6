use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use kisan_core::schema::{FieldSpec, ObjectSchema};

use super::{GenerateAdviceOutput, ADVICE_FAILURE_MESSAGE};
use crate::flow::Flow;
use crate::prompt_template::PromptTemplate;

/// Advice from a crop description, location and the current challenges.
pub struct GenerateExpertAdvice;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateExpertAdviceInput {
    pub crop_details: String,
    pub location: String,
    pub current_challenges: String,
}

const TEMPLATE_SOURCE: &str = "You are an expert agricultural advisor. A farmer will provide details about their crop, its location, and the challenges they are currently facing. Based on this information, provide actionable advice to improve their yield and address any potential problems.

Crop Details: {{{cropDetails}}}
Location: {{{location}}}
Current Challenges: {{{currentChallenges}}}

Expert Advice:";

static INPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("GenerateExpertAdviceInput")
        .field(
            FieldSpec::string(
                "cropDetails",
                "Detailed information about the crop being grown.",
            )
            .min_len(2, "Please enter valid crop details."),
        )
        .field(
            FieldSpec::string(
                "location",
                "The geographical location where the crop is planted.",
            )
            .min_len(2, "Please enter a valid location."),
        )
        .field(
            FieldSpec::string(
                "currentChallenges",
                "Description of current problems or challenges being faced with the crop.",
            )
            .min_len(
                10,
                "Please describe the challenges you are facing in more detail.",
            ),
        )
});

static OUTPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("GenerateExpertAdviceOutput").field(FieldSpec::string(
        "advice",
        "AI-powered expert advice on how to improve yield or address potential problems.",
    ))
});

static TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(TEMPLATE_SOURCE).expect("Invalid expert advice template")
});

impl Flow for GenerateExpertAdvice {
    type Input = GenerateExpertAdviceInput;
    type Output = GenerateAdviceOutput;

    const NAME: &'static str = "generateExpertAdvice";
    const FAILURE_MESSAGE: &'static str = ADVICE_FAILURE_MESSAGE;

    fn input_schema() -> &'static ObjectSchema {
        &INPUT_SCHEMA
    }

    fn output_schema() -> &'static ObjectSchema {
        &OUTPUT_SCHEMA
    }

    fn template() -> &'static PromptTemplate {
        &TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowInvoker;
    use crate::providers::FakeModelProvider;
    use serde_json::json;
    use std::sync::Arc;

    fn input() -> GenerateExpertAdviceInput {
        GenerateExpertAdviceInput {
            crop_details: "Cotton, 60 days after sowing".to_string(),
            location: "Yavatmal, Maharashtra".to_string(),
            current_challenges: "Pink bollworm damage on green bolls.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_expert_advice() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({
            "advice": "Install pheromone traps at 5 per acre."
        })));
        let output = FlowInvoker::new(fake.clone())
            .invoke::<GenerateExpertAdvice>(&input())
            .await
            .unwrap();

        assert_eq!(output.advice, "Install pheromone traps at 5 per acre.");
        let text = fake.last_request().unwrap().prompt.text;
        assert!(text.contains("Current Challenges: Pink bollworm damage on green bolls."));
        assert!(text.ends_with("Expert Advice:"));
    }

    #[tokio::test]
    async fn test_advice_with_wrong_type_fails() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({ "advice": ["spray", "wait"] })));
        let err = FlowInvoker::new(fake)
            .invoke::<GenerateExpertAdvice>(&input())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "OUTPUT_SCHEMA_MISMATCH");
    }

    #[tokio::test]
    async fn test_blank_location_is_rejected() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({ "advice": "..." })));
        let mut request = input();
        request.location = "   ".to_string();
        let err = FlowInvoker::new(fake.clone())
            .invoke::<GenerateExpertAdvice>(&request)
            .await
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(fake.calls(), 0);
    }

    #[test]
    fn test_both_advice_flows_share_failure_message() {
        assert_eq!(
            GenerateExpertAdvice::FAILURE_MESSAGE,
            super::super::GenerateAgriculturalAdvice::FAILURE_MESSAGE
        );
    }
}
