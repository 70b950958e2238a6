use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use kisan_core::schema::{FieldSpec, ObjectSchema};

use super::{GenerateAdviceOutput, ADVICE_FAILURE_MESSAGE};
use crate::flow::Flow;
use crate::prompt_template::PromptTemplate;

/// Advice from crop type, condition, location and free-form details.
pub struct GenerateAgriculturalAdvice;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateAgriculturalAdviceInput {
    pub crop_type: String,
    pub crop_condition: String,
    pub location: String,
    pub specific_details: String,
}

const TEMPLATE_SOURCE: &str = "You are an expert agricultural advisor. A farmer will provide details about their crop, its condition, location, and any other relevant information. Based on this information, provide actionable and tailored advice to improve their farming practices and crop yield.

Crop Type: {{{cropType}}}
Crop Condition: {{{cropCondition}}}
Location: {{{location}}}
Specific Details: {{{specificDetails}}}

Expert Agricultural Advice:";

static INPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("GenerateAgriculturalAdviceInput")
        .field(
            FieldSpec::string(
                "cropType",
                "The type of crop being grown (e.g., corn, wheat, soybeans).",
            )
            .min_len(2, "Please enter a valid crop type."),
        )
        .field(
            FieldSpec::string(
                "cropCondition",
                "The current condition of the crop (e.g., healthy, diseased, stressed).",
            )
            .min_len(3, "Please select a crop condition."),
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
                "specificDetails",
                "Any other specific details about the crop or growing conditions.",
            )
            .min_len(
                10,
                "Please describe the challenges you are facing in more detail.",
            ),
        )
});

static OUTPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("GenerateAgriculturalAdviceOutput").field(FieldSpec::string(
        "advice",
        "AI-powered expert advice tailored to the specific crop details, condition, and location.",
    ))
});

static TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(TEMPLATE_SOURCE).expect("Invalid agricultural advice template")
});

impl Flow for GenerateAgriculturalAdvice {
    type Input = GenerateAgriculturalAdviceInput;
    type Output = GenerateAdviceOutput;

    const NAME: &'static str = "generateAgriculturalAdvice";
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
