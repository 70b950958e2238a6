use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use kisan_core::schema::{FieldSpec, ObjectSchema};

use crate::flow::Flow;
use crate::prompt_template::PromptTemplate;

/// Crop health analysis from a single photo.
pub struct AnalyzeCropImage;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeCropImageInput {
    /// `data:image/<type>;base64,<payload>`
    pub photo_data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCropImageOutput {
    pub health_analysis: String,
    pub potential_diseases: String,
    pub nutrient_deficiencies: String,
    pub general_assessment: String,
}

const TEMPLATE_SOURCE: &str = "You are an expert agricultural consultant.

You will analyze the provided image of the crop and provide insights on its health, potential diseases, nutrient deficiencies, and a general assessment.

Analyze the following crop image:

{{media url=photoDataUri}}";

static INPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("AnalyzeCropImageInput").field(
        FieldSpec::image_data_uri(
            "photoDataUri",
            "A photo of a crop, as a data URI that must include a MIME type and use Base64 encoding. Expected format: 'data:<mimetype>;base64,<encoded_data>'.",
        )
        .required_message("Please upload an image."),
    )
});

static OUTPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("AnalyzeCropImageOutput")
        .field(FieldSpec::string(
            "healthAnalysis",
            "An analysis of the plant health based on the image.",
        ))
        .field(FieldSpec::string(
            "potentialDiseases",
            "Potential diseases identified in the crop image.",
        ))
        .field(FieldSpec::string(
            "nutrientDeficiencies",
            "Possible nutrient deficiencies observed in the crop.",
        ))
        .field(FieldSpec::string(
            "generalAssessment",
            "A general assessment of the crop health based on the image.",
        ))
});

static TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(TEMPLATE_SOURCE).expect("Invalid crop analysis template")
});

impl Flow for AnalyzeCropImage {
    type Input = AnalyzeCropImageInput;
    type Output = AnalyzeCropImageOutput;

    const NAME: &'static str = "analyzeCropImage";
    const FAILURE_MESSAGE: &'static str = "Failed to analyze the image. Please try again.";

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
