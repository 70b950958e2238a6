use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use kisan_core::schema::{FieldSpec, ObjectSchema};

use crate::flow::Flow;
use crate::prompt_template::PromptTemplate;

/// Government scheme lookup from a farmer's free-text need.
pub struct FindGovernmentSchemes;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindGovernmentSchemesInput {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub scheme_name: String,
    pub description: String,
    pub eligibility: String,
    pub application_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindGovernmentSchemesOutput {
    pub schemes: Vec<Scheme>,
}

impl FindGovernmentSchemesOutput {
    /// Heading shown above the results. An empty list is a normal outcome.
    pub fn summary_message(&self) -> String {
        match self.schemes.len() {
            0 => "No schemes found matching your query. Try rephrasing your request.".to_string(),
            n => format!("Found {} scheme(s) based on your query.", n),
        }
    }
}

const TEMPLATE_SOURCE: &str = "You are an expert on government agricultural schemes in India. A farmer will ask about a specific need. Your task is to identify relevant government schemes, explain them in simple terms, list the eligibility requirements, and provide a direct link to the application portal or official page.

User's Need: {{{query}}}

Search for relevant schemes and provide the details. If no specific schemes are found, state that you could not find any matching schemes for the query.";

static INPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("FindGovernmentSchemesInput").field(
        FieldSpec::string(
            "query",
            "The user query describing their need, e.g., \"subsidies for drip irrigation\".",
        )
        .min_len(5, "Please enter a more detailed query."),
    )
});

static OUTPUT_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new("FindGovernmentSchemesOutput").field(FieldSpec::array(
        "schemes",
        "A list of relevant government schemes found.",
        ObjectSchema::new("Scheme")
            .field(FieldSpec::string(
                "schemeName",
                "The name of the government scheme.",
            ))
            .field(FieldSpec::string(
                "description",
                "A simple, clear explanation of the scheme.",
            ))
            .field(FieldSpec::string(
                "eligibility",
                "A summary of the eligibility requirements for the scheme.",
            ))
            .field(FieldSpec::string(
                "applicationLink",
                "A direct URL to the application portal or information page for the scheme.",
            )),
    ))
});

static TEMPLATE: Lazy<PromptTemplate> = Lazy::new(|| {
    PromptTemplate::parse(TEMPLATE_SOURCE).expect("Invalid scheme lookup template")
});

impl Flow for FindGovernmentSchemes {
    type Input = FindGovernmentSchemesInput;
    type Output = FindGovernmentSchemesOutput;

    const NAME: &'static str = "findGovernmentSchemes";
    const FAILURE_MESSAGE: &'static str = "Failed to find schemes. Please try again.";

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

    fn drip_irrigation() -> FindGovernmentSchemesInput {
        FindGovernmentSchemesInput {
            query: "subsidies for drip irrigation".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_list_is_a_result_not_an_error() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({ "schemes": [] })));
        let output = FlowInvoker::new(fake)
            .invoke::<FindGovernmentSchemes>(&drip_irrigation())
            .await
            .unwrap();

        assert!(output.schemes.is_empty());
        assert_eq!(
            output.summary_message(),
            "No schemes found matching your query. Try rephrasing your request."
        );
    }

    #[tokio::test]
    async fn test_schemes_are_decoded() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({
            "schemes": [{
                "schemeName": "Pradhan Mantri Krishi Sinchayee Yojana (Per Drop More Crop)",
                "description": "Subsidy on drip and sprinkler irrigation systems.",
                "eligibility": "All farmers with cultivable land; higher subsidy for small and marginal farmers.",
                "applicationLink": "https://pmksy.gov.in/"
            }]
        })));
        let output = FlowInvoker::new(fake.clone())
            .invoke::<FindGovernmentSchemes>(&drip_irrigation())
            .await
            .unwrap();

        assert_eq!(output.schemes[0].application_link, "https://pmksy.gov.in/");
        assert_eq!(output.summary_message(), "Found 1 scheme(s) based on your query.");
        assert!(fake
            .last_request()
            .unwrap()
            .prompt
            .text
            .contains("User's Need: subsidies for drip irrigation"));
    }

    #[tokio::test]
    async fn test_scheme_without_link_fails() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({
            "schemes": [{
                "schemeName": "PM-KISAN",
                "description": "Income support of Rs 6,000 per year.",
                "eligibility": "Landholding farmer families."
            }]
        })));
        let err = FlowInvoker::new(fake)
            .invoke::<FindGovernmentSchemes>(&drip_irrigation())
            .await
            .unwrap_err();
        match err {
            crate::error::AiError::OutputSchema(violation) => {
                assert_eq!(violation.path(), "schemes[0].applicationLink")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_short_query_is_rejected() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({ "schemes": [] })));
        let err = FlowInvoker::new(fake.clone())
            .invoke::<FindGovernmentSchemes>(&FindGovernmentSchemesInput {
                query: "loan".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_query_is_rejected() {
        let fake = Arc::new(FakeModelProvider::with_reply(json!({ "schemes": [] })));
        let err = FlowInvoker::new(fake.clone())
            .invoke_value::<FindGovernmentSchemes>(json!({ "query": null }))
            .await
            .unwrap_err();
        match err {
            crate::error::AiError::InvalidInput(validation) => {
                assert_eq!(validation.field(), Some("query"));
                assert_eq!(validation.user_message(), "Please enter a more detailed query.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fake.calls(), 0);
    }
}
