//! Evaluation harness for running golden scenarios.

use std::sync::Arc;

use serde_json::Value;

use super::scenarios::{Expectation, FlowId, GoldenScenario};
use crate::error::AiError;
use crate::flow::{Flow, FlowInvoker};
use crate::flows::{
    AnalyzeCropImage, FindGovernmentSchemes, GenerateAgriculturalAdvice, GenerateExpertAdvice,
    PredictMarketPrice,
};
use crate::providers::FakeModelProvider;

/// Result of running a golden scenario.
#[derive(Debug)]
pub struct EvalResult {
    /// Scenario name.
    pub scenario_name: String,
    /// Whether all assertions passed.
    pub passed: bool,
    /// List of failures (empty if passed).
    pub failures: Vec<String>,
    /// Provider calls observed.
    pub provider_calls: usize,
}

async fn run_typed<F: Flow>(invoker: &FlowInvoker, input: Value) -> Result<Value, AiError> {
    let output = invoker.invoke_value::<F>(input).await?;
    serde_json::to_value(output).map_err(|e| AiError::internal(e.to_string()))
}

async fn run_flow(invoker: &FlowInvoker, flow: FlowId, input: Value) -> Result<Value, AiError> {
    match flow {
        FlowId::CropAnalysis => run_typed::<AnalyzeCropImage>(invoker, input).await,
        FlowId::AgriculturalAdvice => run_typed::<GenerateAgriculturalAdvice>(invoker, input).await,
        FlowId::ExpertAdvice => run_typed::<GenerateExpertAdvice>(invoker, input).await,
        FlowId::PricePrediction => run_typed::<PredictMarketPrice>(invoker, input).await,
        FlowId::Schemes => run_typed::<FindGovernmentSchemes>(invoker, input).await,
    }
}

/// Run one scenario against a fresh fake provider.
pub async fn run_scenario(scenario: &GoldenScenario) -> EvalResult {
    let fake = Arc::new(FakeModelProvider::new(scenario.reply.clone()));
    let invoker = FlowInvoker::new(fake.clone());
    let outcome = run_flow(&invoker, scenario.flow, scenario.input.clone()).await;

    let mut failures = Vec::new();
    match (&scenario.expect, &outcome) {
        (Expectation::Output(check), Ok(output)) => {
            if let Err(reason) = check(output) {
                failures.push(reason);
            }
        }
        (Expectation::Output(_), Err(err)) => {
            failures.push(format!("expected success, got {}: {}", err.code(), err));
        }
        (Expectation::Error(code), Err(err)) if err.code() == *code => {}
        (Expectation::Error(code), Err(err)) => {
            failures.push(format!("expected {}, got {}: {}", code, err.code(), err));
        }
        (Expectation::Error(code), Ok(_)) => {
            failures.push(format!("expected {}, got success", code));
        }
    }

    let provider_calls = fake.calls();
    if provider_calls != scenario.expected_calls {
        failures.push(format!(
            "expected {} provider call(s), observed {}",
            scenario.expected_calls, provider_calls
        ));
    }

    if !scenario.prompt_contains.is_empty() {
        match fake.last_request() {
            Some(request) => {
                for needle in &scenario.prompt_contains {
                    if !request.prompt.text.contains(needle) {
                        failures.push(format!("prompt is missing {:?}", needle));
                    }
                }
            }
            None => failures.push("no prompt was sent".to_string()),
        }
    }

    EvalResult {
        scenario_name: scenario.name.to_string(),
        passed: failures.is_empty(),
        failures,
        provider_calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::all_scenarios;

    #[tokio::test]
    async fn test_all_golden_scenarios() {
        let mut failed = Vec::new();
        for scenario in all_scenarios() {
            let result = run_scenario(&scenario).await;
            println!(
                "{} {} ({} call(s))",
                if result.passed { "PASS" } else { "FAIL" },
                result.scenario_name,
                result.provider_calls
            );
            if !result.passed {
                failed.push(format!("{}: {:?}", result.scenario_name, result.failures));
            }
        }
        assert!(failed.is_empty(), "failed scenarios: {:#?}", failed);
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_independent() {
        let scenarios = all_scenarios();
        let results =
            futures::future::join_all(scenarios.iter().map(run_scenario)).await;
        assert!(results.iter().all(|r| r.passed));
    }

    #[tokio::test]
    async fn test_harness_reports_wrong_expectation() {
        let mut scenario = all_scenarios()
            .into_iter()
            .find(|s| s.name == "schemes_none_found")
            .unwrap();
        scenario.expect = Expectation::Error("PROVIDER_ERROR");
        let result = run_scenario(&scenario).await;
        assert!(!result.passed);
        assert_eq!(result.failures, vec!["expected PROVIDER_ERROR, got success"]);
    }
}
