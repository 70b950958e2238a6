//! The flow abstraction and its single invocation path.
//!
//! Every flow runs the same steps: validate the request, render the prompt,
//! call the provider once, validate the reply, then decode it. A request that
//! fails validation never reaches the provider.

use std::sync::Arc;

use kisan_core::schema::ObjectSchema;
use kisan_core::SchemaViolation;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::AiError;
use crate::model_provider::{GenerateRequest, ModelProvider};
use crate::prompt_template::PromptTemplate;

/// A named, schema-checked prompt call.
pub trait Flow: Send + Sync + 'static {
    type Input: Serialize + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;

    /// Stable flow id (e.g. `predictMarketPrice`).
    const NAME: &'static str;

    /// What the user sees when the flow fails for any reason other than bad input.
    const FAILURE_MESSAGE: &'static str;

    fn input_schema() -> &'static ObjectSchema;
    fn output_schema() -> &'static ObjectSchema;
    fn template() -> &'static PromptTemplate;

    /// Extra checks on a decoded reply beyond field presence and types. May
    /// rewrite accepted values into their canonical form.
    fn check_output(_output: &mut Self::Output) -> Result<(), SchemaViolation> {
        Ok(())
    }
}

/// Runs flows against one model provider.
///
/// Stateless apart from the shared provider handle; clone freely.
#[derive(Clone)]
pub struct FlowInvoker {
    provider: Arc<dyn ModelProvider>,
}

impl FlowInvoker {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn ModelProvider> {
        &self.provider
    }

    /// Invoke flow `F` with a typed request.
    pub async fn invoke<F: Flow>(&self, input: &F::Input) -> Result<F::Output, AiError> {
        let value = serde_json::to_value(input)
            .map_err(|e| AiError::internal(format!("Failed to serialize {} input: {}", F::NAME, e)))?;
        self.invoke_value::<F>(value).await
    }

    /// Invoke flow `F` with an untyped request, e.g. a JSON body.
    ///
    /// Field type mismatches are reported as validation errors naming the
    /// field rather than as decode errors.
    pub async fn invoke_value<F: Flow>(&self, input: Value) -> Result<F::Output, AiError> {
        if let Err(err) = F::input_schema().validate_input(&input) {
            debug!("{} rejected input: {}", F::NAME, err);
            return Err(AiError::InvalidInput(err));
        }

        let prompt = F::template().render(&input)?;
        let request = GenerateRequest {
            flow: F::NAME,
            prompt,
            output_schema: F::output_schema().clone(),
        };

        debug!(
            "Invoking flow {} via {} ({})",
            F::NAME,
            self.provider.id(),
            self.provider.model()
        );
        let reply = self.provider.generate(&request).await?;

        if let Err(violation) = F::output_schema().validate_output(&reply) {
            warn!("{} reply rejected: {}", F::NAME, violation);
            return Err(AiError::OutputSchema(violation));
        }

        let mut output: F::Output = serde_json::from_value(reply)
            .map_err(|e| AiError::internal(format!("Failed to decode {} reply: {}", F::NAME, e)))?;

        if let Err(violation) = F::check_output(&mut output) {
            warn!("{} reply rejected: {}", F::NAME, violation);
            return Err(AiError::OutputSchema(violation));
        }
        Ok(output)
    }
}
