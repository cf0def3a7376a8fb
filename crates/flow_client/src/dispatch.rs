//! Action dispatch and DOM patching.
//!
//! Every entry point here is terminal: failures are logged, alerted when the
//! end user needs to know, and folded into an [`Outcome`]. Nothing is
//! propagated back to the caller as an error.

use crate::dom::Document;
use crate::reporter::{server_error_message, NETWORK_ERROR_MESSAGE};
use crate::types::{Outcome, Swapped};
use crate::{ActionId, FlowClient, FlowError, Result, SwapStrategy};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

impl FlowClient {
    /// Run one action end to end against `document`.
    ///
    /// The document is only touched after a successful response, and only
    /// through a single [`Document::swap`] call.
    pub async fn execute<D: Document>(
        &self,
        action: &str,
        params: Map<String, Value>,
        trigger: &D::Node,
        document: &mut D,
    ) -> Outcome {
        let markup = match self.fetch_markup(action, params).await {
            Ok(markup) => markup,
            Err(outcome) => return outcome,
        };
        self.patch(document, trigger, &markup)
    }

    /// Fire-and-forget variant of [`execute`](Self::execute).
    ///
    /// The document lock is taken only once the response has arrived, so
    /// any number of invocations can be in flight at once. When several
    /// target the same element, whichever response lands last wins.
    pub fn dispatch<D>(
        &self,
        action: impl Into<String>,
        params: Map<String, Value>,
        trigger: D::Node,
        document: Arc<Mutex<D>>,
    ) -> JoinHandle<Outcome>
    where
        D: Document + Send + 'static,
        D::Node: Send + Sync + 'static,
    {
        let client = self.clone();
        let action = action.into();
        tokio::spawn(async move {
            let markup = match client.fetch_markup(&action, params).await {
                Ok(markup) => markup,
                Err(outcome) => return outcome,
            };
            let mut document = document.lock().await;
            client.patch(&mut *document, &trigger, &markup)
        })
    }

    /// Submit a form: its named controls become the params and the form
    /// itself is the trigger.
    pub async fn submit<D: Document>(
        &self,
        action: &str,
        form: &D::Node,
        document: &mut D,
    ) -> Outcome {
        let params = document.form_data(form);
        self.execute(action, params, form, document).await
    }

    /// Resolve target and strategy from `trigger` and merge `markup` into
    /// the document.
    pub fn apply<D: Document>(
        &self,
        document: &mut D,
        trigger: &D::Node,
        markup: &str,
    ) -> Result<Swapped> {
        let target_attribute = self.config().target_attribute();
        let selector = document
            .attribute(trigger, &target_attribute)
            .filter(|selector| !selector.is_empty())
            .ok_or(FlowError::MissingTargetAttribute(target_attribute))?;

        let destination = document
            .query_selector(&selector)?
            .ok_or_else(|| FlowError::TargetNotFound(selector.clone()))?;

        let strategy = match document.attribute(trigger, &self.config().swap_attribute()) {
            Some(keyword) if !keyword.is_empty() => keyword.parse::<SwapStrategy>()?,
            _ => SwapStrategy::default(),
        };

        tracing::debug!("Swapping content into {} using {}", selector, strategy);
        document.swap(&destination, strategy, markup)?;

        Ok(Swapped {
            target: selector,
            strategy,
        })
    }

    async fn fetch_markup(
        &self,
        action: &str,
        params: Map<String, Value>,
    ) -> std::result::Result<String, Outcome> {
        tracing::info!(action, "Flow triggered");

        let action_id = ActionId::parse(action).map_err(|err| self.fail(action, err.into()))?;
        self.send(&action_id, &params)
            .await
            .map_err(|err| self.fail(action, err))
    }

    fn patch<D: Document>(&self, document: &mut D, trigger: &D::Node, markup: &str) -> Outcome {
        match self.apply(document, trigger, markup) {
            Ok(swapped) => Outcome::Swapped(swapped),
            Err(err) => self.fail("", err),
        }
    }

    fn fail(&self, action: &str, err: FlowError) -> Outcome {
        match err {
            FlowError::Server { status, body } => {
                tracing::error!(action, status, body = %body, "Flow error");
                self.reporter.alert(&server_error_message(&body));
                Outcome::ServerRejected { status }
            }
            FlowError::Connection(_) | FlowError::Serialize(_) => {
                tracing::error!(action, error = %err, "Flow network or runtime error");
                self.reporter.alert(NETWORK_ERROR_MESSAGE);
                Outcome::TransportFailed {
                    message: err.to_string(),
                }
            }
            FlowError::Dom(_) => {
                tracing::error!(error = %err, "Flow network or runtime error");
                self.reporter.alert(NETWORK_ERROR_MESSAGE);
                Outcome::PatchFailed {
                    message: err.to_string(),
                }
            }
            FlowError::InvalidAction(inner) => {
                tracing::error!(action, error = %inner, "Flow error: invalid action identifier");
                Outcome::InvalidAction {
                    message: inner.to_string(),
                }
            }
            FlowError::MissingTargetAttribute(attribute) => {
                tracing::error!(
                    "Flow error: no \"{}\" attribute found on the trigger element",
                    attribute
                );
                Outcome::MissingTarget
            }
            FlowError::TargetNotFound(selector) => {
                tracing::error!("Flow error: target element \"{}\" not found", selector);
                Outcome::TargetNotFound { selector }
            }
            FlowError::UnknownSwap(keyword) => {
                tracing::error!("Flow error: unknown swap method \"{}\"", keyword);
                Outcome::UnknownSwap { keyword }
            }
        }
    }
}
