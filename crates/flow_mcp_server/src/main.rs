use rmcp::{
    ErrorData as McpError,
    model::*,
    tool, tool_handler, tool_router,
    handler::server::{tool::ToolRouter, ServerHandler, wrapper::Parameters},
    transport,
    ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use flow_client::dom::{Document, MemoryDocument, NodeId};
use flow_client::reporter::CollectingReporter;
use flow_client::{ActionId, FlowClient, FlowConfig, SwapStrategy};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ExecuteParams {
    /// Dotted action identifier, e.g. "cart.add"
    action: String,
    /// JSON object forwarded as the envelope's params
    params: Option<Value>,
    /// HTML of the page the trigger lives in
    page: String,
    /// Selector of the trigger element inside `page`
    trigger: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SubmitParams {
    action: String,
    page: String,
    /// Selector of the form whose named controls become the params
    form: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct SwapPreviewParams {
    page: String,
    target: String,
    #[serde(default = "default_swap")]
    swap: String,
    markup: String,
}

fn default_swap() -> String { SwapStrategy::default().keyword().to_string() }

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct ParseActionParams {
    action: String,
}

#[derive(Clone)]
struct FlowMcpServer {
    tool_router: ToolRouter<Self>,
    client: FlowClient,
}

fn load_page(page: &str, selector: &str) -> Result<(MemoryDocument, NodeId), McpError> {
    let doc = MemoryDocument::parse(page)
        .map_err(|e| McpError::invalid_params(format!("Invalid page: {}", e), None))?;
    let node = doc
        .query_selector(selector)
        .map_err(|e| McpError::invalid_params(format!("Invalid selector: {}", e), None))?
        .ok_or_else(|| McpError::invalid_params(format!("No element matches \"{}\"", selector), None))?;
    Ok((doc, node))
}

fn object_params(params: Option<Value>) -> Result<Map<String, Value>, McpError> {
    match params {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(_) => Err(McpError::invalid_params("params must be a JSON object", None)),
    }
}

async fn execute(client: &FlowClient, params: ExecuteParams) -> Result<Value, McpError> {
    let (mut doc, trigger) = load_page(&params.page, &params.trigger)?;
    let args = object_params(params.params)?;

    let reporter = CollectingReporter::new();
    let outcome = client
        .reporting_to(reporter.clone())
        .execute(&params.action, args, &trigger, &mut doc)
        .await;

    Ok(json!({
        "outcome": outcome,
        "html": doc.to_html(),
        "alerts": reporter.alerts()
    }))
}

async fn submit(client: &FlowClient, params: SubmitParams) -> Result<Value, McpError> {
    let (mut doc, form) = load_page(&params.page, &params.form)?;

    let reporter = CollectingReporter::new();
    let outcome = client
        .reporting_to(reporter.clone())
        .submit(&params.action, &form, &mut doc)
        .await;

    Ok(json!({
        "outcome": outcome,
        "html": doc.to_html(),
        "alerts": reporter.alerts()
    }))
}

fn swap_preview(params: SwapPreviewParams) -> Result<Value, McpError> {
    let (mut doc, target) = load_page(&params.page, &params.target)?;
    let strategy: SwapStrategy = params
        .swap
        .parse()
        .map_err(|e| McpError::invalid_params(format!("{}", e), None))?;

    doc.swap(&target, strategy, &params.markup)
        .map_err(|e| McpError::invalid_params(format!("Swap failed: {}", e), None))?;

    Ok(json!({
        "strategy": strategy,
        "html": doc.to_html()
    }))
}

fn parse_action(params: ParseActionParams) -> Result<Value, McpError> {
    let action = ActionId::parse(&params.action)
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    Ok(json!({
        "flow": action.namespace(),
        "method": action.command()
    }))
}

#[tool_router]
impl FlowMcpServer {
    fn new() -> anyhow::Result<Self> {
        let config = FlowConfig::from_env();
        tracing::info!("Flow endpoint: {}", config.endpoint_url());
        let client = FlowClient::new(config)?;

        Ok(Self {
            tool_router: Self::tool_router(),
            client,
        })
    }

    #[tool(description = "Run a flow action against an HTML page and return the patched page, outcome and alerts")]
    async fn flow_execute(&self, params: Parameters<ExecuteParams>) -> Result<CallToolResult, McpError> {
        let result = execute(&self.client, params.0).await?;
        Ok(CallToolResult::structured(result))
    }

    #[tool(description = "Submit a form on an HTML page as a flow action, using its named controls as params")]
    async fn flow_submit(&self, params: Parameters<SubmitParams>) -> Result<CallToolResult, McpError> {
        let result = submit(&self.client, params.0).await?;
        Ok(CallToolResult::structured(result))
    }

    #[tool(description = "Apply markup to an element with a swap strategy, without calling the backend")]
    async fn flow_swap_preview(&self, params: Parameters<SwapPreviewParams>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::structured(swap_preview(params.0)?))
    }

    #[tool(description = "Validate a dotted action identifier and show the flow/method it maps to")]
    async fn flow_parse_action(&self, params: Parameters<ParseActionParams>) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::structured(parse_action(params.0)?))
    }
}

#[tool_handler]
impl ServerHandler for FlowMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Headless flow dispatcher: runs flow actions against HTML pages and returns the patched markup".into(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP stream.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let server = FlowMcpServer::new()?;
    let transport = transport::stdio();

    tracing::info!("Starting Flow MCP Server on stdio...");

    server.serve(transport).await?.waiting().await?;

    Ok(())
}
