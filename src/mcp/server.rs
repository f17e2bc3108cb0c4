use crate::db::BookStore;
use crate::llm::LLMClient;
use crate::search::SearchRequest;
use crate::tools::{book_search, calculator};
use crate::types::{format_number, AppError};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Name reported in the MCP `initialize` handshake
pub const SERVER_NAME: &str = "Authless Calculator";

/// Parameters for the `add` tool
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddParams {
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

/// Parameters for the `calculate` tool
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CalculateParams {
    /// The operation to perform
    pub operation: calculator::Operation,
    /// First operand
    pub a: f64,
    /// Second operand
    pub b: f64,
}

/// MCP server exposing the calculator and book search tools
#[derive(Clone)]
pub struct BookwiseMcpServer {
    store: Arc<dyn BookStore>,
    llm: Arc<dyn LLMClient>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BookwiseMcpServer {
    pub fn new(store: Arc<dyn BookStore>, llm: Arc<dyn LLMClient>) -> Self {
        Self {
            store,
            llm,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Add two numbers")]
    pub async fn add(&self, params: Parameters<AddParams>) -> Result<CallToolResult, McpError> {
        let AddParams { a, b } = params.0;
        let sum = calculator::add(a, b);

        Ok(CallToolResult::success(vec![Content::text(format_number(sum))]))
    }

    #[tool(description = "Perform add, subtract, multiply or divide on two numbers")]
    pub async fn calculate(
        &self,
        params: Parameters<CalculateParams>,
    ) -> Result<CallToolResult, McpError> {
        let CalculateParams { operation, a, b } = params.0;
        debug!(operation = operation.as_str(), a, b, "calculate");

        Ok(CallToolResult::success(vec![Content::text(
            calculator::calculate_text(operation, a, b),
        )]))
    }

    #[tool(
        name = "searchBooks",
        description = "Search the book database and get an AI-written summary of the matches. \
                       Phrases like \"top rated\", \"recommend\" or \"books by\" change how \
                       results are selected and presented."
    )]
    pub async fn search_books(
        &self,
        params: Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let request = params.0;

        match book_search::search_books(self.store.as_ref(), self.llm.as_ref(), &request).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(AppError::InvalidInput(msg)) => Err(McpError::invalid_params(msg, None)),
            Err(e) => {
                error!(error = %e, query = %request.query, "searchBooks failed");
                Err(McpError::internal_error(e.to_string(), None))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for BookwiseMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Arithmetic (add, calculate) and book search with LLM summaries (searchBooks)"
                    .into(),
            ),
        }
    }
}

/// Start the MCP server with stdio transport
pub async fn start_stdio_server(server: BookwiseMcpServer) -> crate::types::Result<()> {
    use rmcp::{ServiceExt, transport::io::stdio};

    let transport = stdio();

    let running = server
        .serve(transport)
        .await
        .map_err(|e| AppError::Internal(format!("MCP server error: {}", e)))?;

    running
        .waiting()
        .await
        .map_err(|e| AppError::Internal(format!("MCP server task failed: {}", e)))?;

    Ok(())
}
