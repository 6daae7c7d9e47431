//! Client for the prompt-completion gateway fronting the hosted language model.
//!
//! Every pipeline stage sends one prompt and receives one free-text
//! completion. This crate handles:
//! - Connection management to the gateway
//! - Converting prompts to protobuf messages
//! - Validating that a completion actually carries content
//! - Error handling

use thiserror::Error;
use tonic::transport::Channel;
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod infographic {
    tonic::include_proto!("infographic");
}

use infographic::{
    prompt_model_client::PromptModelClient as GrpcPromptModelClient, CompletionRequest,
};

/// Errors that can occur when talking to the prompt-model gateway
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to connect to prompt model at {addr}: {reason}")]
    Connection { addr: String, reason: String },

    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Invalid response from prompt model: {0}")]
    InvalidResponse(String),
}

/// Client for the prompt-model gateway.
///
/// Wraps the auto-generated gRPC client and exposes the one operation the
/// pipeline needs: send a prompt, get the completion text back.
#[derive(Clone)]
pub struct PromptClient {
    client: GrpcPromptModelClient<Channel>,
    service_addr: String,
}

impl PromptClient {
    /// Connect to the prompt-model gateway.
    ///
    /// # Arguments
    /// * `addr` - Address of the gRPC service (e.g., "http://localhost:50051")
    pub async fn connect(addr: impl Into<String>) -> Result<Self, LlmError> {
        let addr = addr.into();
        info!("Connecting to prompt model at {}", addr);

        let channel = Channel::from_shared(addr.clone())
            .map_err(|e| LlmError::Connection {
                addr: addr.clone(),
                reason: e.to_string(),
            })?
            .connect()
            .await
            .map_err(|e| LlmError::Connection {
                addr: addr.clone(),
                reason: e.to_string(),
            })?;

        let client = GrpcPromptModelClient::new(channel);
        Ok(PromptClient {
            client,
            service_addr: addr,
        })
    }

    /// Send one prompt and return the completion text verbatim.
    ///
    /// The gateway keeps no conversation state; anything a later stage needs
    /// from an earlier one must be re-embedded in the prompt by the caller.
    pub async fn complete(&self, prompt: impl Into<String>) -> Result<String, LlmError> {
        let prompt = prompt.into();
        debug!(prompt_len = prompt.len(), "Sending completion request");

        let request = tonic::Request::new(CompletionRequest { prompt });

        // The generated client needs &mut self; it is a cheap channel clone.
        let mut client = self.client.clone();
        let response = client.complete(request).await.map_err(|e| {
            error!("gRPC error while requesting completion: {}", e);
            LlmError::Request(e.to_string())
        })?;

        let content = response.into_inner().content;
        if content.trim().is_empty() {
            error!("Prompt model returned an empty completion");
            return Err(LlmError::InvalidResponse(
                "completion carried no content".into(),
            ));
        }
        debug!(content_len = content.len(), "Received completion");
        Ok(content)
    }

    /// Get the address of the gateway this client is connected to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infographic::prompt_model_server::{PromptModel, PromptModelServer};
    use infographic::CompletionResponse;
    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::{Request, Response, Status};

    /// Echo model: replies with a fixed prefix plus the prompt, or with an
    /// empty completion when asked to.
    #[derive(Default)]
    struct EchoModel;

    #[tonic::async_trait]
    impl PromptModel for EchoModel {
        async fn complete(
            &self,
            request: Request<CompletionRequest>,
        ) -> Result<Response<CompletionResponse>, Status> {
            let prompt = request.into_inner().prompt;
            let content = if prompt.contains("reply with nothing") {
                String::new()
            } else {
                format!("echo: {}", prompt)
            };
            Ok(Response::new(CompletionResponse { content }))
        }
    }

    async fn start_echo_service() -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind echo service");
        let addr = listener.local_addr().expect("Failed to get local address");
        let service = PromptModelServer::new(EchoModel);

        let handle = tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(service)
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Echo service failed");
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_complete_round_trip() {
        let (addr, handle) = start_echo_service().await;

        let client = PromptClient::connect(addr).await.expect("connect failed");
        let content = client
            .complete("describe a pie chart")
            .await
            .expect("completion failed");

        assert_eq!(content, "echo: describe a pie chart");
        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_completion_is_invalid() {
        let (addr, handle) = start_echo_service().await;

        let client = PromptClient::connect(addr).await.expect("connect failed");
        let result = client.complete("please reply with nothing").await;

        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
        handle.abort();
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_address_fails() {
        // Port 1 is essentially never listening.
        let result = PromptClient::connect("http://127.0.0.1:1").await;
        assert!(matches!(result, Err(LlmError::Connection { .. })));
    }

    #[tokio::test]
    async fn test_service_address_is_kept() {
        let (addr, handle) = start_echo_service().await;

        let client = PromptClient::connect(addr.clone())
            .await
            .expect("connect failed");
        assert_eq!(client.service_address(), addr);
        handle.abort();
    }
}
