//! Text generation providers and the failover gateway

mod gateway;
mod gemini;
mod groq;
mod mock_provider;

use std::sync::Arc;

pub use gateway::AiGateway;
use gitme_domain::{GenerationConfig, ProviderSettings, RetryConfig};
pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use mock_provider::MockProvider;

/// Factory for the default Gemini -> Groq gateway
pub struct GatewayFactory;

impl GatewayFactory {
    pub fn gemini_then_groq(
        client: reqwest::Client,
        gemini: ProviderSettings,
        groq: ProviderSettings,
        generation: GenerationConfig,
        retry: RetryConfig,
    ) -> AiGateway {
        let primary = GeminiProvider::new(client.clone(), gemini, generation.clone());
        let secondary = GroqProvider::new(client, groq, generation);
        AiGateway::new(Arc::new(primary), Arc::new(secondary), retry)
    }
}
