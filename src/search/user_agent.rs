use crate::config::UserAgentConfig;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Used only if the pool is somehow empty; validation rejects that config
const FALLBACK_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Desktop browser identities, one picked at random per request
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Arc<[String]>,
}

impl UserAgentPool {
    pub fn new(agents: Vec<String>) -> Self {
        Self {
            agents: agents.into(),
        }
    }

    pub fn from_config(config: &UserAgentConfig) -> Self {
        Self::new(config.agents.clone())
    }

    /// Picks a random agent
    pub fn pick(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_AGENT)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
