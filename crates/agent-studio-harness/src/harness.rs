use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::errors::HarnessError;
use crate::model::ProviderId;
use crate::provider::ProviderAdapter;
use crate::session::{Session, SessionConfig};
use crate::vendors::gemini::{GeminiClientConfig, GeminiProvider};

pub(crate) struct HarnessInner {
    providers: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
}

impl HarnessInner {
    pub(crate) fn provider(&self, id: &ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.get(id).cloned()
    }
}

/// Registry of provider adapters. Cheap to clone; every clone shares the
/// same adapters.
#[derive(Clone)]
pub struct Harness {
    pub(crate) inner: Arc<HarnessInner>,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// Harness with a single Gemini provider built from `config`.
    pub fn gemini(config: GeminiClientConfig) -> Result<Self, HarnessError> {
        Self::builder()
            .register_provider(Arc::new(GeminiProvider::new(config)?))
            .build()
    }

    /// Opens a session; runs started from it share one session id in logs.
    pub fn session(&self, config: SessionConfig) -> Session {
        Session::new(self.inner.clone(), config)
    }
}

#[derive(Default)]
pub struct HarnessBuilder {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl HarnessBuilder {
    /// Adds an adapter. Each provider id may be registered once.
    pub fn register_provider(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Fails with `HarnessError::Config` if two adapters share an id.
    pub fn build(self) -> Result<Harness, HarnessError> {
        let mut providers = HashMap::with_capacity(self.providers.len());
        for adapter in self.providers {
            match providers.entry(adapter.id()) {
                Entry::Occupied(slot) => {
                    return Err(HarnessError::Config(format!(
                        "duplicate provider registration: {}",
                        slot.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(adapter);
                }
            }
        }
        Ok(Harness {
            inner: Arc::new(HarnessInner { providers }),
        })
    }
}
