//! Configuration handed to every path reference operation.

use crate::provider::{JsonProvider, SerdeJsonProvider};

/// Selects the [`JsonProvider`] used to read and write documents.
#[derive(Debug, Clone, Default)]
pub struct Configuration<P: JsonProvider = SerdeJsonProvider> {
    provider: P,
}

impl<P: JsonProvider> Configuration<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn json_provider(&self) -> &P {
        &self.provider
    }
}

impl Configuration<SerdeJsonProvider> {
    pub fn builder() -> ConfigurationBuilder<SerdeJsonProvider> {
        ConfigurationBuilder {
            provider: SerdeJsonProvider,
        }
    }
}

/// Builder for [`Configuration`].
#[derive(Debug, Clone)]
pub struct ConfigurationBuilder<P: JsonProvider> {
    provider: P,
}

impl<P: JsonProvider> ConfigurationBuilder<P> {
    /// Replaces the provider, changing the document type the configuration
    /// operates on.
    pub fn json_provider<Q: JsonProvider>(self, provider: Q) -> ConfigurationBuilder<Q> {
        ConfigurationBuilder { provider }
    }

    pub fn build(self) -> Configuration<P> {
        Configuration::new(self.provider)
    }
}
