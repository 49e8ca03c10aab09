//! Label strategies keyed by carrier type.

use std::collections::HashMap;
use std::sync::Arc;

use super::seur::SeurLabelStrategy;
use super::strategy::{DefaultLabelStrategy, LabelStrategy};
use super::ups::UpsLabelStrategy;
use crate::carrier::{CarrierError, GatewayClient, ReqwestClient};
use crate::config::ConfigFile;
use crate::model::CarrierType;

/// Maps carrier types to label strategies.
///
/// Carrier types without a registered strategy, and shipments without a
/// carrier, fall back to [`DefaultLabelStrategy`].
pub struct StrategyRegistry {
    strategies: HashMap<CarrierType, Arc<dyn LabelStrategy>>,
    fallback: Arc<dyn LabelStrategy>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self {
            strategies: HashMap::new(),
            fallback: Arc::new(DefaultLabelStrategy),
        }
    }
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the strategy for a carrier type, replacing any previous one.
    pub fn with_strategy(
        mut self,
        carrier_type: CarrierType,
        strategy: Arc<dyn LabelStrategy>,
    ) -> Self {
        self.strategies.insert(carrier_type, strategy);
        self
    }

    /// Build the registry for the carrier gateways named in the config.
    ///
    /// Carriers without a configured endpoint keep the default strategy.
    pub fn from_config(config: &ConfigFile) -> Result<Self, CarrierError> {
        let mut registry = Self::new();
        let gateway = &config.gateway;
        if gateway.ups_url.is_none() && gateway.seur_url.is_none() {
            return Ok(registry);
        }

        let dimensions = config.defaults.dimensions;

        if let Some(url) = &gateway.ups_url {
            let http = ReqwestClient::with_timeout(gateway.timeout_secs)?;
            let client = Arc::new(GatewayClient::new(http, url.clone()));
            registry = registry.with_strategy(
                CarrierType::Ups,
                Arc::new(UpsLabelStrategy::new(client).with_fallback_dimensions(dimensions)),
            );
        }
        if let Some(url) = &gateway.seur_url {
            let http = ReqwestClient::with_timeout(gateway.timeout_secs)?;
            let client = Arc::new(GatewayClient::new(http, url.clone()));
            registry = registry.with_strategy(
                CarrierType::Seur,
                Arc::new(SeurLabelStrategy::new(client).with_fallback_dimensions(dimensions)),
            );
        }

        Ok(registry)
    }

    /// Strategy for a carrier type; the default strategy when none matches.
    pub fn resolve(&self, carrier_type: Option<CarrierType>) -> &dyn LabelStrategy {
        let strategy = carrier_type
            .and_then(|t| self.strategies.get(&t))
            .unwrap_or(&self.fallback);
        Arc::as_ref(strategy)
    }

    pub fn is_registered(&self, carrier_type: CarrierType) -> bool {
        self.strategies.contains_key(&carrier_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::MockCarrierClient;

    #[test]
    fn test_unregistered_falls_back_to_default() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.resolve(None).name(), "default");
        assert_eq!(registry.resolve(Some(CarrierType::Ups)).name(), "default");
    }

    #[test]
    fn test_registered_strategy_is_resolved() {
        let client = Arc::new(MockCarrierClient::returning("1Z", vec![]));
        let registry = StrategyRegistry::new()
            .with_strategy(CarrierType::Ups, Arc::new(UpsLabelStrategy::new(client)));

        assert!(registry.is_registered(CarrierType::Ups));
        assert_eq!(registry.resolve(Some(CarrierType::Ups)).name(), "ups");
        assert_eq!(registry.resolve(Some(CarrierType::Other)).name(), "default");
    }

    #[test]
    fn test_from_config_registers_configured_gateways() {
        let mut config = ConfigFile::default();
        config.gateway.ups_url = Some("https://gw.example.com/ups".to_string());

        let registry = StrategyRegistry::from_config(&config).unwrap();
        assert!(registry.is_registered(CarrierType::Ups));
        assert!(!registry.is_registered(CarrierType::Seur));
    }

    #[test]
    fn test_from_config_without_gateways() {
        let registry = StrategyRegistry::from_config(&ConfigFile::default()).unwrap();
        assert_eq!(registry.resolve(Some(CarrierType::Seur)).name(), "default");
    }
}
