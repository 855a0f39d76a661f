use crate::core::{Result, StateError};

/// Explicit stand-in for an ambient context provider.
///
/// The owning feature constructs the value and places it in the slot;
/// consumers resolve it by name. Resolving an empty slot is reported as
/// [`StateError::MissingProvider`] instead of silently yielding nothing.
#[derive(Debug)]
pub struct ProviderSlot<T> {
    provider: &'static str,
    value: Option<T>,
}

impl<T> ProviderSlot<T> {
    pub fn empty(provider: &'static str) -> Self {
        Self { provider, value: None }
    }

    pub fn with_value(provider: &'static str, value: T) -> Self {
        Self {
            provider,
            value: Some(value),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider
    }

    /// Installs `value`, returning whatever was provided before.
    pub fn provide(&mut self, value: T) -> Option<T> {
        self.value.replace(value)
    }

    /// Unmounts the provided value.
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn is_provided(&self) -> bool {
        self.value.is_some()
    }

    pub fn require(&self, consumer: &str) -> Result<&T> {
        self.value.as_ref().ok_or_else(|| self.missing(consumer))
    }

    pub fn require_mut(&mut self, consumer: &str) -> Result<&mut T> {
        let provider = self.provider;
        self.value
            .as_mut()
            .ok_or_else(|| StateError::MissingProvider(consumer.to_string(), provider.to_string()))
    }

    fn missing(&self, consumer: &str) -> StateError {
        StateError::MissingProvider(consumer.to_string(), self.provider.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_fails_loudly() {
        let slot: ProviderSlot<u8> = ProviderSlot::empty("PhasesProvider");
        let err = slot.require("phase list").unwrap_err();
        assert_eq!(
            err,
            StateError::MissingProvider("phase list".into(), "PhasesProvider".into())
        );
    }

    #[test]
    fn test_provide_and_take() {
        let mut slot = ProviderSlot::empty("PostsProvider");
        assert!(slot.provide(3u8).is_none());
        *slot.require_mut("counter").unwrap() += 1;
        assert_eq!(*slot.require("counter").unwrap(), 4);

        assert_eq!(slot.take(), Some(4));
        assert!(!slot.is_provided());
        assert!(slot.require_mut("counter").is_err());
    }
}
