use crate::error::StyleError;
use crate::options::ElementOptions;
use crate::style::{Style, StyleOverrides};
use crate::stylesheet::Stylesheet;
use std::sync::Arc;

/// Cache key of the substyle derived from `base` with `overrides`:
/// `"{base}__{k=v;...}"`, where `base` is the lower-cased base name.
pub fn substyle_key(base: &str, overrides: &StyleOverrides) -> String {
    format!("{}__{}", base.to_lowercase(), overrides.canonical())
}

impl Stylesheet {
    /// Resolves the concrete style for an element.
    ///
    /// With no options (or options that normalize to no change) this is the
    /// style registered under `name`. Otherwise the substyle derived from it
    /// is returned, created and registered on first use so that identical
    /// requests share one instance.
    pub fn resolve(
        &mut self,
        name: &str,
        options: Option<&ElementOptions>,
    ) -> Result<Arc<Style>, StyleError> {
        let base = Arc::clone(self.require(name)?);

        let overrides = match options {
            Some(options) if !options.is_empty() => options.to_overrides()?,
            _ => return Ok(base),
        };
        self.derive_cached(&base, &overrides)
    }

    /// Returns the substyle of `base` carrying `overrides`, deriving and
    /// registering it if it does not exist yet.
    pub fn derive_cached(
        &mut self,
        base: &Arc<Style>,
        overrides: &StyleOverrides,
    ) -> Result<Arc<Style>, StyleError> {
        if overrides.is_empty() {
            return Ok(Arc::clone(base));
        }

        let key = substyle_key(&base.name, overrides);
        if let Some(cached) = self.get(&key) {
            return Ok(Arc::clone(cached));
        }

        log::debug!("Deriving substyle '{}'", key);
        let derived = base.derive(key, overrides);
        self.add(derived, None, false)
    }
}
