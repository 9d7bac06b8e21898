//! Parameter Resolver - turns flags, prompts, and defaults into a complete
//! parameter set.
//!
//! One resolver serves every bundle: resolution is driven entirely by the
//! bundle's [`ParameterSchema`], so flag-based and prompt-based collection
//! behave identically.
//!
//! Resolution walks the schema in declaration order. For each spec:
//! 1. an explicitly provided value is validated and taken;
//! 2. otherwise, interactively, the user is prompted (looping until the
//!    value validates or the user cancels);
//! 3. otherwise the declared default is taken;
//! 4. otherwise resolution fails with `MissingParameter`.
//!
//! Interactive runs recover from invalid input by re-prompting with the
//! rejection reason; non-interactive runs fail fast on the first invalid or
//! missing value, since nobody is there to correct it.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::ParameterPrompt},
    domain::{DomainError, ParameterSchema, ParameterSpec, ResolvedParameters},
    error::{StencilError, StencilResult},
};

/// Schema-driven parameter resolution.
pub struct ParameterResolver<'a> {
    prompt: Option<&'a dyn ParameterPrompt>,
}

impl<'a> ParameterResolver<'a> {
    /// Resolver that never prompts: flags and defaults only.
    pub fn non_interactive() -> Self {
        Self { prompt: None }
    }

    /// Resolver that falls back to the given prompt for missing or invalid
    /// values.
    pub fn interactive(prompt: &'a dyn ParameterPrompt) -> Self {
        Self { prompt: Some(prompt) }
    }

    /// Resolve the full schema against explicitly provided values.
    ///
    /// The returned set satisfies every spec in the schema; the scaffolding
    /// engine never sees an incomplete or invalid parameter set.
    #[instrument(skip_all, fields(params = schema.len()))]
    pub fn resolve(
        &self,
        schema: &ParameterSchema,
        provided: &BTreeMap<String, String>,
    ) -> StencilResult<ResolvedParameters> {
        // A provided key the schema does not declare is a typo, not a value
        // to silently drop.
        for key in provided.keys() {
            if schema.get(key).is_none() {
                return Err(DomainError::InvalidParameter {
                    name: key.clone(),
                    reason: "not declared by this bundle".into(),
                }
                .into());
            }
        }

        let mut resolved = ResolvedParameters::new();

        for spec in schema.specs() {
            let value = match provided.get(&spec.name) {
                Some(value) => match spec.validate(value) {
                    Ok(()) => value.clone(),
                    Err(err) => match self.prompt {
                        // Interactive: report the bad flag and ask again.
                        Some(prompt) => self.prompt_until_valid(prompt, spec, Some(&err))?,
                        None => return Err(err.into()),
                    },
                },
                None => match self.prompt {
                    Some(prompt) => self.prompt_until_valid(prompt, spec, None)?,
                    None => match &spec.default {
                        Some(default) => default.clone(),
                        None => {
                            return Err(DomainError::MissingParameter {
                                name: spec.name.clone(),
                            }
                            .into());
                        }
                    },
                },
            };

            debug!(name = %spec.name, "parameter resolved");
            resolved.insert(&spec.name, value);
        }

        Ok(resolved)
    }

    /// Prompt for one spec, looping until the response validates or the
    /// user cancels.
    fn prompt_until_valid(
        &self,
        prompt: &dyn ParameterPrompt,
        spec: &ParameterSpec,
        first_reason: Option<&DomainError>,
    ) -> StencilResult<String> {
        let mut reason = first_reason.map(|e| e.to_string());

        loop {
            let answer = prompt.prompt(spec, reason.as_deref())?;
            let Some(candidate) = answer else {
                return Err(StencilError::Application(ApplicationError::Cancelled));
            };

            match spec.validate(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(err) => reason = Some(err.to_string()),
            }
        }
    }
}
