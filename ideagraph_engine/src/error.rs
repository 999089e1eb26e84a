// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use ideagraph_store::{IdeaId, SuggestionId};

/// Failure reported by a [`ContentProvider`](crate::ContentProvider).
///
/// The display string becomes the idea's `error` message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be completed (transport, quota, timeout).
    #[error("request failed: {0}")]
    Request(String),
    /// The provider answered with content that could not be used.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Misuse of the [`Engine`](crate::Engine) facade.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The idea was removed or never existed.
    #[error("idea {0} does not exist")]
    UnknownIdea(IdeaId),
    /// The suggestion is not part of the active set anymore.
    #[error("suggestion {0:?} is no longer active")]
    UnknownSuggestion(SuggestionId),
    /// A generation for this idea has not finished yet.
    #[error("idea {0} is already generating")]
    GenerationInFlight(IdeaId),
}

/// Invalid engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
