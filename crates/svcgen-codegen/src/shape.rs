//! Call-shape classification.
//!
//! A method's streaming flags combined with the requested call mode select
//! exactly one of eight [`GenerationShape`]s. Every other decision made by
//! the synthesizer and the generators hangs off that tag.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::{CallMode, GenerationShape};
//!
//! let shape = GenerationShape::classify(true, false, CallMode::Async);
//! assert_eq!(shape, GenerationShape::AsyncClientStreaming);
//! assert!(!shape.takes_input());
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use svcgen_core::{Error, MethodSchema};

/// Calling style of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallMode {
    /// Blocking calls returning the response
    Sync,
    /// Callback-driven calls delivering responses to an observer
    Async,
}

impl CallMode {
    /// Both modes, in generation order.
    pub const ALL: [Self; 2] = [Self::Sync, Self::Async];

    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sync" | "blocking" => Ok(Self::Sync),
            "async" => Ok(Self::Async),
            _ => Err(Error::InvalidArgument(format!(
                "invalid call mode: '{s}' (expected: sync or async)"
            ))),
        }
    }
}

/// One of the eight canonical calling shapes.
///
/// Derived per `(method, mode)` pair and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationShape {
    /// Blocking, single request, single response
    Sync,
    /// Blocking, streamed requests, single response
    SyncClientStreaming,
    /// Blocking, single request, streamed responses
    SyncServerStreaming,
    /// Blocking, streamed requests and responses
    SyncBidirectional,
    /// Callback-driven, single request, single response
    Async,
    /// Callback-driven, streamed requests, single response
    AsyncClientStreaming,
    /// Callback-driven, single request, streamed responses
    AsyncServerStreaming,
    /// Callback-driven, streamed requests and responses
    AsyncBidirectional,
}

impl GenerationShape {
    /// Every shape, Sync variants first.
    pub const ALL: [Self; 8] = [
        Self::Sync,
        Self::SyncClientStreaming,
        Self::SyncServerStreaming,
        Self::SyncBidirectional,
        Self::Async,
        Self::AsyncClientStreaming,
        Self::AsyncServerStreaming,
        Self::AsyncBidirectional,
    ];

    /// Maps streaming flags and a call mode to a shape.
    ///
    /// Total over its eight-element domain; adding a streaming combination
    /// must extend this match.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_codegen::{CallMode, GenerationShape};
    ///
    /// assert_eq!(GenerationShape::classify(false, false, CallMode::Sync), GenerationShape::Sync);
    /// assert_eq!(
    ///     GenerationShape::classify(true, true, CallMode::Async),
    ///     GenerationShape::AsyncBidirectional
    /// );
    /// ```
    #[must_use]
    pub const fn classify(client_streaming: bool, server_streaming: bool, mode: CallMode) -> Self {
        match (client_streaming, server_streaming, mode) {
            (false, false, CallMode::Sync) => Self::Sync,
            (true, false, CallMode::Sync) => Self::SyncClientStreaming,
            (false, true, CallMode::Sync) => Self::SyncServerStreaming,
            (true, true, CallMode::Sync) => Self::SyncBidirectional,
            (false, false, CallMode::Async) => Self::Async,
            (true, false, CallMode::Async) => Self::AsyncClientStreaming,
            (false, true, CallMode::Async) => Self::AsyncServerStreaming,
            (true, true, CallMode::Async) => Self::AsyncBidirectional,
        }
    }

    /// Classifies a schema method for a call mode.
    #[must_use]
    pub const fn of(method: &MethodSchema, mode: CallMode) -> Self {
        Self::classify(method.client_streaming, method.server_streaming, mode)
    }

    /// Returns the call mode of the shape.
    #[must_use]
    pub const fn mode(self) -> CallMode {
        match self {
            Self::Sync
            | Self::SyncClientStreaming
            | Self::SyncServerStreaming
            | Self::SyncBidirectional => CallMode::Sync,
            Self::Async
            | Self::AsyncClientStreaming
            | Self::AsyncServerStreaming
            | Self::AsyncBidirectional => CallMode::Async,
        }
    }

    /// Returns `true` if requests arrive as a stream.
    #[must_use]
    pub const fn client_streaming(self) -> bool {
        matches!(
            self,
            Self::SyncClientStreaming
                | Self::SyncBidirectional
                | Self::AsyncClientStreaming
                | Self::AsyncBidirectional
        )
    }

    /// Returns `true` if responses are returned as a stream.
    #[must_use]
    pub const fn server_streaming(self) -> bool {
        matches!(
            self,
            Self::SyncServerStreaming
                | Self::SyncBidirectional
                | Self::AsyncServerStreaming
                | Self::AsyncBidirectional
        )
    }

    /// Returns `true` if the generated declaration takes the request
    /// message as a parameter.
    ///
    /// Client-streaming shapes receive requests through a writer instead.
    #[must_use]
    pub const fn takes_input(self) -> bool {
        !self.client_streaming()
    }

    /// Returns `true` if the default implementation of this shape's mode may
    /// carry the method.
    ///
    /// Blocking transports issue one request per call, so blocking
    /// implementations cannot carry client-streaming methods. Contracts are
    /// not affected.
    ///
    /// # Examples
    ///
    /// ```
    /// use svcgen_codegen::GenerationShape;
    ///
    /// assert!(!GenerationShape::SyncClientStreaming.supported_in_default_impl());
    /// assert!(GenerationShape::AsyncClientStreaming.supported_in_default_impl());
    /// ```
    #[must_use]
    pub const fn supported_in_default_impl(self) -> bool {
        match self {
            Self::SyncClientStreaming | Self::SyncBidirectional => false,
            Self::Sync
            | Self::SyncServerStreaming
            | Self::Async
            | Self::AsyncClientStreaming
            | Self::AsyncServerStreaming
            | Self::AsyncBidirectional => true,
        }
    }

    /// Returns a stable identifier of the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::SyncClientStreaming => "sync-client-streaming",
            Self::SyncServerStreaming => "sync-server-streaming",
            Self::SyncBidirectional => "sync-bidirectional",
            Self::Async => "async",
            Self::AsyncClientStreaming => "async-client-streaming",
            Self::AsyncServerStreaming => "async-server-streaming",
            Self::AsyncBidirectional => "async-bidirectional",
        }
    }
}

impl fmt::Display for GenerationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classify_is_total_and_injective() {
        let mut seen = HashSet::new();
        for mode in CallMode::ALL {
            for client in [false, true] {
                for server in [false, true] {
                    let shape = GenerationShape::classify(client, server, mode);
                    assert!(seen.insert(shape), "{shape} produced twice");
                    assert_eq!(shape.mode(), mode);
                    assert_eq!(shape.client_streaming(), client);
                    assert_eq!(shape.server_streaming(), server);
                }
            }
        }
        assert_eq!(seen.len(), GenerationShape::ALL.len());
    }

    #[test]
    fn test_takes_input() {
        assert!(GenerationShape::Sync.takes_input());
        assert!(GenerationShape::AsyncServerStreaming.takes_input());
        assert!(!GenerationShape::SyncBidirectional.takes_input());
        assert!(!GenerationShape::AsyncClientStreaming.takes_input());
    }

    #[test]
    fn test_only_blocking_client_streaming_is_excluded() {
        let excluded: Vec<_> = GenerationShape::ALL
            .into_iter()
            .filter(|s| !s.supported_in_default_impl())
            .collect();
        assert_eq!(
            excluded,
            [
                GenerationShape::SyncClientStreaming,
                GenerationShape::SyncBidirectional
            ]
        );
    }

    #[test]
    fn test_call_mode_from_str() {
        assert_eq!("SYNC".parse::<CallMode>().unwrap(), CallMode::Sync);
        assert_eq!("blocking".parse::<CallMode>().unwrap(), CallMode::Sync);
        assert_eq!("async".parse::<CallMode>().unwrap(), CallMode::Async);
        assert!("eventual".parse::<CallMode>().is_err());
    }

    #[test]
    fn test_shape_display_is_unique() {
        let names: HashSet<_> = GenerationShape::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names.len(), 8);
    }
}
