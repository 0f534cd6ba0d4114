//! Response Envelope
//!
//! The identity service wraps auxiliary-operation responses in one JSON
//! object carrying either a `result` key or an `error` key.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{IdpError, IdpResult, ServerErrorDetail};

/// Tagged response envelope: a typed success payload or a structured server
/// error.
#[derive(Clone, Debug)]
pub enum ResponseEnvelope<T> {
    Result(T),
    Error(ServerErrorDetail),
}

impl<T: DeserializeOwned> ResponseEnvelope<T> {
    /// Decode an envelope from raw JSON bytes.
    ///
    /// The `error` key is checked first: when both keys are present the
    /// object is treated as an error (an upstream inconsistency, not a decode
    /// failure), regardless of the shape under `result`. A body with neither
    /// key fails to decode, as does a present key with a mismatched payload.
    pub fn from_slice(bytes: &[u8]) -> IdpResult<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(IdpError::decode)?;
        let object = value
            .as_object()
            .ok_or_else(|| IdpError::decode("response envelope is not a JSON object"))?;

        if let Some(error) = object.get("error") {
            let detail: ServerErrorDetail =
                serde_json::from_value(error.clone()).map_err(IdpError::decode)?;
            return Ok(Self::Error(detail));
        }

        match object.get("result") {
            Some(result) => {
                let value: T =
                    serde_json::from_value(result.clone()).map_err(IdpError::decode)?;
                Ok(Self::Result(value))
            }
            None => Err(IdpError::decode(
                "response envelope contains neither `result` nor `error`",
            )),
        }
    }

    /// Convert the envelope into a plain result, surfacing the error branch
    /// as a typed failure.
    pub fn into_result(self) -> IdpResult<T> {
        match self {
            Self::Result(value) => Ok(value),
            Self::Error(detail) => Err(IdpError::Server(detail)),
        }
    }
}

/// Decode an envelope body straight to its success payload.
pub fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> IdpResult<T> {
    ResponseEnvelope::from_slice(bytes)?.into_result()
}
