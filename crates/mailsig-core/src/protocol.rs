//! Popup ↔ background message contract.
//!
//! Requests are tagged by their `action` field. Every response is an
//! envelope with a `success` flag so failures travel as data and the popup
//! never sees a broken channel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::{Identity, IdentityId};
use crate::{Error, Result};

/// A request from the popup to the background controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// List the host's mail identities.
    GetIdentities,
    /// Replace an identity's signature.
    UpdateSignature {
        /// Target identity.
        id: IdentityId,
        /// Sanitized signature markup.
        html: String,
    },
}

impl Request {
    /// Decodes a raw runtime message.
    ///
    /// Returns `None` for messages that are not addressed to the controller.
    #[must_use]
    pub fn from_message(message: &Value) -> Option<Self> {
        Self::deserialize(message).ok()
    }
}

/// The background controller's reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the host call succeeded.
    pub success: bool,
    /// Identities, for a successful `getIdentities`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identities: Option<Vec<Identity>>,
    /// Host error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Successful reply without payload.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    /// Successful reply carrying identities.
    #[must_use]
    pub fn with_identities(identities: Vec<Identity>) -> Self {
        Self {
            success: true,
            identities: Some(identities),
            error: None,
        }
    }

    /// Failed reply carrying the host's message.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            identities: None,
            error: Some(error.into()),
        }
    }

    /// Converts the envelope back into a result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HostApi`] with the carried message, or
    /// [`Error::Unknown`] when a failure carries none.
    pub fn into_result(self) -> Result<Option<Vec<Identity>>> {
        if self.success {
            return Ok(self.identities);
        }
        Err(self
            .error
            .filter(|e| !e.is_empty())
            .map_or(Error::Unknown, Error::HostApi))
    }
}

/// Payload for the host's identity update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUpdate {
    /// New signature.
    pub signature: String,
    /// Whether the signature is plain text.
    pub signature_is_plain_text: bool,
}

impl IdentityUpdate {
    /// An HTML signature update.
    #[must_use]
    pub fn html(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            signature_is_plain_text: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_wire_format() {
        assert_eq!(
            serde_json::to_value(Request::GetIdentities).unwrap(),
            json!({"action": "getIdentities"})
        );
        assert_eq!(
            serde_json::to_value(Request::UpdateSignature {
                id: IdentityId::new("id1"),
                html: "<p>x</p>".to_string(),
            })
            .unwrap(),
            json!({"action": "updateSignature", "id": "id1", "html": "<p>x</p>"})
        );
    }

    #[test]
    fn test_from_message() {
        assert_eq!(
            Request::from_message(&json!({"action": "getIdentities"})),
            Some(Request::GetIdentities)
        );
        assert_eq!(Request::from_message(&json!({"action": "openSettings"})), None);
        assert_eq!(Request::from_message(&json!({"action": "updateSignature"})), None);
        assert_eq!(Request::from_message(&json!("getIdentities")), None);
    }

    #[test]
    fn test_response_wire_format() {
        assert_eq!(
            serde_json::to_value(Response::ok()).unwrap(),
            json!({"success": true})
        );
        assert_eq!(
            serde_json::to_value(Response::failure("boom")).unwrap(),
            json!({"success": false, "error": "boom"})
        );
        let response = Response::with_identities(vec![Identity::new("id1", "Work", "a@b.c")]);
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({"success": true, "identities": [{"id": "id1", "label": "Work", "email": "a@b.c"}]})
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Response::ok().into_result().unwrap(), None);
        assert!(matches!(
            Response::failure("denied").into_result(),
            Err(Error::HostApi(msg)) if msg == "denied"
        ));
        let bare: Response = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(matches!(bare.into_result(), Err(Error::Unknown)));
    }

    #[test]
    fn test_identity_update_payload() {
        assert_eq!(
            serde_json::to_value(IdentityUpdate::html("<p>x</p>")).unwrap(),
            json!({"signature": "<p>x</p>", "signatureIsPlainText": false})
        );
    }
}
