use crate::models::{Asset, PresenceDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rich Presence activity as Discord expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub timestamps: Timestamps,
    pub assets: Assets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamps {
    pub start: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assets {
    pub large_image: String,
    pub large_text: String,
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

impl Activity {
    pub fn from_presence(presence: &PresenceDescriptor, asset: &Asset) -> Self {
        Self {
            details: non_empty(&presence.details),
            state: non_empty(&presence.state),
            timestamps: Timestamps {
                start: presence.started_at,
            },
            assets: Assets {
                large_image: asset.key.clone(),
                large_text: asset.description.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Handshake<'a> {
    pub v: u32,
    pub client_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SetActivityArgs<'a> {
    pub pid: u32,
    pub activity: Option<&'a Activity>,
}

#[derive(Debug, Serialize)]
pub struct Command<'a> {
    pub cmd: &'static str,
    pub args: SetActivityArgs<'a>,
    pub nonce: String,
}

/// Any frame Discord sends back.
#[derive(Debug, Default, Deserialize)]
pub struct Response {
    pub cmd: Option<String>,
    pub evt: Option<String>,
    #[serde(default)]
    pub data: Value,
    pub nonce: Option<String>,
}

impl Response {
    pub fn is_ready(&self) -> bool {
        self.evt.as_deref() == Some("READY")
    }

    pub fn is_error(&self) -> bool {
        self.evt.as_deref() == Some("ERROR")
    }

    pub fn username(&self) -> Option<&str> {
        self.data.get("user")?.get("username")?.as_str()
    }

    pub fn message(&self) -> String {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;
    use serde_json::json;

    fn asset() -> Asset {
        Asset {
            key: "gamemaker_logo".into(),
            description: "GameMaker".into(),
        }
    }

    #[test]
    fn test_activity_wire_shape() {
        let presence = PresenceDescriptor::new(
            "Working on: \"Alpha\"".into(),
            "In main workspace".into(),
            1_700_000_000,
            Channel::Modern,
        );
        let value = serde_json::to_value(Activity::from_presence(&presence, &asset())).unwrap();

        assert_eq!(
            value,
            json!({
                "details": "Working on: \"Alpha\"",
                "state": "In main workspace",
                "timestamps": { "start": 1_700_000_000 },
                "assets": { "large_image": "gamemaker_logo", "large_text": "GameMaker" }
            })
        );
    }

    #[test]
    fn test_empty_text_is_omitted() {
        let presence = PresenceDescriptor::new(String::new(), String::new(), 5, Channel::Modern);
        let value = serde_json::to_value(Activity::from_presence(&presence, &asset())).unwrap();
        assert!(value.get("details").is_none());
        assert!(value.get("state").is_none());
    }

    #[test]
    fn test_ready_response() {
        let response: Response = serde_json::from_value(json!({
            "cmd": "DISPATCH",
            "evt": "READY",
            "data": { "v": 1, "user": { "username": "dev" } }
        }))
        .unwrap();
        assert!(response.is_ready());
        assert_eq!(response.username(), Some("dev"));
    }

    #[test]
    fn test_error_response() {
        let response: Response = serde_json::from_value(json!({
            "evt": "ERROR",
            "data": { "code": 4000, "message": "Invalid Client ID" }
        }))
        .unwrap();
        assert!(response.is_error());
        assert_eq!(response.message(), "Invalid Client ID");
    }
}
