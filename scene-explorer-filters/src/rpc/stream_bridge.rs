//! Remote toggle bridge.
//!
//! A streaming client drives the filter panel by sending
//! `{"event_type":"ToggleFilter","payload":{"name":...,"active":...}}`
//! messages. A listener thread reads newline-delimited JSON from a local TCP
//! socket into a shared queue; per-frame systems drain the queue, decode each
//! message, and forward the result as toggle events through the same path a
//! checkbox click takes.

use bevy::prelude::*;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use constants::stream::{STREAM_BIND_ADDR, TOGGLE_EVENT_TYPE};

/// Shared queue the listener thread pushes raw messages into.
#[derive(Resource, Clone, Default)]
pub struct StreamMessageQueue(pub Arc<Mutex<Vec<String>>>);

/// Raw message drained from the queue.
#[derive(Event)]
pub struct IncomingStreamMessage {
    pub content: String,
}

/// A decoded remote toggle, ready for the panel.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RemoteToggleEvent {
    pub name: String,
    pub active: bool,
}

/// Full message envelope as sent by the streaming client.
#[derive(Deserialize)]
struct EventEnvelope {
    event_type: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct TogglePayload {
    name: String,
    active: bool,
}

#[derive(Debug, PartialEq)]
pub enum ToggleDecodeError {
    /// Not JSON at all.
    Malformed,
    /// Valid envelope for some other event type; ignored, not an error state.
    OtherEvent(String),
    /// JSON object without usable `name`/`active` fields.
    MissingFields,
}

/// Tolerant decode: accepts the full envelope, an envelope whose payload is a
/// JSON-encoded string, or a bare payload object.
pub fn decode_toggle_message(content: &str) -> Result<RemoteToggleEvent, ToggleDecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|_| ToggleDecodeError::Malformed)?;

    if let Ok(envelope) = EventEnvelope::deserialize(&value) {
        if envelope.event_type != TOGGLE_EVENT_TYPE {
            return Err(ToggleDecodeError::OtherEvent(envelope.event_type));
        }
        // Some transports re-encode the payload as a string.
        let payload = match envelope.payload {
            serde_json::Value::String(text) => {
                serde_json::from_str(&text).map_err(|_| ToggleDecodeError::MissingFields)?
            }
            other => other,
        };
        let toggle =
            TogglePayload::deserialize(payload).map_err(|_| ToggleDecodeError::MissingFields)?;
        return Ok(RemoteToggleEvent {
            name: toggle.name,
            active: toggle.active,
        });
    }

    let toggle =
        TogglePayload::deserialize(value).map_err(|_| ToggleDecodeError::MissingFields)?;
    Ok(RemoteToggleEvent {
        name: toggle.name,
        active: toggle.active,
    })
}

/// Registers the bridge queue, listener thread, and dispatch systems.
pub struct StreamBridgePlugin;

impl Plugin for StreamBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StreamMessageQueue>()
            .add_event::<IncomingStreamMessage>()
            .add_event::<RemoteToggleEvent>()
            .add_systems(Startup, start_stream_listener)
            .add_systems(
                Update,
                (drain_stream_messages, handle_stream_messages).chain(),
            );
    }
}

/// Spawn the socket listener feeding the shared queue. Bind failure is logged
/// and the app keeps running without remote control.
fn start_stream_listener(queue: Res<StreamMessageQueue>) {
    let queue = queue.0.clone();

    thread::spawn(move || {
        let listener = match TcpListener::bind(STREAM_BIND_ADDR) {
            Ok(listener) => listener,
            Err(err) => {
                warn!("stream bridge unavailable, could not bind {STREAM_BIND_ADDR}: {err}");
                return;
            }
        };
        info!("stream bridge listening on {STREAM_BIND_ADDR}");

        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let queue = queue.clone();
            thread::spawn(move || {
                let reader = BufReader::new(stream);
                for line in reader.lines() {
                    let Ok(line) = line else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Ok(mut queue) = queue.lock() {
                        queue.push(line);
                    }
                }
            });
        }
    });
}

fn drain_stream_messages(
    queue: Res<StreamMessageQueue>,
    mut messages: EventWriter<IncomingStreamMessage>,
) {
    let drained = match queue.0.lock() {
        Ok(mut queue) => std::mem::take(&mut *queue),
        Err(_) => Vec::new(),
    };

    for content in drained {
        messages.write(IncomingStreamMessage { content });
    }
}

fn handle_stream_messages(
    mut messages: EventReader<IncomingStreamMessage>,
    mut toggles: EventWriter<RemoteToggleEvent>,
) {
    for message in messages.read() {
        match decode_toggle_message(&message.content) {
            Ok(toggle) => {
                info!(
                    "received remote toggle: '{}' -> {}",
                    toggle.name, toggle.active
                );
                toggles.write(toggle);
            }
            Err(ToggleDecodeError::OtherEvent(event_type)) => {
                debug!("ignoring remote event of type '{event_type}'");
            }
            Err(ToggleDecodeError::Malformed) => {
                warn!("failed to decode stream message as JSON: {}", message.content);
            }
            Err(ToggleDecodeError::MissingFields) => {
                warn!(
                    "remote toggle payload missing 'name' or 'active': {}",
                    message.content
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_envelope_decodes() {
        let message =
            r#"{"event_type":"ToggleFilter","payload":{"name":"Bosch Rexroth","active":true}}"#;
        assert_eq!(
            decode_toggle_message(message).unwrap(),
            RemoteToggleEvent {
                name: "Bosch Rexroth".to_string(),
                active: true,
            }
        );
    }

    #[test]
    fn bare_payload_decodes() {
        let message = r#"{"name":"Festo","active":false}"#;
        assert_eq!(
            decode_toggle_message(message).unwrap(),
            RemoteToggleEvent {
                name: "Festo".to_string(),
                active: false,
            }
        );
    }

    #[test]
    fn string_encoded_payload_decodes() {
        let message =
            r#"{"event_type":"ToggleFilter","payload":"{\"name\":\"Festo\",\"active\":true}"}"#;
        let toggle = decode_toggle_message(message).unwrap();
        assert_eq!(toggle.name, "Festo");
        assert!(toggle.active);
    }

    #[test]
    fn other_event_types_are_ignored() {
        let message = r#"{"event_type":"CameraMove","payload":{"x":1.0}}"#;
        assert_eq!(
            decode_toggle_message(message),
            Err(ToggleDecodeError::OtherEvent("CameraMove".to_string()))
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_eq!(
            decode_toggle_message("not json at all"),
            Err(ToggleDecodeError::Malformed)
        );
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(
            decode_toggle_message(r#"{"event_type":"ToggleFilter","payload":{"name":"x"}}"#),
            Err(ToggleDecodeError::MissingFields)
        );
        assert_eq!(
            decode_toggle_message(r#"{"active":true}"#),
            Err(ToggleDecodeError::MissingFields)
        );
    }
}
