//! Voice-intent dispatcher for the Alexa skill.
//!
//! Intents:
//! - AddItemIntent(ItemName) - add to the shopping list
//! - RemoveItemIntent(ItemName) - remove the first list item named exactly ItemName
//! - AddNoteIntent(Note) - add a note
//! - RemoveNoteIntent(NoteIdentifier) - remove the first note containing NoteIdentifier

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::ApiGatewayResponse;
use crate::models::{Collection, Record};
use crate::records;
use crate::store::RecordStore;

pub const LAUNCH_REQUEST: &str = "LaunchRequest";

#[derive(Debug, Deserialize)]
pub struct AlexaRequest {
    pub request: AlexaRequestBody,
}

#[derive(Debug, Deserialize)]
pub struct AlexaRequestBody {
    #[serde(rename = "type", default)]
    pub request_type: String,
    pub intent: Option<Intent>,
}

#[derive(Debug, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    pub value: Option<String>,
}

/// The platform sends `"slots": null` for intents without slots.
fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, Slot>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, Slot>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Intent {
    /// Value of the named slot, unless absent or blank. The value is returned as spoken.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.slots
            .get(slot)
            .and_then(|s| s.value.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlexaResponse {
    pub version: String,
    pub response: AlexaResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlexaResponseBody {
    pub output_speech: OutputSpeech,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub text: String,
}

impl AlexaResponse {
    /// Plain-text speech that ends the session.
    pub fn speak(text: impl Into<String>) -> Self {
        Self::build(text.into(), true)
    }

    /// Plain-text speech that leaves the session open for a reply.
    pub fn ask(text: impl Into<String>) -> Self {
        Self::build(text.into(), false)
    }

    fn build(text: String, should_end_session: bool) -> Self {
        Self {
            version: "1.0".to_string(),
            response: AlexaResponseBody {
                output_speech: OutputSpeech {
                    speech_type: "PlainText".to_string(),
                    text,
                },
                should_end_session,
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.response.output_speech.text
    }
}

/// What the voice dispatcher hands back to the platform.
///
/// Unknown intents get the HTTP-style 405 envelope rather than speech.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum VoiceResponse {
    Speech(AlexaResponse),
    Rejected(ApiGatewayResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntentAction {
    Add,
    RemoveExact,
    RemoveContaining,
}

struct IntentRoute {
    intent: &'static str,
    slot: &'static str,
    collection: Collection,
    action: IntentAction,
}

static INTENT_ROUTES: [IntentRoute; 4] = [
    IntentRoute {
        intent: "AddItemIntent",
        slot: "ItemName",
        collection: Collection::List,
        action: IntentAction::Add,
    },
    IntentRoute {
        intent: "RemoveItemIntent",
        slot: "ItemName",
        collection: Collection::List,
        action: IntentAction::RemoveExact,
    },
    IntentRoute {
        intent: "AddNoteIntent",
        slot: "Note",
        collection: Collection::Notes,
        action: IntentAction::Add,
    },
    IntentRoute {
        intent: "RemoveNoteIntent",
        slot: "NoteIdentifier",
        collection: Collection::Notes,
        action: IntentAction::RemoveContaining,
    },
];

fn route_for(intent: &str) -> Option<&'static IntentRoute> {
    INTENT_ROUTES.iter().find(|route| route.intent == intent)
}

/// Dispatch a voice request to the record store.
pub async fn handle_alexa_request(
    config: &Config,
    store: &dyn RecordStore,
    request: &AlexaRequest,
) -> VoiceResponse {
    let Some(intent) = request.request.intent.as_ref() else {
        if request.request.request_type == LAUNCH_REQUEST {
            info!("Skill launched");
            return VoiceResponse::Speech(AlexaResponse::ask(
                "Welcome. You can add or remove items on your list, or add and remove notes.",
            ));
        }
        warn!("Unsupported voice request type {:?}", request.request.request_type);
        return VoiceResponse::Rejected(ApiGatewayResponse::method_not_allowed());
    };

    let Some(route) = route_for(&intent.name) else {
        warn!("Unsupported intent {}", intent.name);
        return VoiceResponse::Rejected(ApiGatewayResponse::method_not_allowed());
    };

    info!("Handling intent {}", intent.name);

    let Some(value) = intent.slot_value(route.slot) else {
        warn!("Intent {} is missing slot {}", intent.name, route.slot);
        return VoiceResponse::Speech(AlexaResponse::speak(
            "Sorry, I didn't catch that. Please try again.",
        ));
    };

    let table = config.table_for(route.collection);
    let noun = route.collection.as_str();

    let speech = match route.action {
        IntentAction::Add => add_record(store, table, noun, value).await,
        IntentAction::RemoveExact => {
            remove_matching(store, table, noun, value, &|r: &Record| r.name == value).await
        }
        IntentAction::RemoveContaining => {
            remove_matching(store, table, noun, value, &|r: &Record| r.name.contains(value)).await
        }
    };

    VoiceResponse::Speech(speech)
}

async fn add_record(
    store: &dyn RecordStore,
    table: &str,
    noun: &str,
    value: &str,
) -> AlexaResponse {
    match records::create(store, table, value).await {
        Ok(response) if response.status_code == 201 => {
            AlexaResponse::speak(format!("I have added {} to your {}.", value, noun))
        }
        other => {
            if let Err(e) = other {
                error!("Failed to add {:?} to {}: {}", value, table, e);
            }
            AlexaResponse::speak(format!(
                "Sorry, there was a problem adding {} to your {}. Please try again later.",
                value, noun
            ))
        }
    }
}

async fn remove_matching(
    store: &dyn RecordStore,
    table: &str,
    noun: &str,
    value: &str,
    predicate: &(dyn Fn(&Record) -> bool + Send + Sync),
) -> AlexaResponse {
    let target = match store.find(table, predicate).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            info!("No record matching {:?} in {}", value, table);
            return AlexaResponse::speak(format!("I couldn't find {} on your {}.", value, noun));
        }
        Err(e) => {
            error!("Failed to look up {:?} in {}: {}", value, table, e);
            return AlexaResponse::speak(format!(
                "Sorry, there was a problem removing {} from your {}. Please try again later.",
                value, noun
            ));
        }
    };

    match store.delete(table, &target.id).await {
        Ok(()) => {
            info!("Deleted record {} from {}", target.id, table);
            AlexaResponse::speak(format!("I have removed {} from your {}.", target.name, noun))
        }
        Err(e) => {
            error!("Failed to delete {} from {}: {}", target.id, table, e);
            AlexaResponse::speak(format!(
                "Sorry, there was a problem removing {} from your {}. Please try again later.",
                target.name, noun
            ))
        }
    }
}
