//! Agent discovery and capability types

use serde::{Deserialize, Serialize};
use url::Url;

/// Agent Card for agent discovery
///
/// The Agent Card is published at `/.well-known/agent-card.json` and describes
/// the agent's identity, skills, and capabilities. It is built once at process
/// startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCard {
    /// Name of the agent
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// Base URL the agent is reachable at
    pub url: Url,

    /// Agent version
    pub version: String,

    /// A2A protocol version the agent speaks
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,

    /// Skills the agent advertises
    pub skills: Vec<AgentSkill>,

    /// Agent capabilities
    pub capabilities: AgentCapabilities,

    /// Input modes accepted when a skill does not override them
    #[serde(rename = "defaultInputModes")]
    pub default_input_modes: Vec<String>,

    /// Output modes produced when a skill does not override them
    #[serde(rename = "defaultOutputModes")]
    pub default_output_modes: Vec<String>,
}

impl AgentCard {
    /// Create a new agent card with text-only default modes
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: Url,
        version: impl Into<String>,
        protocol_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url,
            version: version.into(),
            protocol_version: protocol_version.into(),
            skills: Vec::new(),
            capabilities: AgentCapabilities::default(),
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
        }
    }

    /// Add a skill to the agent card
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Set the agent capabilities
    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the default input modes
    pub fn with_default_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output modes
    pub fn with_default_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }
}

/// A skill an agent advertises in its card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSkill {
    /// Unique skill identifier
    pub id: String,

    /// Display name of the skill
    pub name: String,

    /// Human-readable description of what the skill does
    pub description: String,

    /// Free-form tags for discovery
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Example prompts exercising this skill
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,

    /// Input modes overriding the card defaults
    #[serde(
        rename = "inputModes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_modes: Option<Vec<String>>,

    /// Output modes overriding the card defaults
    #[serde(
        rename = "outputModes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub output_modes: Option<Vec<String>>,
}

impl AgentSkill {
    /// Create a new skill
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            examples: Vec::new(),
            input_modes: None,
            output_modes: None,
        }
    }

    /// Add a discovery tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an example prompt
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// Agent capabilities advertised in the card
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentCapabilities {
    /// Supports streaming responses
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(rename = "pushNotifications", default)]
    pub push_notifications: bool,

    /// Returns full task history in responses
    ///
    /// When set, `message/send` responds with the complete Task; otherwise the
    /// deployment replies with the bare agent Message.
    #[serde(rename = "stateTransitionHistory", default)]
    pub state_transition_history: bool,
}

impl AgentCapabilities {
    /// Create capabilities with default values (all false)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable full task history in responses
    pub fn with_state_transition_history(mut self) -> Self {
        self.state_transition_history = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> AgentCard {
        AgentCard::new(
            "Echo Agent",
            "Repeats whatever you say",
            "http://localhost:8000".parse().unwrap(),
            "1.0.0",
            "0.3.0",
        )
        .with_skill(
            AgentSkill::new("echo", "Echo Messages", "Repeats whatever you say")
                .with_tag("echo")
                .with_example("Hello there!"),
        )
        .with_capabilities(AgentCapabilities::new().with_state_transition_history())
    }

    #[test]
    fn test_agent_card_creation() {
        let card = card();
        assert_eq!(card.name, "Echo Agent");
        assert_eq!(card.protocol_version, "0.3.0");
        assert_eq!(card.skills.len(), 1);
        assert!(card.capabilities.state_transition_history);
        assert!(!card.capabilities.streaming);
        assert_eq!(card.default_input_modes, vec!["text/plain"]);
    }

    #[test]
    fn test_agent_card_serialization() {
        let json = serde_json::to_value(card()).unwrap();

        assert_eq!(json["name"], "Echo Agent");
        assert_eq!(json["protocolVersion"], "0.3.0");
        assert_eq!(json["capabilities"]["stateTransitionHistory"], true);
        assert_eq!(json["capabilities"]["pushNotifications"], false);
        assert_eq!(json["skills"][0]["id"], "echo");
        assert!(json["defaultInputModes"].is_array());
        assert!(json.get("protocol_version").is_none());

        let deserialized: AgentCard = serde_json::from_value(json).unwrap();
        assert_eq!(card(), deserialized);
    }

    #[test]
    fn test_skill_optional_fields_omitted() {
        let skill = AgentSkill::new("echo", "Echo", "Echoes");
        let json = serde_json::to_value(&skill).unwrap();

        assert!(json.get("tags").is_none());
        assert!(json.get("examples").is_none());
        assert!(json.get("inputModes").is_none());
    }
}
