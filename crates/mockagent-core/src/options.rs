//! User-selectable reply options.
//!
//! Every enumeration serializes to the same lowercase names used in the
//! persisted config file (`short`, `gpt-mini`, `friendly`, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ResponseLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseLength::Short => "short",
            ResponseLength::Medium => "medium",
            ResponseLength::Long => "long",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Some(ResponseLength::Short),
            "medium" => Some(ResponseLength::Medium),
            "long" => Some(ResponseLength::Long),
            _ => None,
        }
    }

    pub fn all() -> Vec<ResponseLength> {
        vec![ResponseLength::Short, ResponseLength::Medium, ResponseLength::Long]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ResponseLength::Short => "Short",
            ResponseLength::Medium => "Medium",
            ResponseLength::Long => "Long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelChoice {
    #[serde(rename = "gpt-mini")]
    GptMini,
    #[default]
    #[serde(rename = "gpt-prose")]
    GptProse,
    #[serde(rename = "gpt-tutor")]
    GptTutor,
}

impl ModelChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::GptMini => "gpt-mini",
            ModelChoice::GptProse => "gpt-prose",
            ModelChoice::GptTutor => "gpt-tutor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gpt-mini" | "mini" => Some(ModelChoice::GptMini),
            "gpt-prose" | "prose" => Some(ModelChoice::GptProse),
            "gpt-tutor" | "tutor" => Some(ModelChoice::GptTutor),
            _ => None,
        }
    }

    pub fn all() -> Vec<ModelChoice> {
        vec![ModelChoice::GptMini, ModelChoice::GptProse, ModelChoice::GptTutor]
    }

    /// Model names are shown verbatim in the options panel
    pub fn display_name(&self) -> &'static str {
        self.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Friendly,
    Formal,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Some(Tone::Neutral),
            "friendly" => Some(Tone::Friendly),
            "formal" => Some(Tone::Formal),
            _ => None,
        }
    }

    pub fn all() -> Vec<Tone> {
        vec![Tone::Neutral, Tone::Friendly, Tone::Formal]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Overview,
    Technical,
    Actionable,
}

impl Focus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Overview => "overview",
            Focus::Technical => "technical",
            Focus::Actionable => "actionable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overview" => Some(Focus::Overview),
            "technical" => Some(Focus::Technical),
            "actionable" => Some(Focus::Actionable),
            _ => None,
        }
    }

    pub fn all() -> Vec<Focus> {
        vec![Focus::Overview, Focus::Technical, Focus::Actionable]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Focus::Overview => "Overview",
            Focus::Technical => "Technical",
            Focus::Actionable => "Actionable",
        }
    }
}

/// The four option values read at the moment a message is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentOptions {
    pub response_length: ResponseLength,
    pub model: ModelChoice,
    pub tone: Tone,
    /// Older option files predate this field
    #[serde(default)]
    pub focus: Focus,
}

/// One row of the options panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionField {
    ResponseLength,
    Model,
    Tone,
    Focus,
}

impl OptionField {
    pub fn all() -> Vec<OptionField> {
        vec![
            OptionField::ResponseLength,
            OptionField::Model,
            OptionField::Tone,
            OptionField::Focus,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionField::ResponseLength => "Response length",
            OptionField::Model => "Model voice",
            OptionField::Tone => "Tone",
            OptionField::Focus => "Focus",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            OptionField::ResponseLength => "Controls how detailed the assistant should be.",
            OptionField::Model => "Shapes the reply style and pacing.",
            OptionField::Tone => "Adds warmth, neutrality, or formality.",
            OptionField::Focus => {
                "Choose whether to emphasise overview, technical nuance, or immediate actions."
            }
        }
    }
}

/// Step `current` forwards (or backwards) through `all`, wrapping at the ends.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    all[next]
}

impl AgentOptions {
    /// Current value of `field` as its display name
    pub fn value_label(&self, field: OptionField) -> &'static str {
        match field {
            OptionField::ResponseLength => self.response_length.display_name(),
            OptionField::Model => self.model.display_name(),
            OptionField::Tone => self.tone.display_name(),
            OptionField::Focus => self.focus.display_name(),
        }
    }

    pub fn cycle(&mut self, field: OptionField, forward: bool) {
        match field {
            OptionField::ResponseLength => {
                self.response_length = cycle(&ResponseLength::all(), self.response_length, forward)
            }
            OptionField::Model => self.model = cycle(&ModelChoice::all(), self.model, forward),
            OptionField::Tone => self.tone = cycle(&Tone::all(), self.tone, forward),
            OptionField::Focus => self.focus = cycle(&Focus::all(), self.focus, forward),
        }
    }

    /// Compact `medium · gpt-prose · neutral · overview` summary for headers
    pub fn summary(&self) -> String {
        format!(
            "{} · {} · {} · {}",
            self.response_length.as_str(),
            self.model.as_str(),
            self.tone.as_str(),
            self.focus.as_str()
        )
    }
}
