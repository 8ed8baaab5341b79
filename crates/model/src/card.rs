use serde::{Deserialize, Serialize};

/// How a delta should be judged. `Inverse` means a decrease is good news
/// (costs, consumption).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaPolarity {
    #[default]
    Normal,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTone {
    Favorable,
    Unfavorable,
    Neutral,
}

/// A KPI tile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub delta: Option<String>,
    #[serde(default)]
    pub delta_color: DeltaPolarity,
}

impl Card {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>, polarity: DeltaPolarity) -> Self {
        self.delta = Some(delta.into());
        self.delta_color = polarity;
        self
    }

    /// The delta text if present and not blank.
    pub fn delta(&self) -> Option<&str> {
        self.delta.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Sign of the delta: `Some(true)` for an increase, `Some(false)` for a decrease.
    pub fn delta_direction(&self) -> Option<bool> {
        let delta = self.delta()?;
        if delta.starts_with('+') {
            return Some(true);
        }
        if delta.starts_with('-') || delta.starts_with('\u{2212}') {
            return Some(false);
        }
        let numeric: String = delta
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .filter(|c| *c != ',')
            .collect();
        match numeric.parse::<f64>() {
            Ok(v) if v > 0.0 => Some(true),
            _ => None,
        }
    }

    pub fn delta_tone(&self) -> DeltaTone {
        match (self.delta_direction(), self.delta_color) {
            (None, _) => DeltaTone::Neutral,
            (Some(up), DeltaPolarity::Normal) if up => DeltaTone::Favorable,
            (Some(_), DeltaPolarity::Normal) => DeltaTone::Unfavorable,
            (Some(up), DeltaPolarity::Inverse) if up => DeltaTone::Unfavorable,
            (Some(_), DeltaPolarity::Inverse) => DeltaTone::Favorable,
        }
    }
}

/// A row of cards under an optional heading such as "Yearly Highlights".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl CardGroup {
    pub fn new(title: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            title: title.into(),
            cards,
        }
    }

    pub fn title(&self) -> Option<&str> {
        Some(self.title.trim()).filter(|t| !t.is_empty())
    }
}
