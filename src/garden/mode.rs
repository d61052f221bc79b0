use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The experience the garden is running.
///
/// Each mode drives a different progress track: the height of a static tree, the index of an
/// animation frame or a health score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Static tree evolution: the tree grows through three stages.
    #[value(name = "static")]
    #[serde(rename = "static")]
    #[strum(serialize = "static")]
    StaticGrowth,

    /// Animated meditation: calm moves an animation forward.
    #[value(name = "animated")]
    #[serde(rename = "animated")]
    #[strum(serialize = "animated")]
    AnimatedFrame,

    /// Health and wellness: a health meter next to the animation.
    #[value(name = "health")]
    #[serde(rename = "health")]
    #[strum(serialize = "health")]
    HealthMeter,
}

impl Mode {
    /// The key that selects this mode, both in the menu and in game.
    pub fn key(self) -> char {
        match self {
            Self::StaticGrowth => '1',
            Self::AnimatedFrame => '2',
            Self::HealthMeter => '3',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::iter().find(|mode| mode.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::StaticGrowth => "Static Tree Evolution",
            Self::AnimatedFrame => "Animated Meditation",
            Self::HealthMeter => "Health & Wellness",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::StaticGrowth => "Watch your tree grow through mindful breathing",
            Self::AnimatedFrame => "Interactive animation responds to your calm state",
            Self::HealthMeter => "Track your relaxation progress with health metrics",
        }
    }

    /// Whether the progress track of this mode indexes animation frames.
    pub fn progress_is_frame(self) -> bool {
        matches!(self, Self::AnimatedFrame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('1', Some(Mode::StaticGrowth))]
    #[case('2', Some(Mode::AnimatedFrame))]
    #[case('3', Some(Mode::HealthMeter))]
    #[case('4', None)]
    #[case('c', None)]
    fn mode_from_key(#[case] key: char, #[case] expected: Option<Mode>) {
        assert_eq!(Mode::from_key(key), expected);
    }

    #[test]
    fn display_matches_cli_names() {
        let names: Vec<_> = Mode::iter().map(|mode| mode.to_string()).collect();
        assert_eq!(names, ["static", "animated", "health"]);
    }

    #[test]
    fn yaml_names() {
        let mode: Mode = serde_yaml::from_str("health").expect("parse failed");
        assert_eq!(mode, Mode::HealthMeter);
    }
}
