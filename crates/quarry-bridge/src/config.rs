//! Tool configuration, fixed at construction time.

use serde::Deserialize;

/// Options the host supplies when constructing the query tool. Immutable for
/// the tool's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolOptions {
    /// Cap on documents surfaced per query; negative means no cap.
    pub max_num: i64,
    /// Default count advertised in the instruction prompt.
    pub default_num: i64,
    /// Surface backend diagnostic text in the conversation on failure.
    pub include_stderr: bool,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            max_num: -1,
            default_num: 10,
            include_stderr: false,
        }
    }
}

impl ToolOptions {
    /// Parse options from a TOML table; missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_uncapped() {
        let options = ToolOptions::default();
        assert_eq!(options.max_num, -1);
        assert_eq!(options.default_num, 10);
        assert!(!options.include_stderr);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let options = ToolOptions::from_toml("max_num = 3\n").expect("parse");
        assert_eq!(options.max_num, 3);
        assert_eq!(options.default_num, 10);
        assert!(!options.include_stderr);
    }

    #[test]
    fn full_toml_round_trips_fields() {
        let options =
            ToolOptions::from_toml("max_num = 7\ndefault_num = 4\ninclude_stderr = true\n")
                .expect("parse");
        assert_eq!(
            options,
            ToolOptions {
                max_num: 7,
                default_num: 4,
                include_stderr: true,
            }
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let options = ToolOptions::from_toml("max_num = 1\nextra = \"x\"\n").expect("parse");
        assert_eq!(options.max_num, 1);
    }
}
