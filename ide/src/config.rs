use serde::{Deserialize, Serialize};

/// Configuration knobs for `complete`.
///
/// Deserializes from editor settings; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompletionConfig {
    /// Code style: `name( )` instead of `name()` in synthesized call text.
    pub space_within_call_parens: bool,
    /// The editor requires the adapter utility to be written fully qualified
    /// (and then shortened against the file's imports).
    pub qualify_adapter_calls: bool,
    pub adapter: AdapterConfig,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            space_within_call_parens: false,
            qualify_adapter_calls: true,
            adapter: AdapterConfig::default(),
        }
    }
}

impl CompletionConfig {
    pub(crate) fn call_padding(&self) -> &'static str {
        if self.space_within_call_parens { " " } else { "" }
    }
}

/// The utility call used to view an array as a fixed-size list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Fully-qualified utility class, e.g. `java.util.Arrays`.
    pub utility: String,
    pub function: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            utility: "java.util.Arrays".to_string(),
            function: "asList".to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn simple_name(&self) -> &str {
        self.utility
            .rsplit_once('.')
            .map_or(self.utility.as_str(), |(_, simple)| simple)
    }

    /// Package part including the trailing dot (`java.util.`); empty for the default package.
    pub fn package_prefix(&self) -> &str {
        match self.utility.rfind('.') {
            Some(idx) => &self.utility[..=idx],
            None => "",
        }
    }
}
