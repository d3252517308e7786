use serde::{Deserialize, Serialize};

/// Destination blog platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Dev.to")]
    DevTo,
    Hashnode,
    Medium,
}

impl Platform {
    /// Every platform, in publishing order
    pub const ALL: [Platform; 3] = [Platform::DevTo, Platform::Hashnode, Platform::Medium];

    /// Human-readable platform name
    pub fn name(self) -> &'static str {
        match self {
            Platform::DevTo => "Dev.to",
            Platform::Hashnode => "Hashnode",
            Platform::Medium => "Medium",
        }
    }

    /// Whether the platform renders ```mermaid blocks natively
    pub fn renders_mermaid(self) -> bool {
        match self {
            Platform::Hashnode => true,
            Platform::DevTo | Platform::Medium => false,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
