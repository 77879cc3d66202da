use serde::{Deserialize, Serialize};

/// Color given to nodes whose archetype line matched nothing.
pub const DEFAULT_NODE_COLOR: &str = "#999999";

/// Fixed archetype vocabulary. Declaration order is significant: matches are
/// reported in this order and the first match decides the node color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Archetype {
    #[serde(rename = "Infrastructure Integrators")]
    InfrastructureIntegrators,
    #[serde(rename = "Vertical Specialists")]
    VerticalSpecialists,
    #[serde(rename = "Experience Designers")]
    ExperienceDesigners,
    #[serde(rename = "Facilitators & Enablers")]
    FacilitatorsAndEnablers,
    #[serde(rename = "Community Builders")]
    CommunityBuilders,
    #[serde(rename = "Regulators & Standards Setters")]
    RegulatorsAndStandardsSetters,
    #[serde(rename = "Market Aggregators")]
    MarketAggregators,
}

impl Archetype {
    pub const ALL: [Self; 7] = [
        Self::InfrastructureIntegrators,
        Self::VerticalSpecialists,
        Self::ExperienceDesigners,
        Self::FacilitatorsAndEnablers,
        Self::CommunityBuilders,
        Self::RegulatorsAndStandardsSetters,
        Self::MarketAggregators,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InfrastructureIntegrators => "Infrastructure Integrators",
            Self::VerticalSpecialists => "Vertical Specialists",
            Self::ExperienceDesigners => "Experience Designers",
            Self::FacilitatorsAndEnablers => "Facilitators & Enablers",
            Self::CommunityBuilders => "Community Builders",
            Self::RegulatorsAndStandardsSetters => "Regulators & Standards Setters",
            Self::MarketAggregators => "Market Aggregators",
        }
    }

    /// Hex display color used by the graph front end.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::InfrastructureIntegrators => "#1F8C7D",
            Self::VerticalSpecialists => "#E85D75",
            Self::ExperienceDesigners => "#F5A623",
            Self::FacilitatorsAndEnablers => "#4A90E2",
            Self::CommunityBuilders => "#BD10E0",
            Self::RegulatorsAndStandardsSetters => "#7ED321",
            Self::MarketAggregators => "#B8E986",
        }
    }

    /// Every archetype whose name occurs anywhere in `text`, in vocabulary order.
    ///
    /// Matching is plain substring containment, so decorations such as
    /// `"(Teal)"` or `"+"` separators around the names are irrelevant.
    #[must_use]
    pub fn scan(text: &str) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|archetype| text.contains(archetype.name()))
            .collect()
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
