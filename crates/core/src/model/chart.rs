use serde::{Deserialize, Serialize};
use std::fmt;

/// The two charts the experiment can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartVariant {
    /// Grouped bars: survival rate per class, split by sex.
    ClassGenderBars,
    /// Annotated heatmap of the same class x sex pivot.
    SurvivalHeatmap,
}

impl ChartVariant {
    pub const ALL: [ChartVariant; 2] = [ChartVariant::ClassGenderBars, ChartVariant::SurvivalHeatmap];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ChartVariant::ClassGenderBars => "chart1",
            ChartVariant::SurvivalHeatmap => "chart2",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ChartVariant::ClassGenderBars => "Survival Rate by Passenger Class and Gender",
            ChartVariant::SurvivalHeatmap => {
                "Heatmap of Survival Rate by Passenger Class and Gender"
            }
        }
    }
}

impl fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
