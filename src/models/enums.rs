use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The string form is also the serde representation.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(MaterialCategory {
    Plastic => "Plastic",
    Glass => "Glass",
    Metal => "Metal",
    Paper => "Paper",
    Electronic => "Electronic",
    Chemical => "Chemical",
    Mixed => "Mixed",
});

str_enum!(RecyclabilityStatus {
    Recyclable => "Recyclable",
    NonRecyclable => "Non-recyclable",
    Hazardous => "Hazardous",
});

str_enum!(
    /// Which code path produced a `MaterialAnalysis`.
    AnalysisSource {
        PrimaryModel => "primary-model",
        DeterministicFallback => "deterministic-fallback",
    }
);

str_enum!(
    /// Ordered: `Low < Medium < High`.
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
);

str_enum!(HazardCategory {
    Chemicals => "chemicals",
    Medical => "medical",
    Electronics => "electronics",
    SharpObjects => "sharp_objects",
    VisionDetected => "vision_detected",
});

str_enum!(
    /// Which path produced a `ComplianceInfo`.
    ComplianceSource {
        Retrieval => "retrieval",
        ModelOnly => "model-only",
        StaticFallback => "static-fallback",
        Unavailable => "unavailable",
    }
);

str_enum!(InstructionSource {
    Model => "model",
    Template => "template",
});

impl MaterialCategory {
    /// Lenient mapping of a model-supplied label. Unknown labels become `Mixed`.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("plastic") {
            Self::Plastic
        } else if lower.starts_with("glass") {
            Self::Glass
        } else if lower.starts_with("metal") {
            Self::Metal
        } else if lower.starts_with("paper") || lower.starts_with("cardboard") {
            Self::Paper
        } else if lower.starts_with("electronic") || lower.starts_with("e-waste") {
            Self::Electronic
        } else if lower.starts_with("chemical") {
            Self::Chemical
        } else {
            Self::Mixed
        }
    }
}

impl RecyclabilityStatus {
    /// Lenient mapping of a model-supplied label. Unknown labels are
    /// treated as non-recyclable.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("non") {
            Self::NonRecyclable
        } else if lower.contains("hazard") {
            Self::Hazardous
        } else if lower.starts_with("recycl") {
            Self::Recyclable
        } else {
            Self::NonRecyclable
        }
    }
}
