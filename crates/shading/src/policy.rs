use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the vertex stage turns a grid-placed position into a clip position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPolicy {
    /// Emit the placed position as-is. Only meaningful for meshes authored in
    /// normalized device coordinates.
    Untransformed,
    /// Emit `proj * view * model * position`.
    #[default]
    Transformed,
}

/// Where instances are placed relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Square-ish grid, `columns = ceil(sqrt(n))`.
    #[default]
    Grid,
    /// Single row along +X, one spacing step per instance index.
    Strip,
}

/// Which color the vertex stage hands to the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSource {
    /// Red-to-yellow ramp keyed by the normalized instance index.
    #[default]
    Gradient,
    /// The mesh vertex color, unchanged.
    Vertex,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct ParsePolicyError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

macro_rules! str_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParsePolicyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(ParsePolicyError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: concat!($($name, " "),+),
                    }),
                }
            }
        }
    };
}

str_enum!(OutputPolicy, "output policy", {
    Untransformed => "untransformed",
    Transformed => "transformed",
});

str_enum!(Placement, "placement", {
    Grid => "grid",
    Strip => "strip",
});

str_enum!(ColorSource, "color source", {
    Gradient => "gradient",
    Vertex => "vertex",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(OutputPolicy::default(), OutputPolicy::Transformed);
        assert_eq!(Placement::default(), Placement::Grid);
        assert_eq!(ColorSource::default(), ColorSource::Gradient);
    }

    #[test]
    fn parse_and_display_agree() {
        for p in [OutputPolicy::Untransformed, OutputPolicy::Transformed] {
            assert_eq!(p.to_string().parse::<OutputPolicy>(), Ok(p));
        }
        assert_eq!("strip".parse::<Placement>(), Ok(Placement::Strip));
        assert_eq!("vertex".parse::<ColorSource>(), Ok(ColorSource::Vertex));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "ndc".parse::<OutputPolicy>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("output policy"));
        assert!(msg.contains("`ndc`"));
        assert!(msg.contains("untransformed"));
    }
}
