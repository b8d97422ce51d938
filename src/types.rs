use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What the bootstrap driver does after a step fails.
///
/// - `Continue`: report the failure and move on to the next step (default).
///   Later steps can still succeed and the user re-runs the failed one by hand.
/// - `Abort`: stop at the first failed step and exit non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Continue,
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(FailurePolicy::Continue),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(format!(
                "invalid failure_policy: {other} (expected \"continue\" or \"abort\")"
            )),
        }
    }
}

/// Version component bumped by the release script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseBump {
    Major,
    #[default]
    Minor,
    Patch,
}

impl ReleaseBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseBump::Major => "major",
            ReleaseBump::Minor => "minor",
            ReleaseBump::Patch => "patch",
        }
    }
}

impl fmt::Display for ReleaseBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseBump {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ReleaseBump::Major),
            "minor" => Ok(ReleaseBump::Minor),
            "patch" => Ok(ReleaseBump::Patch),
            other => Err(format!(
                "invalid release bump: {other} (expected \"major\", \"minor\" or \"patch\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_policy_parses_case_insensitively() {
        assert_eq!("Abort".parse::<FailurePolicy>(), Ok(FailurePolicy::Abort));
        assert_eq!(" continue ".parse::<FailurePolicy>(), Ok(FailurePolicy::Continue));
        assert!("retry".parse::<FailurePolicy>().is_err());
    }

    #[test]
    fn release_bump_round_trips_through_display() {
        for bump in [ReleaseBump::Major, ReleaseBump::Minor, ReleaseBump::Patch] {
            assert_eq!(bump.to_string().parse::<ReleaseBump>(), Ok(bump));
        }
        assert_eq!(ReleaseBump::default(), ReleaseBump::Minor);
    }
}
