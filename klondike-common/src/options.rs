//! Game options handed to the engine by whatever stores the player's
//! preferences.

use crate::error::OptionError;

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    One,
    Three,
}

impl DrawMode {
    pub fn count(self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }

    pub fn from_count(count: usize) -> Result<Self, OptionError> {
        match count {
            1 => Ok(DrawMode::One),
            3 => Ok(DrawMode::Three),
            _ => Err(OptionError::InvalidDrawMode(count.to_string())),
        }
    }
}

impl FromStr for DrawMode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "one" => Ok(DrawMode::One),
            "3" | "three" => Ok(DrawMode::Three),
            other => Err(OptionError::InvalidDrawMode(other.to_string())),
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    #[default]
    Standard,
    Vegas,
    None,
}

impl FromStr for ScoringMode {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ScoringMode::Standard),
            "vegas" => Ok(ScoringMode::Vegas),
            "none" => Ok(ScoringMode::None),
            other => Err(OptionError::InvalidScoring(other.to_string())),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScoringMode::Standard => "standard",
            ScoringMode::Vegas => "vegas",
            ScoringMode::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub draw_mode: DrawMode,
    pub scoring: ScoringMode,
    /// Carry the Vegas score over into the next game.
    pub cumulative: bool,
    /// How many times the talon may be recycled; `None` for no limit.
    pub max_passes: Option<u32>,
}

impl Options {
    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }

    pub fn with_max_passes(mut self, max_passes: Option<u32>) -> Self {
        self.max_passes = max_passes;
        self
    }
}
