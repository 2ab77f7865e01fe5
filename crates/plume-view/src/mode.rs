use std::{fmt, str::FromStr};

use crate::ViewError;

/// Field shown by a rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    #[default]
    Density,
    Divergence,
    Pressure,
    Velocity,
}

impl DrawMode {
    pub const ALL: [DrawMode; 4] = [
        DrawMode::Density,
        DrawMode::Divergence,
        DrawMode::Pressure,
        DrawMode::Velocity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DrawMode::Density => "density",
            DrawMode::Divergence => "divergence",
            DrawMode::Pressure => "pressure",
            DrawMode::Velocity => "velocity",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DrawMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ViewError::UnknownDrawMode(s.to_owned()))
    }
}

/// Dropdown order: density, divergence, pressure, velocity.
impl TryFrom<usize> for DrawMode {
    type Error = ViewError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        DrawMode::ALL
            .get(i)
            .copied()
            .ok_or_else(|| ViewError::UnknownDrawMode(i.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::DrawMode;

    #[test]
    fn parses_names_and_indices() {
        assert_eq!("Pressure".parse::<DrawMode>().unwrap(), DrawMode::Pressure);
        assert_eq!("velocity".parse::<DrawMode>().unwrap(), DrawMode::Velocity);
        assert!("vorticity".parse::<DrawMode>().is_err());

        assert_eq!(DrawMode::try_from(1).unwrap(), DrawMode::Divergence);
        assert!(DrawMode::try_from(4).is_err());

        for mode in DrawMode::ALL {
            assert_eq!(mode.to_string().parse::<DrawMode>().unwrap(), mode);
        }
    }
}
