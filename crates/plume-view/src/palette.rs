use glam::Vec4;

/// Colors and gains used to turn field values into pixels. Colors are linear RGBA in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub divergence_positive: Vec4,
    pub divergence_negative: Vec4,
    /// Divergence is tiny after projection, so it is amplified before display.
    pub divergence_scale: f32,
    pub pressure_positive: Vec4,
    pub pressure_negative: Vec4,
    pub pressure_scale: f32,
    /// Fill for solid cells, in every mode.
    pub solid: Vec4,
    pub grid_lines: Vec4,
    pub vectors: Vec4,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            divergence_positive: Vec4::new(1.0, 0.0, 0.0, 1.0),
            divergence_negative: Vec4::new(0.0, 1.0, 1.0, 1.0),
            divergence_scale: 50.0,
            pressure_positive: Vec4::new(1.0, 0.5, 0.0, 1.0),
            pressure_negative: Vec4::new(0.0, 0.5, 1.0, 1.0),
            pressure_scale: 2.0,
            solid: Vec4::new(0.35, 0.35, 0.4, 1.0),
            grid_lines: Vec4::new(1.0, 1.0, 1.0, 0.1),
            vectors: Vec4::new(1.0, 1.0, 1.0, 0.5),
        }
    }
}

impl Palette {
    /// Sign-coded color for a value, scaled by its magnitude.
    pub fn signed(positive: Vec4, negative: Vec4, value: f32, scale: f32) -> Vec4 {
        let base = if value > 0.0 { positive } else { negative };
        (base * value.abs() * scale).truncate().extend(1.0)
    }

    pub fn gray(value: f32) -> Vec4 {
        Vec4::new(value, value, value, 1.0)
    }
}

/// Converts a `[0, 1]` color to 8-bit RGBA.
pub fn to_rgba8(c: Vec4) -> [u8; 4] {
    let c = (c.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}
