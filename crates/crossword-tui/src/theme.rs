use crossterm::style::Color;

/// Form and grid colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    /// Result box and dialog frame
    pub border: Color,
    /// Labels, hints and the idle status
    pub info: Color,
    pub field_bg: Color,
    pub focus_bg: Color,
    /// Blocked cells in the result grid
    pub blocked: Color,
    pub letter: Color,
    /// Solve trigger while it is held
    pub disabled: Color,
    pub busy: Color,
    pub error: Color,
    pub success: Color,
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            bg: Color::Rgb { r: 16, g: 18, b: 24 },
            fg: Color::Rgb { r: 220, g: 222, b: 228 },
            border: Color::Rgb { r: 84, g: 88, b: 100 },
            info: Color::Rgb { r: 150, g: 154, b: 168 },
            field_bg: Color::Rgb { r: 32, g: 36, b: 46 },
            focus_bg: Color::Rgb { r: 52, g: 72, b: 112 },
            blocked: Color::Rgb { r: 96, g: 100, b: 118 },
            letter: Color::Rgb { r: 245, g: 240, b: 220 },
            disabled: Color::Rgb { r: 78, g: 80, b: 92 },
            busy: Color::Rgb { r: 110, g: 170, b: 240 },
            error: Color::Rgb { r: 235, g: 100, b: 96 },
            success: Color::Rgb { r: 120, g: 210, b: 140 },
            key: Color::Rgb { r: 230, g: 190, b: 110 },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            bg: Color::Rgb { r: 244, g: 242, b: 236 },
            fg: Color::Rgb { r: 36, g: 34, b: 30 },
            border: Color::Rgb { r: 170, g: 166, b: 156 },
            info: Color::Rgb { r: 100, g: 96, b: 88 },
            field_bg: Color::Rgb { r: 226, g: 222, b: 212 },
            focus_bg: Color::Rgb { r: 196, g: 212, b: 236 },
            blocked: Color::Rgb { r: 40, g: 38, b: 34 },
            letter: Color::Rgb { r: 20, g: 20, b: 20 },
            disabled: Color::Rgb { r: 168, g: 164, b: 154 },
            busy: Color::Rgb { r: 40, g: 96, b: 176 },
            error: Color::Rgb { r: 190, g: 50, b: 40 },
            success: Color::Rgb { r: 46, g: 130, b: 70 },
            key: Color::Rgb { r: 160, g: 100, b: 20 },
        }
    }

    /// The other theme
    pub fn next(&self) -> Self {
        match self.name {
            "Dark" => Self::light(),
            _ => Self::dark(),
        }
    }
}
