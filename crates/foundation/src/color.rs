/// 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Self = Self(0xFF_FF_FF);

    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0xFF_FF_FF)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}
