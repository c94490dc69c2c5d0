//! Crop label table
//!
//! Class codes 1-22 as assigned when the classifier was trained. The table is
//! closed; codes outside it render as [`UNKNOWN_CROP`].

/// Name used for any class code the table does not cover.
pub const UNKNOWN_CROP: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Crop {
    Rice,
    Maize,
    Jute,
    Cotton,
    Coconut,
    Papaya,
    Orange,
    Apple,
    Muskmelon,
    Watermelon,
    Grapes,
    Mango,
    Banana,
    Pomegranate,
    Lentil,
    Blackgram,
    Mungbean,
    Mothbeans,
    Pigeonpeas,
    Kidneybeans,
    Chickpea,
    Coffee,
}

impl Crop {
    /// All crops, indexed by `code - 1`
    pub const ALL: [Crop; 22] = [
        Crop::Rice,
        Crop::Maize,
        Crop::Jute,
        Crop::Cotton,
        Crop::Coconut,
        Crop::Papaya,
        Crop::Orange,
        Crop::Apple,
        Crop::Muskmelon,
        Crop::Watermelon,
        Crop::Grapes,
        Crop::Mango,
        Crop::Banana,
        Crop::Pomegranate,
        Crop::Lentil,
        Crop::Blackgram,
        Crop::Mungbean,
        Crop::Mothbeans,
        Crop::Pigeonpeas,
        Crop::Kidneybeans,
        Crop::Chickpea,
        Crop::Coffee,
    ];

    pub fn from_code(code: u32) -> Option<Crop> {
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        Crop::ALL.get(idx).copied()
    }

    pub fn code(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Crop::Rice => "rice",
            Crop::Maize => "maize",
            Crop::Jute => "jute",
            Crop::Cotton => "cotton",
            Crop::Coconut => "coconut",
            Crop::Papaya => "papaya",
            Crop::Orange => "orange",
            Crop::Apple => "apple",
            Crop::Muskmelon => "muskmelon",
            Crop::Watermelon => "watermelon",
            Crop::Grapes => "grapes",
            Crop::Mango => "mango",
            Crop::Banana => "banana",
            Crop::Pomegranate => "pomegranate",
            Crop::Lentil => "lentil",
            Crop::Blackgram => "blackgram",
            Crop::Mungbean => "mungbean",
            Crop::Mothbeans => "mothbeans",
            Crop::Pigeonpeas => "pigeonpeas",
            Crop::Kidneybeans => "kidneybeans",
            Crop::Chickpea => "chickpea",
            Crop::Coffee => "coffee",
        }
    }
}

/// Crop name for a class code, or `"Unknown"` when unmapped.
pub fn crop_name(code: u32) -> &'static str {
    Crop::from_code(code).map(Crop::name).unwrap_or(UNKNOWN_CROP)
}
