use crate::error::ColorError;
use crate::model::{Category, Ingredient};


const BASE: &[Ingredient] = &[
    Ingredient::new("White Rice", "#FFFFFF"),
    Ingredient::new("Brown Rice", "#8B4513"),
    Ingredient::new("Lettuce", "#90EE90"),
];

const BEANS: &[Ingredient] = &[
    Ingredient::new("Black Beans", "#000000"),
    Ingredient::new("Pinto Beans", "#DEB887"),
];

const PROTEIN: &[Ingredient] = &[
    Ingredient::new("Chicken", "#F0E68C"),
    Ingredient::new("Steak", "#8B0000"),
    Ingredient::new("Carnitas", "#CD853F"),
    Ingredient::new("Barbacoa", "#A52A2A"),
    Ingredient::new("Sofritas", "#E9967A"),
    Ingredient::new("Veggie", "#228B22"),
];

const SALSA: &[Ingredient] = &[
    Ingredient::new("Pico De Gallo", "#FF6347"),
    Ingredient::new("Green Chili Salsa", "#32CD32"),
    Ingredient::new("Red Chili Salsa", "#DC143C"),
];

const TOPPINGS: &[Ingredient] = &[
    Ingredient::new("Fajita Veggies", "#FF4500"),
    Ingredient::new("Cheese", "#FFFF00"),
    Ingredient::new("Sour Cream", "#F0FFFF"),
];

const EXTRAS: &[Ingredient] = &[
    Ingredient::new("Queso Blanco", "#FFFDD0"),
    Ingredient::new("Guacamole", "#7CFC00"),
];


/// Fixed mapping from category to its ordered ingredients.
///
/// Built once at startup and handed to the store and the renderer by
/// reference; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    // Indexed by `Category::index()`
    items: [&'static [Ingredient]; 6],
}

impl Catalog {
    pub fn standard() -> Self {
        Self {
            items: [BASE, BEANS, PROTEIN, SALSA, TOPPINGS, EXTRAS],
        }
    }

    pub fn items(&self, category: Category) -> &'static [Ingredient] {
        self.items[category.index()]
    }

    // Categories with their ingredients, in display order
    pub fn categories(&self) -> impl Iterator<Item = (Category, &'static [Ingredient])> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.items(c)))
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&'static Ingredient> {
        self.items(category).iter().find(|i| i.name == name)
    }

    // Category owning an undecorated ingredient name
    pub fn category_of(&self, base_name: &str) -> Option<Category> {
        self.categories()
            .find(|(_, items)| items.iter().any(|i| i.name == base_name))
            .map(|(c, _)| c)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}


// Decoded `#RRGGBB` color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(hex.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorError::BadLength(hex.to_string()));
        }
        // from_str_radix alone would accept a leading '+'
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::NotHex(hex.to_string()));
        }
        let bytes = digits.as_bytes();
        let channel = |at: usize| (hex_value(bytes[at]) << 4) | hex_value(bytes[at + 1]);
        Ok(Self {
            r: channel(0),
            g: channel(2),
            b: channel(4),
        })
    }

    // Perceived brightness in [0, 1]
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }
}


fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    // Black when luminance is strictly above 0.5, white otherwise
    pub fn for_background(bg: Rgb) -> Self {
        if bg.luminance() > 0.5 {
            TextColor::Black
        } else {
            TextColor::White
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            TextColor::Black => "#000000",
            TextColor::White => "#FFFFFF",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            TextColor::Black => Rgb { r: 0, g: 0, b: 0 },
            TextColor::White => Rgb { r: 255, g: 255, b: 255 },
        }
    }
}


/// Text color that stays readable on a `#RRGGBB` background.
pub fn contrast_color(hex: &str) -> Result<TextColor, ColorError> {
    Rgb::parse(hex).map(TextColor::for_background)
}
