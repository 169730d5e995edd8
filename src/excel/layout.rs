//! Positional column map shared by the stock importer and exporter
//!
//! The stock sheet is addressed by column letter, never by header text:
//!
//! | Column          | Field                          |
//! |-----------------|--------------------------------|
//! | A               | brand (Marque)                 |
//! | B               | category (Type)                |
//! | C               | serial number (Article)        |
//! | D               | model (Model)                  |
//! | E               | color (Couleur)                |
//! | F ..            | one column per size label      |
//! | after sizes     | unit price (Prix/u achat)      |
//! | after price     | total price (Prix total)       |
//!
//! With the default 25 size labels the sizes span F..AD, the price sits in AE
//! and the total in AF.

use crate::error::{StockError, StockResult};
use crate::excel::cell::size_label;
use calamine::Data;

/// Default size labels, in column order starting at F
pub const DEFAULT_SIZE_LABELS: [&str; 25] = [
    "30", "31", "32", "33", "34", "35", "36", "37", "38", "39", "40", "41", "42", "43", "44",
    "45", "46", "48", "50", "52", "54", "56", "58", "60", "62",
];

/// Column header labels written on the first header row
pub const BRAND_HEADER: &str = "Marque";
pub const CATEGORY_HEADER: &str = "Type";
pub const SERIAL_HEADER: &str = "Article";
pub const MODEL_HEADER: &str = "Model";
pub const COLOR_HEADER: &str = "Couleur";
pub const SIZE_HEADER: &str = "Taille";
pub const PRICE_HEADER: &str = "Prix/u achat";
pub const TOTAL_HEADER: &str = "Prix total";

/// Highest column index whose letter code has at most two letters (ZZ)
pub const MAX_TWO_LETTER_COLUMN: usize = 26 + 26 * 26 - 1;

/// Fixed column layout of the stock sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    size_labels: Vec<String>,
}

impl ColumnLayout {
    pub const BRAND: usize = 0;
    pub const CATEGORY: usize = 1;
    pub const SERIAL: usize = 2;
    pub const MODEL: usize = 3;
    pub const COLOR: usize = 4;
    pub const FIRST_SIZE: usize = 5;

    /// Create a layout with a custom ordered size label list
    pub fn new<I, S>(labels: I) -> StockResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let size_labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.into().trim().to_string())
            .collect();

        if size_labels.is_empty() {
            return Err(StockError::Validation(
                "size label list must not be empty".to_string(),
            ));
        }
        if let Some(label) = size_labels.iter().find(|label| label.is_empty()) {
            return Err(StockError::Validation(format!(
                "size labels must not be blank: {:?}",
                label
            )));
        }
        // the importer only maps numeric header cells back to sizes
        if let Some(label) = size_labels
            .iter()
            .find(|label| size_label(&Data::String(label.to_string())).is_none())
        {
            return Err(StockError::Validation(format!(
                "size label '{}' is not numeric and could not be read back on import",
                label
            )));
        }
        for (idx, label) in size_labels.iter().enumerate() {
            if size_labels[..idx].contains(label) {
                return Err(StockError::Validation(format!(
                    "duplicate size label '{}'",
                    label
                )));
            }
        }
        // price and total must stay addressable by a two-letter column code
        if Self::FIRST_SIZE + size_labels.len() + 1 > MAX_TWO_LETTER_COLUMN {
            return Err(StockError::Validation(format!(
                "{} size labels do not fit the sheet layout",
                size_labels.len()
            )));
        }

        Ok(Self { size_labels })
    }

    /// Ordered size labels
    pub fn size_labels(&self) -> &[String] {
        &self.size_labels
    }

    /// Label whose presence in the first size column marks the size header row
    pub fn anchor_label(&self) -> &str {
        &self.size_labels[0]
    }

    /// (column index, size label) pairs in column order
    pub fn size_columns(&self) -> impl Iterator<Item = (usize, &str)> {
        self.size_labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (Self::FIRST_SIZE + idx, label.as_str()))
    }

    /// Column index of a size label, if it is part of the layout
    pub fn size_column(&self, label: &str) -> Option<usize> {
        self.size_labels
            .iter()
            .position(|l| l == label)
            .map(|idx| Self::FIRST_SIZE + idx)
    }

    pub fn last_size_column(&self) -> usize {
        Self::FIRST_SIZE + self.size_labels.len() - 1
    }

    /// Column holding the unit price, right after the last size column
    pub fn price_column(&self) -> usize {
        self.last_size_column() + 1
    }

    /// Column holding the computed total price
    pub fn total_column(&self) -> usize {
        self.price_column() + 1
    }

    /// Header labels of the first header row, by column index
    pub fn title_headers(&self) -> Vec<(usize, &'static str)> {
        vec![
            (Self::BRAND, BRAND_HEADER),
            (Self::CATEGORY, CATEGORY_HEADER),
            (Self::SERIAL, SERIAL_HEADER),
            (Self::MODEL, MODEL_HEADER),
            (Self::COLOR, COLOR_HEADER),
            (Self::FIRST_SIZE, SIZE_HEADER),
            (self.price_column(), PRICE_HEADER),
            (self.total_column(), TOTAL_HEADER),
        ]
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            size_labels: DEFAULT_SIZE_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Convert column index to Excel column letter (0→A, 25→Z, 26→AA, ...)
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert Excel column letters to a column index (A→0, AA→26, ...)
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut index: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }

    Some(index - 1)
}
