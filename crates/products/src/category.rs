use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pharmastock_core::DomainError;

/// Pharmaceutical classification of a product (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Ortomolecular,
    Dermocosmetica,
    Homeopatia,
    Alopatica,
    Fitoterapia,
    Florales,
    Probioticos,
    Hormonas,
    MateriaPrima,
    Otros,
}

impl ProductCategory {
    /// Every category, in declaration order (report ordering).
    pub const ALL: [ProductCategory; 10] = [
        ProductCategory::Ortomolecular,
        ProductCategory::Dermocosmetica,
        ProductCategory::Homeopatia,
        ProductCategory::Alopatica,
        ProductCategory::Fitoterapia,
        ProductCategory::Florales,
        ProductCategory::Probioticos,
        ProductCategory::Hormonas,
        ProductCategory::MateriaPrima,
        ProductCategory::Otros,
    ];

    /// Persisted tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Ortomolecular => "ortomolecular",
            ProductCategory::Dermocosmetica => "dermocosmetica",
            ProductCategory::Homeopatia => "homeopatia",
            ProductCategory::Alopatica => "alopatica",
            ProductCategory::Fitoterapia => "fitoterapia",
            ProductCategory::Florales => "florales",
            ProductCategory::Probioticos => "probioticos",
            ProductCategory::Hormonas => "hormonas",
            ProductCategory::MateriaPrima => "materia_prima",
            ProductCategory::Otros => "otros",
        }
    }

    /// Title-cased label used in reports (`materia_prima` -> `Materia_Prima`).
    pub fn display_name(self) -> String {
        let mut out = String::with_capacity(self.as_str().len());
        let mut word_start = true;
        for ch in self.as_str().chars() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            word_start = !ch.is_alphabetic();
        }
        out
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::unknown_category(s))
    }
}
