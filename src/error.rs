use thiserror::Error;

/// Výsledok operácií v tejto knižnici
pub type Result<T> = std::result::Result<T, FlareError>;

/// Chyby pri načítaní, spracovaní, tréningu a evaluácii
#[derive(Debug, Error)]
pub enum FlareError {
    /// Vstupy nemajú očakávaný tvar alebo obsahujú neplatné hodnoty
    #[error("Chyba validácie: {0}")]
    Validation(String),

    /// Štatistika nie je pre dané vstupy definovaná
    #[error("Chyba domény: {0}")]
    Domain(String),

    /// Chybný riadok vo vstupnom súbore
    #[error("Chyba načítania (riadok {line}): {message}")]
    Load { line: usize, message: String },

    #[error("Chyba kódovania: {0}")]
    Encoding(String),

    #[error("Chyba modelu: {0}")]
    Model(String),

    #[error("Chybná konfigurácia: {0}")]
    Config(String),

    #[error("IO chyba: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV chyba: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON chyba: {0}")]
    Json(#[from] serde_json::Error),
}

impl FlareError {
    pub(crate) fn load(line: usize, message: impl Into<String>) -> Self {
        Self::Load { line, message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
