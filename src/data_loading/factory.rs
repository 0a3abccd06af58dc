use super::data_loader::DataLoader;
use super::flare_data_loader::FlareDataLoader;
use crate::error::{FlareError, Result};

/// Factory pre vytváranie data loaderov podľa typu
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    /// Vytvorí loader na základe typu
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>> {
        match loader_type.to_lowercase().as_str() {
            "flare" | "uci_flare" | "whitespace" => Ok(Box::new(FlareDataLoader::new())),
            _ => Err(FlareError::Config(format!("Neznámy typ loadera: {}", loader_type))),
        }
    }

    /// Vráti zoznam všetkých podporovaných formátov
    pub fn available_formats() -> Vec<&'static str> {
        vec!["flare"]
    }

    /// Vráti popis formátu
    pub fn get_format_description(format: &str) -> Option<&'static str> {
        match format.to_lowercase().as_str() {
            "flare" => Some("Medzerami oddelený text - hlavička, potom 13 polí na riadok"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_known_loader() {
        let loader = DataLoaderFactory::create("FLARE").unwrap();
        assert_eq!(loader.get_name(), "Solar Flare Data Loader");
        assert!(DataLoaderFactory::create("json").is_err());

        for format in DataLoaderFactory::available_formats() {
            assert!(DataLoaderFactory::create(format).is_ok());
            assert!(DataLoaderFactory::get_format_description(format).is_some());
        }
    }
}
