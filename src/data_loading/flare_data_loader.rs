use super::data_loader::{DataLoader, FlareDataset};
use super::schema::{FlareRecord, CATEGORICAL_COLUMNS, FIELD_COUNT, ORDINAL_COLUMNS, TARGET_COLUMNS};
use crate::error::{FlareError, Result};
use csv::ReaderBuilder;
use tracing::{debug, info};

/// Loader pre textový súbor s poľami oddelenými medzerami.
///
/// Prvý riadok je hlavička/komentár a preskakuje sa. Viacnásobné medzery
/// a tabulátory medzi poľami sú povolené.
pub struct FlareDataLoader;

impl FlareDataLoader {
    pub fn new() -> Self {
        Self
    }

    fn parse_letter(value: &str, column: usize, line: usize) -> Result<char> {
        let spec = &CATEGORICAL_COLUMNS[column];
        let mut chars = value.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => {
                return Err(FlareError::load(
                    line,
                    format!("Stĺpec '{}' očakáva jedno písmeno, nájdené '{}'", spec.name, value),
                ))
            }
        };
        if !spec.allowed.contains(&letter) {
            return Err(FlareError::load(
                line,
                format!(
                    "Neznámy kód '{}' v stĺpci '{}' (povolené: {:?})",
                    letter, spec.name, spec.allowed
                ),
            ));
        }
        Ok(letter)
    }

    fn parse_ordinal(value: &str, column: usize, line: usize) -> Result<u8> {
        let spec = &ORDINAL_COLUMNS[column];
        let parsed: u8 = value.parse().map_err(|_| {
            FlareError::load(
                line,
                format!("Hodnota '{}' v stĺpci '{}' nie je celé číslo", value, spec.name),
            )
        })?;
        if !spec.allowed.contains(&parsed) {
            return Err(FlareError::load(
                line,
                format!(
                    "Hodnota {} v stĺpci '{}' mimo rozsah {:?}",
                    parsed, spec.name, spec.allowed
                ),
            ));
        }
        Ok(parsed)
    }

    fn parse_count(value: &str, column: usize, line: usize) -> Result<u32> {
        value.parse().map_err(|_| {
            FlareError::load(
                line,
                format!(
                    "Hodnota '{}' v stĺpci '{}' nie je nezáporné celé číslo",
                    value, TARGET_COLUMNS[column]
                ),
            )
        })
    }

    fn parse_record(fields: &[&str], line: usize) -> Result<FlareRecord> {
        if fields.len() != FIELD_COUNT {
            return Err(FlareError::load(
                line,
                format!("Riadok má {} polí, očakávaných {}", fields.len(), FIELD_COUNT),
            ));
        }

        Ok(FlareRecord {
            zurich_class: Self::parse_letter(fields[0], 0, line)?,
            largest_spot_size: Self::parse_letter(fields[1], 1, line)?,
            spot_distribution: Self::parse_letter(fields[2], 2, line)?,
            activity: Self::parse_ordinal(fields[3], 0, line)?,
            evolution: Self::parse_ordinal(fields[4], 1, line)?,
            previous_activity: Self::parse_ordinal(fields[5], 2, line)?,
            historically_complex: Self::parse_ordinal(fields[6], 3, line)?,
            became_complex: Self::parse_ordinal(fields[7], 4, line)?,
            area: Self::parse_ordinal(fields[8], 5, line)?,
            largest_spot_area: Self::parse_ordinal(fields[9], 6, line)?,
            c_class: Self::parse_count(fields[10], 0, line)?,
            m_class: Self::parse_count(fields[11], 1, line)?,
            x_class: Self::parse_count(fields[12], 2, line)?,
        })
    }
}

impl DataLoader for FlareDataLoader {
    fn get_name(&self) -> &str {
        "Solar Flare Data Loader"
    }

    fn load_from_string(&self, data: &str) -> Result<FlareDataset> {
        self.validate_format(data)?;

        let normalized = data.replace('\t', " ");
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .quoting(false)
            .from_reader(normalized.as_bytes());

        let mut records = Vec::new();
        let mut header_skipped = false;
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);

            let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
            if fields.is_empty() {
                continue;
            }
            if !header_skipped {
                debug!(line, header = %fields.join(" "), "Hlavička preskočená");
                header_skipped = true;
                continue;
            }

            records.push(Self::parse_record(&fields, line)?);
        }

        if records.is_empty() {
            return Err(FlareError::load(0, "Súbor neobsahuje žiadne dátové riadky"));
        }

        info!(samples = records.len(), "Dataset načítaný");
        Ok(FlareDataset::new(records))
    }

    fn validate_format(&self, data: &str) -> Result<()> {
        if data.trim().is_empty() {
            return Err(FlareError::load(0, "Dáta sú prázdne"));
        }

        let non_empty = data.lines().filter(|l| !l.trim().is_empty()).count();
        if non_empty < 2 {
            return Err(FlareError::load(
                0,
                "Súbor musí obsahovať hlavičku a aspoň jeden riadok dát",
            ));
        }

        Ok(())
    }
}

impl Default for FlareDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "(solar flare data, 1969-1970)\n\
        C S O 1 2 1 1 2 1 2 0 0 0\n\
        D  A  O 1 3 1 1 2 1 2 1 0 0\n\
        \n\
        H\tR\tX 1 1 1 1 2 1 1 0 0 0\n";

    #[test]
    fn skips_header_and_parses_rows() {
        let dataset = FlareDataLoader::new().load_from_string(SAMPLE).unwrap();
        assert_eq!(dataset.num_samples(), 3);

        let second = &dataset.records()[1];
        assert_eq!(second.categorical(), ['D', 'A', 'O']);
        assert_eq!(second.evolution, 3);
        assert_eq!(second.counts(), [1, 0, 0]);

        let third = &dataset.records()[2];
        assert_eq!(third.categorical(), ['H', 'R', 'X']);
    }

    #[test]
    fn reports_line_of_bad_field_count() {
        let data = "header\nC S O 1 2 1 1 2 1 2 0 0 0\nC S O 1 2 1\n";
        match FlareDataLoader::new().load_from_string(data).unwrap_err() {
            FlareError::Load { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_codes_and_ranges() {
        let bad_letter = "header\nZ S O 1 2 1 1 2 1 2 0 0 0\n";
        assert!(matches!(
            FlareDataLoader::new().load_from_string(bad_letter),
            Err(FlareError::Load { line: 2, .. })
        ));

        let bad_range = "header\nC S O 1 4 1 1 2 1 2 0 0 0\n";
        assert!(matches!(
            FlareDataLoader::new().load_from_string(bad_range),
            Err(FlareError::Load { line: 2, .. })
        ));

        let negative_count = "header\nC S O 1 2 1 1 2 1 2 -1 0 0\n";
        assert!(FlareDataLoader::new().load_from_string(negative_count).is_err());
    }

    #[test]
    fn header_only_is_rejected() {
        assert!(FlareDataLoader::new().load_from_string("header\n").is_err());
        assert!(FlareDataLoader::new().load_from_string("   ").is_err());
    }
}
