use crate::data_loading::schema::{CATEGORICAL_COLUMNS, ORDINAL_COLUMNS};
use crate::data_loading::FlareDataset;
use crate::error::{FlareError, Result};
use ndarray::Array2;
use std::collections::BTreeSet;
use tracing::debug;

/// One-Hot Encoder pre tri písmenové stĺpce.
///
/// Kategórie sa zbierajú pri `fit` a radia lexikograficky, takže poradie
/// stĺpcov je rovnaké pri každom behu. Za indikátorovými stĺpcami nasleduje
/// sedem celočíselných atribútov bez zmeny.
#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    categories: Option<Vec<Vec<char>>>,
}

impl OneHotEncoder {
    pub fn new() -> Self {
        Self { categories: None }
    }

    pub fn get_name(&self) -> &str {
        "One-Hot Encoder"
    }

    pub fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    /// Zistí unikátne hodnoty každého písmenového stĺpca
    pub fn fit(&mut self, data: &FlareDataset) -> Result<()> {
        if data.is_empty() {
            return Err(FlareError::Encoding(
                "Encoder nemožno natrénovať na prázdnom datasete".to_string(),
            ));
        }

        let mut sets: Vec<BTreeSet<char>> = vec![BTreeSet::new(); CATEGORICAL_COLUMNS.len()];
        for record in data.records() {
            for (set, value) in sets.iter_mut().zip(record.categorical()) {
                set.insert(value);
            }
        }

        let categories: Vec<Vec<char>> = sets.into_iter().map(|s| s.into_iter().collect()).collect();
        debug!(
            zurich_class = categories[0].len(),
            largest_spot_size = categories[1].len(),
            spot_distribution = categories[2].len(),
            "Kategórie zistené"
        );
        self.categories = Some(categories);
        Ok(())
    }

    fn fitted(&self) -> Result<&[Vec<char>]> {
        self.categories
            .as_deref()
            .ok_or_else(|| FlareError::Encoding("Encoder ešte nebol natrénovaný".to_string()))
    }

    pub fn num_features(&self) -> Result<usize> {
        let categories = self.fitted()?;
        Ok(categories.iter().map(Vec::len).sum::<usize>() + ORDINAL_COLUMNS.len())
    }

    /// Názvy výstupných stĺpcov, napr. `zurich_class=A`
    pub fn feature_names(&self) -> Result<Vec<String>> {
        let categories = self.fitted()?;
        let mut names = Vec::new();
        for (column, values) in CATEGORICAL_COLUMNS.iter().zip(categories) {
            for value in values {
                names.push(format!("{}={}", column.name, value));
            }
        }
        names.extend(ORDINAL_COLUMNS.iter().map(|c| c.name.to_string()));
        Ok(names)
    }

    /// Vytvorí maticu N×F s indikátormi a celočíselnými atribútmi
    pub fn transform(&self, data: &FlareDataset) -> Result<Array2<f64>> {
        let categories = self.fitted()?;
        let width = self.num_features()?;
        let mut matrix = Array2::zeros((data.num_samples(), width));

        for (i, record) in data.records().iter().enumerate() {
            let mut offset = 0;
            for ((column, values), value) in CATEGORICAL_COLUMNS
                .iter()
                .zip(categories)
                .zip(record.categorical())
            {
                let position = values.binary_search(&value).map_err(|_| {
                    FlareError::Encoding(format!(
                        "Kategória '{}' v stĺpci '{}' (riadok {}) nebola pri fit videná",
                        value, column.name, i
                    ))
                })?;
                matrix[[i, offset + position]] = 1.0;
                offset += values.len();
            }
            for (j, value) in record.ordinal().iter().enumerate() {
                matrix[[i, offset + j]] = *value as f64;
            }
        }

        Ok(matrix)
    }

    pub fn fit_transform(&mut self, data: &FlareDataset) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loading::FlareRecord;

    fn record(class: char, spot: char, dist: char) -> FlareRecord {
        FlareRecord {
            zurich_class: class,
            largest_spot_size: spot,
            spot_distribution: dist,
            activity: 1,
            evolution: 3,
            previous_activity: 1,
            historically_complex: 2,
            became_complex: 2,
            area: 1,
            largest_spot_area: 2,
            c_class: 0,
            m_class: 0,
            x_class: 0,
        }
    }

    #[test]
    fn columns_are_sorted_lexicographically() {
        let data = FlareDataset::new(vec![record('H', 'S', 'O'), record('C', 'A', 'O')]);
        let mut encoder = OneHotEncoder::new();
        let x = encoder.fit_transform(&data).unwrap();

        let names = encoder.feature_names().unwrap();
        assert_eq!(
            &names[..5],
            &[
                "zurich_class=C",
                "zurich_class=H",
                "largest_spot_size=A",
                "largest_spot_size=S",
                "spot_distribution=O",
            ]
        );
        assert_eq!(names.len(), 5 + 7);
        assert_eq!(x.dim(), (2, 12));

        // H S O
        assert_eq!(x.row(0).to_vec()[..5], [0.0, 1.0, 0.0, 1.0, 1.0]);
        // C A O
        assert_eq!(x.row(1).to_vec()[..5], [1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(x[[0, 6]], 3.0);
    }

    #[test]
    fn each_categorical_group_has_one_indicator() {
        let data = FlareDataset::new(vec![
            record('B', 'X', 'X'),
            record('D', 'K', 'C'),
            record('E', 'R', 'I'),
        ]);
        let mut encoder = OneHotEncoder::new();
        let x = encoder.fit_transform(&data).unwrap();
        for row in x.rows() {
            assert_eq!(row.iter().take(9).sum::<f64>(), 3.0);
        }
    }

    #[test]
    fn unseen_category_is_an_error() {
        let train = FlareDataset::new(vec![record('C', 'S', 'O')]);
        let test = FlareDataset::new(vec![record('D', 'S', 'O')]);
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&train).unwrap();
        assert!(matches!(encoder.transform(&test), Err(FlareError::Encoding(_))));
    }

    #[test]
    fn transform_before_fit_is_an_error() {
        let data = FlareDataset::new(vec![record('C', 'S', 'O')]);
        assert!(OneHotEncoder::new().transform(&data).is_err());
    }
}
