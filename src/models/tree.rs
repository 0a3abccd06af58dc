use super::{check_training_shapes, parse_param, IModel};
use crate::error::{FlareError, Result};
use ndarray::{Array2, ArrayView2};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};
use tracing::debug;

type Tree = DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Rozhodovací strom - jeden smartcore regresor pre každý výstupný stĺpec
pub struct TreeWrapper
{
    models: Vec<Tree>,
    max_depth: u16,
    min_samples_split: usize,
    min_samples_leaf: usize,
}

impl TreeWrapper
{
    pub fn new() -> Self
    {
        Self
        {  //Default
            models: Vec::new(),
            max_depth: 10,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    fn params(&self) -> DecisionTreeRegressorParameters
    {
        let mut params = DecisionTreeRegressorParameters::default();
        params.max_depth = Some(self.max_depth);
        params.min_samples_split = self.min_samples_split;
        params.min_samples_leaf = self.min_samples_leaf;
        params
    }
}

impl Default for TreeWrapper
{
    fn default() -> Self
    {
        Self::new()
    }
}

pub(crate) fn to_dense(x: &ArrayView2<f64>) -> Result<DenseMatrix<f64>>
{
    let rows: Vec<Vec<f64>> = x.rows().into_iter().map(|r| r.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
        .map_err(|e| FlareError::Model(format!("Nepodarilo sa vytvoriť DenseMatrix: {}", e)))
}

impl IModel for TreeWrapper
{
    fn get_name(&self) -> &str
    {
        "Decision Tree"
    }

    fn get_supported_params(&self) -> Vec<&str>
    {
        vec!["max_depth", "min_samples_split", "min_samples_leaf"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()>
    {
        match key
        {
            "max_depth" =>
            {
                self.max_depth = parse_param(key, value)?;
                Ok(())
            }
            "min_samples_split" =>
            {
                self.min_samples_split = parse_param(key, value)?;
                Ok(())
            }
            "min_samples_leaf" =>
            {
                self.min_samples_leaf = parse_param(key, value)?;
                Ok(())
            }
            _ => Err(FlareError::Config(format!("Neznámy parameter {} pre Decision Tree", key))),
        }
    }

    fn train(&mut self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()>
    {
        check_training_shapes(&x, &y)?;
        let dense = to_dense(&x)?;

        let mut models = Vec::with_capacity(y.ncols());
        for (col, target) in y.columns().into_iter().enumerate()
        {
            let target: Vec<f64> = target.to_vec();
            let tree = Tree::fit(&dense, &target, self.params())
                .map_err(|e| FlareError::Model(format!("Tréning stromu pre výstup {} zlyhal: {}", col, e)))?;
            models.push(tree);
        }

        debug!(
            outputs = models.len(),
            max_depth = self.max_depth,
            samples = x.nrows(),
            "Decision Tree natrénovaný"
        );
        self.models = models;
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array2<f64>>
    {
        if self.models.is_empty()
        {
            return Err(FlareError::Model("Decision Tree ešte nebol natrénovaný".to_string()));
        }

        let dense = to_dense(&x)?;
        let mut predictions = Array2::zeros((x.nrows(), self.models.len()));
        for (col, model) in self.models.iter().enumerate()
        {
            let column = model
                .predict(&dense)
                .map_err(|e| FlareError::Model(format!("Predikcia výstupu {} zlyhala: {}", col, e)))?;
            for (row, value) in column.into_iter().enumerate()
            {
                predictions[[row, col]] = value;
            }
        }
        Ok(predictions)
    }
}
