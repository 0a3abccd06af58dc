use super::metrics::{
    ClassCorrelation, ClassRates, CorrelationReport, RateReport, FLARE_CLASSES,
};
use crate::error::{FlareError, Result};
use ndarray::{ArrayView1, ArrayView2};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{debug, warn};

/// Porovnáva predikované počty erupcií so skutočnými, po triedach.
///
/// Riadky matíc sú vzorky, stĺpce sú triedy v poradí `labels`.
/// Oba režimy sú samostatné čisté funkcie, evaluátor nemá žiadny stav okrem mien tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEvaluator {
    labels: Vec<String>,
}

impl ModelEvaluator {
    /// Evaluátor s vlastnými menami tried (aspoň jedna)
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(FlareError::Validation(
                "Evaluátor potrebuje aspoň jednu triedu".to_string(),
            ));
        }
        Ok(Self { labels })
    }

    /// Evaluátor pre triedy C, M, X
    pub fn flare() -> Self {
        Self {
            labels: FLARE_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn validate(&self, predicted: &ArrayView2<f64>, actual: &ArrayView2<f64>) -> Result<()> {
        if predicted.dim() != actual.dim() {
            return Err(FlareError::Validation(format!(
                "Nesúlad rozmerov: predikcie {:?}, skutočné hodnoty {:?}",
                predicted.dim(),
                actual.dim()
            )));
        }

        let (rows, cols) = actual.dim();
        if cols != self.labels.len() {
            return Err(FlareError::Validation(format!(
                "Očakávaných {} stĺpcov ({}), dostupných {}",
                self.labels.len(),
                self.labels.join(", "),
                cols
            )));
        }
        if rows == 0 {
            return Err(FlareError::Validation("Prázdne vstupy (0 riadkov)".to_string()));
        }

        if predicted.iter().chain(actual.iter()).any(|v| !v.is_finite()) {
            return Err(FlareError::Validation(
                "Vstupy obsahujú NaN alebo nekonečno".to_string(),
            ));
        }

        Ok(())
    }

    /// Mode A: miery falošne negatívnych a falošne pozitívnych predikcií.
    ///
    /// Pre triedu `c` platí `TP = sum(actual)`, `TN = N - count_nonzero(actual)`,
    /// záporné rezíduá `predicted - actual` tvoria FN a kladné FP.
    /// Ak je menovateľ nulový, miera je `None`.
    ///
    /// Pri nezáporných predikciách je `fn_rate` v intervale [0, 1]. `fp_rate` je v
    /// [0, 1] iba keď sú predikcie v [0, 1]; väčšie predikcie ho môžu posunúť nad 1.
    pub fn evaluate_rates(
        &self,
        predicted: ArrayView2<f64>,
        actual: ArrayView2<f64>,
    ) -> Result<RateReport> {
        self.validate(&predicted, &actual)?;
        if actual.iter().any(|v| *v < 0.0) {
            return Err(FlareError::Validation(
                "Skutočné počty erupcií nesmú byť záporné".to_string(),
            ));
        }

        let n = actual.nrows();
        let classes = self
            .labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                let rates = class_rates(label, predicted.column(c), actual.column(c), n);
                if rates.has_undefined_rate() {
                    warn!(
                        class = %label,
                        true_positive = rates.true_positive,
                        true_negative = rates.true_negative,
                        "Nulový menovateľ, miera nie je definovaná"
                    );
                }
                rates
            })
            .collect();

        Ok(RateReport { classes })
    }

    /// Mode B: Pearsonova korelácia a obojstranná p-hodnota pre každú triedu.
    ///
    /// Vyžaduje aspoň 2 vzorky a nekonštantné stĺpce v oboch vstupoch.
    pub fn evaluate_correlation(
        &self,
        predicted: ArrayView2<f64>,
        actual: ArrayView2<f64>,
    ) -> Result<CorrelationReport> {
        self.validate(&predicted, &actual)?;

        let n = actual.nrows();
        if n < 2 {
            return Err(FlareError::Domain(format!(
                "Korelácia potrebuje aspoň 2 vzorky, dostupných {}",
                n
            )));
        }

        let mut classes = Vec::with_capacity(self.labels.len());
        for (c, label) in self.labels.iter().enumerate() {
            let (coefficient, p_value) = pearson(predicted.column(c), actual.column(c))
                .map_err(|e| match e {
                    FlareError::Domain(msg) => {
                        FlareError::Domain(format!("Trieda {}: {}", label, msg))
                    }
                    other => other,
                })?;
            debug!(class = %label, coefficient, p_value, "Korelácia vypočítaná");
            classes.push(ClassCorrelation {
                class: label.clone(),
                samples: n,
                coefficient,
                p_value,
            });
        }

        Ok(CorrelationReport { classes })
    }
}

impl Default for ModelEvaluator {
    fn default() -> Self {
        Self::flare()
    }
}

/// Mode A nad triedami C, M, X
pub fn evaluate_rates(predicted: ArrayView2<f64>, actual: ArrayView2<f64>) -> Result<RateReport> {
    ModelEvaluator::flare().evaluate_rates(predicted, actual)
}

/// Mode B nad triedami C, M, X
pub fn evaluate_correlation(
    predicted: ArrayView2<f64>,
    actual: ArrayView2<f64>,
) -> Result<CorrelationReport> {
    ModelEvaluator::flare().evaluate_correlation(predicted, actual)
}

fn class_rates(
    label: &str,
    predicted: ArrayView1<f64>,
    actual: ArrayView1<f64>,
    n: usize,
) -> ClassRates {
    let true_positive = actual.sum();
    let true_negative = (n - actual.iter().filter(|v| **v != 0.0).count()) as f64;

    let mut negative_sum = 0.0;
    let mut positive_sum = 0.0;
    for (p, a) in predicted.iter().zip(actual.iter()) {
        let diff = p - a;
        if diff < 0.0 {
            negative_sum += diff;
        } else if diff > 0.0 {
            positive_sum += diff;
        }
    }
    let false_negative = negative_sum.abs();
    let false_positive = positive_sum;

    ClassRates {
        class: label.to_string(),
        samples: n,
        true_positive,
        true_negative,
        false_negative,
        false_positive,
        false_negative_rate: ratio(false_negative, true_positive),
        false_positive_rate: ratio(false_positive, true_negative),
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Vráti (r, p) pre dva rovnako dlhé vektory
pub(crate) fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<(f64, f64)> {
    let n = x.len();
    if n != y.len() {
        return Err(FlareError::Validation(format!(
            "Vektory majú rôznu dĺžku: {} a {}",
            n,
            y.len()
        )));
    }
    if n < 2 {
        return Err(FlareError::Domain(format!(
            "Korelácia potrebuje aspoň 2 vzorky, dostupných {}",
            n
        )));
    }
    if is_constant(x) || is_constant(y) {
        return Err(FlareError::Domain(
            "Konštantný vektor, korelácia nie je definovaná".to_string(),
        ));
    }

    // r je invariantné voči škálovaniu, po ňom sú hodnoty v [-1, 1]
    let (scale_x, scale_y) = (max_abs(x), max_abs(y));
    let x = x.mapv(|v| v / scale_x);
    let y = y.mapv(|v| v / scale_y);

    let nf = n as f64;
    let mean_x = x.sum() / nf;
    let mean_y = y.sum() / nf;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let r = numerator / (sum_sq_x * sum_sq_y).sqrt();
    if !(sum_sq_x > 0.0 && sum_sq_y > 0.0 && r.is_finite()) {
        return Err(FlareError::Domain(
            "Rozptyl je numericky nulový, korelácia nie je definovaná".to_string(),
        ));
    }

    let r = r.clamp(-1.0, 1.0);
    let p = two_tailed_p_value(r, n)?;
    Ok((r, p))
}

fn max_abs(values: ArrayView1<f64>) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// Obojstranná p-hodnota z Studentovho t-rozdelenia s N-2 stupňami voľnosti
fn two_tailed_p_value(r: f64, n: usize) -> Result<f64> {
    // dva body vždy ležia na priamke
    if n == 2 {
        return Ok(1.0);
    }

    let df = (n - 2) as f64;
    let residual = 1.0 - r * r;
    if residual <= 0.0 {
        return Ok(0.0);
    }

    let t = r * (df / residual).sqrt();
    if !t.is_finite() {
        return Err(FlareError::Domain(format!("t-štatistika nie je konečná (r = {})", r)));
    }
    let dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| FlareError::Domain(format!("t-rozdelenie s {} stupňami voľnosti: {}", df, e)))?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

fn is_constant(values: ArrayView1<f64>) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| v == first),
        None => true,
    }
}
