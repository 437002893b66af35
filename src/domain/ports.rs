use crate::domain::model::FeatureField;
use crate::utils::error::Result;
use ndarray::{Array1, ArrayView2};

/// A fitted regression model.
pub trait Regressor {
    /// Predicts one value per row of `x`.
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>>;
}

/// Produces the model a runner predicts with.
pub trait ModelSource {
    fn load(&self) -> Result<Box<dyn Regressor>>;
}

/// Supplies the raw, unparsed text for one feature.
pub trait InputSource {
    fn read_value(&mut self, field: FeatureField) -> Result<String>;
}

impl<R: Regressor + ?Sized> Regressor for Box<R> {
    fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
        (**self).predict(x)
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn read_value(&mut self, field: FeatureField) -> Result<String> {
        (**self).read_value(field)
    }
}
