use super::services::compute_view;
use super::value_objects::{ChartConfig, SurfaceGeometry};
use crate::domain::errors::ChartResult;
use crate::domain::market_data::{PriceSeries, Sample};
use crate::view_state::ViewState;

/// Domain entity - the chart's whole mutable state: config, history and the
/// surface it is drawn on. Owned by a single controller.
#[derive(Debug, Clone)]
pub struct ChartState {
    config: ChartConfig,
    series: PriceSeries,
    geometry: SurfaceGeometry,
}

impl ChartState {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let series = PriceSeries::new(config.capacity);
        Ok(Self { config, series, geometry: SurfaceGeometry::default() })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Append a price stamped with the current time and derive the next frame.
    pub fn ingest(&mut self, price: f64) -> ViewState {
        self.series.append(price);
        self.view()
    }

    pub fn append(&mut self, price: f64) -> Sample {
        self.series.append(price)
    }

    pub fn resize(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    pub fn view(&self) -> ViewState {
        compute_view(&self.series, &self.config, self.geometry)
    }
}
