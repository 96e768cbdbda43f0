//! Dashboard orchestration
//!
//! Owns the read-only reference-data tables, triggers the per-city forecast
//! fetch on selection, and derives the view models. Rapid re-selection is
//! guarded with a monotonically increasing selection ticket: only the result
//! of the most recently dispatched selection is applied to the rendered
//! state, so a slow earlier response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::TempoError;
use crate::ipma::{IpmaClient, ReferenceData};
use crate::models::{City, ForecastDayView, WarningView};
use crate::viewmodel::{build_day_views, select_active_warnings};

/// Display-ready forecast and warnings for one selected city
#[derive(Debug, Clone, Serialize)]
pub struct CityDashboard {
    /// The selected city id
    pub city_id: u32,
    /// Enriched forecast days, in source order
    pub days: Vec<ForecastDayView>,
    /// Active warnings for the city's area
    pub warnings: Vec<WarningView>,
}

/// Outcome of a city selection
#[derive(Debug)]
pub enum Selection {
    /// The result was the latest selection and has been applied
    Applied(CityDashboard),
    /// A newer selection was dispatched while this one was in flight
    Superseded,
}

/// Dashboard service tying the IPMA client to the view-model derivation
#[derive(Debug)]
pub struct DashboardService {
    client: IpmaClient,
    locale: String,
    reference: RwLock<Option<ReferenceData>>,
    rendered: RwLock<Option<(u64, CityDashboard)>>,
    selection_seq: AtomicU64,
}

impl DashboardService {
    /// Create a service; reference data is loaded separately
    #[must_use]
    pub fn new(client: IpmaClient, locale: String) -> Self {
        Self {
            client,
            locale,
            reference: RwLock::new(None),
            rendered: RwLock::new(None),
            selection_seq: AtomicU64::new(0),
        }
    }

    /// Load (or reload) the reference data, replacing any previous tables
    /// wholesale
    #[instrument(skip(self))]
    pub async fn reload_reference_data(&self) -> Result<(), TempoError> {
        let data = self.client.fetch_reference_data().await?;
        info!(
            cities = data.cities.len(),
            weather_types = data.weather_types.len(),
            warnings = data.warnings.len(),
            "Reference data loaded"
        );
        *self.reference.write().await = Some(data);
        Ok(())
    }

    /// City list in dropdown order (sorted by display name)
    pub async fn cities(&self) -> Result<Vec<City>, TempoError> {
        let guard = self.reference.read().await;
        let reference = guard
            .as_ref()
            .ok_or_else(|| TempoError::general("Reference data not loaded"))?;
        Ok(reference
            .sorted_cities()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Select a city using the current local date as the reference date
    pub async fn select_city(&self, city_id: u32) -> Result<Selection, TempoError> {
        self.select_city_at(city_id, Local::now().date_naive())
            .await
    }

    /// Select a city with an explicit reference date
    ///
    /// Unknown city ids are a selection error. The forecast fetch result is
    /// applied only if no newer selection was dispatched in the meantime.
    #[instrument(skip(self), fields(city_id = %city_id))]
    pub async fn select_city_at(
        &self,
        city_id: u32,
        reference_date: NaiveDate,
    ) -> Result<Selection, TempoError> {
        let area_code = {
            let guard = self.reference.read().await;
            let reference = guard
                .as_ref()
                .ok_or_else(|| TempoError::general("Reference data not loaded"))?;
            let city = reference
                .cities
                .get(&city_id)
                .ok_or_else(|| TempoError::selection(format!("Unknown city id {city_id}")))?;
            city.area_warning_code.clone()
        };

        let ticket = self.selection_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, "Dispatching forecast fetch");

        let raw_days = self.client.fetch_daily_forecast(city_id).await?;

        let dashboard = {
            let guard = self.reference.read().await;
            let reference = guard
                .as_ref()
                .ok_or_else(|| TempoError::general("Reference data not loaded"))?;
            CityDashboard {
                city_id,
                days: build_day_views(&raw_days, &reference.weather_types, reference_date),
                warnings: select_active_warnings(
                    &reference.warnings,
                    Some(&area_code),
                    &self.locale,
                ),
            }
        };

        if !self.apply_if_latest(ticket, dashboard.clone()).await {
            debug!(ticket, "Selection superseded, discarding result");
            return Ok(Selection::Superseded);
        }

        info!(
            days = dashboard.days.len(),
            warnings = dashboard.warnings.len(),
            "Selection applied"
        );
        Ok(Selection::Applied(dashboard))
    }

    /// Apply a selection result to the rendered state iff its ticket is still
    /// the latest dispatched one
    ///
    /// The ticket comparison and the write share one write-lock acquisition;
    /// there is no window between them where another selection can apply.
    async fn apply_if_latest(&self, ticket: u64, dashboard: CityDashboard) -> bool {
        let mut rendered = self.rendered.write().await;
        if self.selection_seq.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *rendered = Some((ticket, dashboard));
        true
    }

    /// The most recently applied dashboard, if any
    pub async fn rendered(&self) -> Option<CityDashboard> {
        self.rendered
            .read()
            .await
            .as_ref()
            .map(|(_, dashboard)| dashboard.clone())
    }
}
