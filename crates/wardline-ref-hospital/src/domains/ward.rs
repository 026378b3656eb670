//! Ward patient status board.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{
    criteria::FilterCriteria,
    error::{RegistryError, RegistryResult},
    record::{parse_status, Priority, Record, Status},
    summary::AggregateSummary,
    transition::TransitionContext,
};
use wardline_core::{
    aggregate::summarize_with_progress,
    filter,
    traits::{Lifecycle, TransitionPolicy},
    Dispatcher, RecordStore,
};

use super::{audited_dispatcher, bundled_table};
use crate::refresh::{Tick, WardMetrics};

pub const WARD_TRANSITIONS: &str = include_str!("../../transitions/ward.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Critical,
    Monitoring,
    Stable,
    Recovering,
    DischargeReady,
}

impl Status for PatientStatus {
    const DOMAIN_NAME: &'static str = "ward-patient";
    const DOMAIN: &'static [Self] = &[
        PatientStatus::Critical,
        PatientStatus::Monitoring,
        PatientStatus::Stable,
        PatientStatus::Recovering,
        PatientStatus::DischargeReady,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Critical => "critical",
            PatientStatus::Monitoring => "monitoring",
            PatientStatus::Stable => "stable",
            PatientStatus::Recovering => "recovering",
            PatientStatus::DischargeReady => "discharge-ready",
        }
    }

    fn is_complete(&self) -> bool {
        *self == PatientStatus::DischargeReady
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardPatient {
    pub id: String,
    pub name: String,
    pub bed: String,
    pub ward: String,
    pub admission_date: NaiveDate,
    pub diagnosis: String,
    pub attending_physician: String,
    pub status: PatientStatus,
    pub priority: Priority,
    /// Recovery towards discharge, 0–100.
    pub recovery_progress: f64,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub status_changed_by: Option<String>,
}

impl Record for WardPatient {
    type Status = PatientStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> PatientStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str(), self.bed.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.ward.as_str())
    }

    fn priority(&self) -> Option<Priority> {
        Some(self.priority)
    }
}

impl Lifecycle for WardPatient {
    fn apply_transition(&mut self, to: PatientStatus, ctx: &TransitionContext) {
        self.status = to;
        self.status_changed_at = Some(ctx.at);
        self.status_changed_by = Some(ctx.actor.clone());
        match to {
            PatientStatus::Critical => self.priority = Priority::Critical,
            PatientStatus::DischargeReady => self.recovery_progress = 100.0,
            _ => {}
        }
    }
}

pub struct WardBoard {
    patients: RecordStore<WardPatient>,
    metrics: WardMetrics,
    dispatcher: Dispatcher<PatientStatus>,
    audit: InMemoryAuditTrail,
}

impl WardBoard {
    /// Fails with `DuplicateId` on a duplicated seed id.
    pub fn new(patients: Vec<WardPatient>, metrics: WardMetrics) -> RegistryResult<Self> {
        Self::with_policy(patients, metrics, bundled_table(WARD_TRANSITIONS)?)
    }

    pub fn with_policy(
        patients: Vec<WardPatient>,
        metrics: WardMetrics,
        policy: Box<dyn TransitionPolicy<PatientStatus>>,
    ) -> RegistryResult<Self> {
        let (dispatcher, audit) = audited_dispatcher(policy);
        Ok(Self {
            patients: RecordStore::from_seed(patients)?,
            metrics,
            dispatcher,
            audit,
        })
    }

    pub fn patients(&self) -> &RecordStore<WardPatient> {
        &self.patients
    }

    pub fn metrics(&self) -> &WardMetrics {
        &self.metrics
    }

    pub fn audit(&self) -> &InMemoryAuditTrail {
        &self.audit
    }

    pub fn filter(&self, criteria: &FilterCriteria<PatientStatus>) -> Vec<&WardPatient> {
        filter::apply(criteria, self.patients.iter())
    }

    /// Header cards: patients per status, plus the mean recovery progress.
    pub fn summary(&self) -> AggregateSummary<PatientStatus> {
        summarize_with_progress(
            self.patients.iter(),
            PatientStatus::DOMAIN,
            |p| p.recovery_progress,
            100.0,
        )
    }

    pub fn update_status(
        &mut self,
        id: &str,
        to: PatientStatus,
        actor: &str,
    ) -> RegistryResult<Arc<WardPatient>> {
        self.dispatcher.dispatch(&mut self.patients, id, to, &TransitionContext::now(actor))
    }

    /// Which statuses the patient `id` may move to next.
    pub fn next_statuses(&self, id: &str) -> RegistryResult<Vec<PatientStatus>> {
        let patient = self
            .patients
            .get(id)
            .ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;
        Ok(PatientStatus::DOMAIN
            .iter()
            .copied()
            .filter(|&to| self.dispatcher.can_transition(&**patient, to))
            .collect())
    }

    /// Apply one refresh tick to the live metrics.
    pub fn on_tick<G: Rng>(&mut self, tick: &Tick, rng: &mut G, jitter_percent: u32) {
        self.metrics.jitter(rng, jitter_percent);
        self.metrics.refreshed_at = Some(tick.at);
    }
}
