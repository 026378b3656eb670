//! Bulk billing batches for camps, corporate tie-ups and screening drives.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{
    criteria::FilterCriteria,
    error::{RegistryError, RegistryResult},
    record::{parse_status, Record, Status},
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

pub const BILLING_TRANSITIONS: &str = include_str!("../../transitions/billing.toml");

/// Completion is a percentage.
const MAX_COMPLETION: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatchStatus {
    Draft,
    Processing,
    Approved,
    Billed,
}

impl Status for BatchStatus {
    const DOMAIN_NAME: &'static str = "bulk-billing-batch";
    const DOMAIN: &'static [Self] = &[
        BatchStatus::Draft,
        BatchStatus::Processing,
        BatchStatus::Approved,
        BatchStatus::Billed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Draft => "draft",
            BatchStatus::Processing => "processing",
            BatchStatus::Approved => "approved",
            BatchStatus::Billed => "billed",
        }
    }

    fn is_complete(&self) -> bool {
        *self == BatchStatus::Billed
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Camp,
    Corporate,
    Screening,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Camp => "camp",
            EventType::Corporate => "corporate",
            EventType::Screening => "screening",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkBatch {
    pub id: String,
    pub client_name: String,
    pub event_type: EventType,
    pub patient_count: u32,
    /// Gross amount before discount, whole currency units.
    pub total_amount: u64,
    pub discount_percent: u32,
    pub status: BatchStatus,
    pub created_date: NaiveDate,
    /// Share of patient claims processed, 0–100.
    pub completion: f64,
    pub approved_by: Option<String>,
    pub billed_at: Option<DateTime<Utc>>,
}

impl BulkBatch {
    /// Amount after the batch discount, rounded down.
    pub fn net_amount(&self) -> u64 {
        let discount = u64::from(self.discount_percent.min(100));
        self.total_amount * (100 - discount) / 100
    }
}

impl Record for BulkBatch {
    type Status = BatchStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> BatchStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.client_name.as_str(), self.id.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.client_name.as_str())
    }
}

impl Lifecycle for BulkBatch {
    fn apply_transition(&mut self, to: BatchStatus, ctx: &TransitionContext) {
        self.status = to;
        match to {
            BatchStatus::Approved => {
                self.approved_by = Some(ctx.actor.clone());
                self.completion = MAX_COMPLETION;
            }
            BatchStatus::Billed => self.billed_at = Some(ctx.at),
            BatchStatus::Draft | BatchStatus::Processing => self.approved_by = None,
        }
    }
}

/// Totals shown on the "currently processing" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingTotals {
    pub batches: usize,
    pub patients: u32,
    pub amount: u64,
}

pub struct BillingBoard {
    batches: RecordStore<BulkBatch>,
    dispatcher: Dispatcher<BatchStatus>,
    audit: InMemoryAuditTrail,
}

impl BillingBoard {
    pub fn new(batches: Vec<BulkBatch>) -> RegistryResult<Self> {
        Self::with_policy(batches, bundled_table(BILLING_TRANSITIONS)?)
    }

    pub fn with_policy(
        batches: Vec<BulkBatch>,
        policy: Box<dyn TransitionPolicy<BatchStatus>>,
    ) -> RegistryResult<Self> {
        let (dispatcher, audit) = audited_dispatcher(policy);
        Ok(Self {
            batches: RecordStore::from_seed(batches)?,
            dispatcher,
            audit,
        })
    }

    pub fn batches(&self) -> &RecordStore<BulkBatch> {
        &self.batches
    }

    pub fn audit(&self) -> &InMemoryAuditTrail {
        &self.audit
    }

    pub fn filter(&self, criteria: &FilterCriteria<BatchStatus>) -> Vec<&BulkBatch> {
        filter::apply(criteria, self.batches.iter())
    }

    /// Batches per status, with mean completion as the derived percentage.
    pub fn summary(&self) -> AggregateSummary<BatchStatus> {
        summarize_with_progress(
            self.batches.iter(),
            BatchStatus::DOMAIN,
            |b| b.completion,
            MAX_COMPLETION,
        )
    }

    pub fn processing_totals(&self) -> ProcessingTotals {
        self.batches
            .iter()
            .filter(|b| b.status == BatchStatus::Processing)
            .fold(ProcessingTotals::default(), |acc, b| ProcessingTotals {
                batches: acc.batches + 1,
                patients: acc.patients + b.patient_count,
                amount: acc.amount + b.total_amount,
            })
    }

    pub fn advance(
        &mut self,
        id: &str,
        to: BatchStatus,
        actor: &str,
    ) -> RegistryResult<Arc<BulkBatch>> {
        self.dispatcher.dispatch(&mut self.batches, id, to, &TransitionContext::now(actor))
    }

    /// Report claim-processing progress. Clamped to 0–100; not a status
    /// change. A non-finite value is rejected with `ConfigError`.
    pub fn record_progress(&mut self, id: &str, completion: f64) -> RegistryResult<Arc<BulkBatch>> {
        if !completion.is_finite() {
            return Err(RegistryError::ConfigError {
                reason: format!("completion for batch '{}' must be a finite number", id),
            });
        }
        let completion = completion.clamp(0.0, MAX_COMPLETION);
        self.batches.update_by_id(id, move |b| b.completion = completion)
    }
}
