//! Missed-visit alerts.
//!
//! An alert is raised when a scheduled visit (rounds, consultation,
//! medication) is overdue. Clinicians acknowledge, escalate or resolve it;
//! dismissing removes it from the board entirely.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{
    criteria::FilterCriteria,
    error::{RegistryError, RegistryResult},
    record::{parse_status, Priority, Record, Status},
    summary::AggregateSummary,
    transition::TransitionContext,
};
use wardline_core::{
    aggregate::summarize_all,
    filter,
    traits::{Lifecycle, TransitionPolicy},
    Dispatcher, RecordStore,
};

use super::{audited_dispatcher, bundled_table};

pub const ALERT_TRANSITIONS: &str = include_str!("../../transitions/alerts.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Escalated,
    Resolved,
}

impl Status for AlertStatus {
    const DOMAIN_NAME: &'static str = "missed-visit-alert";
    const DOMAIN: &'static [Self] = &[
        AlertStatus::Active,
        AlertStatus::Acknowledged,
        AlertStatus::Escalated,
        AlertStatus::Resolved,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Escalated => "escalated",
            AlertStatus::Resolved => "resolved",
        }
    }

    fn is_complete(&self) -> bool {
        *self == AlertStatus::Resolved
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitKind {
    Rounds,
    Consultation,
    Medication,
    Procedure,
}

impl VisitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitKind::Rounds => "rounds",
            VisitKind::Consultation => "consultation",
            VisitKind::Medication => "medication",
            VisitKind::Procedure => "procedure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissedVisitAlert {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub bed: String,
    pub ward: String,
    pub scheduled_time: NaiveTime,
    pub overdue_minutes: u32,
    pub visit_kind: VisitKind,
    pub assigned_to: String,
    pub priority: Priority,
    pub status: AlertStatus,
    pub escalation_level: u32,
    pub last_escalation: Option<DateTime<Utc>>,
    pub contact_attempts: u32,
    pub notes: Option<String>,
    pub handled_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl MissedVisitAlert {
    /// "2h 15m" style label for the overdue duration.
    pub fn overdue_label(&self) -> String {
        let (hours, minutes) = (self.overdue_minutes / 60, self.overdue_minutes % 60);
        if hours == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }
}

impl Record for MissedVisitAlert {
    type Status = AlertStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> AlertStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.patient_name.as_str(),
            self.patient_id.as_str(),
            self.bed.as_str(),
            self.assigned_to.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(self.ward.as_str())
    }

    fn priority(&self) -> Option<Priority> {
        Some(self.priority)
    }
}

impl Lifecycle for MissedVisitAlert {
    fn apply_transition(&mut self, to: AlertStatus, ctx: &TransitionContext) {
        self.status = to;
        self.handled_by = Some(ctx.actor.clone());
        match to {
            AlertStatus::Acknowledged => self.contact_attempts += 1,
            AlertStatus::Escalated => {
                self.escalation_level += 1;
                self.last_escalation = Some(ctx.at);
                self.contact_attempts += 1;
            }
            AlertStatus::Resolved => self.resolved_at = Some(ctx.at),
            AlertStatus::Active => {}
        }
    }
}

pub struct AlertBoard {
    alerts: RecordStore<MissedVisitAlert>,
    dispatcher: Dispatcher<AlertStatus>,
    audit: InMemoryAuditTrail,
}

impl AlertBoard {
    pub fn new(alerts: Vec<MissedVisitAlert>) -> RegistryResult<Self> {
        Self::with_policy(alerts, bundled_table(ALERT_TRANSITIONS)?)
    }

    pub fn with_policy(
        alerts: Vec<MissedVisitAlert>,
        policy: Box<dyn TransitionPolicy<AlertStatus>>,
    ) -> RegistryResult<Self> {
        let (dispatcher, audit) = audited_dispatcher(policy);
        Ok(Self {
            alerts: RecordStore::from_seed(alerts)?,
            dispatcher,
            audit,
        })
    }

    pub fn alerts(&self) -> &RecordStore<MissedVisitAlert> {
        &self.alerts
    }

    pub fn audit(&self) -> &InMemoryAuditTrail {
        &self.audit
    }

    pub fn filter(&self, criteria: &FilterCriteria<AlertStatus>) -> Vec<&MissedVisitAlert> {
        filter::apply(criteria, self.alerts.iter())
    }

    pub fn summary(&self) -> AggregateSummary<AlertStatus> {
        summarize_all(self.alerts.iter())
    }

    /// Alerts not yet resolved.
    pub fn open_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.status.is_complete()).count()
    }

    /// Unresolved alerts with critical priority.
    pub fn critical_open(&self) -> Vec<Arc<MissedVisitAlert>> {
        self.alerts
            .filter(|a| a.priority == Priority::Critical && !a.status.is_complete())
    }

    /// Add an alert delivered by the visit scheduler.
    pub fn raise(&mut self, alert: MissedVisitAlert) -> RegistryResult<Arc<MissedVisitAlert>> {
        let alert = self.alerts.insert(alert)?;
        info!(
            id = %alert.id,
            patient_id = %alert.patient_id,
            priority = %alert.priority,
            "missed-visit alert raised"
        );
        Ok(alert)
    }

    pub fn acknowledge(&mut self, id: &str, actor: &str) -> RegistryResult<Arc<MissedVisitAlert>> {
        self.transition(id, AlertStatus::Acknowledged, actor)
    }

    pub fn escalate(&mut self, id: &str, actor: &str) -> RegistryResult<Arc<MissedVisitAlert>> {
        self.transition(id, AlertStatus::Escalated, actor)
    }

    pub fn resolve(&mut self, id: &str, actor: &str) -> RegistryResult<Arc<MissedVisitAlert>> {
        self.transition(id, AlertStatus::Resolved, actor)
    }

    /// Remove the alert from the board. Dismissing an absent alert is a
    /// no-op and returns false.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let removed = self.alerts.remove_by_id(id);
        if removed {
            info!(id = %id, "missed-visit alert dismissed");
        }
        removed
    }

    fn transition(
        &mut self,
        id: &str,
        to: AlertStatus,
        actor: &str,
    ) -> RegistryResult<Arc<MissedVisitAlert>> {
        self.dispatcher.dispatch(&mut self.alerts, id, to, &TransitionContext::now(actor))
    }
}
