//! Consent status board.
//!
//! Patients are grouped with their consent forms. Each patient owns a
//! `RecordStore<ConsentForm>`; the board keeps every patient's
//! `overall_progress` (signed required forms over required forms) in step
//! with the forms it is derived from.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use wardline_audit::InMemoryAuditTrail;
use wardline_contracts::{
    criteria::{FilterCriteria, Selection},
    error::{RegistryError, RegistryResult},
    record::{parse_status, Record, Status},
    summary::AggregateSummary,
    transition::TransitionContext,
};
use wardline_core::{
    aggregate::{completion_percentage, summarize_all},
    filter::text_matches,
    traits::{Lifecycle, TransitionPolicy},
    Dispatcher, RecordStore,
};

use super::{audited_dispatcher, bundled_table};

pub const CONSENT_TRANSITIONS: &str = include_str!("../../transitions/consent.toml");

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsentStatus {
    Pending,
    Signed,
    Declined,
    Expired,
    Revoked,
}

impl Status for ConsentStatus {
    const DOMAIN_NAME: &'static str = "consent-form";
    const DOMAIN: &'static [Self] = &[
        ConsentStatus::Pending,
        ConsentStatus::Signed,
        ConsentStatus::Declined,
        ConsentStatus::Expired,
        ConsentStatus::Revoked,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ConsentStatus::Pending => "pending",
            ConsentStatus::Signed => "signed",
            ConsentStatus::Declined => "declined",
            ConsentStatus::Expired => "expired",
            ConsentStatus::Revoked => "revoked",
        }
    }

    fn is_complete(&self) -> bool {
        *self == ConsentStatus::Signed
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsentStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_status(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsentKind {
    Treatment,
    Surgery,
    Anesthesia,
    Research,
    Photography,
    Discharge,
}

impl ConsentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentKind::Treatment => "treatment",
            ConsentKind::Surgery => "surgery",
            ConsentKind::Anesthesia => "anesthesia",
            ConsentKind::Research => "research",
            ConsentKind::Photography => "photography",
            ConsentKind::Discharge => "discharge",
        }
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentForm {
    pub id: String,
    pub kind: ConsentKind,
    pub name: String,
    pub required: bool,
    pub status: ConsentStatus,
    pub signed_date: Option<DateTime<Utc>>,
    pub signed_by: Option<String>,
    pub digital_signature: Option<String>,
    pub witness_required: bool,
    pub witness_signature: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl ConsentForm {
    /// An unsigned form.
    pub fn pending(id: &str, kind: ConsentKind, name: &str, required: bool) -> Self {
        Self {
            id: id.to_string(),
            kind,
            name: name.to_string(),
            required,
            status: ConsentStatus::Pending,
            signed_date: None,
            signed_by: None,
            digital_signature: None,
            witness_required: false,
            witness_signature: None,
            expiry_date: None,
        }
    }

    /// True when a witness is required but has not signed.
    pub fn awaiting_witness(&self) -> bool {
        self.witness_required && self.witness_signature.is_none()
    }
}

impl Record for ConsentForm {
    type Status = ConsentStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ConsentStatus {
        self.status
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn category(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }
}

impl Lifecycle for ConsentForm {
    /// Signing stamps date, signer and signature token together. The
    /// signing fields are kept after revocation or expiry as history.
    fn apply_transition(&mut self, to: ConsentStatus, ctx: &TransitionContext) {
        self.status = to;
        if to == ConsentStatus::Signed {
            self.signed_date = Some(ctx.at);
            self.signed_by = Some(ctx.actor.clone());
            self.digital_signature = Some(format!("e-signature-{}", Uuid::new_v4().simple()));
        }
    }
}

/// One admitted patient and their consent forms.
#[derive(Debug, Clone)]
pub struct PatientConsent {
    pub patient_id: String,
    pub name: String,
    pub bed: String,
    pub ward: String,
    pub admission_date: NaiveDate,
    pub guardian_required: bool,
    forms: RecordStore<ConsentForm>,
    overall_progress: Option<u32>,
}

impl PatientConsent {
    /// Fails with `DuplicateId` if two forms share an id.
    pub fn new(
        patient_id: &str,
        name: &str,
        bed: &str,
        ward: &str,
        admission_date: NaiveDate,
        forms: Vec<ConsentForm>,
    ) -> RegistryResult<Self> {
        let mut patient = Self {
            patient_id: patient_id.to_string(),
            name: name.to_string(),
            bed: bed.to_string(),
            ward: ward.to_string(),
            admission_date,
            guardian_required: false,
            forms: RecordStore::from_seed(forms)?,
            overall_progress: None,
        };
        patient.recompute_progress();
        Ok(patient)
    }

    pub fn with_guardian(mut self) -> Self {
        self.guardian_required = true;
        self
    }

    /// Forms are read-only here; status changes go through the board so
    /// that `overall_progress` follows them.
    pub fn forms(&self) -> &RecordStore<ConsentForm> {
        &self.forms
    }

    /// Percentage of required forms that are signed. `None` when the
    /// patient has no required forms.
    pub fn overall_progress(&self) -> Option<u32> {
        self.overall_progress
    }

    fn recompute_progress(&mut self) {
        self.overall_progress = completion_percentage(
            self.forms.iter(),
            |form| form.required,
            |form| form.status.is_complete(),
        );
    }

    fn has_form_with(&self, status: ConsentStatus) -> bool {
        self.forms.iter().any(|form| form.status == status)
    }
}

// ── Board ─────────────────────────────────────────────────────────────────────

pub struct ConsentBoard {
    patients: Vec<PatientConsent>,
    dispatcher: Dispatcher<ConsentStatus>,
    audit: InMemoryAuditTrail,
}

impl ConsentBoard {
    /// A board governed by the bundled consent transition table.
    pub fn new(patients: Vec<PatientConsent>) -> RegistryResult<Self> {
        Ok(Self::with_policy(patients, bundled_table(CONSENT_TRANSITIONS)?))
    }

    /// A board governed by `policy`, e.g. `PermissivePolicy` for an
    /// administrative override. Every attempt is still audited.
    pub fn with_policy(
        mut patients: Vec<PatientConsent>,
        policy: Box<dyn TransitionPolicy<ConsentStatus>>,
    ) -> Self {
        for patient in &mut patients {
            patient.recompute_progress();
        }
        let (dispatcher, audit) = audited_dispatcher(policy);
        Self {
            patients,
            dispatcher,
            audit,
        }
    }

    pub fn patients(&self) -> &[PatientConsent] {
        &self.patients
    }

    pub fn patient(&self, patient_id: &str) -> Option<&PatientConsent> {
        self.patients.iter().find(|p| p.patient_id == patient_id)
    }

    pub fn audit(&self) -> &InMemoryAuditTrail {
        &self.audit
    }

    /// Patients matching `criteria`.
    ///
    /// - search: patient name, patient id or bed
    /// - category: ward
    /// - status: passes when ANY of the patient's forms has that status
    pub fn filter(&self, criteria: &FilterCriteria<ConsentStatus>) -> Vec<&PatientConsent> {
        self.patients
            .iter()
            .filter(|patient| {
                let fields = [
                    patient.name.as_str(),
                    patient.patient_id.as_str(),
                    patient.bed.as_str(),
                ];
                let ward_matches = match &criteria.category {
                    Selection::All => true,
                    Selection::Only(ward) => patient.ward == *ward,
                };
                let status_matches = match &criteria.status {
                    Selection::All => true,
                    Selection::Only(status) => patient.has_form_with(*status),
                };
                text_matches(&criteria.search_text, &fields) && ward_matches && status_matches
            })
            .collect()
    }

    /// Form counts per status across every patient.
    pub fn form_summary(&self) -> AggregateSummary<ConsentStatus> {
        let mut summary = summarize_all(self.patients.iter().flat_map(|p| p.forms.iter()));
        summary.derived_percentage = completion_percentage(
            self.patients.iter().flat_map(|p| p.forms.iter()),
            |form| form.required,
            |form| form.status.is_complete(),
        );
        summary
    }

    /// Distinct wards, in first-seen order.
    pub fn wards(&self) -> Vec<&str> {
        let mut wards: Vec<&str> = Vec::new();
        for patient in &self.patients {
            if !wards.contains(&patient.ward.as_str()) {
                wards.push(&patient.ward);
            }
        }
        wards
    }

    /// Move one form to `to` and recompute the patient's progress before
    /// returning.
    pub fn update_form_status(
        &mut self,
        patient_id: &str,
        form_id: &str,
        to: ConsentStatus,
        actor: &str,
    ) -> RegistryResult<Arc<ConsentForm>> {
        let patient = find_patient(&mut self.patients, patient_id)?;
        let form = self.dispatcher.dispatch(
            &mut patient.forms,
            form_id,
            to,
            &TransitionContext::now(actor),
        )?;
        patient.recompute_progress();
        Ok(form)
    }

    /// Sign a form on the patient's behalf.
    pub fn sign_form(&mut self, patient_id: &str, form_id: &str) -> RegistryResult<Arc<ConsentForm>> {
        let signer = self
            .patient(patient_id)
            .map(|p| p.name.clone())
            .ok_or_else(|| RegistryError::NotFound {
                id: patient_id.to_string(),
            })?;
        self.update_form_status(patient_id, form_id, ConsentStatus::Signed, &signer)
    }

    /// Record a witness counter-signature. Not a status change.
    pub fn witness_form(
        &mut self,
        patient_id: &str,
        form_id: &str,
        witness: &str,
    ) -> RegistryResult<Arc<ConsentForm>> {
        let patient = find_patient(&mut self.patients, patient_id)?;
        let witness = witness.to_string();
        patient
            .forms
            .update_by_id(form_id, move |form| form.witness_signature = Some(witness))
    }

    /// Pending or signed forms whose expiry date falls within `days` of
    /// `today`, as `(patient_id, form)`.
    pub fn expiring_within(&self, today: NaiveDate, days: i64) -> Vec<(&str, &ConsentForm)> {
        self.patients
            .iter()
            .flat_map(|p| p.forms.iter().map(move |form| (p.patient_id.as_str(), form)))
            .filter(|(_, form)| {
                matches!(form.status, ConsentStatus::Pending | ConsentStatus::Signed)
                    && form
                        .expiry_date
                        .is_some_and(|expiry| (expiry - today).num_days() <= days)
            })
            .collect()
    }

    /// Expire every pending or signed form whose expiry date is before
    /// `today`.
    ///
    /// A form that cannot be expired does not stop the sweep; it is
    /// reported in `ExpirySweep::failed` and the remaining forms are still
    /// processed.
    pub fn expire_overdue(&mut self, today: NaiveDate, actor: &str) -> ExpirySweep {
        let overdue: Vec<(String, String)> = self
            .expiring_within(today, -1)
            .into_iter()
            .map(|(patient_id, form)| (patient_id.to_string(), form.id.clone()))
            .collect();

        let mut sweep = ExpirySweep::default();
        for (patient_id, form_id) in overdue {
            match self.update_form_status(&patient_id, &form_id, ConsentStatus::Expired, actor) {
                Ok(_) => sweep.expired.push(form_id),
                Err(error) => {
                    warn!(%patient_id, %form_id, %error, "overdue consent form not expired");
                    sweep.failed.push((form_id, error));
                }
            }
        }
        if !sweep.expired.is_empty() {
            info!(count = sweep.expired.len(), %today, "overdue consent forms expired");
        }
        sweep
    }
}

/// Result of `ConsentBoard::expire_overdue`.
#[derive(Debug, Default)]
pub struct ExpirySweep {
    /// Ids of the forms moved to `expired`.
    pub expired: Vec<String>,
    /// Forms that were overdue but could not be expired.
    pub failed: Vec<(String, RegistryError)>,
}

fn find_patient<'a>(
    patients: &'a mut [PatientConsent],
    patient_id: &str,
) -> RegistryResult<&'a mut PatientConsent> {
    patients
        .iter_mut()
        .find(|p| p.patient_id == patient_id)
        .ok_or_else(|| RegistryError::NotFound {
            id: patient_id.to_string(),
        })
}
