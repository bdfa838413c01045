//! Grade editing and evaluation use-cases.
//!
//! # Invariants
//! - Weights are stored non-negative and finite; invalid input becomes `0`.
//! - Scores are stored as given (`None` clears a score).

use crate::grading::evaluation::{evaluate, Evaluation};
use crate::grading::report::build_report;
use crate::medium::KeyValueMedium;
use crate::model::subject::{Assessment, AssessmentId, Subject};
use crate::service::{ServiceError, ServiceResult};
use crate::store::DomainStore;
use log::info;

pub struct GradeService<'s, M: KeyValueMedium> {
    store: &'s DomainStore<M>,
}

impl<'s, M: KeyValueMedium> GradeService<'s, M> {
    pub fn new(store: &'s DomainStore<M>) -> Self {
        Self { store }
    }

    pub fn subjects(&self) -> Vec<Subject> {
        self.store.subjects()
    }

    pub fn subject(&self, subject_id: &str) -> ServiceResult<Subject> {
        self.store
            .subjects()
            .into_iter()
            .find(|subject| subject.id == subject_id)
            .ok_or_else(|| ServiceError::SubjectNotFound(subject_id.to_string()))
    }

    /// Sets or clears one assessment score and persists the subject list.
    pub fn set_score(
        &self,
        subject_id: &str,
        assessment_id: AssessmentId,
        score: Option<f64>,
    ) -> ServiceResult<Subject> {
        self.update_assessment(subject_id, assessment_id, |assessment| {
            assessment.score = score;
        })
    }

    /// Sets one assessment weight and persists the subject list.
    pub fn set_weight(
        &self,
        subject_id: &str,
        assessment_id: AssessmentId,
        weight: f64,
    ) -> ServiceResult<Subject> {
        let weight = normalize_weight(weight);
        self.update_assessment(subject_id, assessment_id, |assessment| {
            assessment.weight = weight;
        })
    }

    pub fn evaluate_subject(&self, subject_id: &str) -> ServiceResult<Evaluation> {
        self.subject(subject_id).map(|subject| evaluate(&subject))
    }

    /// Report over all persisted subjects in stored order.
    pub fn report(&self) -> String {
        build_report(&self.store.subjects())
    }

    fn update_assessment(
        &self,
        subject_id: &str,
        assessment_id: AssessmentId,
        apply: impl FnOnce(&mut Assessment),
    ) -> ServiceResult<Subject> {
        let mut subjects = self.store.subjects();
        let subject = subjects
            .iter_mut()
            .find(|subject| subject.id == subject_id)
            .ok_or_else(|| ServiceError::SubjectNotFound(subject_id.to_string()))?;
        let assessment =
            subject
                .assessment_mut(assessment_id)
                .ok_or_else(|| ServiceError::AssessmentNotFound {
                    subject_id: subject_id.to_string(),
                    assessment_id,
                })?;
        apply(assessment);
        let updated = subject.clone();

        self.store.replace_subjects(&subjects)?;
        info!(
            "event=grade_update module=service status=ok subject_id={subject_id} assessment_id={}",
            assessment_id.code()
        );
        Ok(updated)
    }
}

fn normalize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}
