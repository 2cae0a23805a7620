//! Collection lifecycle state machine.
//!
//! A collection carries exactly one [`Lifecycle`] value at all times. Phase
//! changes go through [`Lifecycle::transition`], which enforces the allowed
//! transition table. The one exception is [`Lifecycle::artifacts_updated`]:
//! an artifact-only edit forces the phase to `updated` without consulting
//! the table, preserving long-standing externally observable behavior.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// Phase of a collection's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecyclePhase {
    Created,
    InProgress,
    Updated,
    Completed,
    Archived,
    Deprecated,
}

impl LifecyclePhase {
    /// Display name for the phase, fixed lookup table.
    pub fn display_name(self) -> &'static str {
        match self {
            LifecyclePhase::Created => "Created",
            LifecyclePhase::InProgress => "In Progress",
            LifecyclePhase::Updated => "Updated",
            LifecyclePhase::Completed => "Completed",
            LifecyclePhase::Archived => "Archived",
            LifecyclePhase::Deprecated => "Deprecated",
        }
    }

    /// Wire value for the phase.
    pub fn as_str(self) -> &'static str {
        match self {
            LifecyclePhase::Created => "created",
            LifecyclePhase::InProgress => "in-progress",
            LifecyclePhase::Updated => "updated",
            LifecyclePhase::Completed => "completed",
            LifecyclePhase::Archived => "archived",
            LifecyclePhase::Deprecated => "deprecated",
        }
    }

    /// Phases reachable from this one. `deprecated` is terminal.
    pub fn allowed_targets(self) -> &'static [LifecyclePhase] {
        use LifecyclePhase::*;
        match self {
            Created => &[InProgress, Completed, Archived],
            InProgress => &[Updated, Completed, Archived],
            Updated => &[InProgress, Completed, Archived],
            Completed => &[Archived, Deprecated],
            Archived => &[Deprecated],
            Deprecated => &[],
        }
    }

    /// Whether a transition from `self` to `target` is in the table.
    pub fn can_transition_to(self, target: LifecyclePhase) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Whether entering this phase stamps `completedOn`.
    fn is_closing(self) -> bool {
        matches!(
            self,
            LifecyclePhase::Completed | LifecyclePhase::Archived | LifecyclePhase::Deprecated
        )
    }
}

/// The lifecycle value object attached to every collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    pub phase: LifecyclePhase,
    /// Display name derived from the phase.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub started_on: Timestamp,
    pub last_updated: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<Timestamp>,
}

impl Lifecycle {
    /// Initial lifecycle for a newly created collection, referencing the
    /// release that triggered it.
    pub fn initial(source_release_id: EntityId) -> Self {
        let now = chrono::Utc::now();
        Lifecycle {
            phase: LifecyclePhase::Created,
            name: LifecyclePhase::Created.display_name().to_string(),
            description: Some(format!(
                "Collection created for release {source_release_id}"
            )),
            started_on: now,
            last_updated: now,
            completed_on: None,
        }
    }

    /// Attempt a phase transition.
    ///
    /// On success, the new value has the requested phase, the display name
    /// from the lookup table, the provided description (or the prior one when
    /// omitted), `lastUpdated` set to now, and `completedOn` stamped when
    /// entering a closing phase.
    ///
    /// An out-of-table transition, including anything requested from
    /// `deprecated`, is a validation error.
    pub fn transition(
        &self,
        requested: LifecyclePhase,
        description: Option<String>,
    ) -> Result<Lifecycle, CoreError> {
        if !self.phase.can_transition_to(requested) {
            return Err(CoreError::Validation(format!(
                "Invalid lifecycle transition from '{}' to '{}'",
                self.phase.as_str(),
                requested.as_str()
            )));
        }

        let now = chrono::Utc::now();
        Ok(Lifecycle {
            phase: requested,
            name: requested.display_name().to_string(),
            description: description.or_else(|| self.description.clone()),
            started_on: self.started_on,
            last_updated: now,
            completed_on: if requested.is_closing() {
                Some(now)
            } else {
                self.completed_on
            },
        })
    }

    /// Forced transition used when a collection's artifact list changes
    /// without an explicit lifecycle request. Bypasses the transition table.
    pub fn artifacts_updated(&self) -> Lifecycle {
        let now = chrono::Utc::now();
        Lifecycle {
            phase: LifecyclePhase::Updated,
            name: LifecyclePhase::Updated.display_name().to_string(),
            description: Some("artifacts have been updated".to_string()),
            started_on: self.started_on,
            last_updated: now,
            completed_on: self.completed_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const ALL_PHASES: [LifecyclePhase; 6] = [
        LifecyclePhase::Created,
        LifecyclePhase::InProgress,
        LifecyclePhase::Updated,
        LifecyclePhase::Completed,
        LifecyclePhase::Archived,
        LifecyclePhase::Deprecated,
    ];

    fn lifecycle_at(phase: LifecyclePhase) -> Lifecycle {
        let now = chrono::Utc::now();
        Lifecycle {
            phase,
            name: phase.display_name().to_string(),
            description: Some("prior description".to_string()),
            started_on: now,
            last_updated: now,
            completed_on: None,
        }
    }

    #[test]
    fn initial_lifecycle_references_release() {
        let release_id = uuid::Uuid::new_v4();
        let lifecycle = Lifecycle::initial(release_id);
        assert_eq!(lifecycle.phase, LifecyclePhase::Created);
        assert_eq!(lifecycle.name, "Created");
        assert!(lifecycle
            .description
            .as_deref()
            .unwrap()
            .contains(&release_id.to_string()));
        assert_eq!(lifecycle.started_on, lifecycle.last_updated);
        assert!(lifecycle.completed_on.is_none());
    }

    #[test]
    fn created_to_in_progress_succeeds() {
        let next = lifecycle_at(LifecyclePhase::Created)
            .transition(LifecyclePhase::InProgress, None)
            .unwrap();
        assert_eq!(next.phase, LifecyclePhase::InProgress);
        assert_eq!(next.name, "In Progress");
        // Description retained when not supplied.
        assert_eq!(next.description.as_deref(), Some("prior description"));
        assert!(next.completed_on.is_none());
    }

    #[test]
    fn deprecated_is_terminal() {
        let lifecycle = lifecycle_at(LifecyclePhase::Deprecated);
        for target in ALL_PHASES {
            assert_matches!(
                lifecycle.transition(target, None),
                Err(CoreError::Validation(_)),
                "deprecated -> {target:?} must fail"
            );
        }
    }

    #[test]
    fn archived_cannot_reopen() {
        assert_matches!(
            lifecycle_at(LifecyclePhase::Archived).transition(LifecyclePhase::Created, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            lifecycle_at(LifecyclePhase::Archived).transition(LifecyclePhase::InProgress, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn created_to_updated_is_out_of_table() {
        assert_matches!(
            lifecycle_at(LifecyclePhase::Created).transition(LifecyclePhase::Updated, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn closing_phases_stamp_completed_on() {
        let completed = lifecycle_at(LifecyclePhase::Created)
            .transition(LifecyclePhase::Completed, None)
            .unwrap();
        assert!(completed.completed_on.is_some());

        let archived = completed
            .transition(LifecyclePhase::Archived, None)
            .unwrap();
        assert!(archived.completed_on.is_some());

        let deprecated = archived
            .transition(LifecyclePhase::Deprecated, None)
            .unwrap();
        assert_eq!(deprecated.phase, LifecyclePhase::Deprecated);
        assert!(deprecated.completed_on.is_some());
    }

    #[test]
    fn transition_overrides_description_when_given() {
        let next = lifecycle_at(LifecyclePhase::InProgress)
            .transition(LifecyclePhase::Completed, Some("signed off".to_string()))
            .unwrap();
        assert_eq!(next.description.as_deref(), Some("signed off"));
    }

    #[test]
    fn artifacts_updated_forces_updated_phase() {
        // Even from phases the table would reject, the forced side-channel
        // lands on `updated` with the generated description.
        let forced = lifecycle_at(LifecyclePhase::Completed).artifacts_updated();
        assert_eq!(forced.phase, LifecyclePhase::Updated);
        assert_eq!(
            forced.description.as_deref(),
            Some("artifacts have been updated")
        );
    }

    #[test]
    fn phase_wire_values_are_kebab_case() {
        let json = serde_json::to_value(LifecyclePhase::InProgress).unwrap();
        assert_eq!(json, "in-progress");
        let parsed: LifecyclePhase = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, LifecyclePhase::InProgress);
    }
}
