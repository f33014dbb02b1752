// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The transition table: a pure decision function over the dossier
//! lifecycle. No side effects, no I/O, total over all inputs.

use crate::types::{ActorRole, Statut};

/// Outcome of consulting the transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenialReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Why a requested transition was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// The edge does not exist in the lifecycle. Terminal-state requests
    /// land here regardless of target.
    Illegal { from: Statut, to: Statut },
    /// The edge exists but only an admin may take it.
    AdminRequis { from: Statut, to: Statut },
    /// Transitioning into `Refuse` requires a non-empty rejection reason.
    MotifRequis,
}

impl DenialReason {
    /// User-facing denial message.
    pub fn message(&self) -> String {
        match self {
            DenialReason::Illegal { from, to } => {
                format!("transition non autorisée de {from} vers {to}")
            }
            DenialReason::AdminRequis { from, to } => {
                format!("la transition de {from} vers {to} requiert le rôle admin")
            }
            DenialReason::MotifRequis => "motif de refus requis".to_string(),
        }
    }
}

/// Decide whether `requested` is reachable from `current` for this actor.
///
/// The role check is part of the decision, not a separate authorization
/// layer: the same edge can be legal for an admin and denied for a company
/// user within the same request batch.
///
/// The rejection-reason requirement is checked by the caller (it depends on
/// the request payload, which this function never sees) and surfaced as
/// [`DenialReason::MotifRequis`].
pub fn decide(current: Statut, requested: Statut, role: ActorRole) -> Decision {
    use Statut::*;

    let edge_exists = matches!(
        (current, requested),
        (Brouillon, EnCours)
            | (Brouillon, Soumis)
            | (EnCours, Soumis)
            | (EnCours, Brouillon)
            | (Soumis, Valide)
            | (Soumis, Refuse)
            | (Soumis, EnCours)
            | (Valide, Termine)
            | (Refuse, EnCours)
    );

    if !edge_exists {
        return Decision::Denied(DenialReason::Illegal {
            from: current,
            to: requested,
        });
    }

    // OPCO decisions are admin-only.
    let admin_only = matches!((current, requested), (Soumis, Valide) | (Soumis, Refuse));
    if admin_only && role != ActorRole::Admin {
        return Decision::Denied(DenialReason::AdminRequis {
            from: current,
            to: requested,
        });
    }

    Decision::Allowed
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_pair_gets_a_decision() {
        // Totality: the table never panics, for any (statut, statut, role).
        for from in Statut::iter() {
            for to in Statut::iter() {
                for role in [ActorRole::Entreprise, ActorRole::Admin] {
                    let _ = decide(from, to, role);
                }
            }
        }
    }

    #[test]
    fn termine_is_absorbing() {
        for to in Statut::iter() {
            for role in [ActorRole::Entreprise, ActorRole::Admin] {
                let decision = decide(Statut::Termine, to, role);
                assert!(
                    !decision.is_allowed(),
                    "termine -> {to} must be denied for {role}"
                );
            }
        }
    }

    #[test]
    fn draft_can_advance_or_be_submitted() {
        assert!(decide(Statut::Brouillon, Statut::EnCours, ActorRole::Entreprise).is_allowed());
        assert!(decide(Statut::Brouillon, Statut::Soumis, ActorRole::Entreprise).is_allowed());
        assert!(!decide(Statut::Brouillon, Statut::Valide, ActorRole::Admin).is_allowed());
    }

    #[test]
    fn en_cours_can_go_back_to_draft() {
        assert!(decide(Statut::EnCours, Statut::Brouillon, ActorRole::Entreprise).is_allowed());
        assert!(decide(Statut::EnCours, Statut::Soumis, ActorRole::Entreprise).is_allowed());
    }

    #[test]
    fn opco_decisions_require_admin() {
        for to in [Statut::Valide, Statut::Refuse] {
            assert_eq!(
                decide(Statut::Soumis, to, ActorRole::Entreprise),
                Decision::Denied(DenialReason::AdminRequis {
                    from: Statut::Soumis,
                    to,
                })
            );
            assert!(decide(Statut::Soumis, to, ActorRole::Admin).is_allowed());
        }
        // Withdrawing a submission is open to the owner.
        assert!(decide(Statut::Soumis, Statut::EnCours, ActorRole::Entreprise).is_allowed());
    }

    #[test]
    fn rejected_dossiers_can_be_reworked() {
        assert!(decide(Statut::Refuse, Statut::EnCours, ActorRole::Entreprise).is_allowed());
        assert!(!decide(Statut::Refuse, Statut::Soumis, ActorRole::Admin).is_allowed());
    }

    #[test]
    fn validated_dossiers_only_complete() {
        assert!(decide(Statut::Valide, Statut::Termine, ActorRole::Entreprise).is_allowed());
        for to in Statut::iter().filter(|s| *s != Statut::Termine) {
            assert!(!decide(Statut::Valide, to, ActorRole::Admin).is_allowed());
        }
    }

    #[test]
    fn denial_messages_cite_both_statuses() {
        let reason = DenialReason::Illegal {
            from: Statut::Termine,
            to: Statut::Brouillon,
        };
        let msg = reason.message();
        assert!(msg.contains("termine") && msg.contains("brouillon"), "{msg}");
    }
}
