// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dossier status service.

use chrono::Utc;
use dossio_core::{
    decide, ActorRole, Decision, DossioError, HistoriqueAction, HistoriqueDetails, Statut,
};
use dossio_core::{Dossier, Entreprise, HistoriqueEntry};
use dossio_docgen::{DocumentInput, DocumentKind, GeneratedDocument, Seance};
use dossio_notify::{Dispatcher, NotificationOutcome};
use dossio_storage::queries::{dossiers, entreprises, historique};
use dossio_storage::{Database, NewDossier, NewHistorique, StatutUpdate};
use tracing::{info, warn};

/// One status-change request, as assembled by the HTTP surface.
#[derive(Debug, Clone)]
pub struct ChangeStatutRequest {
    pub dossier_id: i64,
    pub nouveau_statut: Statut,
    pub actor_id: i64,
    pub actor_role: ActorRole,
    /// Required (non-empty) when `nouveau_statut == Refuse`.
    pub motif_refus: Option<String>,
    /// Whether to dispatch the status email after the commit.
    pub notify: bool,
}

/// Result of a committed status change.
///
/// `warnings` carries the best-effort failures (audit write, notification)
/// that must not fail the operation itself.
#[derive(Debug, Clone)]
pub struct ChangeStatutOutcome {
    pub ancien_statut: Statut,
    pub nouveau_statut: Statut,
    pub dossier: Dossier,
    pub notification: NotificationOutcome,
    pub warnings: Vec<String>,
}

/// Optional inputs for a document render.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub seance: Option<Seance>,
    pub montant: Option<f64>,
    pub numero_facture: Option<String>,
}

/// Orchestrates every mutation of a dossier.
#[derive(Clone)]
pub struct StatusService {
    db: Database,
    dispatcher: Dispatcher,
}

impl StatusService {
    /// The database handle must already be migrated; the service never
    /// initializes storage itself.
    pub fn new(db: Database, dispatcher: Dispatcher) -> Self {
        Self { db, dispatcher }
    }

    /// Execute one status change end-to-end.
    ///
    /// Errors up to and including the persistence step abort the call with
    /// nothing committed. Audit and notification failures are returned as
    /// warnings on a successful outcome.
    pub async fn change_statut(
        &self,
        request: ChangeStatutRequest,
    ) -> Result<ChangeStatutOutcome, DossioError> {
        let dossier = self.load_dossier(request.dossier_id).await?;
        let ancien_statut = dossier.statut;

        self.check_ownership(&dossier, request.actor_id, request.actor_role)?;

        if let Decision::Denied(reason) =
            decide(ancien_statut, request.nouveau_statut, request.actor_role)
        {
            return Err(DossioError::InvalidTransition {
                from: ancien_statut,
                to: request.nouveau_statut,
                reason: reason.message(),
            });
        }

        let motif = request
            .motif_refus
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if request.nouveau_statut == Statut::Refuse && motif.is_none() {
            return Err(DossioError::InvalidTransition {
                from: ancien_statut,
                to: Statut::Refuse,
                reason: "motif de refus requis".into(),
            });
        }

        let update = transition_fields(&request, motif.clone());
        let Some(dossier) = dossiers::update_statut_fields(
            &self.db,
            request.dossier_id,
            ancien_statut,
            update,
        )
        .await?
        else {
            // Another transition committed first; the caller must re-decide
            // against fresh state.
            return Err(DossioError::InvalidTransition {
                from: ancien_statut,
                to: request.nouveau_statut,
                reason: "le statut du dossier a changé entre-temps".into(),
            });
        };

        info!(
            dossier_id = dossier.id,
            de = %ancien_statut,
            vers = %dossier.statut,
            acteur = request.actor_id,
            "statut committed"
        );

        // Durability boundary passed: everything below is best-effort.
        let mut warnings = Vec::new();

        if let (Some(realisees), Some(total)) = (dossier.heures_realisees, dossier.heures_total) {
            if realisees > total {
                warnings.push(format!(
                    "heures réalisées ({realisees}) supérieures aux heures prévues ({total})"
                ));
            }
        }

        let audit = NewHistorique {
            dossier_id: dossier.id,
            user_id: Some(request.actor_id),
            action: HistoriqueAction::ChangementStatut,
            details: Some(HistoriqueDetails {
                ancien_statut: Some(ancien_statut),
                nouveau_statut: Some(dossier.statut),
                commentaire: motif,
                document: None,
            }),
        };
        if let Err(err) = historique::append_historique(&self.db, &audit).await {
            warn!(dossier_id = dossier.id, %err, "audit append failed");
            warnings.push(format!("écriture de l'historique échouée: {err}"));
        }

        let notification = if request.notify {
            self.notify(&dossier, &mut warnings).await
        } else {
            NotificationOutcome {
                sent: false,
                template: None,
                error: None,
            }
        };
        if let Some(error) = &notification.error {
            warnings.push(format!("notification non envoyée: {error}"));
        }

        Ok(ChangeStatutOutcome {
            ancien_statut,
            nouveau_statut: dossier.statut,
            dossier,
            notification,
            warnings,
        })
    }

    async fn notify(&self, dossier: &Dossier, warnings: &mut Vec<String>) -> NotificationOutcome {
        match entreprises::get_entreprise(&self.db, dossier.entreprise_id).await {
            Ok(Some(entreprise)) => {
                self.dispatcher
                    .dispatch(dossier, &entreprise, dossier.statut)
                    .await
            }
            Ok(None) => {
                warnings.push(format!(
                    "notification non envoyée: entreprise {} introuvable",
                    dossier.entreprise_id
                ));
                NotificationOutcome {
                    sent: false,
                    template: None,
                    error: None,
                }
            }
            Err(err) => {
                warn!(dossier_id = dossier.id, %err, "entreprise lookup failed for notification");
                warnings.push(format!("notification non envoyée: {err}"));
                NotificationOutcome {
                    sent: false,
                    template: None,
                    error: None,
                }
            }
        }
    }

    /// Intake: create a dossier in `Brouillon` and record the creation.
    pub async fn create_dossier(
        &self,
        new: NewDossier,
        actor_id: i64,
    ) -> Result<Dossier, DossioError> {
        if new.beneficiaire.nom.trim().is_empty()
            || new.beneficiaire.prenom.trim().is_empty()
            || new.beneficiaire.email.trim().is_empty()
        {
            return Err(DossioError::Validation(
                "nom, prénom et email du bénéficiaire sont requis".into(),
            ));
        }
        if entreprises::get_entreprise(&self.db, new.entreprise_id)
            .await?
            .is_none()
        {
            return Err(DossioError::NotFound {
                what: "entreprise",
                id: new.entreprise_id,
            });
        }

        let dossier = dossiers::create_dossier(&self.db, &new).await?;
        info!(dossier_id = dossier.id, acteur = actor_id, "dossier created");

        let audit = NewHistorique {
            dossier_id: dossier.id,
            user_id: Some(actor_id),
            action: HistoriqueAction::Creation,
            details: None,
        };
        if let Err(err) = historique::append_historique(&self.db, &audit).await {
            warn!(dossier_id = dossier.id, %err, "creation audit failed");
        }
        Ok(dossier)
    }

    /// Delete a dossier. Only drafts may be deleted, and only by their
    /// owner or an admin.
    pub async fn delete_dossier(
        &self,
        dossier_id: i64,
        actor_id: i64,
        actor_role: ActorRole,
    ) -> Result<(), DossioError> {
        let dossier = self.load_dossier(dossier_id).await?;
        self.check_ownership(&dossier, actor_id, actor_role)?;
        if dossier.statut != Statut::Brouillon {
            return Err(DossioError::Validation(format!(
                "seul un brouillon peut être supprimé (statut actuel: {})",
                dossier.statut
            )));
        }
        dossiers::delete_brouillon(&self.db, dossier_id).await?;
        info!(dossier_id, acteur = actor_id, "draft deleted");
        Ok(())
    }

    /// Audit trail of a dossier, in commit order.
    pub async fn historique(&self, dossier_id: i64) -> Result<Vec<HistoriqueEntry>, DossioError> {
        self.load_dossier(dossier_id).await?;
        historique::list_historique(&self.db, dossier_id).await
    }

    /// Fetch a dossier, enforcing ownership.
    pub async fn get_dossier(
        &self,
        dossier_id: i64,
        actor_id: i64,
        actor_role: ActorRole,
    ) -> Result<Dossier, DossioError> {
        let dossier = self.load_dossier(dossier_id).await?;
        self.check_ownership(&dossier, actor_id, actor_role)?;
        Ok(dossier)
    }

    /// Render a document for a dossier and record the generation event.
    pub async fn generate_document(
        &self,
        kind: DocumentKind,
        dossier_id: i64,
        actor_id: i64,
        actor_role: ActorRole,
        options: DocumentOptions,
    ) -> Result<GeneratedDocument, DossioError> {
        let dossier = self.load_dossier(dossier_id).await?;
        self.check_ownership(&dossier, actor_id, actor_role)?;
        let entreprise = self.load_entreprise(dossier.entreprise_id).await?;

        let input = DocumentInput {
            dossier: &dossier,
            entreprise: &entreprise,
            seance: options.seance,
            montant: options.montant,
            numero_facture: options.numero_facture,
        };
        let document = dossio_docgen::generate(kind, &input)?;

        let audit = NewHistorique {
            dossier_id,
            user_id: Some(actor_id),
            action: HistoriqueAction::DocumentGenere,
            details: Some(HistoriqueDetails {
                ancien_statut: None,
                nouveau_statut: None,
                commentaire: None,
                document: Some(document.filename.clone()),
            }),
        };
        if let Err(err) = historique::append_historique(&self.db, &audit).await {
            warn!(dossier_id, %err, "document audit failed");
        }
        Ok(document)
    }

    async fn load_dossier(&self, id: i64) -> Result<Dossier, DossioError> {
        dossiers::get_dossier(&self.db, id)
            .await?
            .ok_or(DossioError::NotFound { what: "dossier", id })
    }

    async fn load_entreprise(&self, id: i64) -> Result<Entreprise, DossioError> {
        entreprises::get_entreprise(&self.db, id)
            .await?
            .ok_or(DossioError::NotFound {
                what: "entreprise",
                id,
            })
    }

    fn check_ownership(
        &self,
        dossier: &Dossier,
        actor_id: i64,
        actor_role: ActorRole,
    ) -> Result<(), DossioError> {
        if actor_role == ActorRole::Admin || dossier.user_id == actor_id {
            Ok(())
        } else {
            Err(DossioError::Forbidden(format!(
                "l'utilisateur {actor_id} n'est pas propriétaire du dossier {}",
                dossier.id
            )))
        }
    }
}

/// Compute the field set persisted for one transition.
///
/// Always `{statut, updated_at}`; submission, validation and OPCO-response
/// timestamps are added per target status, per the lifecycle rules.
fn transition_fields(request: &ChangeStatutRequest, motif: Option<String>) -> StatutUpdate {
    let now = Utc::now();
    let mut update = StatutUpdate {
        statut: request.nouveau_statut,
        updated_at: now,
        date_soumission: None,
        date_validation: None,
        valide_par: None,
        date_reponse_opco: None,
        motif_refus: None,
    };
    match request.nouveau_statut {
        Statut::Soumis => {
            update.date_soumission = Some(now);
        }
        Statut::Valide => {
            update.date_validation = Some(now);
            update.valide_par = Some(request.actor_id);
            update.date_reponse_opco = Some(now);
        }
        Statut::Refuse => {
            update.date_reponse_opco = Some(now);
            update.motif_refus = motif;
        }
        Statut::Brouillon | Statut::EnCours | Statut::Termine => {}
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(nouveau: Statut) -> ChangeStatutRequest {
        ChangeStatutRequest {
            dossier_id: 1,
            nouveau_statut: nouveau,
            actor_id: 42,
            actor_role: ActorRole::Admin,
            motif_refus: None,
            notify: false,
        }
    }

    #[test]
    fn validation_sets_admin_and_response_fields() {
        let update = transition_fields(&request(Statut::Valide), None);
        assert!(update.date_validation.is_some());
        assert_eq!(update.valide_par, Some(42));
        assert!(update.date_reponse_opco.is_some());
        assert!(update.date_soumission.is_none());
        assert!(update.motif_refus.is_none());
    }

    #[test]
    fn submission_sets_only_the_submission_date() {
        let update = transition_fields(&request(Statut::Soumis), None);
        assert!(update.date_soumission.is_some());
        assert!(update.date_validation.is_none());
        assert!(update.valide_par.is_none());
    }

    #[test]
    fn rejection_carries_the_motif() {
        let update = transition_fields(&request(Statut::Refuse), Some("dossier incomplet".into()));
        assert_eq!(update.motif_refus.as_deref(), Some("dossier incomplet"));
        assert!(update.date_reponse_opco.is_some());
        assert!(update.date_validation.is_none());
    }

    #[test]
    fn plain_moves_touch_nothing_but_statut() {
        for statut in [Statut::Brouillon, Statut::EnCours, Statut::Termine] {
            let update = transition_fields(&request(statut), None);
            assert!(update.date_soumission.is_none());
            assert!(update.date_validation.is_none());
            assert!(update.date_reponse_opco.is_none());
            assert!(update.motif_refus.is_none());
        }
    }
}
