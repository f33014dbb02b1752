// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end workflow scenarios against an in-memory database and a
//! recording mail sender.

use std::sync::Arc;
use std::time::Duration;

use dossio_core::{ActorRole, Beneficiaire, DossioError, HistoriqueAction, Statut, TypeDossier};
use dossio_docgen::DocumentKind;
use dossio_notify::mock::RecordingMailer;
use dossio_notify::Dispatcher;
use dossio_storage::queries::dossiers;
use dossio_storage::{Database, NewDossier, NewEntreprise};
use dossio_workflow::{ChangeStatutRequest, DocumentOptions, StatusService};

const OWNER: i64 = 10;
const ADMIN: i64 = 99;

struct Harness {
    service: StatusService,
    db: Database,
    mailer: Arc<RecordingMailer>,
    dossier_id: i64,
}

async fn setup(mailer: Arc<RecordingMailer>) -> Harness {
    let db = Database::open_in_memory().await.unwrap();
    db.migrate().await.unwrap();
    let dispatcher = Dispatcher::new(mailer.clone(), Duration::from_secs(5));
    let service = StatusService::new(db.clone(), dispatcher);

    let entreprise = dossio_storage::queries::entreprises::create_entreprise(
        &db,
        &NewEntreprise {
            siret: "73282932000074".into(),
            nom: "Acme Formation".into(),
            adresse: Some("1 rue de la Paix, 75002 Paris".into()),
            code_naf: Some("8559A".into()),
            opco: Some("OPCO EP".into()),
            contact_nom: Some("Jeanne Petit".into()),
            contact_email: Some("contact@acme-formation.fr".into()),
            contact_telephone: None,
        },
    )
    .await
    .unwrap();

    let dossier = service
        .create_dossier(
            NewDossier {
                reference: None,
                type_dossier: TypeDossier::Bilan,
                user_id: OWNER,
                entreprise_id: entreprise.id,
                beneficiaire: Beneficiaire {
                    nom: "Durand".into(),
                    prenom: "Paul".into(),
                    email: "paul.durand@example.fr".into(),
                    telephone: None,
                },
                montant_estime: Some(2000.0),
                heures_total: Some(24.0),
                date_debut: None,
                date_fin: None,
                notes: None,
            },
            OWNER,
        )
        .await
        .unwrap();

    Harness {
        service,
        db,
        mailer,
        dossier_id: dossier.id,
    }
}

fn change(
    dossier_id: i64,
    nouveau: Statut,
    actor_id: i64,
    role: ActorRole,
) -> ChangeStatutRequest {
    ChangeStatutRequest {
        dossier_id,
        nouveau_statut: nouveau,
        actor_id,
        actor_role: role,
        motif_refus: None,
        notify: true,
    }
}

async fn submit(h: &Harness) {
    h.service
        .change_statut(change(h.dossier_id, Statut::Soumis, OWNER, ActorRole::Entreprise))
        .await
        .unwrap();
}

#[tokio::test]
async fn happy_path_validation() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;

    let outcome = h
        .service
        .change_statut(change(h.dossier_id, Statut::Valide, ADMIN, ActorRole::Admin))
        .await
        .unwrap();

    assert_eq!(outcome.ancien_statut, Statut::Soumis);
    assert_eq!(outcome.nouveau_statut, Statut::Valide);
    assert_eq!(outcome.dossier.valide_par, Some(ADMIN));
    assert!(outcome.dossier.date_validation.is_some());
    assert!(outcome.dossier.date_reponse_opco.is_some());
    assert!(outcome.notification.sent);
    assert_eq!(outcome.notification.template, Some("dossier-validated"));
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);

    let entries = h.service.historique(h.dossier_id).await.unwrap();
    let last = entries.last().unwrap();
    assert_eq!(last.action, HistoriqueAction::ChangementStatut);
    let details = last.details.as_ref().unwrap();
    assert_eq!(details.ancien_statut, Some(Statut::Soumis));
    assert_eq!(details.nouveau_statut, Some(Statut::Valide));
}

#[tokio::test]
async fn rejection_without_reason_is_refused() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;

    let err = h
        .service
        .change_statut(change(h.dossier_id, Statut::Refuse, ADMIN, ActorRole::Admin))
        .await
        .unwrap_err();
    match err {
        DossioError::InvalidTransition { reason, .. } => {
            assert!(reason.contains("motif"), "{reason}")
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }

    let dossier = dossiers::get_dossier(&h.db, h.dossier_id).await.unwrap().unwrap();
    assert_eq!(dossier.statut, Statut::Soumis, "status must be unchanged");
}

#[tokio::test]
async fn rejection_with_reason_lands_in_motif_and_email() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;

    let mut request = change(h.dossier_id, Statut::Refuse, ADMIN, ActorRole::Admin);
    request.motif_refus = Some("Budget annuel épuisé".into());
    let outcome = h.service.change_statut(request).await.unwrap();

    assert_eq!(outcome.dossier.motif_refus.as_deref(), Some("Budget annuel épuisé"));
    assert_eq!(outcome.notification.template, Some("dossier-rejected"));
    let sent = h.mailer.sent();
    assert!(sent.last().unwrap().html.contains("Budget annuel épuisé"));
}

#[tokio::test]
async fn non_admin_cannot_validate() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;

    let err = h
        .service
        .change_statut(change(h.dossier_id, Statut::Valide, OWNER, ActorRole::Entreprise))
        .await
        .unwrap_err();
    assert!(matches!(err, DossioError::InvalidTransition { .. }), "{err:?}");

    let dossier = dossiers::get_dossier(&h.db, h.dossier_id).await.unwrap().unwrap();
    assert_eq!(dossier.statut, Statut::Soumis);
}

#[tokio::test]
async fn non_owner_is_forbidden() {
    let h = setup(Arc::new(RecordingMailer::new())).await;

    let err = h
        .service
        .change_statut(change(h.dossier_id, Statut::EnCours, 777, ActorRole::Entreprise))
        .await
        .unwrap_err();
    assert!(matches!(err, DossioError::Forbidden(_)), "{err:?}");
}

#[tokio::test]
async fn mail_failure_does_not_touch_the_committed_status() {
    let h = setup(Arc::new(RecordingMailer::failing("relais SMTP injoignable"))).await;

    let outcome = h
        .service
        .change_statut(change(h.dossier_id, Statut::Soumis, OWNER, ActorRole::Entreprise))
        .await
        .unwrap();

    assert!(!outcome.notification.sent);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| w.contains("relais SMTP injoignable")));

    let dossier = dossiers::get_dossier(&h.db, h.dossier_id).await.unwrap().unwrap();
    assert_eq!(dossier.statut, Statut::Soumis, "commit must survive mail failure");
    assert!(dossier.date_soumission.is_some());
}

#[tokio::test]
async fn notify_false_skips_the_dispatcher() {
    let h = setup(Arc::new(RecordingMailer::new())).await;

    let mut request = change(h.dossier_id, Statut::Soumis, OWNER, ActorRole::Entreprise);
    request.notify = false;
    let outcome = h.service.change_statut(request).await.unwrap();

    assert!(!outcome.notification.sent);
    assert_eq!(outcome.notification.template, None);
    assert!(h.mailer.sent().is_empty());
}

#[tokio::test]
async fn missing_dossier_is_not_found() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    let err = h
        .service
        .change_statut(change(9999, Statut::Soumis, OWNER, ActorRole::Entreprise))
        .await
        .unwrap_err();
    assert!(matches!(err, DossioError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn audit_reflects_the_full_lifecycle() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;
    let mut refuse = change(h.dossier_id, Statut::Refuse, ADMIN, ActorRole::Admin);
    refuse.motif_refus = Some("pièces manquantes".into());
    h.service.change_statut(refuse).await.unwrap();
    h.service
        .change_statut(change(h.dossier_id, Statut::EnCours, OWNER, ActorRole::Entreprise))
        .await
        .unwrap();

    let actions: Vec<_> = h
        .service
        .historique(h.dossier_id)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            HistoriqueAction::Creation,
            HistoriqueAction::ChangementStatut,
            HistoriqueAction::ChangementStatut,
            HistoriqueAction::ChangementStatut,
        ]
    );
}

#[tokio::test]
async fn only_drafts_can_be_deleted() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    submit(&h).await;

    let err = h
        .service
        .delete_dossier(h.dossier_id, OWNER, ActorRole::Entreprise)
        .await
        .unwrap_err();
    assert!(matches!(err, DossioError::Validation(_)), "{err:?}");
    assert!(dossiers::get_dossier(&h.db, h.dossier_id).await.unwrap().is_some());
}

#[tokio::test]
async fn draft_deletion_succeeds_for_owner() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    h.service
        .delete_dossier(h.dossier_id, OWNER, ActorRole::Entreprise)
        .await
        .unwrap();
    assert!(dossiers::get_dossier(&h.db, h.dossier_id).await.unwrap().is_none());
}

#[tokio::test]
async fn document_generation_appends_an_audit_entry() {
    let h = setup(Arc::new(RecordingMailer::new())).await;

    let document = h
        .service
        .generate_document(
            DocumentKind::Convention,
            h.dossier_id,
            OWNER,
            ActorRole::Entreprise,
            DocumentOptions::default(),
        )
        .await
        .unwrap();
    assert!(document.pdf.starts_with(b"%PDF"));

    let entries = h.service.historique(h.dossier_id).await.unwrap();
    let last = entries.last().unwrap();
    assert_eq!(last.action, HistoriqueAction::DocumentGenere);
    assert_eq!(
        last.details.as_ref().unwrap().document.as_deref(),
        Some(document.filename.as_str())
    );
}

#[tokio::test]
async fn intake_requires_an_existing_entreprise() {
    let h = setup(Arc::new(RecordingMailer::new())).await;
    let err = h
        .service
        .create_dossier(
            NewDossier {
                reference: None,
                type_dossier: TypeDossier::Formation,
                user_id: OWNER,
                entreprise_id: 404,
                beneficiaire: Beneficiaire {
                    nom: "Martin".into(),
                    prenom: "Claire".into(),
                    email: "claire.martin@example.fr".into(),
                    telephone: None,
                },
                montant_estime: None,
                heures_total: None,
                date_debut: None,
                date_fin: None,
                notes: None,
            },
            OWNER,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DossioError::NotFound { what: "entreprise", .. }), "{err:?}");
}
