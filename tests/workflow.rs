//! Workflow and repository behaviour against SQLite: in-memory by default,
//! file-backed where transactions have to race.

mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveTime, Utc};

use common::{identity, seed_shift, seed_user, setup_db, FileDb};
use shiftdesk::application::{
    AssignmentService, ShiftCatalog, ShiftRequestWorkflow, WorkflowSettings,
};
use shiftdesk::domain::{
    DomainError, NewAssignment, NewShiftRequest, ShiftDeletion, ShiftPatch, ShiftRequestFilter,
    ShiftRequestStatus, Transition, UserRole,
};

#[tokio::test]
async fn approval_materializes_one_assignment() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());

    let request = workflow
        .create_request(&identity(&worker), shift.id)
        .await
        .unwrap();
    assert_eq!(request.status, ShiftRequestStatus::Pending);
    assert_eq!(request.user_name, "Alice");
    assert!(request.approved_at.is_none());

    let approved = workflow
        .approve_request(&identity(&admin), request.id)
        .await
        .unwrap();
    assert_eq!(approved.status, ShiftRequestStatus::Approved);
    assert!(approved.approved_at.is_some());

    let assignments = repos.assignments().list().await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].shift_id, shift.id);
    assert_eq!(assignments[0].user_id, worker.id);
}

#[tokio::test]
async fn decided_requests_are_terminal() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());
    let admin_id = identity(&admin);

    let approved = workflow.create_request(&identity(&worker), shift.id).await.unwrap();
    workflow.approve_request(&admin_id, approved.id).await.unwrap();

    let again = workflow.approve_request(&admin_id, approved.id).await;
    assert!(matches!(again, Err(DomainError::Conflict(_))));
    let flip = workflow.reject_request(&admin_id, approved.id).await;
    assert!(matches!(flip, Err(DomainError::Conflict(_))));

    let rejected = workflow.create_request(&identity(&worker), shift.id).await.unwrap();
    workflow.reject_request(&admin_id, rejected.id).await.unwrap();
    let late = workflow.approve_request(&admin_id, rejected.id).await;
    assert!(matches!(late, Err(DomainError::Conflict(_))));

    // only the first approval produced an assignment
    assert_eq!(repos.assignments().list().await.unwrap().len(), 1);
    let stored = repos.shift_requests().find_by_id(rejected.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ShiftRequestStatus::Rejected);
}

#[tokio::test]
async fn missing_request_is_not_found_without_side_effects() {
    let (_db, repos) = setup_db().await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());

    let approve = workflow.approve_request(&identity(&admin), 404).await;
    assert!(matches!(approve, Err(DomainError::NotFound { .. })));
    let reject = workflow.reject_request(&identity(&admin), 404).await;
    assert!(matches!(reject, Err(DomainError::NotFound { .. })));

    assert!(repos.assignments().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn roles_are_checked_before_any_write() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());

    let by_admin = workflow.create_request(&identity(&admin), shift.id).await;
    assert!(matches!(by_admin, Err(DomainError::Forbidden(_))));
    let all = ShiftRequestFilter::default();
    assert!(repos.shift_requests().list(&all).await.unwrap().is_empty());

    let request = workflow.create_request(&identity(&worker), shift.id).await.unwrap();
    let self_approve = workflow.approve_request(&identity(&worker), request.id).await;
    assert!(matches!(self_approve, Err(DomainError::Forbidden(_))));
    let listing = workflow.list_requests(&identity(&worker), &all).await;
    assert!(matches!(listing, Err(DomainError::Forbidden(_))));

    let stored = repos.shift_requests().find_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ShiftRequestStatus::Pending);
}

#[tokio::test]
async fn request_for_unknown_shift_is_not_found() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());

    let result = workflow.create_request(&identity(&worker), 999).await;
    assert!(matches!(result, Err(DomainError::NotFound { entity: "Shift", .. })));
}

#[tokio::test]
async fn duplicate_pending_requests_follow_settings() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let me = identity(&worker);

    let lenient = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());
    lenient.create_request(&me, shift.id).await.unwrap();
    lenient.create_request(&me, shift.id).await.unwrap();

    let strict = ShiftRequestWorkflow::new(
        repos.clone(),
        WorkflowSettings {
            reject_duplicate_pending: true,
        },
    );
    let refused = strict.create_request(&me, shift.id).await;
    assert!(matches!(refused, Err(DomainError::Conflict(_))));

    let filter = ShiftRequestFilter {
        user_id: Some(worker.id),
        ..Default::default()
    };
    assert_eq!(repos.shift_requests().list(&filter).await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_approvals_yield_one_assignment() {
    const RACERS: usize = 10;

    let file = FileDb::new().await;
    let repos = file.repos.clone();
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let workflow = Arc::new(ShiftRequestWorkflow::new(
        repos.clone(),
        WorkflowSettings::default(),
    ));
    let request = workflow.create_request(&identity(&worker), shift.id).await.unwrap();

    let admin_id = identity(&admin);
    let request_id = request.id;
    let barrier = Arc::new(tokio::sync::Barrier::new(RACERS));
    let handles: Vec<_> = (0..RACERS)
        .map(|_| {
            let workflow = workflow.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                workflow.approve_request(&admin_id, request_id).await
            })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(view) => {
                assert_eq!(view.status, ShiftRequestStatus::Approved);
                successes += 1;
            }
            Err(DomainError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected approval error: {other:?}"),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(conflicts, RACERS - 1);

    let assignments = repos.assignments().list().await.unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].user_id, worker.id);

    file.close().await;
}

#[tokio::test]
async fn list_filters_and_orders_newest_first() {
    let (_db, repos) = setup_db().await;
    let alice = seed_user(&repos, "Alice", UserRole::Worker).await;
    let bob = seed_user(&repos, "Bob", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let s1 = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let s2 = seed_shift(&repos, "2024-06-02", (9, 0), (17, 0)).await;

    let base = Utc::now() - Duration::hours(1);
    let store = repos.shift_requests();
    let mut created = Vec::new();
    for (offset, (user, shift)) in [(alice.id, s1.id), (bob.id, s1.id), (alice.id, s2.id)]
        .into_iter()
        .enumerate()
    {
        let mut new = NewShiftRequest::new(user, shift);
        new.requested_at = base + Duration::minutes(offset as i64);
        created.push(store.create(new).await.unwrap());
    }

    let workflow = ShiftRequestWorkflow::new(repos.clone(), WorkflowSettings::default());
    let admin_id = identity(&admin);
    workflow.reject_request(&admin_id, created[1].id).await.unwrap();

    let pending = workflow
        .list_requests(
            &admin_id,
            &ShiftRequestFilter {
                status: Some(ShiftRequestStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let ids: Vec<i32> = pending.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![created[2].id, created[0].id]);
    assert!(pending.iter().all(|r| r.status == ShiftRequestStatus::Pending));

    let for_s1_by_bob = workflow
        .list_requests(
            &admin_id,
            &ShiftRequestFilter {
                user_id: Some(bob.id),
                shift_id: Some(s1.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(for_s1_by_bob.len(), 1);
    assert_eq!(for_s1_by_bob[0].user_name, "Bob");
    assert_eq!(for_s1_by_bob[0].status, ShiftRequestStatus::Rejected);
}

#[tokio::test]
async fn repository_reports_transition_outcomes() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let store = repos.shift_requests();

    let request = store.create(NewShiftRequest::new(worker.id, shift.id)).await.unwrap();
    match store.reject(request.id).await.unwrap() {
        Transition::Applied(r) => assert_eq!(r.status, ShiftRequestStatus::Rejected),
        other => panic!("expected applied, got {other:?}"),
    }
    match store.approve(request.id, Utc::now()).await.unwrap() {
        Transition::AlreadyDecided(status) => assert_eq!(status, ShiftRequestStatus::Rejected),
        other => panic!("expected already decided, got {other:?}"),
    }
    assert!(matches!(
        store.approve(request.id + 100, Utc::now()).await.unwrap(),
        Transition::NotFound
    ));
}

#[tokio::test]
async fn catalog_shows_current_assignee() {
    let (_db, repos) = setup_db().await;
    let alice = seed_user(&repos, "Alice", UserRole::Worker).await;
    let bob = seed_user(&repos, "Bob", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let early = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let late = seed_shift(&repos, "2024-06-02", (9, 0), (17, 0)).await;
    let catalog = ShiftCatalog::new(repos.clone());

    let mut first = NewAssignment::new(early.id, alice.id);
    first.assigned_at = Utc::now() - Duration::minutes(5);
    repos.assignments().create(first).await.unwrap();
    repos
        .assignments()
        .create(NewAssignment::new(early.id, bob.id))
        .await
        .unwrap();

    let shifts = catalog.list_shifts(&identity(&alice)).await.unwrap();
    // date descending
    assert_eq!(shifts[0].shift.id, late.id);
    assert!(!shifts[0].is_assigned);
    assert_eq!(shifts[1].shift.id, early.id);
    assert!(shifts[1].is_assigned);
    assert_eq!(shifts[1].assignee.as_deref(), Some("Bob"));

    let one = catalog.get_shift(&identity(&admin), early.id).await.unwrap();
    assert_eq!(one.assignee_id, Some(bob.id));
}

#[tokio::test]
async fn shift_update_validates_merged_window() {
    let (_db, repos) = setup_db().await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let catalog = ShiftCatalog::new(repos.clone());
    let admin_id = identity(&admin);

    let bad = ShiftPatch {
        start_time: NaiveTime::from_hms_opt(18, 0, 0),
        ..Default::default()
    };
    let result = catalog.update_shift(&admin_id, shift.id, bad).await;
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));

    let unchanged = repos.shifts().find_by_id(shift.id).await.unwrap().unwrap();
    assert_eq!(unchanged.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

    let good = ShiftPatch {
        location: Some("Warehouse".into()),
        ..Default::default()
    };
    let updated = catalog.update_shift(&admin_id, shift.id, good).await.unwrap();
    assert_eq!(updated.shift.location, "Warehouse");
    assert_eq!(updated.shift.role, "cashier");

    let missing = catalog
        .update_shift(&admin_id, 999, ShiftPatch::default())
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn referenced_shift_cannot_be_deleted() {
    let (_db, repos) = setup_db().await;
    let worker = seed_user(&repos, "Alice", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let used = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let free = seed_shift(&repos, "2024-06-02", (9, 0), (17, 0)).await;
    repos
        .shift_requests()
        .create(NewShiftRequest::new(worker.id, used.id))
        .await
        .unwrap();

    match repos.shifts().delete(used.id).await.unwrap() {
        ShiftDeletion::Referenced {
            assignments,
            requests,
        } => {
            assert_eq!(assignments, 0);
            assert_eq!(requests, 1);
        }
        other => panic!("expected referenced, got {other:?}"),
    }

    let catalog = ShiftCatalog::new(repos.clone());
    let conflict = catalog.delete_shift(&identity(&admin), used.id).await;
    assert!(matches!(conflict, Err(DomainError::Conflict(_))));

    catalog.delete_shift(&identity(&admin), free.id).await.unwrap();
    assert!(repos.shifts().find_by_id(free.id).await.unwrap().is_none());
    let gone = catalog.delete_shift(&identity(&admin), free.id).await;
    assert!(matches!(gone, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn reassignment_repoints_and_refreshes() {
    let (_db, repos) = setup_db().await;
    let alice = seed_user(&repos, "Alice", UserRole::Worker).await;
    let bob = seed_user(&repos, "Bob", UserRole::Worker).await;
    let admin = seed_user(&repos, "Carol", UserRole::Admin).await;
    let shift = seed_shift(&repos, "2024-06-01", (9, 0), (17, 0)).await;
    let service = AssignmentService::new(repos.clone());
    let admin_id = identity(&admin);

    let created = service
        .create_assignment(&admin_id, shift.id, alice.id)
        .await
        .unwrap();
    assert_eq!(created.user_name, "Alice");

    let moved = service.reassign(&admin_id, created.id, bob.id).await.unwrap();
    assert_eq!(moved.id, created.id);
    assert_eq!(moved.user_id, bob.id);
    assert!(moved.assigned_at >= created.assigned_at);

    let unknown_user = service.reassign(&admin_id, created.id, 999).await;
    assert!(matches!(unknown_user, Err(DomainError::NotFound { .. })));
    let unknown_row = service.reassign(&admin_id, 999, bob.id).await;
    assert!(matches!(unknown_row, Err(DomainError::NotFound { .. })));
    let by_worker = service.reassign(&identity(&alice), created.id, alice.id).await;
    assert!(matches!(by_worker, Err(DomainError::Forbidden(_))));
}
