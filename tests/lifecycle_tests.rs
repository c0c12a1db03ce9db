//! Lifecycle engine integration tests
//!
//! These run against the in-process services, no server required.

use laptopms_server::{
    error::AppError,
    models::{
        AssetFilter, AssetStatus, CreateAsset, CreateHandout, CreateRepair, HandoutFilter,
        HandoutStatus, RepairOutcome, RepairPriority, RepairStatus,
    },
    registry::Registry,
    services::Services,
};

fn services() -> Services {
    Services::new(Registry::new())
}

fn asset_input(id: Option<&str>, serial: &str) -> CreateAsset {
    CreateAsset {
        id: id.map(str::to_string),
        brand: "Dell".to_string(),
        model: "Latitude 7420".to_string(),
        serial: serial.to_string(),
        specs: "Intel i7, 16GB RAM, 512GB SSD".to_string(),
        condition: "Excellent".to_string(),
        status: None,
    }
}

fn handout_input(asset_id: &str, holder: &str, department: &str) -> CreateHandout {
    CreateHandout {
        asset_id: asset_id.to_string(),
        holder: holder.to_string(),
        department: department.to_string(),
        purpose: None,
    }
}

fn repair_input(asset_id: &str) -> CreateRepair {
    CreateRepair {
        asset_id: asset_id.to_string(),
        issue: "Screen flickering".to_string(),
        technician: "John Smith".to_string(),
        cost: 150.0,
        priority: RepairPriority::High,
    }
}

#[tokio::test]
async fn add_asset_assigns_sequential_ids() {
    let svc = services();
    let a = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let b = svc.lifecycle.add_asset(asset_input(None, "SN-2")).await.unwrap();
    assert_eq!(a.id, "LP-001");
    assert_eq!(b.id, "LP-002");
    assert_eq!(a.status, AssetStatus::Available);
    assert!(a.assigned_to.is_none());
}

#[tokio::test]
async fn add_asset_rejects_duplicate_serial_and_id() {
    let svc = services();
    svc.lifecycle
        .add_asset(asset_input(Some("LP-010"), "SN-1"))
        .await
        .unwrap();

    let err = svc
        .lifecycle
        .add_asset(asset_input(None, "SN-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateSerial(_)));

    let err = svc
        .lifecycle
        .add_asset(asset_input(Some("LP-010"), "SN-2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateId(_)));

    // The sequence stays ahead of caller-supplied ids
    let next = svc.lifecycle.add_asset(asset_input(None, "SN-3")).await.unwrap();
    assert_eq!(next.id, "LP-011");
}

#[tokio::test]
async fn add_asset_rejects_handed_out_status_and_blank_fields() {
    let svc = services();

    let mut input = asset_input(None, "SN-1");
    input.status = Some(AssetStatus::HandedOut);
    let err = svc.lifecycle.add_asset(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut input = asset_input(None, "SN-2");
    input.brand = String::new();
    let err = svc.lifecycle.add_asset(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn handout_return_round_trip() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();

    let handout = svc
        .lifecycle
        .hand_out(handout_input(&asset.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();
    assert_eq!(handout.id, "HO-001");
    assert_eq!(handout.status, HandoutStatus::Active);
    assert_eq!(handout.asset_model, "Dell Latitude 7420");

    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.status, AssetStatus::HandedOut);
    assert_eq!(asset.assigned_to.as_deref(), Some("Alice Johnson"));

    let handout = svc.lifecycle.return_asset(&handout.id).await.unwrap();
    assert_eq!(handout.status, HandoutStatus::Returned);
    assert!(handout.closed_at.is_some());

    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.status, AssetStatus::Available);
    assert!(asset.assigned_to.is_none());
}

#[tokio::test]
async fn handout_refused_when_not_available_with_no_partial_effect() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    svc.lifecycle
        .hand_out(handout_input(&asset.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();

    let err = svc
        .lifecycle
        .hand_out(handout_input(&asset.id, "Bob Smith", "IT"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));

    // No second handout was recorded and the assignment is unchanged
    let handouts = svc.lifecycle.list_handouts(&HandoutFilter::default()).await;
    assert_eq!(handouts.len(), 1);
    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.assigned_to.as_deref(), Some("Alice Johnson"));
}

#[tokio::test]
async fn double_return_fails_with_already_closed() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let handout = svc
        .lifecycle
        .hand_out(handout_input(&asset.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();

    svc.lifecycle.return_asset(&handout.id).await.unwrap();
    let err = svc.lifecycle.return_asset(&handout.id).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyClosed(_)));
}

#[tokio::test]
async fn handout_for_unknown_asset_fails() {
    let svc = services();
    let err = svc
        .lifecycle
        .hand_out(handout_input("LP-999", "Alice Johnson", "Marketing"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn repair_on_handed_out_asset_force_closes_the_handout() {
    // The LP-010 scenario: handout, repair intake, completed repair
    let svc = services();
    svc.lifecycle
        .add_asset(asset_input(Some("LP-010"), "SN-10"))
        .await
        .unwrap();

    let handout = svc
        .lifecycle
        .hand_out(handout_input("LP-010", "Alice", "Marketing"))
        .await
        .unwrap();
    assert_eq!(handout.status, HandoutStatus::Active);

    let ticket = svc.lifecycle.open_repair(repair_input("LP-010")).await.unwrap();
    assert_eq!(ticket.status, RepairStatus::Pending);

    let asset = svc.lifecycle.get_asset("LP-010").await.unwrap();
    assert_eq!(asset.status, AssetStatus::UnderRepair);
    assert!(asset.assigned_to.is_none());

    // The handout was force-closed by the repair intake
    let handout = svc.lifecycle.get_handout(&handout.id).await.unwrap();
    assert_eq!(handout.status, HandoutStatus::Returned);

    let ticket = svc
        .lifecycle
        .close_repair(&ticket.id, RepairOutcome::Completed)
        .await
        .unwrap();
    assert_eq!(ticket.status, RepairStatus::Completed);
    assert!(ticket.completed_at.is_some());

    let asset = svc.lifecycle.get_asset("LP-010").await.unwrap();
    assert_eq!(asset.status, AssetStatus::Available);
}

#[tokio::test]
async fn second_open_repair_fails_and_leaves_first_ticket_unchanged() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let first = svc.lifecycle.open_repair(repair_input(&asset.id)).await.unwrap();

    let err = svc
        .lifecycle
        .open_repair(repair_input(&asset.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::RepairInProgress(_)));

    let first = svc.lifecycle.get_repair(&first.id).await.unwrap();
    assert_eq!(first.status, RepairStatus::Pending);
}

#[tokio::test]
async fn negative_cost_is_rejected() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();

    let mut input = repair_input(&asset.id);
    input.cost = -5.0;
    let err = svc.lifecycle.open_repair(input).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCost(_)));

    // Nothing was written
    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.status, AssetStatus::Available);
    assert!(svc
        .lifecycle
        .list_repairs(&Default::default())
        .await
        .is_empty());
}

#[tokio::test]
async fn repair_ticket_transitions_follow_the_state_machine() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let ticket = svc.lifecycle.open_repair(repair_input(&asset.id)).await.unwrap();

    let ticket = svc.lifecycle.start_repair(&ticket.id).await.unwrap();
    assert_eq!(ticket.status, RepairStatus::InProgress);

    // Starting twice is an illegal ledger transition
    let err = svc.lifecycle.start_repair(&ticket.id).await.unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));

    let ticket = svc
        .lifecycle
        .close_repair(&ticket.id, RepairOutcome::Completed)
        .await
        .unwrap();
    assert_eq!(ticket.status, RepairStatus::Completed);

    // Closing a terminal ticket is refused
    let err = svc
        .lifecycle
        .close_repair(&ticket.id, RepairOutcome::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));
}

#[tokio::test]
async fn cancelled_repair_restores_availability() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let ticket = svc.lifecycle.open_repair(repair_input(&asset.id)).await.unwrap();

    let ticket = svc
        .lifecycle
        .close_repair(&ticket.id, RepairOutcome::Cancelled)
        .await
        .unwrap();
    assert_eq!(ticket.status, RepairStatus::Cancelled);
    assert!(ticket.completed_at.is_none());

    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.status, AssetStatus::Available);
}

#[tokio::test]
async fn mark_out_of_order_cancels_open_ticket() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let ticket = svc.lifecycle.open_repair(repair_input(&asset.id)).await.unwrap();

    let asset = svc
        .lifecycle
        .mark_out_of_order(&asset.id, "Water damage beyond repair", "admin")
        .await
        .unwrap();
    assert_eq!(asset.status, AssetStatus::OutOfOrder);

    let ticket = svc.lifecycle.get_repair(&ticket.id).await.unwrap();
    assert_eq!(ticket.status, RepairStatus::Cancelled);
}

#[tokio::test]
async fn mark_out_of_order_refused_for_handed_out_assets() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    svc.lifecycle
        .hand_out(handout_input(&asset.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();

    let err = svc
        .lifecycle
        .mark_out_of_order(&asset.id, "broken", "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));
}

#[tokio::test]
async fn retire_closes_open_records_and_reinstate_requires_retirement() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();
    let handout = svc
        .lifecycle
        .hand_out(handout_input(&asset.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();

    // Retire is administrative and legal even while handed out
    let asset = svc
        .lifecycle
        .retire(&asset.id, Some("stolen"), "admin")
        .await
        .unwrap();
    assert_eq!(asset.status, AssetStatus::OutOfOrder);
    assert!(asset.assigned_to.is_none());

    let handout = svc.lifecycle.get_handout(&handout.id).await.unwrap();
    assert_eq!(handout.status, HandoutStatus::Returned);

    // Reinstating restores availability; a second reinstate is illegal
    let asset = svc.lifecycle.reinstate(&asset.id, "admin").await.unwrap();
    assert_eq!(asset.status, AssetStatus::Available);
    let err = svc.lifecycle.reinstate(&asset.id, "admin").await.unwrap_err();
    assert!(matches!(err, AppError::IllegalTransition { .. }));
}

#[tokio::test]
async fn list_filters_by_status_and_free_text() {
    let svc = services();
    svc.lifecycle.add_asset(asset_input(None, "DL7420001")).await.unwrap();
    let mut lenovo = asset_input(None, "LV1XC002");
    lenovo.brand = "Lenovo".to_string();
    lenovo.model = "ThinkPad X1 Carbon".to_string();
    let lenovo = svc.lifecycle.add_asset(lenovo).await.unwrap();
    svc.lifecycle
        .hand_out(handout_input(&lenovo.id, "Alice Johnson", "Marketing"))
        .await
        .unwrap();

    let filter = AssetFilter {
        status: Some(AssetStatus::HandedOut),
        q: None,
    };
    let handed_out = svc.lifecycle.list_assets(&filter).await;
    assert_eq!(handed_out.len(), 1);
    assert_eq!(handed_out[0].id, lenovo.id);

    let filter = AssetFilter {
        status: None,
        q: Some("thinkpad".to_string()),
    };
    let matches = svc.lifecycle.list_assets(&filter).await;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].brand, "Lenovo");

    // Identical filters return identical result sets absent writes
    let again = svc.lifecycle.list_assets(&filter).await;
    assert_eq!(matches.len(), again.len());
    assert_eq!(matches[0].id, again[0].id);
}

#[tokio::test]
async fn concurrent_handouts_on_one_asset_admit_exactly_one() {
    let svc = services();
    let asset = svc.lifecycle.add_asset(asset_input(None, "SN-1")).await.unwrap();

    let svc_a = svc.clone();
    let svc_b = svc.clone();
    let id_a = asset.id.clone();
    let id_b = asset.id.clone();
    let a = tokio::spawn(async move {
        svc_a
            .lifecycle
            .hand_out(handout_input(&id_a, "Alice Johnson", "Marketing"))
            .await
    });
    let b = tokio::spawn(async move {
        svc_b
            .lifecycle
            .hand_out(handout_input(&id_b, "Bob Smith", "IT"))
            .await
    });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let won = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(won, 1);

    let asset = svc.lifecycle.get_asset(&asset.id).await.unwrap();
    assert_eq!(asset.status, AssetStatus::HandedOut);
    let handouts = svc.lifecycle.list_handouts(&HandoutFilter::default()).await;
    assert_eq!(handouts.len(), 1);
    assert_eq!(asset.assigned_to.as_deref(), Some(handouts[0].holder.as_str()));
}

#[tokio::test]
async fn seeded_demo_fleet_satisfies_the_invariants() {
    let registry = Registry::new();
    registry.seed_demo().await.unwrap();
    let svc = Services::new(registry);

    let assets = svc.lifecycle.list_assets(&Default::default()).await;
    assert_eq!(assets.len(), 4);

    for asset in &assets {
        let active = svc
            .lifecycle
            .list_handouts(&HandoutFilter {
                status: Some(HandoutStatus::Active),
                q: Some(asset.id.clone()),
            })
            .await;
        if asset.status == AssetStatus::HandedOut {
            assert_eq!(active.len(), 1);
            assert_eq!(asset.assigned_to.as_deref(), Some(active[0].holder.as_str()));
        } else {
            assert!(active.is_empty());
            assert!(asset.assigned_to.is_none());
        }
    }

    let stats = svc.stats.get_stats().await.unwrap();
    assert_eq!(stats.assets.total, 4);
    assert_eq!(stats.assets.handed_out, 1);
    assert_eq!(stats.assets.under_repair, 1);
    assert_eq!(stats.handouts.active, 1);
    assert_eq!(stats.repairs.open, 1);
    assert_eq!(stats.repairs.total_cost, 150.0);
}
