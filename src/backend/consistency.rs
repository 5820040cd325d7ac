/**
 * Consistency Sweep
 *
 * Multi-document mutations are written one document at a time, so a crash or
 * store failure part way through can leave drift between a container's
 * sequence and the children that point back at it. `reconcile` repairs it:
 *
 * - sequence ids naming a missing or foreign child are dropped
 * - live children missing from their container's sequence are appended in
 *   creation order
 * - columns whose board is gone are deleted
 * - tasks whose column is gone are deleted
 *
 * The sweep runs once at startup and, when `RECONCILE_INTERVAL_SECS > 0`,
 * periodically in a background task, alongside live requests. It works from
 * a snapshot, so it never acts on the snapshot alone:
 *
 * - a child is only deleted after a fresh read shows its parent is gone
 * - a container is re-read before saving and left for the next sweep when
 *   its sequence version moved since the snapshot
 */
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

use crate::backend::ordering::{append, remove, Container};
use crate::backend::store::{Entity, EntityStore, StoreError};
use crate::shared::models::{Board, Column, Task};

/// Counts of repairs made by one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub containers_repaired: usize,
    pub dropped_ids: usize,
    pub appended_ids: usize,
    pub orphan_columns_deleted: usize,
    pub orphan_tasks_deleted: usize,
    /// Containers that changed under the sweep and were left alone
    pub containers_skipped: usize,
}

impl ReconcileReport {
    /// No repairs were made
    pub fn is_clean(&self) -> bool {
        self.containers_repaired == 0
            && self.dropped_ids == 0
            && self.appended_ids == 0
            && self.orphan_columns_deleted == 0
            && self.orphan_tasks_deleted == 0
    }
}

/// Scan every board, column and task and heal drift
pub async fn reconcile(store: &EntityStore) -> Result<ReconcileReport, StoreError> {
    let mut report = ReconcileReport::default();

    let boards: Vec<Board> = store.all().await?;
    let board_ids: HashSet<Uuid> = boards.iter().map(|board| board.id).collect();

    let mut columns = Vec::new();
    for column in store.all::<Column>().await? {
        // boards created after the snapshot are not in `board_ids`
        if board_ids.contains(&column.board_id) || store.exists::<Board>(column.board_id).await? {
            columns.push(column);
        } else {
            tracing::warn!("[Reconcile] Deleting column {} of missing board {}", column.id, column.board_id);
            store.delete::<Column>(column.id).await?;
            report.orphan_columns_deleted += 1;
        }
    }
    let column_ids: HashSet<Uuid> = columns.iter().map(|column| column.id).collect();

    let mut tasks = Vec::new();
    for task in store.all::<Task>().await? {
        if column_ids.contains(&task.column_id) || store.exists::<Column>(task.column_id).await? {
            tasks.push(task);
        } else {
            tracing::warn!("[Reconcile] Deleting task {} of missing column {}", task.id, task.column_id);
            store.delete::<Task>(task.id).await?;
            report.orphan_tasks_deleted += 1;
        }
    }

    let columns_by_board = children_by_parent(&columns, |column| (column.board_id, column.id));
    for board in boards {
        let live = columns_by_board.get(&board.id).map(Vec::as_slice).unwrap_or_default();
        repair_container(store, &board, live, &mut report, Board::touch).await?;
    }

    let tasks_by_column = children_by_parent(&tasks, |task| (task.column_id, task.id));
    for column in &columns {
        let live = tasks_by_column.get(&column.id).map(Vec::as_slice).unwrap_or_default();
        repair_container(store, column, live, &mut report, Column::touch).await?;
    }

    if report.is_clean() {
        tracing::debug!("[Reconcile] No drift found");
    } else {
        tracing::info!("[Reconcile] Repaired drift: {:?}", report);
    }
    Ok(report)
}

/// Child ids grouped by parent, in the order `items` lists them
fn children_by_parent<T>(items: &[T], link: impl Fn(&T) -> (Uuid, Uuid)) -> HashMap<Uuid, Vec<Uuid>> {
    let mut grouped: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for item in items {
        let (parent, child) = link(item);
        grouped.entry(parent).or_default().push(child);
    }
    grouped
}

/// Whether `container`'s sequence differs from `live` as a set
fn needs_repair<C: Container>(container: &C, live: &[Uuid]) -> bool {
    let ids = container.sequence().ids();
    ids.iter().any(|id| !live.contains(id)) || live.iter().any(|id| !ids.contains(id))
}

/// Repair one container found drifted in the snapshot.
///
/// The container is re-read first; when it is gone or its sequence version
/// differs from the snapshot, it is skipped and the next sweep looks again.
async fn repair_container<C>(
    store: &EntityStore,
    snapshot: &C,
    live: &[Uuid],
    report: &mut ReconcileReport,
    touch: fn(&mut C),
) -> Result<(), StoreError>
where
    C: Container + Entity,
{
    if !needs_repair(snapshot, live) {
        return Ok(());
    }

    let Some(mut current) = store.get::<C>(snapshot.container_id()).await? else {
        return Ok(());
    };
    if current.sequence().version() != snapshot.sequence().version() {
        tracing::debug!(
            "[Reconcile] {} changed during the sweep (version {} -> {}), skipping",
            snapshot.container_id(),
            snapshot.sequence().version(),
            current.sequence().version()
        );
        report.containers_skipped += 1;
        return Ok(());
    }

    repair_sequence(&mut current, live, report);
    touch(&mut current);
    store.save(&current).await
}

/// Make `container`'s sequence list exactly `live`, keeping existing order
fn repair_sequence<C: Container>(container: &mut C, live: &[Uuid], report: &mut ReconcileReport) {
    let live_set: HashSet<&Uuid> = live.iter().collect();
    let stale: Vec<Uuid> = container
        .sequence()
        .ids()
        .iter()
        .filter(|id| !live_set.contains(id))
        .copied()
        .collect();
    for id in &stale {
        remove(container, id);
    }

    let mut appended = 0;
    for id in live {
        if append(container, *id).is_ok() {
            appended += 1;
        }
    }

    tracing::debug!(
        "[Reconcile] {}: dropped {}, appended {}",
        container.container_id(),
        stale.len(),
        appended
    );
    report.containers_repaired += 1;
    report.dropped_ids += stale.len();
    report.appended_ids += appended;
}

/// Run `reconcile` every `interval` until the task is aborted
pub fn spawn_reconcile_loop(store: EntityStore, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately; startup already swept
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = reconcile(&store).await {
                tracing::error!("[Reconcile] Periodic sweep failed: {}", e);
            }
        }
    })
}
