/**
 * Ordering Engine
 *
 * Pure, synchronous operations over containers. Every function either fully
 * applies its change or returns an error with the container untouched.
 *
 * # Write Order
 *
 * `move_across` mutates three documents. Callers persist them as
 * source → item → target. A failure part way through then leaves the item
 * absent from both sequences (healed by the consistency sweep) instead of
 * listed twice.
 *
 * # Index Rules
 *
 * - missing index → append at the end
 * - index beyond the length → clamped to the end
 * - negative or non-numeric → `InvalidIndex`
 */
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use super::OrderingError;
use crate::shared::models::{Board, Column, Sequence, Task};

/// Something that holds an ordered sequence of child ids
pub trait Container {
    fn container_id(&self) -> Uuid;

    fn sequence(&self) -> &Sequence;

    fn sequence_mut(&mut self) -> &mut Sequence;
}

impl Container for Board {
    fn container_id(&self) -> Uuid {
        self.id
    }

    fn sequence(&self) -> &Sequence {
        &self.columns
    }

    fn sequence_mut(&mut self) -> &mut Sequence {
        &mut self.columns
    }
}

impl Container for Column {
    fn container_id(&self) -> Uuid {
        self.id
    }

    fn sequence(&self) -> &Sequence {
        &self.tasks
    }

    fn sequence_mut(&mut self) -> &mut Sequence {
        &mut self.tasks
    }
}

/// A child that can change container
pub trait Member {
    fn member_id(&self) -> Uuid;

    /// Id of the container this member claims to belong to
    fn container_ref(&self) -> Uuid;

    fn set_container_ref(&mut self, container: Uuid);
}

impl Member for Task {
    fn member_id(&self) -> Uuid {
        self.id
    }

    fn container_ref(&self) -> Uuid {
        self.column_id
    }

    fn set_container_ref(&mut self, container: Uuid) {
        self.column_id = container;
    }
}

/// Push `member` to the end of the container, returning its index
pub fn append<C: Container>(container: &mut C, member: Uuid) -> Result<usize, OrderingError> {
    if container.sequence().contains(&member) {
        return Err(OrderingError::DuplicateMember { member });
    }
    container.sequence_mut().push(member);
    Ok(container.sequence().len() - 1)
}

/// Remove `member` wherever it occurs. Absent members are a no-op.
pub fn remove<C: Container>(container: &mut C, member: &Uuid) -> Option<usize> {
    container.sequence_mut().remove(member)
}

/// Replace the whole sequence. Every id must already be a member.
pub fn reorder<C: Container>(container: &mut C, ids: Vec<Uuid>) -> Result<(), OrderingError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in &ids {
        if !container.sequence().contains(id) {
            return Err(OrderingError::invalid_sequence(format!(
                "{} is not a member of {}",
                id,
                container.container_id()
            )));
        }
        if !seen.insert(*id) {
            return Err(OrderingError::invalid_sequence(format!("{} is listed twice", id)));
        }
    }
    container.sequence_mut().replace(ids);
    Ok(())
}

/// Move `item` from `source` into `target`, returning the index it landed at.
///
/// The item's container reference is updated to `target`. Persist
/// source, then item, then target.
pub fn move_across<M: Member, C: Container>(
    item: &mut M,
    source: &mut C,
    target: &mut C,
    target_index: Option<usize>,
) -> Result<usize, OrderingError> {
    let member = item.member_id();
    if source.container_id() == target.container_id() {
        return Err(OrderingError::invalid_sequence(
            "source and target are the same container",
        ));
    }
    if item.container_ref() != source.container_id() {
        return Err(OrderingError::invalid_sequence(format!(
            "{} does not belong to {}",
            member,
            source.container_id()
        )));
    }
    if target.sequence().contains(&member) {
        return Err(OrderingError::DuplicateMember { member });
    }

    source.sequence_mut().remove(&member);
    item.set_container_ref(target.container_id());
    let index = target_index.unwrap_or(usize::MAX);
    Ok(target.sequence_mut().insert_clamped(index, member))
}

/// Move `member` to `index` inside the same container.
///
/// Moving to the current index leaves the sequence (and its version) as is.
pub fn reposition<C: Container>(
    container: &mut C,
    member: Uuid,
    index: Option<usize>,
) -> Result<usize, OrderingError> {
    let current = container.sequence().position(&member).ok_or_else(|| {
        OrderingError::invalid_sequence(format!(
            "{} is not a member of {}",
            member,
            container.container_id()
        ))
    })?;
    let last = container.sequence().len() - 1;
    let wanted = index.unwrap_or(last).min(last);
    if wanted == current {
        return Ok(current);
    }

    let mut ids = container.sequence().ids().to_vec();
    ids.remove(current);
    ids.insert(wanted, member);
    container.sequence_mut().replace(ids);
    Ok(wanted)
}

/// Drain every member id, leaving the container empty
pub fn cascade_delete<C: Container>(container: &mut C) -> Vec<Uuid> {
    if container.sequence().is_empty() {
        return Vec::new();
    }
    container.sequence_mut().take_all()
}

/// Compare-and-set guard for reorders that opt in with an expected version
pub fn check_version<C: Container>(container: &C, expected: Option<u64>) -> Result<(), OrderingError> {
    match expected {
        Some(expected) if expected != container.sequence().version() => Err(OrderingError::Conflict {
            expected,
            actual: container.sequence().version(),
        }),
        _ => Ok(()),
    }
}

/// Interpret a client-supplied target index.
///
/// `None` or `null` means "append".
pub fn parse_index(raw: Option<&Value>) -> Result<Option<usize>, OrderingError> {
    let value = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };
    if let Some(index) = value.as_u64() {
        return Ok(Some(usize::try_from(index).unwrap_or(usize::MAX)));
    }
    match value.as_f64() {
        Some(n) if n < 0.0 => Err(OrderingError::invalid_index(format!("{} is negative", n))),
        Some(n) if n.fract() == 0.0 => Ok(Some(n as usize)),
        Some(n) => Err(OrderingError::invalid_index(format!("{} is not an integer", n))),
        None => Err(OrderingError::invalid_index(format!("{} is not a number", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn column_with(board: Uuid, tasks: usize) -> (Column, Vec<Task>) {
        let mut column = Column::new(board, "col", None);
        let tasks: Vec<Task> = (0..tasks)
            .map(|i| Task::new(column.id, format!("t{}", i), "", Utc::now()))
            .collect();
        for task in &tasks {
            append(&mut column, task.id).unwrap();
        }
        (column, tasks)
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let mut board = Board::new("b", "", Uuid::new_v4(), &[]);
        let id = Uuid::new_v4();
        assert_eq!(append(&mut board, id), Ok(0));
        assert_eq!(append(&mut board, id), Err(OrderingError::DuplicateMember { member: id }));
        assert_eq!(board.columns.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 2);
        assert_eq!(remove(&mut column, &tasks[0].id), Some(0));
        let version = column.tasks.version();
        assert_eq!(remove(&mut column, &tasks[0].id), None);
        assert_eq!(column.tasks.version(), version);
        assert_eq!(column.tasks.ids(), &[tasks[1].id]);
    }

    #[test]
    fn test_reorder_permutation() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 3);
        let reversed: Vec<Uuid> = tasks.iter().rev().map(|t| t.id).collect();
        reorder(&mut column, reversed.clone()).unwrap();
        assert_eq!(column.tasks.ids(), reversed.as_slice());
    }

    #[test]
    fn test_reorder_with_stranger_leaves_sequence_unchanged() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 2);
        let before = column.tasks.clone();
        let result = reorder(&mut column, vec![tasks[1].id, Uuid::new_v4()]);
        assert!(matches!(result, Err(OrderingError::InvalidSequence { .. })));
        assert_eq!(column.tasks, before);
    }

    #[test]
    fn test_reorder_rejects_repeated_id() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 2);
        let result = reorder(&mut column, vec![tasks[0].id, tasks[0].id]);
        assert!(matches!(result, Err(OrderingError::InvalidSequence { .. })));
    }

    #[test]
    fn test_move_across_updates_both_sides() {
        let board = Uuid::new_v4();
        let (mut todo, mut tasks) = column_with(board, 1);
        let (mut done, _) = column_with(board, 0);

        let index = move_across(&mut tasks[0], &mut todo, &mut done, Some(0)).unwrap();
        assert_eq!(index, 0);
        assert!(todo.tasks.is_empty());
        assert_eq!(done.tasks.ids(), &[tasks[0].id]);
        assert_eq!(tasks[0].column_id, done.id);
    }

    #[test]
    fn test_move_across_clamps_index() {
        let board = Uuid::new_v4();
        let (mut source, mut moving) = column_with(board, 1);
        let (mut target, existing) = column_with(board, 2);

        let index = move_across(&mut moving[0], &mut source, &mut target, Some(99)).unwrap();
        assert_eq!(index, 2);
        assert_eq!(target.tasks.ids(), &[existing[0].id, existing[1].id, moving[0].id]);
    }

    #[test]
    fn test_move_there_and_back_restores_sequences() {
        let board = Uuid::new_v4();
        let (mut a, mut a_tasks) = column_with(board, 3);
        let (mut b, _) = column_with(board, 2);
        let a_before = a.tasks.ids().to_vec();
        let b_before = b.tasks.ids().to_vec();
        let original = a.tasks.position(&a_tasks[1].id);

        move_across(&mut a_tasks[1], &mut a, &mut b, Some(1)).unwrap();
        move_across(&mut a_tasks[1], &mut b, &mut a, original).unwrap();

        assert_eq!(a.tasks.ids(), a_before.as_slice());
        assert_eq!(b.tasks.ids(), b_before.as_slice());
        assert_eq!(a_tasks[1].column_id, a.id);
    }

    #[test]
    fn test_move_across_rejects_wrong_source() {
        let board = Uuid::new_v4();
        let (a, mut a_tasks) = column_with(board, 1);
        let (mut b, _) = column_with(board, 0);
        let (mut c, _) = column_with(board, 0);
        let before = a.tasks.clone();

        let result = move_across(&mut a_tasks[0], &mut b, &mut c, None);
        assert!(matches!(result, Err(OrderingError::InvalidSequence { .. })));
        assert_eq!(a_tasks[0].column_id, a.id);
        assert_eq!(a.tasks, before);
    }

    #[test]
    fn test_reposition_within_container() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 3);
        assert_eq!(reposition(&mut column, tasks[0].id, Some(2)), Ok(2));
        assert_eq!(column.tasks.ids(), &[tasks[1].id, tasks[2].id, tasks[0].id]);
    }

    #[test]
    fn test_reposition_to_current_index_is_noop() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 3);
        let version = column.tasks.version();
        assert_eq!(reposition(&mut column, tasks[1].id, Some(1)), Ok(1));
        assert_eq!(column.tasks.version(), version);
    }

    #[test]
    fn test_cascade_delete_drains() {
        let (mut column, tasks) = column_with(Uuid::new_v4(), 2);
        let drained = cascade_delete(&mut column);
        assert_eq!(drained, vec![tasks[0].id, tasks[1].id]);
        assert!(column.tasks.is_empty());
        assert!(cascade_delete(&mut column).is_empty());
    }

    #[test]
    fn test_check_version() {
        let (column, _) = column_with(Uuid::new_v4(), 2);
        assert!(check_version(&column, None).is_ok());
        assert!(check_version(&column, Some(2)).is_ok());
        assert_eq!(
            check_version(&column, Some(1)),
            Err(OrderingError::Conflict { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index(None), Ok(None));
        assert_eq!(parse_index(Some(&Value::Null)), Ok(None));
        assert_eq!(parse_index(Some(&json!(3))), Ok(Some(3)));
        assert_eq!(parse_index(Some(&json!(2.0))), Ok(Some(2)));
        assert!(matches!(parse_index(Some(&json!(-1))), Err(OrderingError::InvalidIndex { .. })));
        assert!(matches!(parse_index(Some(&json!(1.5))), Err(OrderingError::InvalidIndex { .. })));
        assert!(matches!(parse_index(Some(&json!("first"))), Err(OrderingError::InvalidIndex { .. })));
    }
}
