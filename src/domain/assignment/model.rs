use std::collections::HashMap;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: i32,
    pub shift_id: i32,
    pub user_id: i32,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub shift_id: i32,
    pub user_id: i32,
    pub assigned_at: DateTime<Utc>,
}

impl NewAssignment {
    pub fn new(shift_id: i32, user_id: i32) -> Self {
        Self {
            shift_id,
            user_id,
            assigned_at: Utc::now(),
        }
    }
}

/// Pick the current assignment of every shift: greatest `assigned_at`,
/// ties broken by greatest id.
pub fn current_assignments<'a, I>(assignments: I) -> HashMap<i32, &'a Assignment>
where
    I: IntoIterator<Item = &'a Assignment>,
{
    let mut current: HashMap<i32, &Assignment> = HashMap::new();
    for a in assignments {
        current
            .entry(a.shift_id)
            .and_modify(|best| {
                if (a.assigned_at, a.id) > (best.assigned_at, best.id) {
                    *best = a;
                }
            })
            .or_insert(a);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment(id: i32, shift_id: i32, user_id: i32, at: DateTime<Utc>) -> Assignment {
        Assignment {
            id,
            shift_id,
            user_id,
            assigned_at: at,
        }
    }

    #[test]
    fn latest_assignment_wins() {
        let now = Utc::now();
        let rows = vec![
            assignment(1, 7, 100, now - Duration::hours(2)),
            assignment(2, 7, 200, now),
            assignment(3, 7, 300, now - Duration::hours(1)),
        ];
        let current = current_assignments(&rows);
        assert_eq!(current[&7].user_id, 200);
    }

    #[test]
    fn ties_go_to_highest_id() {
        let now = Utc::now();
        let rows = vec![assignment(4, 1, 10, now), assignment(9, 1, 20, now)];
        assert_eq!(current_assignments(&rows)[&1].id, 9);

        let reversed: Vec<_> = rows.into_iter().rev().collect();
        assert_eq!(current_assignments(&reversed)[&1].id, 9);
    }

    #[test]
    fn shifts_are_independent() {
        let now = Utc::now();
        let rows = vec![assignment(1, 1, 10, now), assignment(2, 2, 20, now)];
        let current = current_assignments(&rows);
        assert_eq!(current.len(), 2);
        assert_eq!(current[&1].user_id, 10);
        assert_eq!(current[&2].user_id, 20);
    }
}
