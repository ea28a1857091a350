//! Audited unit of work.
//!
//! [`AuditSession`] is the only write path the handlers use. It wraps one
//! database transaction and runs [`intercept`] on every change before the
//! change is written, so audit columns are always stamped and a removal
//! never becomes a physical delete.

mod session;

use chrono::Utc;
use models::Auditable;
use sea_orm::prelude::DateTimeWithTimeZone;

pub use session::AuditSession;

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// What actually reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Insert,
    Update,
}

/// Stamp audit columns for `change` and return the write to perform.
///
/// - added: `created_at = last_modified = now`, `is_deleted = false`
/// - modified: `last_modified = now`
/// - removed: `is_deleted = true`, `last_modified = now`, written as an update
pub fn intercept<A: Auditable>(am: &mut A, change: ChangeKind, now: DateTimeWithTimeZone) -> Write {
    match change {
        ChangeKind::Added => {
            am.set_created_at(now);
            am.set_last_modified(now);
            am.set_is_deleted(false);
            Write::Insert
        }
        ChangeKind::Modified => {
            am.set_last_modified(now);
            Write::Update
        }
        ChangeKind::Removed => {
            am.set_is_deleted(true);
            am.set_last_modified(now);
            Write::Update
        }
    }
}

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use models::product;
    use sea_orm::{ActiveValue, Set};

    use super::*;

    fn at(secs: i64) -> DateTimeWithTimeZone {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap().fixed_offset()
    }

    #[test]
    fn added_overrides_caller_audit_values() {
        let mut am = product::ActiveModel {
            created_at: Set(at(-1000)),
            last_modified: Set(at(-500)),
            is_deleted: Set(true),
            ..Default::default()
        };
        assert_eq!(intercept(&mut am, ChangeKind::Added, at(0)), Write::Insert);
        assert_eq!(am.created_at, Set(at(0)));
        assert_eq!(am.last_modified, Set(at(0)));
        assert_eq!(am.is_deleted, Set(false));
    }

    #[test]
    fn modified_only_touches_last_modified() {
        let mut am = product::ActiveModel { is_deleted: ActiveValue::Unchanged(false), ..Default::default() };
        assert_eq!(intercept(&mut am, ChangeKind::Modified, at(10)), Write::Update);
        assert_eq!(am.last_modified, Set(at(10)));
        assert!(matches!(am.created_at, ActiveValue::NotSet));
        assert_eq!(am.is_deleted, ActiveValue::Unchanged(false));
    }

    #[test]
    fn removed_becomes_flag_update() {
        let mut am = product::ActiveModel::default();
        let now = at(0) + Duration::seconds(5);
        assert_eq!(intercept(&mut am, ChangeKind::Removed, now), Write::Update);
        assert_eq!(am.is_deleted, Set(true));
        assert_eq!(am.last_modified, Set(now));
    }
}
