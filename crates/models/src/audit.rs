//! Audit capability shared by every catalog entity.
//!
//! Rows carry `created_at`, `last_modified` and `is_deleted`. The setters here
//! are the only way the persistence layer touches those columns, and
//! [`SoftDeletable`] gives the default read path that hides deleted rows.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Select};

/// Active models whose audit columns are stamped on every write.
pub trait Auditable: ActiveModelTrait + ActiveModelBehavior + Send + Sync + 'static {
    fn set_created_at(&mut self, at: DateTimeWithTimeZone);
    fn set_last_modified(&mut self, at: DateTimeWithTimeZone);
    fn set_is_deleted(&mut self, deleted: bool);
    /// Primary key of the row, when already known.
    fn audit_id(&self) -> Option<i32>;
    /// Forget the primary key so the store assigns one on insert.
    fn clear_id(&mut self);
}

/// Entities read through a filter on `is_deleted = false`.
pub trait SoftDeletable: EntityTrait {
    /// All rows that have not been soft-deleted.
    fn find_live() -> Select<Self>;
    /// Single live row by primary key.
    fn find_live_by_id(id: i32) -> Select<Self>;
}

/// Value rows owned by a parent entity and replaced as a whole.
///
/// These are not auditable: they have no lifecycle of their own.
pub trait OwnedCollection: EntityTrait {
    /// Column holding the owner's primary key.
    fn owner_column() -> Self::Column;
}

macro_rules! auditable {
    ($($module:ident),+ $(,)?) => {
        $(
            impl Auditable for crate::$module::ActiveModel {
                fn set_created_at(&mut self, at: DateTimeWithTimeZone) {
                    self.created_at = sea_orm::Set(at);
                }
                fn set_last_modified(&mut self, at: DateTimeWithTimeZone) {
                    self.last_modified = sea_orm::Set(at);
                }
                fn set_is_deleted(&mut self, deleted: bool) {
                    self.is_deleted = sea_orm::Set(deleted);
                }
                fn audit_id(&self) -> Option<i32> {
                    self.id.try_as_ref().copied()
                }
                fn clear_id(&mut self) {
                    self.id = sea_orm::NotSet;
                }
            }

            impl SoftDeletable for crate::$module::Entity {
                fn find_live() -> Select<Self> {
                    Self::find().filter(crate::$module::Column::IsDeleted.eq(false))
                }
                fn find_live_by_id(id: i32) -> Select<Self> {
                    Self::find_by_id(id).filter(crate::$module::Column::IsDeleted.eq(false))
                }
            }
        )+
    };
}

auditable!(customer, product, product_offering, customer_facing_service, ticket, ticket_comment);

impl OwnedCollection for crate::product_offering_component::Entity {
    fn owner_column() -> Self::Column {
        crate::product_offering_component::Column::ProductOfferingId
    }
}

impl OwnedCollection for crate::cfs_characteristic::Entity {
    fn owner_column() -> Self::Column {
        crate::cfs_characteristic::Column::CfsId
    }
}
