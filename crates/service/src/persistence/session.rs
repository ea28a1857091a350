use models::{Auditable, OwnedCollection};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, QueryFilter, TransactionTrait,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{intercept, now, ChangeKind, Write};
use crate::errors::ServiceError;

type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// One request's transaction with audit stamping on every write.
///
/// Dropping the session without [`commit`](Self::commit) rolls everything back.
pub struct AuditSession {
    txn: DatabaseTransaction,
}

impl AuditSession {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, ServiceError> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Connection for reads that must see this session's uncommitted writes.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Insert a new row. Any caller-supplied id is dropped so the store assigns one.
    pub async fn add<A>(&self, mut am: A) -> Result<ModelOf<A>, ServiceError>
    where
        A: Auditable,
        ModelOf<A>: IntoActiveModel<A>,
    {
        self.apply(&mut am, ChangeKind::Added);
        Ok(am.insert(&self.txn).await?)
    }

    pub async fn modify<A>(&self, mut am: A) -> Result<ModelOf<A>, ServiceError>
    where
        A: Auditable,
        ModelOf<A>: IntoActiveModel<A>,
    {
        self.apply(&mut am, ChangeKind::Modified);
        Ok(am.update(&self.txn).await?)
    }

    /// Soft delete: the row stays, flagged and re-stamped.
    pub async fn remove<A>(&self, mut am: A) -> Result<ModelOf<A>, ServiceError>
    where
        A: Auditable,
        ModelOf<A>: IntoActiveModel<A>,
    {
        self.apply(&mut am, ChangeKind::Removed);
        Ok(am.update(&self.txn).await?)
    }

    /// Replace every row owned by `owner_id` with `rows`. An empty `rows` clears the collection.
    pub async fn replace_owned<E>(&self, owner_id: i32, rows: Vec<E::ActiveModel>) -> Result<u64, ServiceError>
    where
        E: OwnedCollection,
        E::ActiveModel: ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        let removed = E::delete_many()
            .filter(E::owner_column().eq(owner_id))
            .exec(&self.txn)
            .await?
            .rows_affected;
        let inserted = rows.len() as u64;
        if !rows.is_empty() {
            E::insert_many(rows).exec_without_returning(&self.txn).await?;
        }
        debug!(owner_id, removed, inserted, "owned collection replaced");
        Ok(inserted)
    }

    /// Commit unless the request was cancelled in the meantime.
    pub async fn commit(self, cancel: &CancellationToken) -> Result<(), ServiceError> {
        if cancel.is_cancelled() {
            warn!("request cancelled; rolling back");
            self.txn.rollback().await?;
            return Err(ServiceError::Cancelled);
        }
        self.txn.commit().await?;
        Ok(())
    }

    fn apply<A: Auditable>(&self, am: &mut A, change: ChangeKind) {
        if change == ChangeKind::Added {
            am.clear_id();
        }
        let write = intercept(am, change, now());
        debug!(?change, ?write, id = ?am.audit_id(), "audited write");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;
    use models::types::{PricePlan, StringList};
    use models::{product, product_offering, product_offering_component, SoftDeletable};
    use sea_orm::{EntityTrait, Set};

    use super::*;
    use crate::test_support::get_db;

    fn draft_product(sku: &str) -> product::ActiveModel {
        product::ActiveModel {
            id: Set(999),
            sku: Set(sku.into()),
            name: Set("Widget".into()),
            category: Set(String::new()),
            description: Set(String::new()),
            price_one_off: Set(None),
            price_monthly: Set(None),
            sequence: Set(StringList::default()),
            cfs_ids: Set(Default::default()),
            created_at: Set(Utc::now().fixed_offset() - chrono::Duration::days(30)),
            is_deleted: Set(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn add_discards_caller_id_and_audit_values() -> anyhow::Result<()> {
        let db = get_db().await?;
        let session = AuditSession::begin(&db).await?;
        let created = session.add(draft_product("A")).await?;
        session.commit(&CancellationToken::new()).await?;

        assert_ne!(created.id, 999);
        assert!(!created.is_deleted);
        assert_eq!(created.created_at, created.last_modified);
        assert!(Utc::now().fixed_offset() - created.created_at < chrono::Duration::minutes(1));
        Ok(())
    }

    #[tokio::test]
    async fn remove_flags_row_instead_of_deleting() -> anyhow::Result<()> {
        let db = get_db().await?;
        let session = AuditSession::begin(&db).await?;
        let created = session.add(draft_product("B")).await?;
        session.commit(&CancellationToken::new()).await?;

        tokio::time::sleep(Duration::from_millis(5)).await;
        let session = AuditSession::begin(&db).await?;
        let removed = session.remove(product::ActiveModel::from(created.clone())).await?;
        session.commit(&CancellationToken::new()).await?;

        assert!(removed.is_deleted);
        assert!(removed.last_modified > created.last_modified);
        assert!(product::Entity::find_live_by_id(created.id).one(&db).await?.is_none());
        let raw = product::Entity::find_by_id(created.id).one(&db).await?.expect("row kept");
        assert!(raw.is_deleted);
        assert_eq!(raw.created_at, created.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn dropped_session_rolls_back() -> anyhow::Result<()> {
        let db = get_db().await?;
        {
            let session = AuditSession::begin(&db).await?;
            session.add(draft_product("C")).await?;
        }
        assert!(product::Entity::find_live().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn cancelled_commit_rolls_back() -> anyhow::Result<()> {
        let db = get_db().await?;
        let session = AuditSession::begin(&db).await?;
        session.add(draft_product("D")).await?;
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(matches!(session.commit(&cancel).await, Err(ServiceError::Cancelled)));
        assert!(product::Entity::find_live().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn replace_owned_leaves_exactly_the_new_rows() -> anyhow::Result<()> {
        let db = get_db().await?;
        let session = AuditSession::begin(&db).await?;
        let p1 = session.add(draft_product("P1")).await?;
        let p2 = session.add(draft_product("P2")).await?;
        let mut offering = product_offering::ActiveModel {
            name: Set("Bundle".into()),
            status: Set("active".into()),
            description: Set(String::new()),
            activation_sequence: Set(StringList::default()),
            ..Default::default()
        };
        offering.set_price_plan(PricePlan::default());
        let offering = session.add(offering).await?;

        let row = |product_id: i32, quantity: i32| product_offering_component::ActiveModel {
            product_offering_id: Set(offering.id),
            product_id: Set(product_id),
            quantity: Set(quantity),
            billing: Set("oneOff".into()),
        };
        session
            .replace_owned::<product_offering_component::Entity>(offering.id, vec![row(p1.id, 1), row(p2.id, 2)])
            .await?;
        session
            .replace_owned::<product_offering_component::Entity>(offering.id, vec![row(p2.id, 5)])
            .await?;
        session.commit(&CancellationToken::new()).await?;

        let rows = product_offering_component::Entity::find()
            .filter(product_offering_component::Column::ProductOfferingId.eq(offering.id))
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].product_id, rows[0].quantity), (p2.id, 5));

        let session = AuditSession::begin(&db).await?;
        let inserted = session
            .replace_owned::<product_offering_component::Entity>(offering.id, Vec::new())
            .await?;
        session.commit(&CancellationToken::new()).await?;
        assert_eq!(inserted, 0);
        let rows = product_offering_component::Entity::find()
            .filter(product_offering_component::Column::ProductOfferingId.eq(offering.id))
            .all(&db)
            .await?;
        assert!(rows.is_empty());
        Ok(())
    }
}
