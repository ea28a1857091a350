use sea_orm_migration::prelude::*;

// Partial indexes: an external id is unique among live rows only, so a
// soft-deleted row's id can be taken again. Blank CRM ids are not tracked.
const UP: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_customer_live_crm_id ON customer (crm_id) \
     WHERE NOT is_deleted AND TRIM(crm_id) <> ''",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_ticket_live_ds_id ON ticket (ds_id) WHERE NOT is_deleted",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_ticket_comment_live_ds_id ON ticket_comment (ds_id) WHERE NOT is_deleted",
];

const DOWN: &[&str] = &[
    "DROP INDEX IF EXISTS ux_ticket_comment_live_ds_id",
    "DROP INDEX IF EXISTS ux_ticket_live_ds_id",
    "DROP INDEX IF EXISTS ux_customer_live_crm_id",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in UP {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in DOWN {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }
}
