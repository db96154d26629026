//! The persisted grid record.
//!
//! Only one row is ever used, keyed by [`SINGLETON_ID`]. Payload columns are
//! opaque text owned by the caller.

use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, OnConflict},
    ConnectionTrait, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors;

/// Primary key of the single table state record.
pub const SINGLETON_ID: i32 = 1;

/// Stored record. Payload fields are opaque serialized strings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "table_state")]
#[serde(rename_all = "camelCase")]
#[schema(as = TableState)]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    #[sea_orm(column_type = "Text")]
    pub col_widths: String,
    #[sea_orm(column_type = "Text")]
    pub row_heights: String,
}

pub type TableState = Model;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fetch the singleton record, `None` before the first save.
pub async fn find<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(SINGLETON_ID)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Save the supplied payload columns in one statement and return the row it wrote.
///
/// With all three columns this is an insert-or-overwrite. With some absent,
/// only the supplied columns of the existing record are updated and absent
/// ones keep their stored value; the record cannot be created that way.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    data: Option<&str>,
    col_widths: Option<&str>,
    row_heights: Option<&str>,
) -> Result<Model, errors::ModelError> {
    match (data, col_widths, row_heights) {
        (Some(data), Some(col_widths), Some(row_heights)) => {
            insert_or_overwrite(db, data, col_widths, row_heights).await
        }
        _ => update_supplied(db, data, col_widths, row_heights).await,
    }
}

async fn insert_or_overwrite<C: ConnectionTrait>(
    db: &C,
    data: &str,
    col_widths: &str,
    row_heights: &str,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(SINGLETON_ID),
        data: Set(data.to_string()),
        col_widths: Set(col_widths.to_string()),
        row_heights: Set(row_heights.to_string()),
    };
    Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Data, Column::ColWidths, Column::RowHeights])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

async fn update_supplied<C: ConnectionTrait>(
    db: &C,
    data: Option<&str>,
    col_widths: Option<&str>,
    row_heights: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let supplied = [
        (Column::Data, data),
        (Column::ColWidths, col_widths),
        (Column::RowHeights, row_heights),
    ];
    if supplied.iter().all(|(_, v)| v.is_none()) {
        return find(db).await?.ok_or_else(missing_columns);
    }

    let mut update = Entity::update_many().filter(Column::Id.eq(SINGLETON_ID));
    for (col, value) in supplied {
        if let Some(v) = value {
            update = update.col_expr(col, Expr::value(v.to_string()));
        }
    }
    let rows = update
        .exec_with_returning(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    rows.into_iter().next().ok_or_else(missing_columns)
}

fn missing_columns() -> errors::ModelError {
    errors::ModelError::Db(
        "table_state does not exist yet: data, colWidths and rowHeights are all required to create it".into(),
    )
}
