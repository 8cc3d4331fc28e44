use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::ActiveValue::Set;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{trades, warehouses, waters};

/// Who created a record and who touched it last, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuditStamp {
    pub created_by: i32,
    pub created_time: DateTime<Utc>,
    pub last_updated_by: i32,
    pub last_updated_time: DateTime<Utc>,
}

impl AuditStamp {
    pub fn new(user_id: i32, at: DateTime<Utc>) -> Self {
        Self {
            created_by: user_id,
            created_time: at,
            last_updated_by: user_id,
            last_updated_time: at,
        }
    }

    pub fn from_columns(
        created_by: i32,
        created_time: DateTime<FixedOffset>,
        last_updated_by: i32,
        last_updated_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            created_by,
            created_time: created_time.with_timezone(&Utc),
            last_updated_by,
            last_updated_time: last_updated_time.with_timezone(&Utc),
        }
    }
}

/// Active models that carry the audit columns.
pub trait Stamped {
    fn stamp_created(&mut self, stamp: &AuditStamp);

    fn stamp_updated(&mut self, user_id: i32, at: DateTime<Utc>);
}

macro_rules! impl_stamped {
    ($($model:path),* $(,)?) => {
        $(
            impl Stamped for $model {
                fn stamp_created(&mut self, stamp: &AuditStamp) {
                    self.created_by = Set(stamp.created_by);
                    self.created_time = Set(stamp.created_time.fixed_offset());
                    self.last_updated_by = Set(stamp.last_updated_by);
                    self.last_updated_time = Set(stamp.last_updated_time.fixed_offset());
                }

                fn stamp_updated(&mut self, user_id: i32, at: DateTime<Utc>) {
                    self.last_updated_by = Set(user_id);
                    self.last_updated_time = Set(at.fixed_offset());
                }
            }
        )*
    };
}

impl_stamped!(waters::ActiveModel, warehouses::ActiveModel, trades::ActiveModel);
