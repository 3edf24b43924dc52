use chrono::NaiveDateTime;
use diesel::prelude::*;

use tellerhome_core::enrollments::UserEnrollment;

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserEnrollmentDB {
    pub id: i32,
    pub enrollment_id: String,
    pub user_id: String,
    pub access_token: String,
    pub institution_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_synced: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::user_enrollments)]
pub struct NewUserEnrollmentDB {
    pub enrollment_id: String,
    pub user_id: String,
    pub access_token: String,
    pub institution_name: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserEnrollmentDB> for UserEnrollment {
    fn from(db: UserEnrollmentDB) -> Self {
        Self {
            id: db.id,
            enrollment_id: db.enrollment_id,
            user_id: db.user_id,
            access_token: db.access_token,
            institution_name: db.institution_name,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
            last_synced: db.last_synced,
        }
    }
}
